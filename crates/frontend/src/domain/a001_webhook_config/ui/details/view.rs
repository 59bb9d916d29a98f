use super::view_model::WebhookDetailsViewModel;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn WebhookDetails(
    id: ReadSignal<Option<String>>,
    on_saved: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = WebhookDetailsViewModel::new();

    // Load data when id changes
    {
        let vm_for_effect = vm.clone();
        Effect::new(move |_| {
            let current_id = id.get();
            if current_id.is_some() {
                let id_to_load = if current_id.as_ref().map(|s| s.is_empty()).unwrap_or(false) {
                    None // Создание нового
                } else {
                    current_id // Редактирование существующего
                };
                vm_for_effect.load_or_reset(id_to_load);
            }
        });
    }

    view! {
        <Show when=move || id.get().is_some()>
            {
                let vm = vm.clone();
                move || {
                    // Create all clones needed before view! macro
                    let vm_save_click = vm.clone();
                    let vm_save_disabled = vm.clone();
                    let vm_save_label = vm.clone();
                    let vm_error = vm.clone();
                    let vm_name_value = vm.clone();
                    let vm_name_input = vm.clone();
                    let vm_url_value = vm.clone();
                    let vm_url_input = vm.clone();
                    let vm_comment_value = vm.clone();
                    let vm_comment_input = vm.clone();
                    let vm_active_checked = vm.clone();
                    let vm_active_change = vm.clone();
                    let vm_params = vm.clone();
                    let vm_add_param = vm.clone();

                    // Режим определяется по id, а не по форме: иначе модалка
                    // перерисовывалась бы на каждый ввод символа
                    let is_edit = id
                        .get()
                        .as_deref()
                        .map(|s| !s.is_empty())
                        .unwrap_or(false);
                    let modal_title = if is_edit { "Edit Webhook" } else { "New Webhook" };

                    view! {
                        <Modal title=modal_title.to_string() on_close=on_close>
                            // Action buttons at the top
                            <div class="modal-actions-top">
                                <button
                                    class="button button--primary"
                                    on:click=move |_| vm_save_click.save_command(on_saved)
                                    disabled=move || {
                                        !vm_save_disabled.is_form_valid()()
                                            || vm_save_disabled.is_saving.get()
                                    }
                                >
                                    {icon("save")}
                                    {move || if vm_save_label.is_saving.get() { " Saving..." } else { " Save" }}
                                </button>
                            </div>

                            {move || vm_error.error.get().map(|e| view! {
                                <div class="warning-box text-error">{e}</div>
                            })}

                            <div class="detail-form">
                                <div class="form__group">
                                    <label class="form__label" for="name">{"Name"}</label>
                                    <input
                                        class="form__input"
                                        type="text"
                                        id="name"
                                        prop:value=move || vm_name_value.form.get().description
                                        on:input=move |ev| {
                                            vm_name_input.form.update(|f| f.description = event_target_value(&ev));
                                        }
                                        placeholder="Enter webhook name"
                                    />
                                </div>

                                <div class="form__group">
                                    <label class="form__label" for="url">{"URL"}</label>
                                    <input
                                        class="form__input"
                                        type="url"
                                        id="url"
                                        prop:value=move || vm_url_value.form.get().url
                                        on:input=move |ev| {
                                            vm_url_input.form.update(|f| f.url = event_target_value(&ev));
                                        }
                                        placeholder="https://your-endpoint/webhook/..."
                                    />
                                </div>

                                <div class="form__group">
                                    <label class="form__label">{"Parameters"}</label>
                                    <For
                                        each={
                                            let vm_params_each = vm_params.clone();
                                            move || {
                                                vm_params_each.form.get().parameters.into_iter().enumerate().collect::<Vec<_>>()
                                            }
                                        }
                                        key=|(i, _)| *i
                                        let:item
                                    >
                                        {
                                            let (index, param) = item;
                                            let vm_param_name = vm_params.clone();
                                            let vm_param_value = vm_params.clone();
                                            let vm_param_remove = vm_params.clone();
                                            view! {
                                                <div class="param-row">
                                                    <input
                                                        class="form__input param-row__name"
                                                        type="text"
                                                        prop:value=param.name.clone()
                                                        on:input=move |ev| {
                                                            let value = event_target_value(&ev);
                                                            vm_param_name.form.update(|f| {
                                                                if let Some(p) = f.parameters.get_mut(index) {
                                                                    p.name = value.clone();
                                                                }
                                                            });
                                                        }
                                                        placeholder="name"
                                                    />
                                                    <input
                                                        class="form__input param-row__value"
                                                        type="text"
                                                        prop:value=param.value.clone()
                                                        on:input=move |ev| {
                                                            let value = event_target_value(&ev);
                                                            vm_param_value.form.update(|f| {
                                                                if let Some(p) = f.parameters.get_mut(index) {
                                                                    p.value = value.clone();
                                                                }
                                                            });
                                                        }
                                                        placeholder="value"
                                                    />
                                                    <button
                                                        class="button button--icon"
                                                        on:click=move |_| vm_param_remove.remove_parameter(index)
                                                    >
                                                        {icon("trash")}
                                                    </button>
                                                </div>
                                            }
                                        }
                                    </For>
                                    <button
                                        class="button button--secondary"
                                        on:click=move |_| vm_add_param.add_parameter()
                                    >
                                        {icon("plus")}
                                        " Add parameter"
                                    </button>
                                </div>

                                <div class="form__group">
                                    <label class="form__label" for="comment">{"Comment"}</label>
                                    <textarea
                                        class="form__textarea"
                                        id="comment"
                                        prop:value=move || vm_comment_value.form.get().comment.clone().unwrap_or_default()
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            vm_comment_input.form.update(|f| {
                                                f.comment = if value.is_empty() { None } else { Some(value) };
                                            });
                                        }
                                        placeholder="Enter optional comment"
                                        rows="3"
                                    />
                                </div>

                                <div class="form-group checkbox-group">
                                    <label class="form__checkbox-wrapper">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || vm_active_checked.form.get().is_active
                                            on:change=move |ev| {
                                                vm_active_change.form.update(|f| f.is_active = event_target_checked(&ev));
                                            }
                                        />
                                        <span class="form__checkbox-label">{"Active"}</span>
                                    </label>
                                </div>
                            </div>
                        </Modal>
                    }
                }
            }
        </Show>
    }
}
