use super::view_model::ChatVm;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn ChatPage() -> impl IntoView {
    let vm = ChatVm::new();
    let messages_container_ref = NodeRef::<leptos::html::Div>::new();

    // Scroll to bottom when messages change
    Effect::new(move |_| {
        let _ = vm.messages.get();
        if let Some(container) = messages_container_ref.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    let handle_send = move || vm.send_command();

    let send_disabled =
        move || vm.is_loading.get() || vm.new_message.get().trim().is_empty();

    view! {
        <div class="chat-page">
            <div node_ref=messages_container_ref class="chat-page__messages">
                <For
                    each={move || vm.messages.get().into_iter().enumerate().collect::<Vec<_>>()}
                    key=|(i, _)| *i
                    let:item
                >
                    {
                        let (_, msg) = item;
                        let bubble_class = if msg.is_assistant {
                            "chat-message chat-message--assistant"
                        } else {
                            "chat-message chat-message--user"
                        };
                        view! {
                            <div class=bubble_class>
                                <div class="chat-message__bubble">{msg.content.clone()}</div>
                            </div>
                        }
                    }
                </For>
                <Show when=move || vm.is_loading.get()>
                    <div class="chat-message chat-message--assistant">
                        <div class="chat-message__bubble chat-message__bubble--typing">
                            "..."
                        </div>
                    </div>
                </Show>
            </div>

            <div class="chat-page__input">
                <input
                    class="form__input"
                    type="text"
                    prop:value=move || vm.new_message.get()
                    on:input=move |ev| vm.new_message.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            handle_send();
                        }
                    }
                    placeholder="Type your message..."
                />
                <button
                    class="button button--primary"
                    on:click=move |_| handle_send()
                    disabled=send_disabled
                >
                    {icon("send")}
                    " Send"
                </button>
            </div>
        </div>
    }
}
