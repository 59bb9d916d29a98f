use crate::domain::a001_webhook_config::ui::details::WebhookDetails;
use crate::shared::api_utils::api_base;
use crate::shared::icons::icon;
use contracts::domain::a001_webhook_config::aggregate::{WebhookConfig, WebhookDispatchResult};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Debug)]
pub struct WebhookRow {
    pub id: String,
    pub description: String,
    pub url: String,
    pub params_count: usize,
    pub is_active: bool,
    pub created_at: String,
}

impl WebhookRow {
    fn from_aggregate(w: WebhookConfig) -> Self {
        Self {
            id: w.base.id.as_string(),
            description: w.base.description,
            url: w.url,
            params_count: w.parameters.len(),
            is_active: w.is_active,
            created_at: format_timestamp(w.base.metadata.created_at),
        }
    }
}

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[component]
#[allow(non_snake_case)]
pub fn WebhookList(
    /// Вызывается после каждой тестовой отправки с её результатом
    on_dispatched: Callback<WebhookDispatchResult>,
    /// Вызывается при инфраструктурной ошибке (HTTP 5xx, сеть до бэкенда)
    on_error: Callback<String>,
    /// Вызывается после сохранения/удаления, чтобы дашборд обновил данные
    on_changed: Callback<()>,
) -> impl IntoView {
    let (items, set_items) = signal::<Vec<WebhookRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (editing_id, set_editing_id) = signal::<Option<String>>(None);
    let (testing_id, set_testing_id) = signal::<Option<String>>(None);

    let fetch = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_webhooks().await {
                Ok(v) => {
                    let rows = v.into_iter().map(WebhookRow::from_aggregate).collect();
                    let _ = set_items.try_set(rows);
                    let _ = set_error.try_set(None);
                }
                Err(e) => {
                    let _ = set_error.try_set(Some(e));
                }
            }
        });
    };

    let handle_create_new = move || {
        set_editing_id.set(Some(String::new()));
    };

    let handle_edit = move |id: String| {
        set_editing_id.set(Some(id));
    };

    let handle_test = move |id: String| {
        set_testing_id.set(Some(id.clone()));
        wasm_bindgen_futures::spawn_local(async move {
            match test_webhook(&id).await {
                Ok(result) => on_dispatched.run(result),
                Err(e) => on_error.run(format!("Failed to test webhook: {e}")),
            }
            let _ = set_testing_id.try_set(None);
        });
    };

    let handle_delete = move |id: String| {
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message("Delete this webhook?")
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match delete_webhook(&id).await {
                Ok(()) => {
                    fetch();
                    on_changed.run(());
                }
                Err(e) => on_error.run(format!("Failed to delete webhook: {e}")),
            }
        });
    };

    fetch();

    view! {
        <div class="panel">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="panel__title">"Configured Webhooks"</h2>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| handle_create_new()>
                        {icon("plus")}
                        " Add Webhook"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </Space>
            </Flex>

            {move || error.get().map(|e| view! {
                <div class="warning-box text-error">{e}</div>
            })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=true min_width=160.0>"Name"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=240.0>"URL"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=100.0>"Parameters"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=80.0>"Status"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=150.0>"Created At"</TableHeaderCell>
                        <TableHeaderCell resizable=false min_width=160.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|row| {
                        let id_for_link = row.id.clone();
                        let id_for_test = row.id.clone();
                        let id_for_test_disabled = row.id.clone();
                        let id_for_delete = row.id.clone();
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>
                                        <a
                                            href="#"
                                            class="table-link"
                                            on:click=move |e| {
                                                e.prevent_default();
                                                handle_edit(id_for_link.clone());
                                            }
                                        >
                                            {row.description}
                                        </a>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>{row.url}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{row.params_count}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {if row.is_active {
                                            view! { <span class="badge badge--success">"active"</span> }.into_any()
                                        } else {
                                            view! { <span class="badge badge--muted">"inactive"</span> }.into_any()
                                        }}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{row.created_at}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <Space>
                                        <Button
                                            appearance=ButtonAppearance::Secondary
                                            size=ButtonSize::Small
                                            disabled=Signal::derive(move || {
                                                testing_id.get().as_deref() == Some(id_for_test_disabled.as_str())
                                            })
                                            on_click=move |_| handle_test(id_for_test.clone())
                                        >
                                            {icon("check")}
                                            " Test"
                                        </Button>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            size=ButtonSize::Small
                                            on_click=move |_| handle_delete(id_for_delete.clone())
                                        >
                                            {icon("trash")}
                                        </Button>
                                    </Space>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>

            <WebhookDetails
                id=editing_id
                on_saved=Callback::new(move |_| {
                    set_editing_id.set(None);
                    fetch();
                    on_changed.run(());
                })
                on_close=Callback::new(move |_| set_editing_id.set(None))
            />
        </div>
    }
}

pub(crate) async fn fetch_webhooks() -> Result<Vec<WebhookConfig>, String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let url = format!("{}/api/webhook_config", api_base());
    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| format!("{e:?}"))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| format!("{e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    let text: String = text.as_string().ok_or_else(|| "bad text".to_string())?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}

async fn test_webhook(id: &str) -> Result<WebhookDispatchResult, String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);

    let url = format!("{}/api/webhook_config/{}/test", api_base(), id);
    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| format!("{e:?}"))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| format!("{e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    let text: String = text.as_string().ok_or_else(|| "bad text".to_string())?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}

async fn delete_webhook(id: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method("DELETE");
    opts.set_mode(RequestMode::Cors);

    let url = format!("{}/api/webhook_config/{}", api_base(), id);
    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| format!("{e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    Ok(())
}
