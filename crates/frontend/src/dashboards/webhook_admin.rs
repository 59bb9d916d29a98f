//! Административный дашборд вебхуков
//!
//! Владеет всем состоянием страницы: списком логов, картой имён вебхуков,
//! "последним ответом" и подпиской на SSE-ленту. Подписка закрывается в
//! `on_cleanup` при уходе со страницы.

use crate::domain::a001_webhook_config::ui::list::{fetch_webhooks, WebhookList};
use crate::domain::a002_webhook_log::feed;
use crate::domain::a002_webhook_log::ui::list::WebhookLogList;
use crate::shared::api_utils::api_base;
use contracts::domain::a001_webhook_config::aggregate::WebhookDispatchResult;
use contracts::domain::a002_webhook_log::entry::{WebhookLogEntry, WebhookLogStatus};
use leptos::prelude::*;
use std::collections::HashMap;
use thaw::*;
use uuid::Uuid;

fn notify(toaster: ToasterInjection, intent: ToastIntent, title: String, body: String) {
    toaster.dispatch_toast(
        move || {
            view! {
                <Toast>
                    <ToastTitle>{title}</ToastTitle>
                    <ToastBody>{body}</ToastBody>
                </Toast>
            }
            .into_any()
        },
        ToastOptions::default().with_intent(intent),
    );
}

#[component]
#[allow(non_snake_case)]
pub fn WebhookAdminDashboard() -> impl IntoView {
    let toaster = ToasterInjection::expect_context();

    let logs = RwSignal::new(Vec::<WebhookLogEntry>::new());
    let (webhook_names, set_webhook_names) = signal::<HashMap<Uuid, String>>(HashMap::new());
    let last_response = RwSignal::new(Option::<String>::None);

    let fetch_names = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_webhooks().await {
                Ok(items) => {
                    let map: HashMap<Uuid, String> = items
                        .into_iter()
                        .map(|w| (w.base.id.value(), w.base.description))
                        .collect();
                    let _ = set_webhook_names.try_set(map);
                }
                Err(e) => log::warn!("Failed to load webhook names: {e}"),
            }
        });
    };

    let fetch_logs = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_recent_logs().await {
                Ok(items) => {
                    let _ = logs.try_set(items);
                }
                Err(e) => log::warn!("Failed to load webhook logs: {e}"),
            }
        });
    };

    fetch_names();
    fetch_logs();

    // Живая лента: каждая новая запись лога — toast плюс строка таблицы
    {
        let toaster = toaster.clone();
        let subscription = feed::subscribe(move |entry| {
            let status_text = entry.status.as_str();
            let intent = if entry.status == WebhookLogStatus::Success {
                ToastIntent::Success
            } else {
                ToastIntent::Error
            };
            notify(
                toaster.clone(),
                intent,
                "Webhook delivery".to_string(),
                format!("Delivery finished with status: {status_text}"),
            );
            let _ = logs.try_update(|l| l.insert(0, entry));
        });
        match subscription {
            Ok(handle) => {
                let handle = leptos::__reexports::send_wrapper::SendWrapper::new(handle);
                on_cleanup(move || handle.close());
            }
            Err(e) => log::warn!("Failed to subscribe to log feed: {e}"),
        }
    }

    let on_dispatched = Callback::new(move |result: WebhookDispatchResult| {
        let text = result.response.unwrap_or_else(|| result.message.clone());
        let _ = last_response.try_set(Some(text));
    });

    let on_error = {
        let toaster = toaster.clone();
        Callback::new(move |message: String| {
            notify(toaster.clone(), ToastIntent::Error, "Error".to_string(), message);
        })
    };

    let on_changed = Callback::new(move |_| fetch_names());

    view! {
        <div class="dashboard-page">
            <WebhookList on_dispatched=on_dispatched on_error=on_error on_changed=on_changed />

            {move || last_response.get().map(|text| view! {
                <div class="panel">
                    <h2 class="panel__title">"Last Response"</h2>
                    <pre class="last-response">{text}</pre>
                </div>
            })}

            <WebhookLogList logs=logs webhook_names=webhook_names.into() />
        </div>
    }
}

async fn fetch_recent_logs() -> Result<Vec<WebhookLogEntry>, String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let url = format!("{}/api/webhook_log?limit=50", api_base());
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
