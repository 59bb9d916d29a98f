//! Подписка на SSE-ленту лога доставки
//!
//! Подписка — это владеющий handle: он держит EventSource и callback-замыкание
//! и обязан быть закрыт при размонтировании дашборда (`on_cleanup`).

use crate::shared::api_utils::api_url;
use contracts::domain::a002_webhook_log::entry::WebhookLogEntry;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub struct LogFeedHandle {
    source: web_sys::EventSource,
    // Замыкание должно жить, пока открыт EventSource
    _on_message: Closure<dyn FnMut(web_sys::MessageEvent)>,
}

impl LogFeedHandle {
    /// Закрыть подписку; дальнейшие события не доставляются
    pub fn close(&self) {
        self.source.close();
    }
}

/// Открыть подписку на новые записи лога
pub fn subscribe(on_entry: impl Fn(WebhookLogEntry) + 'static) -> Result<LogFeedHandle, String> {
    let url = api_url("/api/webhook_log/stream");
    let source = web_sys::EventSource::new(&url).map_err(|e| format!("{e:?}"))?;

    let on_message = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(
        move |event: web_sys::MessageEvent| {
            if let Some(text) = event.data().as_string() {
                match serde_json::from_str::<WebhookLogEntry>(&text) {
                    Ok(entry) => on_entry(entry),
                    Err(e) => log::warn!("Failed to parse log feed event: {e}"),
                }
            }
        },
    );
    source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

    Ok(LogFeedHandle {
        source,
        _on_message: on_message,
    })
}
