use leptos::prelude::*;

/// Ответ ассистента имитируется на клиенте с фиксированной задержкой
const ASSISTANT_REPLY: &str = "I'm your assistant! How can I help you today?";
const ASSISTANT_REPLY_DELAY_MS: u32 = 2_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub content: String,
    pub is_assistant: bool,
}

/// ViewModel страницы чата
///
/// Всё состояние локально для страницы: история сообщений, поле ввода и
/// индикатор ожидания ответа.
#[derive(Clone, Copy)]
pub struct ChatVm {
    pub messages: RwSignal<Vec<ChatMessage>>,
    pub new_message: RwSignal<String>,
    pub is_loading: RwSignal<bool>,
}

impl ChatVm {
    pub fn new() -> Self {
        Self {
            messages: RwSignal::new(Vec::new()),
            new_message: RwSignal::new(String::new()),
            is_loading: RwSignal::new(false),
        }
    }

    /// Отправить сообщение и запланировать имитацию ответа
    pub fn send_command(&self) {
        let content = self.new_message.get();
        if content.trim().is_empty() {
            return;
        }

        self.messages.update(|m| {
            m.push(ChatMessage {
                content,
                is_assistant: false,
            })
        });
        self.new_message.set(String::new());
        self.is_loading.set(true);

        let messages = self.messages;
        let is_loading = self.is_loading;
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(ASSISTANT_REPLY_DELAY_MS).await;
            // try_*: страница могла быть размонтирована, пока шла задержка
            let _ = messages.try_update(|m| {
                m.push(ChatMessage {
                    content: ASSISTANT_REPLY.to_string(),
                    is_assistant: true,
                })
            });
            let _ = is_loading.try_set(false);
        });
    }
}

impl Default for ChatVm {
    fn default() -> Self {
        Self::new()
    }
}
