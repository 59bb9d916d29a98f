use crate::chat::ChatPage;
use crate::dashboards::webhook_admin::WebhookAdminDashboard;
use crate::layout::header::TopHeader;
use leptos::prelude::*;
use thaw::*;

/// Страницы приложения
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Chat,
    Dashboard,
}

#[component]
pub fn App() -> impl IntoView {
    let page = RwSignal::new(Page::Chat);

    view! {
        <ToasterProvider>
            <div class="app-shell">
                <TopHeader page=page />
                <main class="app-main">
                    {move || match page.get() {
                        Page::Chat => view! { <ChatPage /> }.into_any(),
                        Page::Dashboard => view! { <WebhookAdminDashboard /> }.into_any(),
                    }}
                </main>
            </div>
        </ToasterProvider>
    }
}
