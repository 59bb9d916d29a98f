use crate::app::Page;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn TopHeader(page: RwSignal<Page>) -> impl IntoView {
    let chat_appearance = Signal::derive(move || {
        if page.get() == Page::Chat {
            ButtonAppearance::Primary
        } else {
            ButtonAppearance::Secondary
        }
    });
    let dashboard_appearance = Signal::derive(move || {
        if page.get() == Page::Dashboard {
            ButtonAppearance::Primary
        } else {
            ButtonAppearance::Secondary
        }
    });

    view! {
        <header class="top-header">
            <h1 class="top-header__title">"Assistant Console"</h1>
            <div class="top-header__nav">
                <Button
                    appearance=chat_appearance
                    on_click=move |_| page.set(Page::Chat)
                >
                    "Chat"
                </Button>
                <Button
                    appearance=dashboard_appearance
                    on_click=move |_| page.set(Page::Dashboard)
                >
                    "Dashboard"
                </Button>
            </div>
        </header>
    }
}
