use contracts::domain::a002_webhook_log::entry::{WebhookLogEntry, WebhookLogStatus};
use leptos::prelude::*;
use std::collections::HashMap;
use thaw::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
struct WebhookLogRow {
    id: String,
    webhook: String,
    is_success: bool,
    created_at: String,
    details: String,
}

impl WebhookLogRow {
    fn from_entry(entry: &WebhookLogEntry, names: &HashMap<Uuid, String>) -> Self {
        let webhook = names
            .get(&entry.webhook_id)
            .cloned()
            .unwrap_or_else(|| entry.webhook_id.to_string());
        // Как в колонке Details дашборда: текст ошибки либо "Success"
        let details = entry
            .error_message
            .clone()
            .unwrap_or_else(|| "Success".to_string());
        Self {
            id: entry.id.to_string(),
            webhook,
            is_success: entry.status == WebhookLogStatus::Success,
            created_at: entry.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            details,
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn WebhookLogList(
    /// Записи лога, новые сверху (владеет дашборд: он же дописывает их из ленты)
    logs: RwSignal<Vec<WebhookLogEntry>>,
    /// Имена вебхуков для колонки Webhook
    webhook_names: Signal<HashMap<Uuid, String>>,
) -> impl IntoView {
    let rows = Memo::new(move |_| {
        let names = webhook_names.get();
        logs.get()
            .iter()
            .map(|entry| WebhookLogRow::from_entry(entry, &names))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="panel">
            <h2 class="panel__title">"Webhook Logs"</h2>
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell resizable=true min_width=160.0>"Webhook"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=80.0>"Status"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=150.0>"Time"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=240.0>"Details"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For each=move || rows.get() key=|row| row.id.clone() let:row>
                        <TableRow>
                            <TableCell>
                                <TableCellLayout truncate=true>{row.webhook.clone()}</TableCellLayout>
                            </TableCell>
                            <TableCell>
                                <TableCellLayout>
                                    {if row.is_success {
                                        view! { <span class="badge badge--success">"success"</span> }.into_any()
                                    } else {
                                        view! { <span class="badge badge--error">"error"</span> }.into_any()
                                    }}
                                </TableCellLayout>
                            </TableCell>
                            <TableCell>
                                <TableCellLayout>{row.created_at.clone()}</TableCellLayout>
                            </TableCell>
                            <TableCell>
                                <TableCellLayout truncate=true>{row.details.clone()}</TableCellLayout>
                            </TableCell>
                        </TableRow>
                    </For>
                </TableBody>
            </Table>
        </div>
    }
}
