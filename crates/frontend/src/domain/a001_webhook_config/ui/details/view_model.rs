use super::model;
use contracts::domain::a001_webhook_config::aggregate::{WebhookConfigDto, WebhookParameter};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;

/// ViewModel for the webhook details form
///
/// Uses simplified MVVM pattern:
/// - Form data stored directly as WebhookConfigDto (no intermediate FormState)
/// - Commands for complex operations (save, load)
#[derive(Clone)]
pub struct WebhookDetailsViewModel {
    pub form: RwSignal<WebhookConfigDto>,
    pub error: RwSignal<Option<String>>,
    pub is_saving: RwSignal<bool>,
}

impl WebhookDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(WebhookConfigDto::default()),
            error: RwSignal::new(None),
            is_saving: RwSignal::new(false),
        }
    }

    /// Reset form to default state
    pub fn reset_form(&self) {
        self.form.set(WebhookConfigDto {
            is_active: true,
            ..WebhookConfigDto::default()
        });
        self.error.set(None);
        self.is_saving.set(false);
    }

    pub fn is_edit_mode(&self) -> impl Fn() -> bool + '_ {
        move || self.form.get().id.is_some()
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || {
            let f = self.form.get();
            !f.description.trim().is_empty() && !f.url.trim().is_empty()
        }
    }

    /// Добавить пустую строку параметра
    pub fn add_parameter(&self) {
        self.form
            .update(|f| f.parameters.push(WebhookParameter::default()));
    }

    /// Удалить строку параметра по индексу
    pub fn remove_parameter(&self, index: usize) {
        self.form.update(|f| {
            if index < f.parameters.len() {
                f.parameters.remove(index);
            }
        });
    }

    /// Load form data from server if ID is provided, otherwise reset to default
    pub fn load_or_reset(&self, id: Option<String>) {
        if let Some(existing_id) = id {
            let form = self.form;
            let error = self.error;
            wasm_bindgen_futures::spawn_local(async move {
                match model::fetch_by_id(existing_id).await {
                    Ok(aggregate) => {
                        let dto = WebhookConfigDto {
                            id: Some(aggregate.base.id.as_string()),
                            code: Some(aggregate.base.code),
                            description: aggregate.base.description,
                            url: aggregate.url,
                            comment: aggregate.base.comment,
                            parameters: aggregate.parameters,
                            is_active: aggregate.is_active,
                        };
                        let _ = form.try_set(dto);
                    }
                    Err(e) => {
                        let _ = error.try_set(Some(format!("Failed to load: {}", e)));
                    }
                }
            });
        } else {
            // Создание нового - сбрасываем форму
            self.reset_form();
        }
    }

    /// Save form data to server
    pub fn save_command(&self, on_saved: Callback<()>) {
        let current = self.form.get();

        // Validate
        if current.description.trim().is_empty() {
            self.error.set(Some("Name is required".to_string()));
            return;
        }
        if current.url.trim().is_empty() {
            self.error.set(Some("URL is required".to_string()));
            return;
        }
        if !current.url.starts_with("http://") && !current.url.starts_with("https://") {
            self.error
                .set(Some("URL must start with http:// or https://".to_string()));
            return;
        }

        self.is_saving.set(true);
        let error = self.error;
        let is_saving = self.is_saving;
        wasm_bindgen_futures::spawn_local(async move {
            match model::save_form(&current).await {
                Ok(()) => {
                    let _ = is_saving.try_set(false);
                    on_saved.run(());
                }
                Err(e) => {
                    let _ = error.try_set(Some(e));
                    let _ = is_saving.try_set(false);
                }
            }
        });
    }
}
