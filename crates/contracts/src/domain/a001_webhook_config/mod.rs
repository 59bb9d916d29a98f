pub mod aggregate;

pub use aggregate::{
    build_payload, WebhookConfig, WebhookConfigDto, WebhookConfigId, WebhookDispatchResult,
    WebhookParameter,
};
