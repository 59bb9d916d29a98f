pub mod entry;

pub use entry::{WebhookLogEntry, WebhookLogStatus};
