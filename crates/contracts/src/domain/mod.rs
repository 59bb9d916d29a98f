pub mod common;

pub mod a001_webhook_config;
pub mod a002_webhook_log;
