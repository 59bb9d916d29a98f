pub mod webhook_admin;
