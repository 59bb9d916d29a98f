mod view;
mod view_model;

pub use view::ChatPage;
pub use view_model::{ChatMessage, ChatVm};
