mod chat;
mod notification;
mod scheduler;
mod status;
mod webhook;

pub mod dtos {
    pub use crate::notification::dtos::*;
    pub use crate::scheduler::dtos::*;
    pub use crate::webhook::dtos::*;
}

pub use crate::chat::api::*;
pub use crate::notification::api::*;
pub use crate::scheduler::api::*;
pub use crate::status::api::*;
pub use crate::webhook::api::*;
