mod delivery;
mod notification;
mod recipient;
mod scheduled_job;
mod shared;
pub mod templates;

pub use delivery::{Channel, DeliveryResult, DispatchSummary};
pub use notification::{Notification, NotificationStatus, TargetAudience};
pub use recipient::{Category, Recipient};
pub use scheduled_job::JobTarget;
pub use shared::entity::{Entity, ID};
pub use templates::{
    render_chat, render_email, ChatPayload, EmailAttachment, EmailPayload, MessageKind, Priority,
    TemplateError, QR_CONTENT_ID,
};
