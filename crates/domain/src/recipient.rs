use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The category a participant registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Video,
    UiUx,
    Graphics,
}

impl Category {
    /// Human readable name used in rendered messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Video => "Video Editing",
            Self::UiUx => "UI/UX Design",
            Self::Graphics => "Graphic Design",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Minimal projection of a participant needed to deliver a message.
/// Owned by the participant store, this subsystem only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: ID,
    pub name: String,
    pub email: String,
    /// Raw phone number, channel specific formatting is applied at send time
    pub phone: String,
    pub category: Category,
}

impl Entity for Recipient {
    fn id(&self) -> &ID {
        &self.id
    }
}
