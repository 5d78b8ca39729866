// Conversation domain models
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TurnId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    Requester,
    Analyst,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub id: TurnId,
    pub role: TurnRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Only set on the placeholder shown while a response is outstanding
    pub pending: bool,
}

impl ConversationTurn {
    pub fn new(id: TurnId, role: TurnRole, text: String) -> Self {
        Self {
            id,
            role,
            text,
            created_at: Utc::now(),
            pending: false,
        }
    }

    pub fn placeholder(id: TurnId, text: String) -> Self {
        Self {
            pending: true,
            ..Self::new(id, TurnRole::Analyst, text)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingInitialSummary,
    AwaitingFollowUp,
}

impl ConversationState {
    pub fn is_busy(&self) -> bool {
        !matches!(self, ConversationState::Idle)
    }
}
