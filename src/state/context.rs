//! Session state
//!
//! One `SessionState` per (user, chat) pair tracks where that user is in a
//! guided query flow and what they have answered so far.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{ConversationType, ResultList, TransportMode};

/// Key of one conversation: a user within a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub user_id: i64,
    pub chat_id: i64,
}

impl SessionKey {
    pub fn new(user_id: i64, chat_id: i64) -> Self {
        Self { user_id, chat_id }
    }
}

/// Position in the guided flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationStep {
    AwaitingDeparture,
    AwaitingArrival,
    AwaitingDate,
    AwaitingTransport,
    ViewingResults,
}

/// Mutable state of one in-progress conversation.
///
/// `step == None` means no conversation is active; `cached_results` is only
/// populated once a search succeeded and the viewing step needs the full list.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub step: Option<ConversationStep>,
    pub conversation_type: Option<ConversationType>,
    pub departure_station: Option<String>,
    pub arrival_station: Option<String>,
    pub date: Option<NaiveDate>,
    pub transport_mode: Option<TransportMode>,
    pub cached_results: Option<ResultList>,
    pub updated_at: DateTime<Utc>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            step: None,
            conversation_type: None,
            departure_station: None,
            arrival_station: None,
            date: None,
            transport_mode: None,
            cached_results: None,
            updated_at: Utc::now(),
        }
    }
}

impl SessionState {
    /// Begin a fresh conversation, discarding anything collected before
    pub fn start(&mut self, conversation_type: ConversationType) {
        *self = SessionState::default();
        self.conversation_type = Some(conversation_type);
        self.step = Some(ConversationStep::AwaitingDeparture);
    }

    /// Advance to the given step
    pub fn advance(&mut self, step: ConversationStep) {
        self.step = Some(step);
        self.updated_at = Utc::now();
    }

    /// Terminal outcome: back to the implicit initial state
    pub fn reset(&mut self) {
        *self = SessionState::default();
    }

    pub fn is_active(&self) -> bool {
        self.step.is_some()
    }
}
