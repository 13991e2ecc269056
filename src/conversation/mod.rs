//! Conversation controller.
//!
//! Holds the chat history, the composer draft and the phase. Transitions are
//! pure: `submit` hands back the request to dispatch and `on_gateway_result`
//! folds the answer in. Nothing here touches the network.

use crate::gateway::GatewayError;
use serde::{Deserialize, Serialize};

pub mod script;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The single outstanding gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub ticket: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Idle,
    Waiting(InFlight),
}

/// Everything the gateway needs for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    pub ticket: u64,
    pub system: &'static str,
    pub messages: Vec<Message>,
}

#[derive(Debug)]
pub struct GatewayOutcome {
    pub ticket: u64,
    pub result: Result<Message, GatewayError>,
}

#[derive(Debug, Clone)]
pub struct ConversationState {
    phase: Phase,
    history: Vec<Message>,
    draft: String,
    next_ticket: u64,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            phase: Phase::NotStarted,
            history: Vec::new(),
            draft: String::new(),
            next_ticket: 1,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.phase, Phase::Waiting(_))
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Idle && !self.draft().trim().is_empty()
    }

    /// Leaves the entry screen and seeds the scripted greeting.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }
        self.history.push(Message::assistant(script::GREETING));
        self.phase = Phase::Idle;
        true
    }

    pub fn submit(&mut self, text: &str) -> Option<GatewayRequest> {
        let text = text.trim();
        if text.is_empty() || self.phase != Phase::Idle {
            return None;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        self.history.push(Message::user(text));
        self.draft.clear();
        self.phase = Phase::Waiting(InFlight { ticket });

        Some(GatewayRequest {
            ticket,
            system: script::SYSTEM_INSTRUCTION,
            messages: self.history.clone(),
        })
    }

    pub fn submit_draft(&mut self) -> Option<GatewayRequest> {
        let draft = self.draft.clone();
        self.submit(&draft)
    }

    /// Returns `false` when the outcome does not belong to the call in flight.
    pub fn on_gateway_result(&mut self, outcome: GatewayOutcome) -> bool {
        match self.phase {
            Phase::Waiting(in_flight) if in_flight.ticket == outcome.ticket => {}
            _ => return false,
        }

        let reply = match outcome.result {
            Ok(message) => Message::assistant(message.content),
            Err(_) => Message::assistant(script::FALLBACK),
        };
        self.history.push(reply);
        self.phase = Phase::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn started() -> ConversationState {
        let mut state = ConversationState::new();
        assert!(state.start());
        state
    }

    fn ok(ticket: u64, text: &str) -> GatewayOutcome {
        GatewayOutcome {
            ticket,
            result: Ok(Message::assistant(text)),
        }
    }

    fn failed(ticket: u64) -> GatewayOutcome {
        GatewayOutcome {
            ticket,
            result: Err(GatewayError::unavailable("connection refused")),
        }
    }

    #[test]
    fn start_seeds_exactly_the_greeting() {
        let state = started();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.history(), &[Message::assistant(script::GREETING)]);
    }

    #[test]
    fn start_twice_is_a_no_op() {
        let mut state = started();
        assert!(!state.start());
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn submit_before_start_is_ignored() {
        let mut state = ConversationState::new();
        assert!(state.submit("hello").is_none());
        assert_eq!(state.phase(), Phase::NotStarted);
        assert!(state.history().is_empty());
    }

    #[test]
    fn whitespace_submission_changes_nothing() {
        let mut state = started();
        *state.draft_mut() = "   \n\t".to_string();
        assert!(state.submit_draft().is_none());
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.draft(), "   \n\t");
    }

    #[test]
    fn submit_enters_waiting_and_clears_draft() {
        let mut state = started();
        *state.draft_mut() = "  skills: writing  ".to_string();
        let request = state.submit_draft().expect("idle state should accept text");

        assert!(state.is_waiting());
        assert_eq!(state.draft(), "");
        assert_eq!(request.system, script::SYSTEM_INSTRUCTION);
        assert_eq!(
            request.messages,
            vec![
                Message::assistant(script::GREETING),
                Message::user("skills: writing"),
            ]
        );
    }

    #[test]
    fn submit_while_waiting_is_rejected() {
        let mut state = started();
        let first = state.submit("one").expect("first submit should dispatch");
        let before = state.history().to_vec();

        assert!(state.submit("two").is_none());
        assert_eq!(state.history(), before.as_slice());
        assert_eq!(state.phase(), Phase::Waiting(InFlight { ticket: first.ticket }));
    }

    #[test]
    fn success_appends_user_then_assistant() {
        let mut state = started();
        let request = state.submit("skills: writing").expect("should dispatch");
        assert!(state.on_gateway_result(ok(request.ticket, "Noted.")));

        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(
            state.history(),
            &[
                Message::assistant(script::GREETING),
                Message::user("skills: writing"),
                Message::assistant("Noted."),
            ]
        );
    }

    #[test]
    fn failure_appends_fallback() {
        let mut state = started();
        let request = state.submit("access: none").expect("should dispatch");
        assert!(state.on_gateway_result(failed(request.ticket)));

        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(
            &state.history()[1..],
            &[Message::user("access: none"), Message::assistant(script::FALLBACK)]
        );
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut state = started();
        let request = state.submit("one").expect("should dispatch");
        assert!(!state.on_gateway_result(ok(request.ticket + 1, "late")));
        assert!(state.is_waiting());
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn outcome_while_idle_is_discarded() {
        let mut state = started();
        assert!(!state.on_gateway_result(ok(1, "unsolicited")));
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn resubmit_after_failure_uses_new_ticket() {
        let mut state = started();
        let first = state.submit("one").expect("should dispatch");
        state.on_gateway_result(failed(first.ticket));
        let second = state.submit("one").expect("idle again after failure");
        assert!(second.ticket > first.ticket);
        assert_eq!(second.messages.len(), 4);
    }

    #[test]
    fn role_serializes_lowercase() {
        let value = serde_json::to_value(Message::user("hi")).expect("message should serialize");
        assert_eq!(value, serde_json::json!({ "role": "user", "content": "hi" }));
    }

    proptest! {
        #[test]
        fn blank_text_never_mutates(blank in "[ \t\r\n]{0,12}") {
            let mut state = started();
            prop_assert!(state.submit(&blank).is_none());
            prop_assert_eq!(state.phase(), Phase::Idle);
            prop_assert_eq!(state.history().len(), 1);
        }

        #[test]
        fn history_alternates_after_greeting(
            turns in proptest::collection::vec(("[a-z]{1,8}", any::<bool>()), 1..12)
        ) {
            let mut state = started();
            for (text, succeed) in &turns {
                let request = state.submit(text).expect("idle state should dispatch");
                let outcome = if *succeed { ok(request.ticket, "Noted.") } else { failed(request.ticket) };
                prop_assert!(state.on_gateway_result(outcome));
            }

            let history = state.history();
            prop_assert_eq!(history.len(), 1 + turns.len() * 2);
            for (index, message) in history.iter().enumerate().skip(1) {
                let expected = if index % 2 == 1 { Role::User } else { Role::Assistant };
                prop_assert_eq!(message.role, expected);
            }
        }

        #[test]
        fn mismatched_ticket_never_applies(offset in 1u64..1000) {
            let mut state = started();
            let request = state.submit("one").expect("should dispatch");
            prop_assert!(!state.on_gateway_result(ok(request.ticket + offset, "late")));
            prop_assert!(state.is_waiting());
        }
    }
}
