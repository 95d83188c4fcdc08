//! Assistant transcript with a strict one-request-at-a-time protocol.

use std::sync::Arc;

use shared::domain::ConversationTurn;
use tracing::{debug, warn};

use crate::{
    async_request::{AsyncRequest, Completion, RequestId},
    backend::AssistantBackend,
};

pub const GREETING: &str =
    "Hey! I'm your AI Party Planner. Need help with a budget or mix suggestions?";
pub const FALLBACK_REPLY: &str = "Sorry, the music is too loud! I couldn't hear that. Try again?";

/// Completion tagged with the query text it answers.
pub type ReplyCompletion = Completion<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejection {
    EmptyDraft,
    AwaitingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent(RequestId),
    Ignored(SendRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyApplied {
    Answered,
    FellBack,
    /// Not the outstanding request.
    Ignored,
}

pub struct ConversationController {
    backend: Arc<dyn AssistantBackend>,
    requests: AsyncRequest<String, String>,
    turns: Vec<ConversationTurn>,
    draft: String,
    outstanding: Option<RequestId>,
}

impl ConversationController {
    pub fn new(backend: Arc<dyn AssistantBackend>) -> Self {
        Self {
            backend,
            requests: AsyncRequest::new(),
            turns: vec![ConversationTurn::assistant(GREETING)],
            draft: String::new(),
            outstanding: None,
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.outstanding.is_some()
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn send(&mut self) -> SendOutcome {
        if self.outstanding.is_some() {
            return SendOutcome::Ignored(SendRejection::AwaitingResponse);
        }
        let text = self.draft.trim();
        if text.is_empty() {
            return SendOutcome::Ignored(SendRejection::EmptyDraft);
        }

        let text = text.to_string();
        self.draft.clear();
        self.turns.push(ConversationTurn::user(text.clone()));

        let backend = Arc::clone(&self.backend);
        let query = text.clone();
        let id = self
            .requests
            .issue(text, async move { backend.ask(&query).await });
        self.outstanding = Some(id);
        debug!(request_id = id.0, "conversation: query issued");
        SendOutcome::Sent(id)
    }

    pub fn apply_completion(&mut self, completion: ReplyCompletion) -> ReplyApplied {
        if self.outstanding != Some(completion.id) {
            debug!(
                request_id = completion.id.0,
                "conversation: ignoring reply for a request that is not outstanding"
            );
            return ReplyApplied::Ignored;
        }
        self.outstanding = None;

        match completion.outcome {
            Ok(answer) => {
                self.turns.push(ConversationTurn::assistant(answer));
                ReplyApplied::Answered
            }
            Err(err) => {
                warn!(
                    request_id = completion.id.0,
                    error = %err,
                    "conversation: assistant query failed; replying with fallback"
                );
                debug!(
                    request_id = completion.id.0,
                    query = %completion.tag,
                    "conversation: failed query text"
                );
                self.turns.push(ConversationTurn::assistant(FALLBACK_REPLY));
                ReplyApplied::FellBack
            }
        }
    }

    /// Waits for the outstanding reply and appends it. Cancel safe.
    pub async fn resolve_next(&mut self) -> ReplyApplied {
        let completion = self.requests.next_completion().await;
        self.apply_completion(completion)
    }

    pub fn drain_ready(&mut self) -> Vec<ReplyApplied> {
        let mut applied = Vec::new();
        while let Some(completion) = self.requests.try_completion() {
            applied.push(self.apply_completion(completion));
        }
        applied
    }
}

#[cfg(test)]
#[path = "tests/conversation_tests.rs"]
mod tests;
