// src/chat/service.rs

use std::sync::Arc;

use serde::Serialize;
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

use crate::error::{ChatError, ChatResult, IgnoreMissing};
use crate::identity::Caller;
use crate::learning::{IngestReport, PageFetcher, WebLearner};
use crate::messages::{ChatMessage, MessageLog, Role};
use crate::training::{
    Command, EntryId, NewEntry, PatternStore, ResponseMatcher, TrainingEntry, command,
};

pub const TRAINED_ACK: &str = "Thanks! I've learned that new response pattern.";
pub const LEARNING_ACK: &str = "Learning from URL...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Trained,
    Learning,
    Matched,
    Fallback,
}

/// The assistant's answer to one turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub kind: ReplyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<EntryId>,
}

pub struct ChatService {
    patterns: Arc<dyn PatternStore>,
    messages: Arc<dyn MessageLog>,
    matcher: ResponseMatcher,
    learner: Arc<WebLearner>,
    jobs: TaskTracker,
}

impl ChatService {
    pub fn new(
        patterns: Arc<dyn PatternStore>,
        messages: Arc<dyn MessageLog>,
        fetcher: Arc<dyn PageFetcher>,
        min_rating: Option<f64>,
    ) -> Self {
        let matcher = ResponseMatcher::new(patterns.clone()).with_min_rating(min_rating);
        let learner = Arc::new(WebLearner::new(patterns.clone(), fetcher));

        Self {
            patterns,
            messages,
            matcher,
            learner,
            jobs: TaskTracker::new(),
        }
    }

    /// Handles one chat turn: records the user's message, runs at most one of
    /// {training insert, learning dispatch, matcher}, records and returns the reply.
    pub async fn send_message(&self, caller: &Caller, content: &str) -> ChatResult<ChatReply> {
        let user = caller.require_user()?;
        self.messages.append(user, Role::User, content).await?;

        let reply = match command::parse(content) {
            Command::Train { pattern, response } => {
                info!("Training command from {}", user);
                let id = self
                    .patterns
                    .add(NewEntry::user(pattern, response, user.clone()))
                    .await?;
                ChatReply {
                    reply: TRAINED_ACK.to_string(),
                    kind: ReplyKind::Trained,
                    entry_id: id,
                }
            }
            Command::Learn { url } => {
                info!("Learning command from {} for {}", user, url);
                // Acknowledge first; the job may outlive this turn
                self.messages.append(user, Role::Assistant, LEARNING_ACK).await?;
                self.dispatch_learning(url);
                return Ok(ChatReply {
                    reply: LEARNING_ACK.to_string(),
                    kind: ReplyKind::Learning,
                    entry_id: None,
                });
            }
            Command::Chat => {
                let outcome = self.matcher.respond(content).await?;
                let kind = if outcome.is_fallback() {
                    ReplyKind::Fallback
                } else {
                    ReplyKind::Matched
                };
                ChatReply {
                    reply: outcome.response,
                    kind,
                    entry_id: outcome.entry_id,
                }
            }
        };

        self.messages
            .append(user, Role::Assistant, &reply.reply)
            .await?;
        Ok(reply)
    }

    /// Adds a user-sourced entry owned by the caller.
    pub async fn train(&self, caller: &Caller, pattern: &str, response: &str) -> ChatResult<EntryId> {
        let user = caller.require_user()?;
        self.patterns
            .add(NewEntry::user(pattern, response, user.clone()))
            .await?
            .ok_or_else(|| ChatError::invalid_input("pattern and response must not be empty"))
    }

    /// Folds a rating into the entry's running rating. Unknown ids are ignored.
    pub async fn rate_response(&self, caller: &Caller, id: EntryId, rating: f64) -> ChatResult<()> {
        caller.require_user()?;
        if !rating.is_finite() {
            return Err(ChatError::invalid_input("rating must be a finite number"));
        }

        if self.patterns.apply_rating(id, rating).await.ignore_missing()?.is_some() {
            debug!("Applied rating {} to entry {}", rating, id);
        }
        Ok(())
    }

    /// The caller's transcript, oldest first. Anonymous callers get an empty list.
    pub async fn list_messages(&self, caller: &Caller) -> ChatResult<Vec<ChatMessage>> {
        match caller.current_user() {
            Some(user) => self.messages.list(user).await,
            None => Ok(Vec::new()),
        }
    }

    /// Every training entry, newest first. Anonymous callers get an empty list.
    pub async fn list_training(&self, caller: &Caller) -> ChatResult<Vec<TrainingEntry>> {
        if caller.current_user().is_none() {
            return Ok(Vec::new());
        }
        self.patterns.list_recent().await
    }

    /// Runs web learning for `url` and waits for the report.
    pub async fn learn_now(&self, caller: &Caller, url: &str) -> ChatResult<IngestReport> {
        let user = caller.require_user()?;
        info!("Awaited learning from {} requested by {}", url, user);
        Ok(self.learner.learn(url).await)
    }

    /// Starts a learning job without waiting for it. Its outcome is only logged.
    pub fn dispatch_learning(&self, url: &str) {
        let learner = self.learner.clone();
        let url = url.to_string();
        self.jobs.spawn(async move {
            let report = learner.learn(&url).await;
            debug!("Learning job finished: {:?}", report);
        });
    }

    pub fn pending_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Waits until every dispatched learning job has finished.
    pub async fn drain_jobs(&self) {
        self.jobs.close();
        self.jobs.wait().await;
        self.jobs.reopen();
    }
}
