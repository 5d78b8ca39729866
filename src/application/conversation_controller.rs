// Conversation controller - One analysis exchange per selected dashboard
//
// Every request captures the generation counter when it starts. A subject
// change bumps the counter, so replies that arrive for an older subject are
// dropped instead of overwriting the newer conversation.
use crate::application::analysis_client::{AnalysisClient, AnalysisRequest};
use crate::domain::conversation::{ConversationState, ConversationTurn, TurnId, TurnRole};
use crate::domain::dashboard::{Category, LocalizedText};
use crate::domain::locale::Locale;
use crate::domain::telemetry::TimeSeriesPoint;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;

const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// What the conversation is about. The title is resolved against the
/// controller's locale each time a request or snapshot is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub id: String,
    pub title: LocalizedText,
    pub category: Category,
}

impl Subject {
    pub fn name(&self, locale: Locale) -> &str {
        self.title.get(locale)
    }
}

/// The subject as seen in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectView {
    pub id: String,
    pub name: String,
    pub category: Category,
}

#[derive(Debug, Clone)]
pub struct SubjectChange {
    pub subject: Subject,
    pub series: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationSnapshot {
    pub generation: u64,
    pub state: ConversationState,
    pub busy: bool,
    pub subject: Option<SubjectView>,
    pub turns: Vec<ConversationTurn>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PendingKind {
    InitialSummary { placeholder: TurnId },
    FollowUp,
}

/// A request that has been started but whose reply is not yet applied
#[derive(Debug)]
pub struct PendingAnalysis {
    generation: u64,
    kind: PendingKind,
    request: AnalysisRequest,
}

#[derive(Default)]
struct Inner {
    generation: u64,
    next_turn_id: u64,
    state: ConversationState,
    subject: Option<Subject>,
    series: Vec<TimeSeriesPoint>,
    locale: Locale,
    turns: Vec<ConversationTurn>,
}

impl Inner {
    fn next_id(&mut self) -> TurnId {
        self.next_turn_id += 1;
        TurnId(self.next_turn_id)
    }

    fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            generation: self.generation,
            state: self.state,
            busy: self.state.is_busy(),
            subject: self.subject.as_ref().map(|s| SubjectView {
                id: s.id.clone(),
                name: s.name(self.locale).to_string(),
                category: s.category,
            }),
            turns: self.turns.clone(),
        }
    }
}

pub struct ConversationController {
    client: AnalysisClient,
    inner: Mutex<Inner>,
    updates: broadcast::Sender<ConversationSnapshot>,
}

impl ConversationController {
    pub fn new(client: AnalysisClient, locale: Locale) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            client,
            inner: Mutex::new(Inner {
                locale,
                ..Inner::default()
            }),
            updates,
        }
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        self.inner.lock().snapshot()
    }

    #[cfg(test)]
    pub fn state(&self) -> ConversationState {
        self.inner.lock().state
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.state().is_busy()
    }

    #[cfg(test)]
    pub fn locale(&self) -> Locale {
        self.inner.lock().locale
    }

    /// Receive a snapshot after every change to the conversation
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationSnapshot> {
        self.updates.subscribe()
    }

    /// Only affects requests started afterwards. Existing turns are kept.
    pub fn set_locale(&self, locale: Locale) {
        let mut inner = self.inner.lock();
        inner.locale = locale;
        tracing::debug!("Conversation locale set to {}", locale);
    }

    /// Discard the current conversation and start the initial summary for
    /// a new subject. The placeholder turn is visible as soon as this
    /// returns; drive the request with [`Self::run`].
    pub fn begin_subject_change(&self, change: SubjectChange) -> PendingAnalysis {
        let SubjectChange { subject, series } = change;
        let mut inner = self.inner.lock();

        inner.generation += 1;
        inner.turns.clear();
        inner.state = ConversationState::AwaitingInitialSummary;
        inner.series = series.clone();

        let locale = inner.locale;
        let name = subject.name(locale).to_string();
        let placeholder = inner.next_id();
        let text = format!("{} **{}**...", locale.strings().analyzing, name);
        inner.turns.push(ConversationTurn::placeholder(placeholder, text));

        tracing::info!(
            "Conversation reset for {} (generation {})",
            subject.id,
            inner.generation
        );

        let pending = PendingAnalysis {
            generation: inner.generation,
            kind: PendingKind::InitialSummary { placeholder },
            request: AnalysisRequest {
                subject: name,
                category: subject.category,
                series,
                question: None,
                locale,
            },
        };
        inner.subject = Some(subject);
        self.publish(&inner);
        pending
    }

    /// Append the user's question and start the follow-up request.
    /// Returns `None` for blank text or while another request is in flight.
    pub fn begin_user_message(&self, text: &str) -> Option<PendingAnalysis> {
        let question = text.trim();
        if question.is_empty() {
            return None;
        }

        let mut inner = self.inner.lock();
        if inner.state.is_busy() {
            tracing::debug!("Ignoring message while a request is in flight");
            return None;
        }
        let (name, category) = {
            let subject = inner.subject.as_ref()?;
            (subject.name(inner.locale).to_string(), subject.category)
        };

        let id = inner.next_id();
        inner
            .turns
            .push(ConversationTurn::new(id, TurnRole::Requester, text.to_string()));
        inner.state = ConversationState::AwaitingFollowUp;

        let pending = PendingAnalysis {
            generation: inner.generation,
            kind: PendingKind::FollowUp,
            request: AnalysisRequest {
                subject: name,
                category,
                series: inner.series.clone(),
                question: Some(question.to_string()),
                locale: inner.locale,
            },
        };
        self.publish(&inner);
        Some(pending)
    }

    /// Await the analysis and apply it. Returns `false` when the reply was
    /// stale and dropped.
    pub async fn run(&self, pending: PendingAnalysis) -> bool {
        let text = self.client.analyze(&pending.request).await;
        self.apply(pending, text)
    }

    #[cfg(test)]
    pub async fn on_subject_changed(&self, change: SubjectChange) -> bool {
        let pending = self.begin_subject_change(change);
        self.run(pending).await
    }

    /// Returns `false` when the message was rejected or its reply went stale
    #[cfg(test)]
    pub async fn on_user_message(&self, text: &str) -> bool {
        match self.begin_user_message(text) {
            Some(pending) => self.run(pending).await,
            None => false,
        }
    }

    fn apply(&self, pending: PendingAnalysis, text: String) -> bool {
        let mut inner = self.inner.lock();

        if pending.generation != inner.generation {
            tracing::debug!(
                "Dropping stale reply for {} (generation {}, current {})",
                pending.request.subject,
                pending.generation,
                inner.generation
            );
            return false;
        }

        let id = inner.next_id();
        let reply = ConversationTurn::new(id, TurnRole::Analyst, text);

        match pending.kind {
            PendingKind::InitialSummary { placeholder } => {
                let slot = inner.turns.iter().position(|t| t.id == placeholder);
                match slot {
                    Some(idx) => inner.turns[idx] = reply,
                    None => inner.turns.push(reply),
                }
            }
            PendingKind::FollowUp => inner.turns.push(reply),
        }
        inner.state = ConversationState::Idle;

        self.publish(&inner);
        true
    }

    fn publish(&self, inner: &Inner) {
        // No subscribers is fine
        let _ = self.updates.send(inner.snapshot());
    }
}
