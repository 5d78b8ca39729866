// Fake text generators shared by unit tests
use crate::application::text_generator::{GenerationError, GenerationRequest, TextGenerator};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};

enum Reply {
    Text(String),
    Error(String),
}

/// Answers every call immediately and records the requests it saw
pub struct FakeGenerator {
    credentials: bool,
    reply: Reply,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            credentials: true,
            reply: Reply::Text(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Error(message.to_string()),
            ..Self::replying("")
        }
    }

    pub fn without_credentials() -> Self {
        Self {
            credentials: false,
            ..Self::replying("unused")
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    fn has_credentials(&self) -> bool {
        self.credentials
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().push(request);
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Error(message) => Err(GenerationError::Other(message.clone())),
        }
    }
}

/// A call parked inside [`GatedGenerator`] until the test answers it
pub struct PendingCall {
    pub request: GenerationRequest,
    responder: oneshot::Sender<Result<String, GenerationError>>,
}

impl PendingCall {
    pub fn reply(self, text: &str) {
        let _ = self.responder.send(Ok(text.to_string()));
    }

    pub fn fail(self, message: &str) {
        let _ = self.responder.send(Err(GenerationError::Other(message.to_string())));
    }
}

/// Holds every call open so tests control completion order
pub struct GatedGenerator {
    calls: mpsc::UnboundedSender<PendingCall>,
}

impl GatedGenerator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { calls: tx }, rx)
    }
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    fn has_credentials(&self) -> bool {
        true
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let (responder, answer) = oneshot::channel();
        self.calls
            .send(PendingCall { request, responder })
            .map_err(|_| GenerationError::Other("test harness dropped".to_string()))?;
        answer
            .await
            .map_err(|_| GenerationError::Other("call abandoned".to_string()))?
    }
}
