//! Scripted AI generators for unit tests.

use super::{AiError, AiResult, ImageGenerator, ImageRequest, TextGenerator, TextRequest};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Replies with queued results in call order; fails once the queue is empty.
#[derive(Default)]
pub(crate) struct ScriptedText {
    replies: Mutex<VecDeque<AiResult<String>>>,
    seen: Mutex<Vec<(String, String)>>,
    calls: AtomicUsize,
}

impl ScriptedText {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, text: &str) -> Self {
        self.push(Ok(text.to_string()))
    }

    pub(crate) fn fail(self) -> Self {
        self.push(Err(AiError::Status {
            status: 500,
            body: "scripted failure".into(),
        }))
    }

    fn push(self, result: AiResult<String>) -> Self {
        self.replies
            .lock()
            .expect("stub lock")
            .push_back(result);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(system, user)` pairs of every request received.
    pub(crate) fn seen(&self) -> Vec<(String, String)> {
        self.seen.lock().expect("stub lock").clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedText {
    async fn generate_text(&self, request: &TextRequest<'_>) -> AiResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("stub lock")
            .push((request.system.to_string(), request.user.clone()));
        self.replies
            .lock()
            .expect("stub lock")
            .pop_front()
            .unwrap_or(Err(AiError::EmptyResponse("scripted reply")))
    }
}

type ImageFn = dyn Fn(&str) -> AiResult<String> + Send + Sync;

/// Answers each image prompt through a closure.
pub(crate) struct ScriptedImages {
    respond: Box<ImageFn>,
    calls: AtomicUsize,
}

impl ScriptedImages {
    pub(crate) fn new(respond: impl Fn(&str) -> AiResult<String> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every prompt succeeds with a URL derived from the call number.
    pub(crate) fn succeeding() -> Self {
        let counter = AtomicUsize::new(0);
        Self::new(move |_| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Ok(format!("https://images.test/logo-{n}.png"))
        })
    }

    pub(crate) fn failing() -> Self {
        Self::new(|_| Err(AiError::MissingApiKey))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for ScriptedImages {
    async fn generate_image(&self, request: &ImageRequest) -> AiResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(&request.prompt)
    }
}
