//! Scripted `CompletionClient` for tests: replays queued responses and counts calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionClient, CompletionError};

#[derive(Default)]
pub struct MockCompletionClient {
    responses: Mutex<VecDeque<Result<String, CompletionError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockCompletionClient {
    pub fn with_responses(responses: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, _credential: &str, prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::Network("no scripted response".to_string())))
    }
}
