use async_trait::async_trait;
use brainstrata_router::provider::{
    ChatMessage, CompletionParams, ImageGeneration, ImageParams, ProviderError, ProviderResult,
    TextCompletion,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Behaviour of a mock provider call
#[derive(Clone, Debug)]
#[allow(dead_code)]
pub enum MockBehavior {
    Reply(String),
    Empty,
    Fail,
}

/// Mock provider implementing both capabilities. Counts calls so tests can
/// assert that nothing was dispatched.
pub struct MockProvider {
    pub text: MockBehavior,
    pub image_urls: Option<Vec<String>>,
    pub text_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockProvider {
    pub fn new(text: MockBehavior, image_urls: Option<Vec<String>>) -> Self {
        Self {
            text,
            image_urls,
            text_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        }
    }

    pub fn healthy() -> Self {
        Self::new(
            MockBehavior::Reply("A detailed and sufficiently long model reply.".to_string()),
            Some(vec!["https://cdn.example/generated.png".to_string()]),
        )
    }

    pub fn total_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst) + self.image_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextCompletion for MockProvider {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _params: CompletionParams,
    ) -> ProviderResult<Option<String>> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        match &self.text {
            MockBehavior::Reply(reply) => Ok(Some(reply.clone())),
            MockBehavior::Empty => Ok(None),
            MockBehavior::Fail => Err(ProviderError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            }),
        }
    }
}

#[async_trait]
impl ImageGeneration for MockProvider {
    async fn generate(&self, _prompt: &str, _params: &ImageParams) -> ProviderResult<Vec<String>> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        match &self.image_urls {
            Some(urls) => Ok(urls.clone()),
            None => Err(ProviderError::Status {
                status: 500,
                body: "image backend down".to_string(),
            }),
        }
    }
}
