//! LlmClient trait and the scripted mock used by tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::error::{BuildrError, Result};
use crate::llm::types::{CompletionRequest, CompletionResponse};

/// Stateless model client - each call is independent (fresh context)
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// The model this client talks to
    fn model(&self) -> &str;

    /// Whether the client is configured and usable
    fn is_ready(&self) -> bool;
}

/// A scripted reply for MockLlmClient
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text as the completion content
    Text(String),
    /// Fail the call with this message
    Error(String),
}

impl MockReply {
    pub fn text(content: impl Into<String>) -> Self {
        MockReply::Text(content.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        MockReply::Error(message.into())
    }
}

enum MockMode {
    Scripted(VecDeque<MockReply>),
    Repeating(String),
    Failing(String),
}

/// Mock client driven by a script of replies, for tests.
pub struct MockLlmClient {
    mode: Mutex<MockMode>,
    calls: AtomicU32,
}

impl MockLlmClient {
    /// Replies are consumed in order; once exhausted, further calls fail.
    pub fn scripted<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = MockReply>,
    {
        Self {
            mode: Mutex::new(MockMode::Scripted(replies.into_iter().collect())),
            calls: AtomicU32::new(0),
        }
    }

    /// Every call returns the same text.
    pub fn repeating(content: impl Into<String>) -> Self {
        Self {
            mode: Mutex::new(MockMode::Repeating(content.into())),
            calls: AtomicU32::new(0),
        }
    }

    /// Every call fails with the same message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            mode: Mutex::new(MockMode::Failing(message.into())),
            calls: AtomicU32::new(0),
        }
    }

    /// Number of completion calls made so far
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let reply = {
            let mut mode = self.mode.lock().unwrap();
            match &mut *mode {
                MockMode::Scripted(queue) => queue
                    .pop_front()
                    .unwrap_or_else(|| MockReply::error("mock script exhausted")),
                MockMode::Repeating(content) => MockReply::Text(content.clone()),
                MockMode::Failing(message) => MockReply::Error(message.clone()),
            }
        };

        match reply {
            MockReply::Text(content) => Ok(CompletionResponse::text(content)),
            MockReply::Error(message) => Err(BuildrError::Api {
                status: 500,
                message,
            }),
        }
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let mock = MockLlmClient::scripted(vec![
            MockReply::text("first"),
            MockReply::text("second"),
        ]);

        let first = mock.complete(CompletionRequest::default()).await.unwrap();
        let second = mock.complete(CompletionRequest::default()).await.unwrap();

        assert_eq!(first.content, "first");
        assert_eq!(second.content, "second");
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn test_scripted_exhaustion_fails() {
        let mock = MockLlmClient::scripted(vec![MockReply::text("only")]);

        mock.complete(CompletionRequest::default()).await.unwrap();
        let result = mock.complete(CompletionRequest::default()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_scripted_error_reply() {
        let mock = MockLlmClient::scripted(vec![MockReply::error("timeout")]);

        let err = mock
            .complete(CompletionRequest::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn test_repeating() {
        let mock = MockLlmClient::repeating("same answer");

        for _ in 0..3 {
            let resp = mock.complete(CompletionRequest::default()).await.unwrap();
            assert_eq!(resp.content, "same answer");
        }
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn test_failing() {
        let mock = MockLlmClient::failing("connection refused");

        for _ in 0..2 {
            let err = mock
                .complete(CompletionRequest::default())
                .await
                .unwrap_err();
            assert!(err.to_string().contains("connection refused"));
        }
        assert_eq!(mock.calls(), 2);
    }

    #[test]
    fn test_mock_metadata() {
        let mock = MockLlmClient::repeating("x");
        assert!(mock.is_ready());
        assert_eq!(mock.model(), "mock-model");
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockLlmClient>();
    }
}
