//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Narrow seam over the model service
///
/// The conversation loop only ever needs one operation: send the full
/// history plus tool declarations and get the next reply. Keeping the seam
/// this small lets the loop's state machine be tested with a scripted mock
/// and no network access.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// A scripted reply: either a canned response or a service failure
    pub enum MockReply {
        Response(CompletionResponse),
        Failure(String),
    }

    /// Mock LLM client for unit tests
    pub struct MockLlmClient {
        replies: Mutex<Vec<Option<MockReply>>>,
        call_count: AtomicUsize,
    }

    impl MockLlmClient {
        pub fn new(replies: Vec<MockReply>) -> Self {
            debug!(reply_count = %replies.len(), "MockLlmClient::new: called");
            Self {
                replies: Mutex::new(replies.into_iter().map(Some).collect()),
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            debug!(%idx, "MockLlmClient::complete: called");

            let reply = self.replies.lock().expect("mock replies lock poisoned").get_mut(idx).and_then(Option::take);

            match reply {
                Some(MockReply::Response(response)) => Ok(response),
                Some(MockReply::Failure(message)) => Err(LlmError::InvalidResponse(message)),
                None => Err(LlmError::InvalidResponse("No more mock replies".to_string())),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::llm::{Message, Part, TokenUsage};

        fn text_response(text: &str) -> CompletionResponse {
            CompletionResponse {
                message: Message::model(vec![Part::Text(text.to_string())]),
                usage: TokenUsage::default(),
            }
        }

        #[tokio::test]
        async fn test_mock_client_returns_replies_in_order() {
            let client = MockLlmClient::new(vec![
                MockReply::Response(text_response("Reply 1")),
                MockReply::Response(text_response("Reply 2")),
            ]);

            let req = CompletionRequest {
                system_prompt: "Test".to_string(),
                messages: vec![],
                tools: vec![],
            };

            let resp1 = client.complete(req.clone()).await.unwrap();
            assert!(matches!(resp1.message.parts.first(), Some(Part::Text(t)) if t == "Reply 1"));

            let resp2 = client.complete(req.clone()).await.unwrap();
            assert!(matches!(resp2.message.parts.first(), Some(Part::Text(t)) if t == "Reply 2"));

            assert_eq!(client.call_count(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_scripted_failure() {
            let client = MockLlmClient::new(vec![MockReply::Failure("quota exceeded".to_string())]);

            let req = CompletionRequest {
                system_prompt: "Test".to_string(),
                messages: vec![],
                tools: vec![],
            };

            let result = client.complete(req).await;
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("quota exceeded"));
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::new(vec![]);

            let req = CompletionRequest {
                system_prompt: "Test".to_string(),
                messages: vec![],
                tools: vec![],
            };

            let result = client.complete(req).await;
            assert!(result.is_err());
        }
    }
}
