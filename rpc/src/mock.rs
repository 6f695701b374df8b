//! In-memory transport for testing.
//!
//! `MockTransport` records every request it receives and answers from a
//! per-method queue of scripted responses. Lifecycle methods the engine
//! client always issues (`new`, `get_version`) have built-in answers so
//! tests only script what they care about.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::TransportError;
use crate::traits::RpcTransport;

/// Version string returned by the built-in `get_version` answer.
pub const MOCK_ENGINE_VERSION: &str = "mock-engine 1.0.0";

/// A request seen by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedRequest {
    Deploy { code: Vec<u8> },
    Call { method: String, args: Vec<u8> },
    View { method: String, args: Vec<u8> },
}

impl RecordedRequest {
    /// The engine method name; `None` for deployments.
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::Deploy { .. } => None,
            Self::Call { method, .. } | Self::View { method, .. } => Some(method),
        }
    }
}

type Scripted = Result<Vec<u8>, TransportError>;

#[derive(Debug, Default)]
struct Inner {
    requests: Vec<RecordedRequest>,
    responses: BTreeMap<String, VecDeque<Scripted>>,
    deploy_failures: VecDeque<TransportError>,
}

/// Scripted in-memory transport. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic in another test thread must not hide this one's requests.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a successful answer for the next call or view of `method`.
    pub fn respond(&self, method: &str, response: impl Into<Vec<u8>>) -> &Self {
        self.lock()
            .responses
            .entry(method.to_string())
            .or_default()
            .push_back(Ok(response.into()));
        self
    }

    /// Queue a failure for the next call or view of `method`.
    pub fn fail(&self, method: &str, error: TransportError) -> &Self {
        self.lock()
            .responses
            .entry(method.to_string())
            .or_default()
            .push_back(Err(error));
        self
    }

    /// Make the next runtime image deployment fail.
    pub fn fail_deploy(&self, error: TransportError) -> &Self {
        self.lock().deploy_failures.push_back(error);
        self
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Names of the methods called or viewed so far, deployments skipped.
    pub fn methods(&self) -> Vec<String> {
        self.lock()
            .requests
            .iter()
            .filter_map(|r| r.method().map(str::to_string))
            .collect()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn answer(&self, request: RecordedRequest) -> Scripted {
        let mut inner = self.lock();
        let method = request.method().unwrap_or_default().to_string();
        inner.requests.push(request);

        if let Some(scripted) = inner.responses.get_mut(&method).and_then(VecDeque::pop_front) {
            return scripted;
        }
        match method.as_str() {
            "new" => Ok(Vec::new()),
            "get_version" => Ok(MOCK_ENGINE_VERSION.as_bytes().to_vec()),
            _ => Err(TransportError::rpc(format!(
                "mock transport has no response for {method}"
            ))),
        }
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn deploy_contract(&self, code: &[u8]) -> Result<(), TransportError> {
        let mut inner = self.lock();
        inner.requests.push(RecordedRequest::Deploy {
            code: code.to_vec(),
        });
        match inner.deploy_failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn function_call(&self, method: &str, args: &[u8]) -> Result<Vec<u8>, TransportError> {
        self.answer(RecordedRequest::Call {
            method: method.to_string(),
            args: args.to_vec(),
        })
    }

    async fn view_function(&self, method: &str, args: &[u8]) -> Result<Vec<u8>, TransportError> {
        self.answer(RecordedRequest::View {
            method: method.to_string(),
            args: args.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_requests_in_order() {
        let mock = MockTransport::new();
        mock.deploy_contract(b"wasm").await.unwrap();
        mock.function_call("new", b"args").await.unwrap();
        mock.view_function("get_version", &[]).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0], RecordedRequest::Deploy { code: b"wasm".to_vec() });
        assert_eq!(mock.methods(), vec!["new", "get_version"]);
    }

    #[tokio::test]
    async fn test_scripted_responses_are_fifo() {
        let mock = MockTransport::new();
        mock.respond("call", vec![1]).respond("call", vec![2]);

        assert_eq!(mock.function_call("call", &[]).await.unwrap(), vec![1]);
        assert_eq!(mock.function_call("call", &[]).await.unwrap(), vec![2]);
        assert!(mock.function_call("call", &[]).await.is_err());
    }

    #[tokio::test]
    async fn test_builtin_lifecycle_answers() {
        let mock = MockTransport::new();
        assert!(mock.function_call("new", &[]).await.unwrap().is_empty());
        assert_eq!(
            mock.view_function("get_version", &[]).await.unwrap(),
            MOCK_ENGINE_VERSION.as_bytes()
        );
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let mock = MockTransport::new();
        mock.fail("get_version", TransportError::rpc("node down"));
        let err = mock.view_function("get_version", &[]).await.unwrap_err();
        assert!(matches!(err, TransportError::Rpc { .. }));
        // Built-in answer resumes once the script is drained.
        assert!(mock.view_function("get_version", &[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_deploy_failure_is_recorded() {
        let mock = MockTransport::new();
        mock.fail_deploy(TransportError::rpc("rejected"));
        assert!(mock.deploy_contract(b"x").await.is_err());
        assert_eq!(mock.request_count(), 1);
        assert!(mock.deploy_contract(b"x").await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let mock = MockTransport::new();
        let clone = mock.clone();
        clone.respond("call", vec![9]);
        assert_eq!(mock.function_call("call", &[]).await.unwrap(), vec![9]);
        assert_eq!(clone.request_count(), 1);
    }
}
