use std::sync::Mutex;

use crate::error::Result;
use crate::models::{RawResult, RequestDescriptor};
use crate::transport::Transport;

/// Test double that records every request and answers with a fixed result
pub(crate) struct RecordingTransport {
    response: RawResult,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl RecordingTransport {
    pub(crate) fn respond(response: RawResult) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResult> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.response.clone())
    }
}
