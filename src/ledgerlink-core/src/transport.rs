use std::sync::Arc;

use crate::error::Result;
use crate::models::{RawResult, RequestDescriptor};

/// Transport executes one request and returns the decoded result.
///
/// Implementations stream the request body in chunks, buffer the whole
/// response, decode it by content type, and never fail on a non-2xx status.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResult>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResult> {
        (**self).execute(request).await
    }
}

#[async_trait::async_trait]
impl<'a, T: Transport + ?Sized> Transport for &'a T {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResult> {
        (**self).execute(request).await
    }
}
