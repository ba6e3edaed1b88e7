//! Queries against the validator's `/store` state API.

use crate::codec::JSON_CONTENT_TYPE;
use crate::error::{ClientError, Result};
use crate::models::{validate_endpoint, DecodedBody, RequestDescriptor};
use crate::response::unwrap_response;
use crate::transport::Transport;

const STORE_ROOT: &str = "/store";

/// Key that selects every object in a store
pub const ALL_OBJECTS: &str = "*";

/// Path into the store API. Every segment carries exactly one leading slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePath {
    path: String,
}

impl StorePath {
    /// `/store`
    pub fn root() -> Self {
        Self {
            path: STORE_ROOT.to_string(),
        }
    }

    /// `/store/{name}`
    pub fn store(name: &str) -> Result<Self> {
        let name = segment(name).ok_or_else(|| {
            ClientError::precondition("'storeName' cannot be an empty string.")
        })?;
        let mut path = Self::root();
        path.push(name);
        Ok(path)
    }

    /// `/store/{name}/{key}`
    pub fn object(name: &str, key: &str) -> Result<Self> {
        let key = segment(key)
            .ok_or_else(|| ClientError::precondition("'key' cannot be an empty string."))?;
        let mut path = Self::store(name)?;
        path.push(key);
        Ok(path)
    }

    /// `/store/{name}/*`
    pub fn all_objects(name: &str) -> Result<Self> {
        Self::object(name, ALL_OBJECTS)
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    fn push(&mut self, segment: &str) {
        self.path.push('/');
        self.path.push_str(segment);
    }
}

/// Drop one optional leading `/`. None when nothing is left, or when the
/// remainder would start another empty segment.
fn segment(raw: &str) -> Option<&str> {
    let seg = raw.strip_prefix('/').unwrap_or(raw);
    if seg.is_empty() || seg.starts_with('/') {
        None
    } else {
        Some(seg)
    }
}

pub fn build_store_request(host: &str, port: u16, path: &StorePath) -> Result<RequestDescriptor> {
    validate_endpoint(host, port)?;
    Ok(RequestDescriptor::get(host, port, path.as_str())
        .with_header("Accept", JSON_CONTENT_TYPE))
}

async fn query<T>(
    transport: &T,
    host: &str,
    port: u16,
    path: StorePath,
) -> Result<Option<DecodedBody>>
where
    T: Transport + ?Sized,
{
    let request = build_store_request(host, port, &path)?;
    tracing::debug!(path = %path.as_str(), "Querying store API");

    let result = transport.execute(&request).await?;
    let body = unwrap_response(result)?;
    if body.is_none() {
        tracing::debug!(path = %path.as_str(), "Store resource not found");
    }
    Ok(body)
}

/// List the names of all stores on the validator
pub async fn list_stores<T>(transport: &T, host: &str, port: u16) -> Result<Option<DecodedBody>>
where
    T: Transport + ?Sized,
{
    query(transport, host, port, StorePath::root()).await
}

/// List the keys held in a store
pub async fn list_store_keys<T>(
    transport: &T,
    host: &str,
    port: u16,
    store_name: &str,
) -> Result<Option<DecodedBody>>
where
    T: Transport + ?Sized,
{
    let path = StorePath::store(store_name)?;
    query(transport, host, port, path).await
}

/// Fetch every object in a store, keyed by name
pub async fn list_store_objects<T>(
    transport: &T,
    host: &str,
    port: u16,
    store_name: &str,
) -> Result<Option<DecodedBody>>
where
    T: Transport + ?Sized,
{
    let path = StorePath::all_objects(store_name)?;
    query(transport, host, port, path).await
}

/// Fetch one object. `None` when the store or key does not exist.
pub async fn get_store_object<T>(
    transport: &T,
    host: &str,
    port: u16,
    store_name: &str,
    key: &str,
) -> Result<Option<DecodedBody>>
where
    T: Transport + ?Sized,
{
    if segment(key) == Some(ALL_OBJECTS) {
        return Err(ClientError::precondition(
            "Key should not be '*'. Use list_store_objects to retrieve all objects in the store",
        ));
    }
    let path = StorePath::object(store_name, key)?;
    query(transport, host, port, path).await
}
