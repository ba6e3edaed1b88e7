use serde::de::DeserializeOwned;

use ledgerlink_core::{
    store, transaction, ClientConfig, ClientError, DecodedBody, Payload, Result, TransactionId,
    Transport,
};

use crate::transport::HttpTransport;

/// Validator client bound to one host and port
#[derive(Debug, Clone)]
pub struct ValidatorClient<T = HttpTransport> {
    host: String,
    port: u16,
    transport: T,
}

impl ValidatorClient<HttpTransport> {
    /// Create a new client for the validator at host:port
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self> {
        Self::with_transport(host, port, HttpTransport::new()?)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_transport(config.host.clone(), config.port, HttpTransport::from_config(config)?)
    }
}

impl<T: Transport> ValidatorClient<T> {
    /// Create a client that sends its requests through `transport`
    pub fn with_transport(host: impl Into<String>, port: u16, transport: T) -> Result<Self> {
        let host = host.into();
        if host.is_empty() {
            return Err(ClientError::precondition("'host' must be provided."));
        }
        if port == 0 {
            return Err(ClientError::precondition("'port' must be provided."));
        }
        Ok(Self {
            host,
            port,
            transport,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit a transaction and return its transaction id
    pub async fn send_transaction(
        &self,
        family: &str,
        payload: impl Into<Payload>,
    ) -> Result<TransactionId> {
        transaction::submit_transaction(&self.transport, &self.host, self.port, family, payload)
            .await
    }

    /// List the stores on this validator
    pub async fn get_stores(&self) -> Result<Option<DecodedBody>> {
        store::list_stores(&self.transport, &self.host, self.port).await
    }

    /// List the keys in a store
    pub async fn get_store(&self, store_name: &str) -> Result<Option<DecodedBody>> {
        store::list_store_keys(&self.transport, &self.host, self.port, store_name).await
    }

    /// Fetch every object in a store
    pub async fn get_store_objects(&self, store_name: &str) -> Result<Option<DecodedBody>> {
        store::list_store_objects(&self.transport, &self.host, self.port, store_name).await
    }

    /// Fetch one object by key, or None if it is not there
    pub async fn get_store_object(
        &self,
        store_name: &str,
        key: &str,
    ) -> Result<Option<DecodedBody>> {
        store::get_store_object(&self.transport, &self.host, self.port, store_name, key).await
    }

    /// Fetch one object and deserialize it
    pub async fn get_store_object_as<D: DeserializeOwned>(
        &self,
        store_name: &str,
        key: &str,
    ) -> Result<Option<D>> {
        self.get_store_object(store_name, key)
            .await?
            .map(|body| {
                let value = body.into_json()?;
                serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
            })
            .transpose()
    }

    /// Store names as strings
    pub async fn get_store_names(&self) -> Result<Option<Vec<String>>> {
        match self.get_stores().await? {
            Some(body) => {
                let value = body.into_json()?;
                let names = serde_json::from_value(value)
                    .map_err(|e| ClientError::Decode(e.to_string()))?;
                Ok(Some(names))
            }
            None => Ok(None),
        }
    }
}
