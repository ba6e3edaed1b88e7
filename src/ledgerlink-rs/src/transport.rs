use std::collections::BTreeMap;
use std::time::Duration;

use ledgerlink_core::codec::{self, ContentKind};
use ledgerlink_core::{
    ChunkedBody, ClientConfig, ClientError, DecodedBody, Method, RawResult, RequestDescriptor,
    Result, Transport, CHUNK_SIZE,
};

/// reqwest-backed transport. One request per `execute`, no retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    chunk_size: usize,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::from_config(&ClientConfig::default())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(transport_error)?;

        Ok(Self {
            client,
            chunk_size: config.chunk_size,
        })
    }

    /// Use an already configured reqwest client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            chunk_size: CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(ClientError::precondition("chunk size must be greater than zero"));
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResult> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let url = request.url();

        let mut builder = self.client.request(method, &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            let chunked = ChunkedBody::new(body.clone(), self.chunk_size)?;
            tracing::debug!(
                url = %url,
                len = chunked.len(),
                chunks = chunked.chunk_count(),
                "Streaming request body"
            );
            // chunks are written in order; the declared Content-Length frames them
            let stream = futures::stream::iter(chunked.chunks().map(Ok::<_, std::io::Error>));
            builder = builder.body(reqwest::Body::wrap_stream(stream));
        }

        let response = builder.send().await.map_err(transport_error)?;

        let status_code = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let kind = ContentKind::from_header(headers.get("content-type").map(String::as_str));

        let bytes = response.bytes().await.map_err(transport_error)?;
        tracing::debug!(
            url = %url,
            status = status_code,
            len = bytes.len(),
            ?kind,
            "Response received"
        );

        let body = match codec::decode(kind, &bytes) {
            Ok(body) => body,
            // error bodies that lie about their content type still get classified by status
            Err(e) if status_code != 200 => {
                tracing::debug!("Undecodable error body: {}", e);
                DecodedBody::Text(String::from_utf8_lossy(&bytes).into_owned())
            }
            Err(e) => return Err(e),
        };

        Ok(RawResult {
            body,
            headers,
            status_code,
        })
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    ClientError::Transport(e.to_string())
}
