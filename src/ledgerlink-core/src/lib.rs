//! LedgerLink Core Library
//!
//! Protocol layer for talking to a ledger validator's HTTP API:
//! - Request descriptors and decoded results
//! - Chunked request bodies
//! - Content-type driven response decoding (CBOR, JSON, text)
//! - Status code classification into results and errors
//! - Transaction submission and transaction id derivation
//! - State store queries
//!
//! No sockets are opened here; every network call goes through a
//! [`Transport`] supplied by the caller.

pub mod chunking;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod response;
pub mod store;
pub mod transaction;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use chunking::{ChunkedBody, CHUNK_SIZE};
pub use codec::ContentKind;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use models::*;
pub use response::unwrap_response;
pub use store::{get_store_object, list_store_keys, list_store_objects, list_stores, StorePath};
pub use transaction::{submit_transaction, transaction_id_for, Payload};
pub use transport::Transport;
