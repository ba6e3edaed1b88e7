//! LedgerLink Client Library
//!
//! HTTP client for a ledger validator's transaction and state store API.

mod client;
mod transport;

pub use client::ValidatorClient;
pub use transport::HttpTransport;

pub use ledgerlink_core;
pub use ledgerlink_core::{
    ClientConfig, ClientError, DecodedBody, Payload, Result, StorePath, TransactionId, Transport,
};
