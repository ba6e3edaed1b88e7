//! ledgerlink - command line client for a ledger validator
//!
//! This crate provides both a library and binary. The binary submits
//! transactions and reads state stores:
//! ```bash
//! ledgerlink --host localhost --port 8800 stores
//! ledgerlink submit /IntegerKeyTransaction --json '{"x":1}'
//! ```

pub use ledgerlink_rs;

pub mod commands;
