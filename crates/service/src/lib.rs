//! Service layer for the address book.
//! - `storage` holds the generic JSON file-backed map store.
//! - `address` holds the record model, the repository boundary and the
//!   application service in front of it.
//! - `errors` defines the service-level error type.

pub mod address;
pub mod errors;
pub mod storage;
