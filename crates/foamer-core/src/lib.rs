//! Foamer core.
//!
//! Runtime-agnostic building blocks shared by the client and the service:
//!
//! - [`env::Environment`]: time source for the Sans-IO form state machine
//! - [`storage`]: in-memory message storage
//! - [`wrap`]: word wrapping for the fixed-width display

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod env;
pub mod storage;
pub mod wrap;

pub use env::Environment;
pub use storage::{MemoryStorage, Storage, StorageError};
pub use wrap::wrap_lines;
