//! Deterministic test harness for the Foamer message form.
//!
//! Virtual-clock implementation of the Environment trait and a scripted
//! Transport, so form behavior can be driven without sockets or waiting.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation for model-based
//! testing. Operations are applied to both the model and real implementation,
//! and their observable states are compared.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod sim_env;
pub mod sim_transport;

pub use model::{
    DraftContent, ModelForm, ModelReply, ObservableState, Operation, OperationError,
    OperationResult,
};
pub use sim_env::{SimEnv, SimInstant};
pub use sim_transport::ScriptedTransport;
