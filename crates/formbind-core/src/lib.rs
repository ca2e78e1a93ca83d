#![forbid(unsafe_code)]

//! Core types for formbind: the field synchronization state machine and the
//! contracts it is wired against.
//!
//! - [`FieldSync`]: reconciles an authoritative value, a local edit buffer and
//!   a debounced commit decision. Pure; time is passed in by the caller.
//! - [`Controller`]: the external owner of the authoritative value and its
//!   validation error.
//! - [`FieldDefinition`] / [`FieldKind`]: pass-through rendering options.
//! - [`FieldId`]: unique per-instance element id.
//! - [`FieldError`]: input rejected by an adapter.

pub mod controller;
pub mod definition;
pub mod error;
pub mod id;
pub mod sync;

pub use controller::{ChangeFn, Controller, ControllerWatch};
pub use definition::{FieldDefinition, FieldKind};
pub use error::FieldError;
pub use id::FieldId;
pub use sync::{DEFAULT_DEBOUNCE, FieldSync, Observation, SyncState};

pub use web_time::{Duration, Instant};
