#![forbid(unsafe_code)]

//! Runtime pieces for formbind: reactive controllers, cancelable debounce
//! timers and configuration.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`) and meant to be driven
//! from one UI event loop.

pub mod config;
pub mod controller;
pub mod reactive;
pub mod timer;

pub use config::{ConfigError, SyncConfig};
pub use controller::FormController;
pub use reactive::{Observable, Subscription};
pub use timer::{TimerHandle, TimerQueue};
