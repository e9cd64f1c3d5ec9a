//! # glimpse-core
//!
//! Leveled, multi-channel log dispatch for the glimpse diagnostic suite.
//!
//! Log events carry a severity, a message, and an ordered context map.
//! A [`Dispatcher`] resolves the call site of each event, stamps `file`
//! and `line` into the context, and forwards the event to whichever
//! backend the [`ChannelRegistry`] selects for the requested channel,
//! falling back to the `"default"` channel. Events with no resolvable
//! backend are dropped without error.
//!
//! ## Key Types
//!
//! - [`Dispatcher`] - Call-site resolution and backend fan-out
//! - [`ChannelRegistry`] - Channel name to backend mapping
//! - [`ChannelLogger`] - The capability a backend must implement
//! - [`Severity`] - The eight syslog-style levels
//! - [`Context`] - Ordered per-event key/value payload
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use glimpse_core::{ChannelRegistry, Context, Dispatcher};
//!
//! let mut registry = ChannelRegistry::new();
//! registry.register("default", Arc::new(MyBackend::new()));
//!
//! let dispatcher = Dispatcher::new(registry);
//! dispatcher.error("connection refused", Context::new(), "network");
//! ```
//!
//! No entry point on this crate ever returns an error or panics; a
//! diagnostic facility must never become the cause of its caller's
//! failure.

mod backend;
mod callsite;
mod context;
mod dispatcher;
mod registry;
mod severity;

pub use backend::ChannelLogger;
pub use callsite::{frame_at_depth, resolve_call_site, CallSite, Frame, FrameSource};
pub use context::Context;
pub use dispatcher::{Dispatcher, DEFAULT_STACK_DEPTH};
pub use registry::{ChannelRegistry, DEFAULT_CHANNEL};
pub use severity::{ParseSeverityError, Severity};
