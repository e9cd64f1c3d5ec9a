use std::panic::Location;

use crate::callsite::{resolve_call_site, CallSite, FrameSource};
use crate::context::Context;
use crate::registry::ChannelRegistry;
use crate::severity::Severity;

/// Frames walked when resolving a call site through a frame source.
pub const DEFAULT_STACK_DEPTH: usize = 4;

/// Entry-point identities the call-site resolver skips past when an
/// injected frame source is in use. Frame sources report function
/// identities in `Type::method` form.
const ENTRY_POINTS: [&str; 8] = [
    "Dispatcher::emergency",
    "Dispatcher::alert",
    "Dispatcher::critical",
    "Dispatcher::error",
    "Dispatcher::warning",
    "Dispatcher::notice",
    "Dispatcher::info",
    "Dispatcher::debug",
];

/// Forwards log events to channel backends, stamping the call site into
/// each event's context on the way through.
///
/// Without an injected [`FrameSource`] the call site comes from
/// `#[track_caller]`, which already attributes the event to the frame
/// that invoked the entry point, however deep the wrapper chain. An
/// injected source replaces that with an explicit frame walk capped at
/// the configured stack depth.
pub struct Dispatcher {
    registry: ChannelRegistry,
    frames: Option<Box<dyn FrameSource>>,
    stack_depth: usize,
}

impl Dispatcher {
    pub fn new(registry: ChannelRegistry) -> Self {
        Self {
            registry,
            frames: None,
            stack_depth: DEFAULT_STACK_DEPTH,
        }
    }

    /// Resolve call sites through an explicit frame source instead of
    /// `#[track_caller]`.
    pub fn with_frame_source(mut self, source: Box<dyn FrameSource>) -> Self {
        self.frames = Some(source);
        self
    }

    /// Maximum frames walked when a frame source is injected.
    pub fn with_stack_depth(mut self, depth: usize) -> Self {
        self.stack_depth = depth;
        self
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    #[track_caller]
    pub fn emergency(&self, message: &str, context: Context, channel: &str) {
        self.log(Severity::Emergency, message, context, channel);
    }

    #[track_caller]
    pub fn alert(&self, message: &str, context: Context, channel: &str) {
        self.log(Severity::Alert, message, context, channel);
    }

    #[track_caller]
    pub fn critical(&self, message: &str, context: Context, channel: &str) {
        self.log(Severity::Critical, message, context, channel);
    }

    #[track_caller]
    pub fn error(&self, message: &str, context: Context, channel: &str) {
        self.log(Severity::Error, message, context, channel);
    }

    #[track_caller]
    pub fn warning(&self, message: &str, context: Context, channel: &str) {
        self.log(Severity::Warning, message, context, channel);
    }

    #[track_caller]
    pub fn notice(&self, message: &str, context: Context, channel: &str) {
        self.log(Severity::Notice, message, context, channel);
    }

    #[track_caller]
    pub fn info(&self, message: &str, context: Context, channel: &str) {
        self.log(Severity::Info, message, context, channel);
    }

    #[track_caller]
    pub fn debug(&self, message: &str, context: Context, channel: &str) {
        self.log(Severity::Debug, message, context, channel);
    }

    /// Generic entry point; the severity-named methods all land here.
    ///
    /// Resolves the call site, stamps `file`/`line` into the context,
    /// and invokes the severity-named method on the resolved backend.
    /// An event with no resolvable channel is dropped without error.
    #[track_caller]
    pub fn log(&self, severity: Severity, message: &str, mut context: Context, channel: &str) {
        self.call_site(Location::caller()).merge_into(&mut context);

        let Some(backend) = self.registry.resolve(channel) else {
            tracing::trace!(channel, %severity, "no backend registered, event dropped");
            return;
        };

        match severity {
            Severity::Emergency => backend.emergency(message, &context),
            Severity::Alert => backend.alert(message, &context),
            Severity::Critical => backend.critical(message, &context),
            Severity::Error => backend.error(message, &context),
            Severity::Warning => backend.warning(message, &context),
            Severity::Notice => backend.notice(message, &context),
            Severity::Info => backend.info(message, &context),
            Severity::Debug => backend.debug(message, &context),
        }
    }

    fn call_site(&self, caller: &'static Location<'static>) -> CallSite {
        match &self.frames {
            Some(source) => resolve_call_site(&source.frames(self.stack_depth), &ENTRY_POINTS),
            None => CallSite::from(caller),
        }
    }
}
