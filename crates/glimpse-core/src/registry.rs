use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::ChannelLogger;

/// The fallback channel consulted when a requested channel has no backend.
pub const DEFAULT_CHANNEL: &str = "default";

/// Maps channel names to registered backends.
///
/// Registration is additive for the life of the registry and the last
/// registration under a name wins; there is no unregister. The registry
/// is not internally synchronized - populate it during startup, before
/// handing it to a dispatcher that may be shared across threads.
#[derive(Default)]
pub struct ChannelRegistry {
    backends: HashMap<String, Arc<dyn ChannelLogger>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or overwrite the backend for `name`.
    pub fn register(&mut self, name: impl Into<String>, backend: Arc<dyn ChannelLogger>) {
        self.backends.insert(name.into(), backend);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// Resolve a requested channel name: the channel itself if registered,
    /// else [`DEFAULT_CHANNEL`] if that is, else `None` (drop the event).
    /// The returned name borrows from `requested`, not the registry.
    pub fn resolve_channel<'a>(&self, requested: &'a str) -> Option<&'a str> {
        if self.backends.contains_key(requested) {
            Some(requested)
        } else if self.backends.contains_key(DEFAULT_CHANNEL) {
            Some(DEFAULT_CHANNEL)
        } else {
            None
        }
    }

    /// Resolve the backend a requested channel routes to.
    pub fn resolve(&self, requested: &str) -> Option<&Arc<dyn ChannelLogger>> {
        self.resolve_channel(requested)
            .and_then(|name| self.backends.get(name))
    }
}
