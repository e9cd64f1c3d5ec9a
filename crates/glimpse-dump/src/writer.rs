use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;

use glimpse_core::{frame_at_depth, CallSite, FrameSource};

use crate::collaborators::{IdentitySource, LogPathConfig};
use crate::html::{DumpFragment, HtmlFormatter, LOGGED_ON_MARKER};
use crate::toggle::ToggleAllocator;
use crate::value::DumpValue;

/// Base file name; the default target prefixes it with a timestamp so
/// each invocation gets its own file.
const DEBUG_FILENAME: &str = "debug.html";

/// Subdirectory used when no configuration collaborator supplies a path.
const DEFAULT_LOG_SUBDIR: &str = "logs";

/// One-shot writer appending a single dump to a log file.
///
/// Built per dump: `new` captures the call site, the builder methods
/// shape the output, and [`write`](Self::write) renders and appends.
/// The file is opened, written, and closed within `write`; no handle
/// outlives the call. Failures never reach the caller - they are logged
/// at `warn` level (visible only if a `tracing` subscriber is installed)
/// and the dump is skipped.
pub struct DumpWriter {
    log_dir: PathBuf,
    message: String,
    value: Option<DumpValue>,
    criticality: Option<String>,
    call_site: CallSite,
    filename: Option<String>,
    plain: bool,
    timestamped: bool,
    identity: Option<Arc<dyn IdentitySource>>,
}

impl DumpWriter {
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            log_dir: default_log_dir(),
            message: message.into(),
            value: None,
            criticality: None,
            call_site: CallSite::from(Location::caller()),
            filename: None,
            plain: false,
            timestamped: true,
            identity: None,
        }
    }

    /// Value to dump beneath the message, rendered collapsible in rich
    /// mode.
    pub fn value(mut self, value: impl Into<DumpValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Optional criticality label shown in the dump header.
    pub fn criticality(mut self, label: impl Into<String>) -> Self {
        self.criticality = Some(label.into());
        self
    }

    /// Write to an explicit file name instead of the timestamped default.
    pub fn filename(mut self, name: impl Into<String>) -> Self {
        self.filename = Some(name.into());
        self
    }

    /// Plain mode: one bare text line per dump, no HTML.
    pub fn plain(mut self) -> Self {
        self.plain = true;
        self
    }

    /// Toggle date-stamping (the filename prefix and the plain-mode
    /// line timestamp). On by default.
    pub fn timestamped(mut self, on: bool) -> Self {
        self.timestamped = on;
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Resolve the log directory from a configuration collaborator.
    pub fn config(mut self, config: &dyn LogPathConfig) -> Self {
        self.log_dir = config.log_path();
        self
    }

    /// Annotate rich dumps with the current user, when one is known.
    pub fn identity(mut self, source: Arc<dyn IdentitySource>) -> Self {
        self.identity = Some(source);
        self
    }

    /// Re-resolve the call site from an explicit frame source at a raw
    /// depth. Unlike the dispatcher there is no entry-point filtering
    /// here; the caller picks the depth that lands on the right frame.
    pub fn frames(mut self, source: &dyn FrameSource, depth: usize) -> Self {
        self.call_site = frame_at_depth(&source.frames(depth), depth);
        self
    }

    /// Render and append the dump. Never fails the caller.
    pub fn write(self) {
        if self.plain {
            self.write_plain();
        } else {
            self.write_rich();
        }
    }

    fn write_plain(&self) {
        let line = if self.timestamped {
            format!(
                "{} {}\n",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                self.message
            )
        } else {
            format!("{}\n", self.message)
        };
        self.append(&self.target_path(), &line);
    }

    fn write_rich(&self) {
        let path = self.target_path();
        // An unreadable file is treated like an absent one: the header is
        // re-emitted and numbering restarts, which still yields a usable
        // dump.
        let existing = fs::read_to_string(&path).unwrap_or_default();
        let include_header = !existing.contains(LOGGED_ON_MARKER);
        let mut toggles = ToggleAllocator::seed_from(&existing);

        let user = self
            .identity
            .as_ref()
            .and_then(|source| source.current_user_id());
        let content = self
            .value
            .as_ref()
            .map(|value| (value.type_label(), value.render()));

        let fragment = DumpFragment {
            message: &self.message,
            file: &self.call_site.file,
            line: self.call_site.line,
            criticality: self.criticality.as_deref(),
            user: user.as_deref(),
            content,
        };

        let rendered =
            HtmlFormatter::new().format(&fragment, include_header, Local::now(), &mut toggles);
        self.append(&path, &rendered);
    }

    fn target_path(&self) -> PathBuf {
        match &self.filename {
            Some(name) => self.log_dir.join(name),
            None if self.timestamped => self.log_dir.join(format!(
                "{}_{}",
                Local::now().format("%Y%m%d%H%M%S"),
                DEBUG_FILENAME
            )),
            None => self.log_dir.join(DEBUG_FILENAME),
        }
    }

    fn append(&self, path: &Path, data: &str) {
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!("failed to create log directory {:?}: {}", parent, err);
                return;
            }
        }
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(data.as_bytes()));
        if let Err(err) = result {
            tracing::warn!("failed to append dump to {:?}: {}", path, err);
        }
    }
}

fn default_log_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_LOG_SUBDIR)
}
