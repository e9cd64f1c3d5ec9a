use serde_json::Value;

use crate::context::Context;

/// A single captured stack frame, as reported by a [`FrameSource`].
///
/// `function` is the identity of the function the frame belongs to, in
/// `Type::method` form. `file` and `line` locate where that function was
/// invoked, which for an entry-point frame is the caller's source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub function: String,
    pub file: String,
    pub line: Option<u32>,
}

impl Frame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line: Some(line),
        }
    }
}

/// The resolved file and line of a logging call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub line: Option<u32>,
}

impl CallSite {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
        }
    }

    /// Stamp `file` and `line` into a context, overwriting existing keys.
    /// An absent line becomes an empty string rather than an error.
    pub fn merge_into(&self, context: &mut Context) {
        context.insert("file", self.file.clone());
        match self.line {
            Some(line) => context.insert("line", line),
            None => context.insert("line", Value::String(String::new())),
        }
    }
}

impl From<&'static std::panic::Location<'static>> for CallSite {
    fn from(location: &'static std::panic::Location<'static>) -> Self {
        CallSite {
            file: location.file().to_string(),
            line: Some(location.line()),
        }
    }
}

/// Capability producing stack frames, newest first.
///
/// The dispatcher works against this abstraction instead of walking a
/// real stack, so call-site resolution stays a pure function that tests
/// can drive with synthetic frames.
pub trait FrameSource: Send + Sync {
    /// Return up to `max_depth` frames, newest first.
    fn frames(&self, max_depth: usize) -> Vec<Frame>;
}

/// Resolve the true call site from a captured frame sequence.
///
/// The first frame belonging to one of the severity-named entry points
/// wins: its file/line is where user code invoked the facility. When no
/// frame within the sequence qualifies, the oldest captured frame is a
/// degraded fallback; an empty sequence resolves to an empty call site.
pub fn resolve_call_site(frames: &[Frame], entry_points: &[&str]) -> CallSite {
    for frame in frames {
        if entry_points.iter().any(|name| frame.function == *name) {
            return CallSite {
                file: frame.file.clone(),
                line: frame.line,
            };
        }
    }
    match frames.last() {
        Some(frame) => CallSite {
            file: frame.file.clone(),
            line: frame.line,
        },
        None => CallSite::empty(),
    }
}

/// Raw-depth walk used by the dump writer: no entry-point filtering, the
/// caller picks the depth. Out-of-range depths clamp to the oldest frame.
pub fn frame_at_depth(frames: &[Frame], depth: usize) -> CallSite {
    if frames.is_empty() {
        return CallSite::empty();
    }
    let index = depth.saturating_sub(1).min(frames.len() - 1);
    CallSite {
        file: frames[index].file.clone(),
        line: frames[index].line,
    }
}
