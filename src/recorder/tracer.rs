//! Hierarchical call tracer.
//!
//! The recorder receives call and return events from the running program
//! through `TraceHook`, keeps those whose source file lies under the project
//! root, and appends one rendered line per kept event to its buffer:
//!
//! ```text
//! > main in app/cli.py
//! >> parse in app/config.py
//! < parse returned: {'debug': True}
//!  main returned: None
//! ```
//!
//! A call increments the depth before rendering, a return decrements it
//! (never below zero) before rendering.

use super::filter::ProjectFilter;
use super::render::{render_bounded, ValueRenderer};
use crate::utils::config::{CALL_INDENT, RETURN_INDENT};
use crate::utils::error::RecordError;
use log::debug;
use std::path::Path;

/// A function activation as seen by the hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Name of the function being called or returning
    pub function_name: &'a str,

    /// Source file as reported by the runtime (may be relative or synthetic)
    pub source_file: &'a str,
}

impl<'a> Frame<'a> {
    pub fn new(function_name: &'a str, source_file: &'a str) -> Self {
        Self {
            function_name,
            source_file,
        }
    }
}

/// Interception points invoked synchronously by the traced program
///
/// **Public** - the runtime drives an implementation of this for exactly
/// one execution window. Implementations must not block or fail.
pub trait TraceHook<V: ?Sized> {
    /// A function was entered
    fn on_call(&mut self, frame: Frame<'_>);

    /// A function returned `value`
    fn on_return(&mut self, frame: Frame<'_>, value: &V);

    /// A new line is about to execute
    fn on_line(&mut self, _frame: Frame<'_>) {}

    /// An exception was raised inside the frame
    fn on_exception(&mut self, _frame: Frame<'_>) {}
}

/// Kind of a kept event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Call,
    Return,
}

/// A kept event, ready to be rendered as one trace line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub kind: EventKind,
    pub function_name: String,

    /// Project-relative source file
    pub source_file: String,

    /// Indentation depth of the rendered line
    pub depth: usize,

    /// Bounded rendering of the returned value (returns only)
    pub return_text: Option<String>,
}

impl TraceEvent {
    /// Render the trace line, including its trailing newline
    pub fn render(&self) -> String {
        match self.kind {
            EventKind::Call => format!(
                "{} {} in {}\n",
                indent(CALL_INDENT, self.depth),
                self.function_name,
                self.source_file
            ),
            EventKind::Return => format!(
                "{} {} returned: {}\n",
                indent(RETURN_INDENT, self.depth),
                self.function_name,
                self.return_text.as_deref().unwrap_or_default()
            ),
        }
    }
}

fn indent(marker: char, depth: usize) -> String {
    std::iter::repeat(marker).take(depth).collect()
}

/// Rendered trace lines of one execution window
///
/// **Public** - handed from the recorder to the writer by value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceBuffer {
    lines: Vec<String>,
}

impl TraceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lines in recording order, each ending with `\n`
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }
}

impl From<Vec<String>> for TraceBuffer {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

/// Records kept call/return events of one execution window
///
/// **Public** - construct once, then `start` / `stop` around each window
pub struct TraceRecorder<R: ValueRenderer> {
    renderer: R,
    filter: Option<ProjectFilter>,
    buffer: TraceBuffer,
    depth: usize,
    dropped: usize,
}

impl<R: ValueRenderer> TraceRecorder<R> {
    /// Create a disarmed recorder rendering return values with `renderer`
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            filter: None,
            buffer: TraceBuffer::new(),
            depth: 0,
            dropped: 0,
        }
    }

    /// Arm the recorder for frames under `project_root`
    ///
    /// **Public** - events are ignored until this succeeds
    ///
    /// # Errors
    /// * `RecordError::InvalidProjectRoot` - root cannot be resolved; the recorder stays disarmed
    pub fn start(&mut self, project_root: impl AsRef<Path>) -> Result<(), RecordError> {
        let project_root = project_root.as_ref();
        let filter = ProjectFilter::new(project_root)?;

        debug!("Tracing armed for project root: {}", project_root.display());

        self.filter = Some(filter);
        self.buffer = TraceBuffer::new();
        self.depth = 0;
        self.dropped = 0;
        Ok(())
    }

    /// Disarm the recorder and hand over the recorded lines
    ///
    /// **Public** - resets the depth so the recorder can serve the next window
    pub fn stop(&mut self) -> TraceBuffer {
        self.filter = None;
        self.depth = 0;
        let buffer = std::mem::take(&mut self.buffer);

        debug!(
            "Tracing stopped: {} lines kept, {} events dropped",
            buffer.len(),
            self.dropped
        );

        buffer
    }

    pub fn is_armed(&self) -> bool {
        self.filter.is_some()
    }

    /// Current call depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Events dropped in the current window
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Lines recorded so far in the current window
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Project-relative source of a frame, `None` when disarmed or filtered out
    fn kept_source(&mut self, frame: &Frame<'_>) -> Option<String> {
        let filter = self.filter.as_mut()?;
        let source = if is_writable_function_name(frame.function_name) {
            filter.relative_source(frame.source_file)
        } else {
            debug!("Dropping frame with unwritable name: {:?}", frame.function_name);
            None
        };
        if source.is_none() {
            self.dropped += 1;
        }
        source
    }
}

/// Whether the trace-line grammars read `name` back as one function name
///
/// Names are single tokens; a leading `<` needs a closing `>` so it cannot
/// be confused with return indentation.
pub fn is_writable_function_name(name: &str) -> bool {
    let single_token = !name.is_empty()
        && !name.chars().any(|c| c.is_whitespace() || c.is_control());

    single_token && !name.starts_with('>') && (!name.starts_with('<') || name.ends_with('>'))
}

impl<R: ValueRenderer> TraceHook<R::Value> for TraceRecorder<R> {
    fn on_call(&mut self, frame: Frame<'_>) {
        let Some(source_file) = self.kept_source(&frame) else {
            return;
        };

        self.depth += 1;
        let event = TraceEvent {
            kind: EventKind::Call,
            function_name: frame.function_name.to_string(),
            source_file,
            depth: self.depth,
            return_text: None,
        };
        self.buffer.push(event.render());
    }

    fn on_return(&mut self, frame: Frame<'_>, value: &R::Value) {
        let Some(source_file) = self.kept_source(&frame) else {
            return;
        };

        self.depth = self.depth.saturating_sub(1);
        let event = TraceEvent {
            kind: EventKind::Return,
            function_name: frame.function_name.to_string(),
            source_file,
            depth: self.depth,
            return_text: Some(render_bounded(&self.renderer, value)),
        };
        self.buffer.push(event.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::render::DebugRenderer;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_event_render() {
        let call = TraceEvent {
            kind: EventKind::Call,
            function_name: "foo".to_string(),
            source_file: "a/b.py".to_string(),
            depth: 2,
            return_text: None,
        };
        assert_eq!(call.render(), ">> foo in a/b.py\n");

        let ret = TraceEvent {
            kind: EventKind::Return,
            depth: 0,
            return_text: Some("42".to_string()),
            ..call
        };
        assert_eq!(ret.render(), " foo returned: 42\n");
    }

    #[test]
    fn test_disarmed_recorder_ignores_events() {
        let mut recorder = TraceRecorder::new(DebugRenderer::<i32>::new());
        recorder.on_call(Frame::new("foo", "/tmp/a.py"));
        recorder.on_return(Frame::new("foo", "/tmp/a.py"), &1);

        assert!(recorder.buffer().is_empty());
        assert_eq!(recorder.depth(), 0);
    }

    #[test]
    fn test_nested_depths() {
        let dir = tempdir().unwrap();
        let outer = dir.path().join("outer.py");
        let inner = dir.path().join("inner.py");
        let (outer, inner) = (outer.to_str().unwrap(), inner.to_str().unwrap());

        let mut recorder = TraceRecorder::new(DebugRenderer::<i32>::new());
        recorder.start(dir.path()).unwrap();

        recorder.on_call(Frame::new("outer", outer));
        recorder.on_call(Frame::new("inner", inner));
        recorder.on_return(Frame::new("inner", inner), &1);
        recorder.on_return(Frame::new("outer", outer), &2);

        let buffer = recorder.stop();
        assert_eq!(
            buffer.lines(),
            &[
                "> outer in outer.py\n".to_string(),
                ">> inner in inner.py\n".to_string(),
                "< inner returned: 1\n".to_string(),
                " outer returned: 2\n".to_string(),
            ]
        );
        assert!(!recorder.is_armed());
    }

    #[test]
    fn test_dropped_frames_leave_depth_alone() {
        let dir = tempdir().unwrap();
        let kept = dir.path().join("kept.py");
        let kept = kept.to_str().unwrap();

        let mut recorder = TraceRecorder::new(DebugRenderer::<i32>::new());
        recorder.start(dir.path()).unwrap();

        recorder.on_call(Frame::new("kept", kept));
        recorder.on_call(Frame::new("stdlib", "/usr/lib/python3/json/__init__.py"));
        recorder.on_call(Frame::new("<module>", "<string>"));
        assert_eq!(recorder.depth(), 1);

        recorder.on_return(Frame::new("stdlib", "/usr/lib/python3/json/__init__.py"), &0);
        assert_eq!(recorder.depth(), 1);
        assert_eq!(recorder.buffer().len(), 1);
    }

    #[test]
    fn test_unwritable_names_are_dropped() {
        assert!(is_writable_function_name("Foo::bar"));
        assert!(is_writable_function_name("<lambda>"));
        assert!(is_writable_function_name("in"));
        assert!(!is_writable_function_name("two words"));
        assert!(!is_writable_function_name("<partial"));
        assert!(!is_writable_function_name(""));

        let dir = tempdir().unwrap();
        let file = dir.path().join("a.py");
        let file = file.to_str().unwrap();

        let mut recorder = TraceRecorder::new(DebugRenderer::<i32>::new());
        recorder.start(dir.path()).unwrap();
        recorder.on_call(Frame::new("two words", file));
        recorder.on_return(Frame::new("two words", file), &1);

        assert_eq!(recorder.depth(), 0);
        assert_eq!(recorder.dropped(), 2);
        assert!(recorder.stop().is_empty());
    }

    #[test]
    fn test_unbalanced_return_floors_at_zero() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.py");
        let file = file.to_str().unwrap();

        let mut recorder = TraceRecorder::new(DebugRenderer::<i32>::new());
        recorder.start(dir.path()).unwrap();
        recorder.on_return(Frame::new("late", file), &7);

        assert_eq!(recorder.depth(), 0);
        assert_eq!(recorder.stop().lines(), &[" late returned: 7\n".to_string()]);
    }
}
