//! Scoped injection of a recorder into one execution window.

use super::render::ValueRenderer;
use super::tracer::{TraceBuffer, TraceHook, TraceRecorder};
use crate::utils::error::RecordError;
use std::path::Path;

/// An armed recorder for the duration of one execution window
///
/// **Public** - dropping the window without `close` disarms the recorder
/// and discards its lines
pub struct TraceWindow<'r, R: ValueRenderer> {
    recorder: &'r mut TraceRecorder<R>,
}

impl<'r, R: ValueRenderer> TraceWindow<'r, R> {
    /// Arm `recorder` for frames under `project_root`
    ///
    /// # Errors
    /// * `RecordError::InvalidProjectRoot` - root cannot be resolved
    pub fn open(
        recorder: &'r mut TraceRecorder<R>,
        project_root: impl AsRef<Path>,
    ) -> Result<Self, RecordError> {
        recorder.start(project_root)?;
        Ok(Self { recorder })
    }

    /// The hook to register with the traced program
    pub fn hook(&mut self) -> &mut dyn TraceHook<R::Value> {
        &mut *self.recorder
    }

    /// End the window and take its lines
    pub fn close(self) -> TraceBuffer {
        self.recorder.stop()
    }
}

impl<R: ValueRenderer> Drop for TraceWindow<'_, R> {
    fn drop(&mut self) {
        if self.recorder.is_armed() {
            self.recorder.stop();
        }
    }
}

/// Run `body` as one execution window with the recorder injected as its hook
///
/// **Public** - convenience wrapper around `TraceWindow`
///
/// # Returns
/// The body's result together with the lines recorded while it ran
pub fn record_window<R, F, T>(
    recorder: &mut TraceRecorder<R>,
    project_root: impl AsRef<Path>,
    body: F,
) -> Result<(T, TraceBuffer), RecordError>
where
    R: ValueRenderer,
    F: FnOnce(&mut dyn TraceHook<R::Value>) -> T,
{
    let mut window = TraceWindow::open(recorder, project_root)?;
    let output = body(window.hook());
    Ok((output, window.close()))
}
