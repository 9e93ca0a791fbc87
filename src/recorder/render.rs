//! Return-value rendering strategies.
//!
//! The recorder never looks inside returned values; it hands them to a
//! `ValueRenderer` and bounds whatever text comes back.

use crate::utils::config::{MAX_RETURN_REPR_LEN, TRUNCATION_SUFFIX, UNREPRESENTABLE_PLACEHOLDER};
use crate::utils::error::RenderError;
use std::fmt::{self, Write};
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

/// Strategy turning a returned value into text
///
/// **Public** - implement this for the value model of the traced program
pub trait ValueRenderer {
    /// Type of the values handed to the return hook
    type Value: ?Sized;

    /// Render `value` to its textual representation
    ///
    /// # Errors
    /// * `RenderError::Failed` - the value cannot be represented
    fn render(&self, value: &Self::Value) -> Result<String, RenderError>;
}

/// Renders values through their `Debug` implementation
pub struct DebugRenderer<T: ?Sized>(PhantomData<fn(&T)>);

impl<T: ?Sized> DebugRenderer<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Default for DebugRenderer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug + ?Sized> ValueRenderer for DebugRenderer<T> {
    type Value = T;

    fn render(&self, value: &T) -> Result<String, RenderError> {
        let mut text = String::new();
        write!(text, "{:?}", value)
            .map_err(|_| RenderError::Failed("Debug formatter returned an error".to_string()))?;
        Ok(text)
    }
}

/// Renders values through their `Display` implementation
pub struct DisplayRenderer<T: ?Sized>(PhantomData<fn(&T)>);

impl<T: ?Sized> DisplayRenderer<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Default for DisplayRenderer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display + ?Sized> ValueRenderer for DisplayRenderer<T> {
    type Value = T;

    fn render(&self, value: &T) -> Result<String, RenderError> {
        let mut text = String::new();
        write!(text, "{}", value)
            .map_err(|_| RenderError::Failed("Display formatter returned an error".to_string()))?;
        Ok(text)
    }
}

/// Adapts a closure into a renderer
///
/// # Example
/// ```ignore
/// let renderer = FnRenderer::new(|v: &Vec<u8>| Ok(format!("{} bytes", v.len())));
/// ```
pub struct FnRenderer<V: ?Sized, F> {
    render_fn: F,
    _value: PhantomData<fn(&V)>,
}

impl<V: ?Sized, F> FnRenderer<V, F>
where
    F: Fn(&V) -> Result<String, RenderError>,
{
    pub fn new(render_fn: F) -> Self {
        Self {
            render_fn,
            _value: PhantomData,
        }
    }
}

impl<V: ?Sized, F> ValueRenderer for FnRenderer<V, F>
where
    F: Fn(&V) -> Result<String, RenderError>,
{
    type Value = V;

    fn render(&self, value: &V) -> Result<String, RenderError> {
        (self.render_fn)(value)
    }
}

/// Render a value for a return line, never failing
///
/// **Public** - used by the recorder
///
/// Failures and panics inside the renderer become the placeholder text;
/// anything longer than `MAX_RETURN_REPR_LEN` characters is cut and suffixed.
pub fn render_bounded<R: ValueRenderer + ?Sized>(renderer: &R, value: &R::Value) -> String {
    let rendered = panic::catch_unwind(AssertUnwindSafe(|| renderer.render(value)))
        .unwrap_or(Err(RenderError::Panicked));

    match rendered {
        Ok(text) => truncate_repr(text),
        Err(_) => UNREPRESENTABLE_PLACEHOLDER.to_string(),
    }
}

/// Cut `text` to `MAX_RETURN_REPR_LEN` characters plus the truncation suffix
///
/// **Public** - counts characters, not bytes
pub fn truncate_repr(mut text: String) -> String {
    if let Some((cut, _)) = text.char_indices().nth(MAX_RETURN_REPR_LEN) {
        text.truncate(cut);
        text.push_str(TRUNCATION_SUFFIX);
    }
    text
}
