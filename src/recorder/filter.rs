//! Project-root filtering for traced frames.
//!
//! A frame is kept only when its source file lies under the project root.
//! Resolution is lexical (no filesystem access) so that it is safe to run
//! inside the interception callback; the project root itself is resolved
//! once, when the filter is built.

use crate::utils::config::CALL_KEY_SEPARATOR;
use crate::utils::error::{FilterError, RecordError};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Decides which frames belong to the project and how their files are named
///
/// **Public** - owned by the recorder for one execution window
#[derive(Debug, Clone)]
pub struct ProjectFilter {
    /// Absolute forms of the project root (lexical and canonical)
    roots: Vec<PathBuf>,

    /// Directory relative source paths are resolved against
    base_dir: PathBuf,

    /// Source file -> relative name, `None` when the file is not kept
    cache: HashMap<String, Option<String>>,
}

impl ProjectFilter {
    /// Build a filter for `project_root`
    ///
    /// **Public** - the root must exist; this is the only step that touches
    /// the filesystem
    ///
    /// # Errors
    /// * `RecordError::InvalidProjectRoot` - root cannot be resolved
    pub fn new(project_root: impl AsRef<Path>) -> Result<Self, RecordError> {
        let project_root = project_root.as_ref();
        let invalid = |source| RecordError::InvalidProjectRoot {
            path: project_root.to_path_buf(),
            source,
        };

        let canonical = std::fs::canonicalize(project_root).map_err(invalid)?;
        let base_dir = std::env::current_dir().map_err(invalid)?;

        let mut roots = Vec::with_capacity(2);
        if let Some(lexical) = normalize_lexically(&base_dir.join(project_root)) {
            roots.push(lexical);
        }
        if !roots.contains(&canonical) {
            roots.push(canonical);
        }

        Ok(Self {
            roots,
            base_dir,
            cache: HashMap::new(),
        })
    }

    /// Resolve a frame's source file to its project-relative name
    ///
    /// **Public** - pure resolution, no caching
    ///
    /// # Errors
    /// * `FilterError::Unresolvable` - generated code or a path escaping the filesystem root
    /// * `FilterError::OutsideRoot` - file is not under the project root
    /// * `FilterError::Unrepresentable` - neither the relative path nor the
    ///   base name can be written to a trace line
    pub fn resolve(&self, source_file: &str) -> Result<String, FilterError> {
        if is_synthetic(source_file) {
            return Err(FilterError::Unresolvable(source_file.to_string()));
        }

        let absolute = self.base_dir.join(source_file);
        let resolved = normalize_lexically(&absolute)
            .ok_or_else(|| FilterError::Unresolvable(source_file.to_string()))?;

        let root = self
            .roots
            .iter()
            .find(|root| resolved.starts_with(root) && resolved != **root)
            .ok_or_else(|| FilterError::OutsideRoot(resolved.clone()))?;

        // Relativization fails when the relative path cannot be read back
        // from a trace line; the base name stands in for it then.
        resolved
            .strip_prefix(root)
            .ok()
            .and_then(writable_name)
            .or_else(|| writable_name(Path::new(resolved.file_name()?)))
            .ok_or_else(|| FilterError::Unrepresentable(resolved.clone()))
    }

    /// Project-relative name of a kept file, `None` if the frame is dropped
    ///
    /// **Public** - called from the interception callback; never fails
    pub fn relative_source(&mut self, source_file: &str) -> Option<String> {
        if let Some(cached) = self.cache.get(source_file) {
            return cached.clone();
        }

        let kept = self.resolve(source_file).ok();
        self.cache.insert(source_file.to_string(), kept.clone());
        kept
    }
}

/// Names such as `<string>` or `<frozen importlib>` belong to generated code
fn is_synthetic(source_file: &str) -> bool {
    source_file.trim().is_empty() || (source_file.starts_with('<') && source_file.ends_with('>'))
}

/// The path as trace-line text, if the parser can recover it unchanged
///
/// Call keys join file and function with `::` and the call grammar trims
/// whitespace around the file, so neither may appear there.
fn writable_name(path: &Path) -> Option<String> {
    let name = path.to_str()?;
    let writable = !name.is_empty()
        && name.trim() == name
        && !name.contains(CALL_KEY_SEPARATOR)
        && !name.chars().any(char::is_control);

    writable.then(|| name.to_string())
}

/// Collapse `.` and `..` components without consulting the filesystem
///
/// Returns `None` when `..` would climb above the root.
pub fn normalize_lexically(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = normalized.parent().is_none();
                if at_root || !normalized.pop() {
                    return None;
                }
            }
            Component::Normal(part) => normalized.push(part),
        }
    }

    Some(normalized)
}
