use std::path::{Path, PathBuf};

/// Turns paths under the source root into root-relative `/a/b/c` form.
///
/// Only the source hierarchy defines reporting identity; mirror paths are
/// never resolved through this.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `path` relative to the root, prefixed with `/`.
    ///
    /// A path outside the root comes back unchanged. The walker only ever
    /// passes descendants of the root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(&self.root) {
            Ok(rest) => Path::new("/").join(rest),
            Err(_) => path.to_path_buf(),
        }
    }
}
