use std::path::PathBuf;
use thiserror::Error;

/// Every failure the audit can hit. None of them are recovered: a partial
/// audit is worse than none, so the walk stops at the first error.
#[derive(Error, Debug)]
pub enum AuditError {
    // Startup
    #[error("no {0} root provided")]
    MissingRoot(&'static str),

    #[error("not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read ignore file {}", .path.display())]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Traversal
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("IO error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Output
    #[error("failed to write report")]
    Report(#[source] std::io::Error),

    // Third-party extensibility
    #[error("filesystem error: {0}")]
    Source(String),
}

impl AuditError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::InvalidRoot(p)
            | Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::IgnoreFile { path: p, .. }
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Wrap an `io::Error` raised at `path`, splitting out the kinds callers
    /// commonly want to name.
    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn from_io_classifies_kinds() {
        let p = PathBuf::from("/x");
        let denied = AuditError::from_io(p.clone(), io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(denied, AuditError::PermissionDenied(_)));

        let missing = AuditError::from_io(p.clone(), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(missing, AuditError::NotFound(_)));

        let other = AuditError::from_io(p.clone(), io::Error::other("boom"));
        assert!(matches!(other, AuditError::Io { .. }));
        assert_eq!(other.path(), Some(&p));
    }

    #[test]
    fn report_error_has_no_path() {
        let err = AuditError::Report(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(err.path().is_none());
    }
}
