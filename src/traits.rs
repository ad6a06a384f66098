use std::path::Path;

use crate::entry::Entry;
use crate::error::AuditError;

/// Filesystem access used by the walker, for both the source and the mirror
/// tree.
///
/// [`LocalFs`](crate::LocalFs) is the real implementation. Implement this to
/// drive an audit over anything else, such as an in-memory tree where a
/// mangled directory can be given the same inode as its source.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use mirrorcheck::{AuditError, Entry, FileSystem};
///
/// struct EmptyFs;
///
/// impl FileSystem for EmptyFs {
///     fn read_dir(&self, _dir: &Path) -> Result<Box<dyn Iterator<Item = Result<Entry, AuditError>>>, AuditError> {
///         Ok(Box::new(std::iter::empty::<Result<Entry, AuditError>>()))
///     }
///
///     fn exists(&self, _path: &Path) -> Result<bool, AuditError> {
///         Ok(true)
///     }
///
///     fn is_dir(&self, _path: &Path) -> Result<bool, AuditError> {
///         Ok(true)
///     }
/// }
/// ```
pub trait FileSystem {
    /// List the direct members of `dir`, in the order the filesystem
    /// returns them. `dir` itself is not yielded.
    ///
    /// Failing to open the directory is an `Err` on the outer result;
    /// failures on individual members are yielded in place.
    fn read_dir(
        &self,
        dir: &Path,
    ) -> Result<Box<dyn Iterator<Item = Result<Entry, AuditError>>>, AuditError>;

    /// Whether `path` exists, following symlinks.
    fn exists(&self, path: &Path) -> Result<bool, AuditError>;

    /// Whether `path` is a directory, following symlinks.
    fn is_dir(&self, path: &Path) -> Result<bool, AuditError>;
}

/// Receives the root-relative path of every entry judged missing, in walk
/// order.
pub trait ReportSink {
    fn report(&mut self, path: &Path) -> Result<(), AuditError>;
}
