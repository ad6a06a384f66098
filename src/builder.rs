use std::path::PathBuf;

use crate::engine::{AuditOptions, run};
use crate::error::AuditError;
use crate::ignore_set::IgnoreSet;
use crate::local::LocalFs;
use crate::results::{AuditStats, Results};
use crate::traits::{FileSystem, ReportSink};

// ---------------------------------------------------------------------------
// AuditBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing an audit.
///
/// Created via [`mirrorcheck::audit()`](crate::audit). Configure with chained
/// builder methods, then call [`run()`](AuditBuilder::run) or
/// [`collect()`](AuditBuilder::collect).
///
/// # Example
///
/// ```rust,ignore
/// let stats = mirrorcheck::audit()
///     .source("/mnt/pool/share")
///     .mirror("/mnt/samba-check")
///     .ignore(IgnoreSet::load("ignore.txt".as_ref())?)
///     .report_symlinks(true)
///     .run(&mut WriterSink::new(std::io::stdout().lock()))?;
/// ```
pub struct AuditBuilder {
    source:          Option<PathBuf>,
    mirror:          Option<PathBuf>,
    ignore:          IgnoreSet,
    report_symlinks: bool,
    filesystem:      Box<dyn FileSystem>,
}

impl Default for AuditBuilder {
    fn default() -> Self {
        Self {
            source:          None,
            mirror:          None,
            ignore:          IgnoreSet::new(),
            report_symlinks: false,
            filesystem:      Box::new(LocalFs),
        }
    }
}

impl AuditBuilder {
    // ── Roots ─────────────────────────────────────────────────────────────

    /// The authoritative tree. Reported paths are relative to this root.
    pub fn source(mut self, root: impl Into<PathBuf>) -> Self {
        self.source = Some(root.into());
        self
    }

    /// The same storage as reached through the network share.
    pub fn mirror(mut self, root: impl Into<PathBuf>) -> Self {
        self.mirror = Some(root.into());
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Names and root-relative paths to skip. Ignored directories are not
    /// descended into.
    pub fn ignore(mut self, set: IgnoreSet) -> Self {
        self.ignore = set;
        self
    }

    /// Report every symlink as missing. Off by default, since the share is
    /// expected to re-present symlinks as plain entries.
    pub fn report_symlinks(mut self, yes: bool) -> Self {
        self.report_symlinks = yes;
        self
    }

    /// Replace the local filesystem with another [`FileSystem`].
    pub fn filesystem(mut self, fs: impl FileSystem + 'static) -> Self {
        self.filesystem = Box::new(fs);
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Run the audit, sending each missing entry to `sink` as it is found.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a root is unset, missing or not a directory, and for
    /// any filesystem or sink failure during the walk. Nothing is skipped
    /// silently: the first error ends the audit.
    pub fn run(self, sink: &mut impl ReportSink) -> Result<AuditStats, AuditError> {
        let source = self.source.ok_or(AuditError::MissingRoot("source"))?;
        let mirror = self.mirror.ok_or(AuditError::MissingRoot("mirror"))?;

        for root in [&source, &mirror] {
            if !self.filesystem.exists(root)? {
                return Err(AuditError::NotFound(root.clone()));
            }
            if !self.filesystem.is_dir(root)? {
                return Err(AuditError::InvalidRoot(root.clone()));
            }
        }

        let opts = AuditOptions {
            source_root:     source,
            mirror_root:     mirror,
            ignore:          self.ignore,
            report_symlinks: self.report_symlinks,
        };

        run(self.filesystem.as_ref(), sink, &opts)
    }

    /// Run the audit and collect missing paths in walk order.
    pub fn collect(self) -> Result<Results, AuditError> {
        let mut missing = Vec::new();
        let stats = self.run(&mut missing)?;
        Ok(Results { missing, stats })
    }
}
