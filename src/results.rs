use std::path::PathBuf;
use std::time::Duration;

/// The output of [`AuditBuilder::collect`](crate::AuditBuilder::collect).
#[derive(Debug)]
pub struct Results {
    /// Root-relative paths of missing entries, in walk order.
    pub missing: Vec<PathBuf>,

    /// Audit statistics.
    pub stats: AuditStats,
}

/// Counters for a completed audit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditStats {
    /// Source entries examined, ignored ones included.
    pub entries: usize,

    /// Source directories listed (the root included).
    pub dirs: usize,

    /// Entries reported as missing.
    pub missing: usize,

    /// Entries skipped by the ignore set.
    pub ignored: usize,

    /// Directories missing by name but found again by inode.
    pub recovered: usize,

    /// Directories missing by name and by inode.
    pub unresolved: usize,

    /// Wall-clock time of the walk.
    pub duration: Duration,
}
