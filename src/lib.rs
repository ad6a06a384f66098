//! # mirrorcheck
//!
//! Find what a network share silently loses.
//!
//! mirrorcheck walks an authoritative directory tree next to a second mount of
//! the *same* storage reached through a file-sharing protocol such as SMB, and
//! reports every entry that can't be found through the share. Names with
//! characters the protocol can't carry get mangled, symlinks get flattened or
//! dropped, and whatever sits under a mangled directory is easy to miss. Those
//! are exactly the files a backup over the share will skip.
//!
//! Entries are matched by name. A directory missing by name is looked up again
//! among its mirror siblings by inode number, so its contents are still
//! compared under the mangled name. A directory found neither way has every
//! descendant reported, at any depth, not just its direct children.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mirrorcheck::{IgnoreSet, WriterSink};
//!
//! let ignore: IgnoreSet = [".DS_Store"].into_iter().collect();
//! let mut sink = WriterSink::new(std::io::stdout().lock());
//!
//! let stats = mirrorcheck::audit()
//!     .source("/mnt/pool/share")
//!     .mirror("/mnt/samba-check")
//!     .ignore(ignore)
//!     .run(&mut sink)?;
//!
//! eprintln!("{} missing out of {} entries", stats.missing, stats.entries);
//! # Ok::<(), mirrorcheck::AuditError>(())
//! ```
//!
//! # Limitations
//!
//! Inode recovery assumes each directory inode has exactly one parent. On
//! filesystems where that doesn't hold (hard-linked directories, bind mounts
//! blurring identity) a mangled directory may be matched to the wrong
//! sibling.

#![forbid(unsafe_code)]

mod builder;
mod engine;
mod entry;
mod error;
mod ignore_set;
mod local;
mod path;
mod results;
mod sink;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::AuditBuilder;
pub use entry::{Entry, EntryKind, MirrorLocation};
pub use error::AuditError;
pub use ignore_set::IgnoreSet;
pub use local::LocalFs;
pub use path::PathResolver;
pub use results::{AuditStats, Results};
pub use sink::WriterSink;
pub use traits::{FileSystem, ReportSink};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`AuditBuilder`] to configure and run an audit.
///
/// # Example
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::create_dir(dir.path().join("src")).unwrap();
/// std::fs::create_dir(dir.path().join("smb")).unwrap();
/// std::fs::write(dir.path().join("src").join("only-here.txt"), "x").unwrap();
///
/// let results = mirrorcheck::audit()
///     .source(dir.path().join("src"))
///     .mirror(dir.path().join("smb"))
///     .collect()
///     .unwrap();
///
/// assert_eq!(results.missing, vec![std::path::PathBuf::from("/only-here.txt")]);
/// ```
pub fn audit() -> AuditBuilder {
    AuditBuilder::default()
}
