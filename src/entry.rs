use std::ffi::OsString;
use std::path::PathBuf;

/// A single directory member produced by a [`FileSystem`](crate::traits::FileSystem)
/// listing.
///
/// Entries are transient: the walker consumes each one within the frame
/// that listed it and never keeps it afterwards.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// The raw entry name, byte-exact. May hold characters the mirror's
    /// protocol cannot represent.
    pub name: OsString,

    /// What kind of entry this is, classified without following symlinks.
    pub kind: EntryKind,

    /// Filesystem inode number. `None` on platforms that don't expose one;
    /// a `None` inode never matches anything during recovery.
    pub inode: Option<u64>,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

/// The kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

/// Where the walker currently believes a source directory's contents live
/// on the mirror side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorLocation {
    /// The counterpart directory was found, by name or by inode.
    Resolved(PathBuf),

    /// The counterpart could not be located. Everything below it is
    /// reported without consulting the mirror.
    Unresolved,
}
