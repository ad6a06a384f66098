use std::io;
use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};

use crate::entry::{Entry, EntryKind};
use crate::error::AuditError;
use crate::traits::FileSystem;

// ---------------------------------------------------------------------------
// LocalFs
// ---------------------------------------------------------------------------

/// [`FileSystem`] backed by the local OS, used for both trees when the mirror
/// is mounted locally (e.g. `mount.cifs ... -o serverino`).
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn read_dir(
        &self,
        dir: &Path,
    ) -> Result<Box<dyn Iterator<Item = Result<Entry, AuditError>>>, AuditError> {
        // One level only, no filtering, no sorting: listing order is
        // whatever the directory hands back.
        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .ignore(false)
            .parents(false)
            .hidden(false)
            .follow_links(false)
            .same_file_system(false)
            .max_depth(Some(1))
            .build();

        let mut entries = Vec::new();
        for res in walker {
            let entry = res.map_err(map_ignore_error)?;
            if entry.depth() == 0 {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                if !is_dir && !entry.path().is_dir() {
                    return Err(AuditError::Io {
                        path:   dir.to_path_buf(),
                        source: io::Error::from(io::ErrorKind::NotADirectory),
                    });
                }
                continue;
            }
            entries.push(to_entry(&entry));
        }

        Ok(Box::new(entries.into_iter().map(Ok::<Entry, AuditError>)))
    }

    fn exists(&self, path: &Path) -> Result<bool, AuditError> {
        match path.try_exists() {
            Ok(found) => Ok(found),
            // The mirror may refuse a name it cannot represent outright
            // instead of answering "no such file". A file standing where a
            // directory was expected answers "not a directory".
            Err(e) if is_absent(&e) => Ok(false),
            Err(e) => Err(AuditError::from_io(path.to_path_buf(), e)),
        }
    }

    fn is_dir(&self, path: &Path) -> Result<bool, AuditError> {
        match std::fs::metadata(path) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound || is_absent(&e) => Ok(false),
            Err(e) => Err(AuditError::from_io(path.to_path_buf(), e)),
        }
    }
}

fn is_absent(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::InvalidInput | io::ErrorKind::NotADirectory
    )
}

fn to_entry(entry: &DirEntry) -> Entry {
    let kind = match entry.file_type() {
        Some(ft) if ft.is_dir() => EntryKind::Dir,
        Some(ft) if ft.is_file() => EntryKind::File,
        Some(ft) if ft.is_symlink() => EntryKind::Symlink,
        _ => EntryKind::Other,
    };

    Entry {
        path: entry.path().to_path_buf(),
        name: entry.file_name().to_os_string(),
        kind,
        inode: inode_of(entry),
    }
}

#[cfg(unix)]
fn inode_of(entry: &DirEntry) -> Option<u64> {
    entry.ino()
}

#[cfg(not(unix))]
fn inode_of(_entry: &DirEntry) -> Option<u64> {
    None
}

// ---------------------------------------------------------------------------
// Map ignore::Error to AuditError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> AuditError {
    match e {
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => AuditError::from_io(path, io_err),
            other => AuditError::Source(format!("{}: {}", path.display(), other)),
        },
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::Io(io_err) => AuditError::Io {
            path: PathBuf::new(),
            source: io_err,
        },
        other => AuditError::Source(other.to_string()),
    }
}
