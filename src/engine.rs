use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, trace};

use crate::entry::{Entry, MirrorLocation};
use crate::error::AuditError;
use crate::ignore_set::IgnoreSet;
use crate::path::PathResolver;
use crate::results::AuditStats;
use crate::traits::{FileSystem, ReportSink};

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct AuditOptions {
    pub source_root:     PathBuf,
    pub mirror_root:     PathBuf,
    pub ignore:          IgnoreSet,
    pub report_symlinks: bool,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Compare `source_root` against `mirror_root` and report every source entry
/// that cannot be found through the mirror.
///
/// Called by `AuditBuilder::run()` after validating the roots.
pub(crate) fn run(
    fs: &dyn FileSystem,
    sink: &mut dyn ReportSink,
    opts: &AuditOptions,
) -> Result<AuditStats, AuditError> {
    let start = Instant::now();

    let mut walker = Walker {
        fs,
        sink,
        ignore:          &opts.ignore,
        resolver:        PathResolver::new(&opts.source_root),
        report_symlinks: opts.report_symlinks,
        stats:           AuditStats::default(),
    };
    walker.walk(&opts.source_root, &opts.mirror_root)?;

    let mut stats = walker.stats;
    stats.duration = start.elapsed();
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

/// One source directory being compared: its remaining listing and where its
/// counterpart lives on the mirror side.
struct Frame {
    entries: Box<dyn Iterator<Item = Result<Entry, AuditError>>>,
    mirror:  MirrorLocation,
}

struct Walker<'a> {
    fs:              &'a dyn FileSystem,
    sink:            &'a mut dyn ReportSink,
    ignore:          &'a IgnoreSet,
    resolver:        PathResolver,
    report_symlinks: bool,
    stats:           AuditStats,
}

impl Walker<'_> {
    /// Depth-first over an explicit stack. A child frame is pushed as soon as
    /// its directory entry is seen, so output order is identical to a
    /// recursive walk while nesting depth is bounded only by memory.
    fn walk(&mut self, source_root: &Path, mirror_root: &Path) -> Result<(), AuditError> {
        let root = self.descend(source_root, MirrorLocation::Resolved(mirror_root.to_path_buf()))?;
        let mut stack = vec![root];

        while let Some(frame) = stack.last_mut() {
            let Some(entry) = frame.entries.next() else {
                stack.pop();
                continue;
            };
            let entry = entry?;

            if let Some(child) = self.visit(entry, &frame.mirror)? {
                stack.push(child);
            }
        }

        Ok(())
    }

    /// Decide one entry. Returns the frame to descend into, if any.
    fn visit(&mut self, entry: Entry, mirror: &MirrorLocation) -> Result<Option<Frame>, AuditError> {
        self.stats.entries += 1;
        let relative = self.resolver.resolve(&entry.path);

        if self.ignore.is_ignored(&entry.name, &relative) {
            debug!(path = %relative.display(), "ignored");
            self.stats.ignored += 1;
            return Ok(None);
        }

        let mirror_dir = match mirror {
            MirrorLocation::Resolved(dir) => dir,
            // The parent never turned up on the mirror. Report everything
            // below it without asking the mirror again.
            MirrorLocation::Unresolved => {
                self.report(&relative)?;
                return if entry.is_dir() {
                    self.descend(&entry.path, MirrorLocation::Unresolved).map(Some)
                } else {
                    Ok(None)
                };
            }
        };

        // Servers re-present symlinks as whatever they point to, or drop
        // them. Never descended, never recovered.
        if entry.is_symlink() {
            if self.report_symlinks {
                self.report(&relative)?;
            }
            return Ok(None);
        }

        let candidate = mirror_dir.join(&entry.name);
        if self.fs.exists(&candidate)? {
            return if entry.is_dir() {
                self.descend(&entry.path, MirrorLocation::Resolved(candidate)).map(Some)
            } else {
                Ok(None)
            };
        }

        self.report(&relative)?;

        if !entry.is_dir() {
            return Ok(None);
        }

        // Files may be hard-linked, directories may not: only a directory's
        // inode identifies it uniquely.
        let recovered = self.recover(&entry, mirror_dir)?;
        self.descend(&entry.path, recovered).map(Some)
    }

    /// Look for a sibling under `mirror_dir` carrying the same inode as the
    /// source directory, i.e. the same directory under a mangled name.
    fn recover(&mut self, entry: &Entry, mirror_dir: &Path) -> Result<MirrorLocation, AuditError> {
        // A name match may have landed on a file where the source has a
        // directory; it has no siblings to search.
        if let (Some(inode), true) = (entry.inode, self.fs.is_dir(mirror_dir)?) {
            for sibling in self.fs.read_dir(mirror_dir)? {
                let sibling = sibling?;
                if sibling.inode == Some(inode) {
                    debug!(
                        source = %entry.path.display(),
                        mirror = %sibling.path.to_string_lossy(),
                        inode,
                        "recovered mangled directory"
                    );
                    self.stats.recovered += 1;
                    return Ok(MirrorLocation::Resolved(sibling.path));
                }
            }
        }

        debug!(source = %entry.path.display(), "directory not found on mirror");
        self.stats.unresolved += 1;
        Ok(MirrorLocation::Unresolved)
    }

    fn descend(&mut self, dir: &Path, mirror: MirrorLocation) -> Result<Frame, AuditError> {
        trace!(dir = %dir.display(), ?mirror, "entering");
        self.stats.dirs += 1;
        Ok(Frame {
            entries: self.fs.read_dir(dir)?,
            mirror,
        })
    }

    fn report(&mut self, relative: &Path) -> Result<(), AuditError> {
        self.stats.missing += 1;
        self.sink.report(relative)
    }
}
