use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AuditError;
use crate::traits::ReportSink;

/// Writes one report path per line to any [`Write`].
///
/// Bytes that aren't valid UTF-8 are rendered as U+FFFD. Only the printed
/// line is altered; the walker keeps the exact path for matching.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn flush(&mut self) -> Result<(), AuditError> {
        self.out.flush().map_err(AuditError::Report)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn report(&mut self, path: &Path) -> Result<(), AuditError> {
        writeln!(self.out, "{}", path.to_string_lossy()).map_err(AuditError::Report)
    }
}

/// Collects report paths in walk order.
impl ReportSink for Vec<PathBuf> {
    fn report(&mut self, path: &Path) -> Result<(), AuditError> {
        self.push(path.to_path_buf());
        Ok(())
    }
}
