//! # mirrorcheck CLI
//!
//! Report files missing or mangled when a share is accessed over SMB.
//!
//! The share must be mounted locally with stable inode numbers, e.g.:
//!
//! ```text
//! mount.cifs //localhost/Share /mnt/samba-check -o ro,serverino,iocharset=utf8,vers=3.0,username=user
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use mirrorcheck::{IgnoreSet, WriterSink};

/// Report files that are missing or mangled when accessed through a network share
#[derive(Parser)]
#[command(name = "mirrorcheck")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Source directory (the tree that is shared)
    #[arg(long, value_name = "DIR", value_parser = resolve_path)]
    src: PathBuf,

    /// The source directory, mounted locally through the share
    #[arg(long, visible_alias = "mirror", value_name = "DIR", value_parser = resolve_path)]
    smb: PathBuf,

    /// Newline-separated names or root-relative paths to skip
    #[arg(long, value_name = "FILE", env = "MIRRORCHECK_IGNORE", value_parser = resolve_path)]
    ignore: Option<PathBuf>,

    /// Report all symlinks as missing (skipped by default)
    #[arg(long)]
    symlinks: bool,
}

/// Make `p` absolute and resolve it, failing if it does not exist.
fn resolve_path(p: &str) -> Result<PathBuf, String> {
    std::fs::canonicalize(p).map_err(|e| format!("{p}: {e}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("MIRRORCHECK_LOG")
                .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let ignore = match &cli.ignore {
        Some(path) => IgnoreSet::load(path)?,
        None => IgnoreSet::new(),
    };
    info!(tokens = ignore.len(), "loaded ignore list");

    let mut sink = WriterSink::new(io::stdout().lock());
    let stats = mirrorcheck::audit()
        .source(&cli.src)
        .mirror(&cli.smb)
        .ignore(ignore)
        .report_symlinks(cli.symlinks)
        .run(&mut sink)
        .with_context(|| format!("auditing {} against {}", cli.src.display(), cli.smb.display()))?;
    sink.flush()?;

    info!(
        entries = stats.entries,
        dirs = stats.dirs,
        missing = stats.missing,
        ignored = stats.ignored,
        recovered = stats.recovered,
        unresolved = stats.unresolved,
        secs = stats.duration.as_secs_f64(),
        "audit complete"
    );

    Ok(())
}
