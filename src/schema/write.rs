use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{EtlError, Result};

/// Write `path` atomically: fill a temp file in the same directory through
/// `fill`, then rename it over the destination.
///
/// A failure anywhere leaves any previous file at `path` untouched.
pub fn write_atomic<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file());
        fill(&mut out)?;
        out.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| EtlError::Io(e.error))?;

    debug!(path = %path.display(), "wrote file");
    Ok(())
}
