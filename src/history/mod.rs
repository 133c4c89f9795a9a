//! Play history log.
//!
//! An append-only text file recording what was played, one
//! `title | identifier` line per play. Display-only: nothing reads this
//! back as authoritative state, and a missing file just means no history
//! yet.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Append a played track to the history log.
pub fn append(path: &Path, title: &str, track_id: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{title} | {track_id}")?;
    Ok(())
}

/// Read the whole history log. `None` when no history exists yet.
pub fn read_all(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(std::fs::read_to_string(path)?))
}

/// Remove the history log. A missing file is a no-op.
pub fn clear(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
