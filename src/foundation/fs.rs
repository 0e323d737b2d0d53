use std::path::Path;

use anyhow::Context as _;

use crate::ForgeResult;

/// Create `dir` (and parents) if it does not exist yet.
pub(crate) fn ensure_dir(dir: &Path) -> ForgeResult<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

/// Write a finished fixture buffer to `path`.
///
/// Nothing is cleaned up on failure; a truncated or missing file is the visible symptom.
pub(crate) fn write_fixture(path: &Path, bytes: &[u8]) -> ForgeResult<()> {
    std::fs::write(path, bytes).with_context(|| format!("write fixture '{}'", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote fixture");
    Ok(())
}

/// Read a whole file for probing.
pub(crate) fn read_file(path: &Path) -> ForgeResult<Vec<u8>> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    Ok(bytes)
}
