// src/file.rs

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Create `dir` (and parents) if needed.
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Write `contents` to `path`, or to stdout when no path is given.
/// Returns the path written to.
pub fn write_output(path: Option<&Path>, contents: &str) -> io::Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                ensure_directory(parent)?;
            }
            fs::write(path, contents)?;
            logf!("Wrote {}", path.display());
            Ok(Some(path.to_path_buf()))
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(contents.as_bytes())?;
            out.flush()?;
            Ok(None)
        }
    }
}
