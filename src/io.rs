//! File boundary: documents in, formatted scores out.

use std::{fs, path::Path};

use tracing::debug;

use crate::{
    error::{Result, SimilarityError},
    format::format_score,
};

/// Read a UTF-8 document and strip surrounding whitespace.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| SimilarityError::io(path, e))?;
    let text = String::from_utf8(bytes).map_err(|_| SimilarityError::Decode {
        path: path.to_path_buf(),
    })?;
    debug!(path = %path.display(), bytes = text.len(), "read document");
    Ok(text.trim().to_string())
}

/// Write the two-decimal score, no trailing newline.
pub fn write_score<P: AsRef<Path>>(path: P, score: f64) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, format_score(score)).map_err(|e| SimilarityError::io(path, e))
}

/// Write one score file per entry under `dir`, creating it if needed.
pub fn write_scores_batch<P, S>(dir: P, entries: &[(S, f64)]) -> Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| SimilarityError::io(dir, e))?;
    for (name, score) in entries {
        write_score(dir.join(name.as_ref()), *score)?;
    }
    Ok(())
}
