//! File helpers shared by the config file and the file-backed store.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::BudgetError;

const TMP_SUFFIX: &str = "tmp";

pub(crate) fn ensure_dir(path: &Path) -> Result<(), BudgetError> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Staging path next to `path`: `budget.value` stages as `budget.value.tmp`.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to the staging path and renames it over `path`. A failure leaves
/// any previous contents of `path` in place.
pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<(), BudgetError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
