use std::path::Path;

use crate::error::{HarvesterError, HarvesterResult};

/// Loads the ordered ward-code universe from a line-oriented text file.
///
/// Blank lines and lines starting with `#` are skipped; surrounding
/// whitespace is trimmed. The file's line order defines the walk order and
/// the meaning of checkpoint ward indices, so it must stay stable between
/// runs that share a checkpoint.
pub fn load_ward_codes(path: &Path) -> HarvesterResult<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|_| HarvesterError::NoWardCodes {
        path: path.to_path_buf(),
    })?;

    let wards: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if wards.is_empty() {
        return Err(HarvesterError::NoWardCodes {
            path: path.to_path_buf(),
        });
    }

    Ok(wards)
}
