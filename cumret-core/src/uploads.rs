use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use crate::error::Result;
use crate::util::sanitize::{base_name, safe_file_name};

/// Ticks between 0001-01-01 and 1970-01-01.
const UNIX_EPOCH_TICKS: i128 = 621_355_968_000_000_000;

/// 100 ns intervals since 0001-01-01 UTC.
fn utc_ticks(now: OffsetDateTime) -> i128 {
    UNIX_EPOCH_TICKS + now.unix_timestamp_nanos() / 100
}

/// Writes an upload under `folder` as `{ticks}{safe name}`, creating the
/// folder when needed.
pub fn store_upload(folder: &Path, file_name: &str, content: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(folder)?;
    let ticks = utc_ticks(OffsetDateTime::now_utc());
    let path = folder.join(format!("{ticks}{}", safe_file_name(base_name(file_name))));
    fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_under_unique_safe_name() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("uploads");
        let p = store_upload(&folder, "C:\\data\\my file.csv", b"x;y\n").unwrap();

        assert_eq!(p.parent(), Some(folder.as_path()));
        let name = p.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.ends_with("my_file.csv"), "{name}");
        assert!(name.trim_end_matches("my_file.csv").chars().all(|c| c.is_ascii_digit()));
        assert_eq!(fs::read(&p).unwrap(), b"x;y\n");

        let ticks: i128 = name.trim_end_matches("my_file.csv").parse().unwrap();
        assert!(ticks > UNIX_EPOCH_TICKS);
    }

    #[test]
    fn ticks_count_from_year_one() {
        assert_eq!(utc_ticks(OffsetDateTime::UNIX_EPOCH), UNIX_EPOCH_TICKS);
        let later = time::macros::datetime!(2020-01-01 00:00 UTC);
        assert_eq!(utc_ticks(later), 637_134_336_000_000_000);
    }
}
