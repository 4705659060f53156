//! ZIP extraction for downloaded archives.

use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use zip::ZipArchive;

use crate::errors::ClientError;

/// Unpack a ZIP archive held in memory into `dest`.
///
/// `dest` and any intermediate directories are created. Entries whose names
/// escape the destination (absolute paths or `..` components) are skipped.
pub fn extract_zip(raw: &[u8], dest: &Path) -> Result<(), ClientError> {
    let mut archive = ZipArchive::new(Cursor::new(raw))?;
    fs::create_dir_all(dest)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;
    }

    Ok(())
}
