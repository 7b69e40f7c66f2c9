//! Single-file add/update decision

use crate::listing::{is_read_only, modified_time};
use dirmirror_types::{ChangeOutcome, MirrorOps, Result};
use std::fs;
use std::path::Path;

/// Bring `dest_dir/<name of source_file>` up to date with `source_file`
///
/// A missing destination file is `Added`, a strictly older one is `Updated`
/// (its read-only flag cleared first), anything else is `Unchanged`. Equal
/// timestamps count as current. A symbolic link or directory in the file's
/// place is removed and replaced by a copy, reported as `Updated`; links are
/// never written through. Reporting is left to the caller, which knows the
/// location root the path should be shown relative to.
pub fn sync_file_if_newer<O>(ops: &O, source_file: &Path, dest_dir: &Path) -> Result<ChangeOutcome>
where
    O: MirrorOps + ?Sized,
{
    let Some(name) = source_file.file_name() else {
        return Ok(ChangeOutcome::Unchanged);
    };
    let dest_file = dest_dir.join(name);

    let Ok(metadata) = fs::symlink_metadata(&dest_file) else {
        ops.copy_file(source_file, &dest_file)?;
        return Ok(ChangeOutcome::Added);
    };

    if metadata.is_dir() {
        ops.remove_tree(&dest_file)?;
        ops.copy_file(source_file, &dest_file)?;
        return Ok(ChangeOutcome::Updated);
    }
    if !metadata.is_file() {
        ops.remove_file(&dest_file)?;
        ops.copy_file(source_file, &dest_file)?;
        return Ok(ChangeOutcome::Updated);
    }

    if modified_time(source_file)? > modified_time(&dest_file)? {
        if is_read_only(&dest_file)? {
            ops.clear_read_only(&dest_file)?;
        }
        ops.copy_file(source_file, &dest_file)?;
        return Ok(ChangeOutcome::Updated);
    }

    Ok(ChangeOutcome::Unchanged)
}
