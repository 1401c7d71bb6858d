use crate::error::{LapsecamError, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Highest session index ever probed; reaching it means the base directory
/// is full of a million sessions and something is very wrong.
const DIRECTORY_SENTINEL: u32 = 1_000_000;

/// Name of the session directory with the given index.
pub fn directory_name(index: u32) -> String {
    format!("D{:04}", index)
}

/// Filename for a frame captured at `timestamp`.
pub fn image_filename(timestamp: DateTime<Local>) -> String {
    timestamp.format("image-%Y%m%dT%H%M%S.jpg").to_string()
}

/// Claim the lowest unused session directory with an index above `previous`.
///
/// Creation is atomic; an index whose directory already exists (left over
/// from an earlier run) is skipped and never reused. I/O failures other than
/// the name collision propagate, since probing past them cannot succeed.
pub fn next_directory(base: &Path, previous: u32) -> Result<(u32, PathBuf)> {
    for index in previous + 1..DIRECTORY_SENTINEL {
        let path = base.join(directory_name(index));
        match fs::create_dir(&path) {
            Ok(()) => {
                debug!("Claimed session directory {}", path.display());
                return Ok((index, path));
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(LapsecamError::system("Session directories exhausted"))
}

/// Free bytes available to unprivileged writers on the volume holding `path`.
#[cfg(unix)]
pub fn disk_free(path: &Path) -> Result<u64> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| LapsecamError::system("Path contains a NUL byte"))?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(io::Error::last_os_error().into());
    }
    Ok(stat.f_bsize as u64 * stat.f_bavail as u64)
}

#[cfg(not(unix))]
pub fn disk_free(_path: &Path) -> Result<u64> {
    Ok(0)
}

/// Compact free-space summary for the display, in whole binary units.
pub fn free_space_summary(bytes: u64) -> String {
    let kbytes = bytes / 1024;
    let mbytes = kbytes / 1024;
    let gbytes = mbytes / 1024;

    if gbytes > 1 {
        format!("{} G", gbytes)
    } else if mbytes > 1 {
        format!("{} M", mbytes)
    } else if kbytes > 1 {
        format!("{} K", kbytes)
    } else {
        format!("{} B", bytes)
    }
}
