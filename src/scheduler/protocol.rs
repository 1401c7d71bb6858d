//! Line-oriented stdout protocol consumed by the downstream video assembler.
//!
//! The vocabulary is exactly three markers plus one absolute image path per
//! captured frame, one record per line:
//!
//! ```text
//! #VIDEO vidpath=<base>/VIDEO/lapse-<dirnum>.mp4 fps=<fps>
//! #IMAGES
//! <absolute frame path>
//! #END
//! ```

use crate::error::Result;
use crate::menu::CaptureMode;
use std::io::Write;
use std::path::Path;

/// Session-start marker; the form depends on the selected capture mode.
pub fn write_session_start<W: Write>(
    out: &mut W,
    mode: CaptureMode,
    base: &Path,
    dir_index: u32,
    fps: u32,
) -> Result<()> {
    match mode {
        CaptureMode::VideoAndFrames => writeln!(
            out,
            "#VIDEO vidpath={}/VIDEO/lapse-{:04}.mp4 fps={}",
            base.display(),
            dir_index,
            fps
        )?,
        CaptureMode::FramesOnly => writeln!(out, "#IMAGES")?,
    }
    out.flush()?;
    Ok(())
}

/// One captured frame, emitted immediately after the capture succeeds.
pub fn write_frame<W: Write>(out: &mut W, path: &Path) -> Result<()> {
    writeln!(out, "{}", path.display())?;
    out.flush()?;
    Ok(())
}

/// Session-end marker.
pub fn write_session_end<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "#END")?;
    out.flush()?;
    Ok(())
}
