use super::interface::{Camera, CameraProvider, CameraSettings, Exposure, ExposureReadout, Iso};
use crate::config::CameraConfig;
use crate::error::{LapsecamError, Result};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info, warn};

/// Opens `libcamera-still`-backed devices configured from the camera section
/// of the config file.
pub struct LibcameraProvider {
    command: String,
}

impl LibcameraProvider {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            command: config.command.clone(),
        }
    }
}

impl CameraProvider for LibcameraProvider {
    fn open(&self, settings: &CameraSettings) -> Result<Box<dyn Camera>> {
        info!(
            "Opening camera: {} {:?} iso {:?}",
            settings.resolution, settings.exposure, settings.iso
        );
        Ok(Box::new(LibcameraStill {
            command: self.command.clone(),
            settings: settings.clone(),
            last_readout: None,
        }))
    }
}

/// Still-capture device driving the stock `libcamera-still` tool, one
/// subprocess per frame. Capture metadata is requested as JSON on stdout and
/// parsed for the exposure readout the scheduler locks to.
pub struct LibcameraStill {
    command: String,
    settings: CameraSettings,
    last_readout: Option<ExposureReadout>,
}

impl LibcameraStill {
    /// Command-line arguments for one capture of the configured settings.
    pub(crate) fn capture_args(settings: &CameraSettings, path: &Path) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            path.to_string_lossy().into_owned(),
            "--width".to_string(),
            settings.resolution.width.to_string(),
            "--height".to_string(),
            settings.resolution.height.to_string(),
            "--rotation".to_string(),
            settings.rotation.to_string(),
            "--nopreview".to_string(),
            "--immediate".to_string(),
            "--metadata".to_string(),
            "-".to_string(),
            "--metadata-format".to_string(),
            "json".to_string(),
        ];

        if let Iso::Fixed(iso) = settings.iso {
            // libcamera expresses film speed as analogue gain, ISO 100 = 1.0
            args.push("--gain".to_string());
            args.push(format!("{}", iso as f64 / 100.0));
        }

        if let Exposure::Locked(readout) = settings.exposure {
            args.push("--shutter".to_string());
            args.push(readout.shutter_micros.to_string());
            args.push("--awbgains".to_string());
            args.push(format!("{},{}", readout.awb_gains.0, readout.awb_gains.1));
        }

        args
    }

    /// Pull shutter speed and colour gains out of the JSON capture metadata.
    pub(crate) fn parse_metadata(bytes: &[u8]) -> Option<ExposureReadout> {
        let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
        let shutter_micros = value.get("ExposureTime")?.as_u64()?;
        let gains = value.get("ColourGains")?.as_array()?;
        let red = gains.first()?.as_f64()?;
        let blue = gains.get(1)?.as_f64()?;
        Some(ExposureReadout {
            shutter_micros,
            awb_gains: (red, blue),
        })
    }
}

impl Camera for LibcameraStill {
    fn capture_to(&mut self, path: &Path) -> Result<()> {
        let args = Self::capture_args(&self.settings, path);
        debug!("Capture: {} {}", self.command, args.join(" "));

        let output = Command::new(&self.command)
            .args(&args)
            .output()
            .map_err(|e| LapsecamError::camera(format!("{}: {}", self.command, e)))?;

        if !output.status.success() {
            return Err(LapsecamError::camera(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        match Self::parse_metadata(&output.stdout) {
            Some(readout) => self.last_readout = Some(readout),
            None => warn!("Capture metadata missing exposure fields"),
        }

        Ok(())
    }

    fn exposure(&self) -> Result<ExposureReadout> {
        self.last_readout
            .ok_or_else(|| LapsecamError::camera("No exposure metadata from last capture"))
    }
}
