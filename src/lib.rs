//! colorcanvas
//!
//! Deterministic card-mosaic renderer. A fixed-seed linear-congruential
//! sequence drives a background gradient and twenty styled panels; for a
//! given surface size every pass produces exactly the same output.
//!
//! # Features
//!
//! - **Seeded sequence** ([`random`]): the exact LCG the scene depends on
//! - **Backend-neutral scene** ([`rendering::scene`]): written against the
//!   narrow [`rendering::Surface`] trait
//! - **Backends**: recording display list, SVG, and (feature `raster`,
//!   default) `vello_cpu` pixels encoded as PNG
//! - **Host** ([`host`]): mount/resize/unmount lifecycle that redraws from
//!   scratch on every size change
//!
//! # Example
//!
//! ```
//! use colorcanvas::rendering::{render_scene, RecordingSurface};
//!
//! let mut surface = RecordingSurface::new(1280, 720);
//! let summary = render_scene(&mut surface);
//! assert_eq!(summary.panels, 20);
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod host;
pub mod random;
pub mod rendering;

pub use host::{render_bytes, CanvasHost, FormatFactory, RecordingFactory, SurfaceFactory};
pub use random::SeededRandom;
pub use rendering::{render_scene, Surface};

/// Surface dimensions in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Viewport {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `1280x720`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
        let width = w
            .trim()
            .parse()
            .map_err(|e| format!("bad width {:?}: {}", w, e))?;
        let height = h
            .trim()
            .parse()
            .map_err(|e| format!("bad height {:?}: {}", h, e))?;
        Ok(Viewport { width, height })
    }
}

/// Encoded output of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 8-bit RGBA PNG from the raster backend
    #[default]
    Png,
    /// SVG document from the vector backend
    Svg,
    /// JSON display list from the recording backend
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format {:?} (expected png, svg or json)", other)),
        }
    }
}

/// Configuration for a canvas run
///
/// Defaults are a 1280x720 viewport rendered to PNG. Values can be loaded
/// from a JSON file; missing fields fall back to the defaults.
///
/// # Examples
///
/// ```
/// let cfg = colorcanvas::CanvasConfig::default();
/// assert_eq!(cfg.viewport.width, 1280);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Surface dimensions
    pub viewport: Viewport,
    /// Output encoding
    pub format: OutputFormat,
}

impl CanvasConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: CanvasConfig =
            serde_json::from_str(s).map_err(|e| Error::ConfigError(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Reject settings no backend can honour.
    pub fn validate(&self) -> Result<()> {
        if self.format != OutputFormat::Png {
            return Ok(());
        }
        if !cfg!(feature = "raster") {
            return Err(Error::ConfigError(
                "PNG output requires the `raster` feature".into(),
            ));
        }
        let limit = u16::MAX as u32;
        if self.viewport.width > limit || self.viewport.height > limit {
            return Err(Error::ConfigError(format!(
                "viewport {} exceeds the raster limit of {} pixels per side",
                self.viewport, limit
            )));
        }
        Ok(())
    }
}
