//! Recording backend: captures every surface call as a [`PaintCommand`].
//!
//! Used by tests to inspect a pass without pixels, and by the CLI to dump a
//! pass as a JSON display list.

use serde::Serialize;

use super::paint::{Font, Paint, PaintCommand, PathEl};
use super::{Frame, Surface};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<PaintCommand>,
}

#[derive(Serialize)]
struct DisplayList<'a> {
    width: u32,
    height: u32,
    commands: &'a [PaintCommand],
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PaintCommand> {
        self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Serialize the display list as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        let list = DisplayList {
            width: self.width,
            height: self.height,
            commands: &self.commands,
        };
        Ok(serde_json::to_string_pretty(&list)?)
    }

    pub fn finish(&self) -> Result<Frame> {
        Ok(Frame {
            width: self.width,
            height: self.height,
            data: self.to_json()?.into_bytes(),
        })
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_fill_style(&mut self, paint: Paint) {
        self.commands.push(PaintCommand::SetFillStyle { paint });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(PaintCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_path(&mut self, path: &[PathEl]) {
        self.commands.push(PaintCommand::FillPath {
            path: path.to_vec(),
        });
    }

    fn set_font(&mut self, font: Font) {
        self.commands.push(PaintCommand::SetFont { font });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(PaintCommand::FillText {
            x,
            y,
            text: text.to_string(),
        });
    }
}
