use egui::{Pos2, Ui};
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::color::ColorConfig;
use crate::command::Command;
use crate::config::EditorConfig;
use crate::state::{FillSettings, PathSettings, ShapeSettings, StampSettings, TextSettings};

mod fill_tool;
mod path_tool;
mod selection_tool;
mod shape_tool;
mod stamp_tool;
mod text_tool;

pub use fill_tool::FillTool;
pub use path_tool::{PathKind, PathTool};
pub use selection_tool::SelectionTool;
pub use shape_tool::{ShapeKind, ShapeTool};
pub use stamp_tool::{StampTool, stamp_library};
pub use text_tool::TextTool;

/// Tool trait defines the interface for all drawing tools.
///
/// Tools draw their live edits straight onto the canvas and hand back a
/// [`Command`] once an edit is committed. The command replays the edit
/// through the same `draw` entry point the tool used live.
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Handle pointer press on the canvas
    fn on_pointer_down(&mut self, pos: Pos2, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command>;

    /// Handle pointer drag while the pointer is held down
    fn on_pointer_move(&mut self, _pos: Pos2, _canvas: &mut Canvas, _colors: &ColorConfig) -> Option<Command> {
        None
    }

    /// Handle pointer release
    fn on_pointer_up(&mut self, _pos: Pos2, _canvas: &mut Canvas, _colors: &ColorConfig) -> Option<Command> {
        None
    }

    /// Called when another tool is picked, and before undo/redo.
    /// Commits whatever edit is still pending.
    fn deactivate(&mut self, _canvas: &mut Canvas, _colors: &ColorConfig) -> Option<Command> {
        None
    }

    /// Show tool-specific controls in the tool panel.
    /// Return a Command if the interaction committed an edit.
    fn ui(&mut self, ui: &mut Ui, canvas: &mut Canvas, colors: &ColorConfig) -> Option<Command>;
}

/// Identifies one tool in the [`Toolbox`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Pencil,
    Eraser,
    Spray,
    Fill,
    Rectangle,
    Ellipse,
    Polygon,
    Stamp,
    Text,
    Selection,
}

impl ToolKind {
    pub const ALL: [ToolKind; 10] = [
        ToolKind::Pencil,
        ToolKind::Eraser,
        ToolKind::Spray,
        ToolKind::Fill,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Polygon,
        ToolKind::Stamp,
        ToolKind::Text,
        ToolKind::Selection,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            ToolKind::Pencil => "✏",
            ToolKind::Eraser => "⌫",
            ToolKind::Spray => "💨",
            ToolKind::Fill => "🪣",
            ToolKind::Rectangle => "⬜",
            ToolKind::Ellipse => "⭕",
            ToolKind::Polygon => "⬟",
            ToolKind::Stamp => "★",
            ToolKind::Text => "🅰",
            ToolKind::Selection => "⛶",
        }
    }
}

/// UI-bound settings of every tool, persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub pencil: PathSettings,
    pub eraser: PathSettings,
    pub spray: PathSettings,
    pub fill: FillSettings,
    pub rectangle: ShapeSettings,
    pub ellipse: ShapeSettings,
    pub polygon: ShapeSettings,
    pub stamp: StampSettings,
    pub text: TextSettings,
    pub magnetism: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            pencil: PathSettings::default(),
            eraser: PathSettings::default(),
            spray: PathSettings::default(),
            fill: FillSettings::default(),
            rectangle: ShapeSettings::default(),
            ellipse: ShapeSettings::default(),
            polygon: ShapeSettings::default(),
            stamp: StampSettings::default(),
            text: TextSettings::default(),
            magnetism: true,
        }
    }
}

/// The single live instance of every tool
#[derive(Debug)]
pub struct Toolbox {
    pub pencil: PathTool,
    pub eraser: PathTool,
    pub spray: PathTool,
    pub fill: FillTool,
    pub rectangle: ShapeTool,
    pub ellipse: ShapeTool,
    pub polygon: ShapeTool,
    pub stamp: StampTool,
    pub text: TextTool,
    pub selection: SelectionTool,
}

impl Toolbox {
    pub fn new(config: &EditorConfig) -> Self {
        let path_settings = PathSettings {
            thickness: config.thickness,
            ..Default::default()
        };
        Self {
            pencil: PathTool::new(PathKind::Pencil, path_settings.clone()),
            eraser: PathTool::new(PathKind::Eraser, path_settings.clone()),
            spray: PathTool::new(PathKind::Spray, path_settings),
            fill: FillTool::new(FillSettings::default()),
            rectangle: ShapeTool::new(ShapeKind::Rectangle, ShapeSettings::default()),
            ellipse: ShapeTool::new(ShapeKind::Ellipse, ShapeSettings::default()),
            polygon: ShapeTool::new(ShapeKind::Polygon, ShapeSettings::default()),
            stamp: StampTool::new(StampSettings::default(), stamp_library()),
            text: TextTool::new(TextSettings::default()),
            selection: SelectionTool::new(config.magnet_distance),
        }
    }

    pub fn get(&self, kind: ToolKind) -> &dyn Tool {
        match kind {
            ToolKind::Pencil => &self.pencil,
            ToolKind::Eraser => &self.eraser,
            ToolKind::Spray => &self.spray,
            ToolKind::Fill => &self.fill,
            ToolKind::Rectangle => &self.rectangle,
            ToolKind::Ellipse => &self.ellipse,
            ToolKind::Polygon => &self.polygon,
            ToolKind::Stamp => &self.stamp,
            ToolKind::Text => &self.text,
            ToolKind::Selection => &self.selection,
        }
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::Pencil => &mut self.pencil,
            ToolKind::Eraser => &mut self.eraser,
            ToolKind::Spray => &mut self.spray,
            ToolKind::Fill => &mut self.fill,
            ToolKind::Rectangle => &mut self.rectangle,
            ToolKind::Ellipse => &mut self.ellipse,
            ToolKind::Polygon => &mut self.polygon,
            ToolKind::Stamp => &mut self.stamp,
            ToolKind::Text => &mut self.text,
            ToolKind::Selection => &mut self.selection,
        }
    }

    pub fn path(&self, kind: PathKind) -> &PathTool {
        match kind {
            PathKind::Pencil => &self.pencil,
            PathKind::Eraser => &self.eraser,
            PathKind::Spray => &self.spray,
        }
    }

    pub fn path_mut(&mut self, kind: PathKind) -> &mut PathTool {
        match kind {
            PathKind::Pencil => &mut self.pencil,
            PathKind::Eraser => &mut self.eraser,
            PathKind::Spray => &mut self.spray,
        }
    }

    pub fn shape(&self, kind: ShapeKind) -> &ShapeTool {
        match kind {
            ShapeKind::Rectangle => &self.rectangle,
            ShapeKind::Ellipse => &self.ellipse,
            ShapeKind::Polygon => &self.polygon,
        }
    }

    pub fn shape_mut(&mut self, kind: ShapeKind) -> &mut ShapeTool {
        match kind {
            ShapeKind::Rectangle => &mut self.rectangle,
            ShapeKind::Ellipse => &mut self.ellipse,
            ShapeKind::Polygon => &mut self.polygon,
        }
    }

    pub fn settings(&self) -> ToolSettings {
        ToolSettings {
            pencil: self.pencil.settings.clone(),
            eraser: self.eraser.settings.clone(),
            spray: self.spray.settings.clone(),
            fill: self.fill.settings.clone(),
            rectangle: self.rectangle.settings.clone(),
            ellipse: self.ellipse.settings.clone(),
            polygon: self.polygon.settings.clone(),
            stamp: self.stamp.settings.clone(),
            text: self.text.settings.clone(),
            magnetism: self.selection.magnetism,
        }
    }

    pub fn apply_settings(&mut self, settings: ToolSettings) {
        self.pencil.settings = settings.pencil;
        self.eraser.settings = settings.eraser;
        self.spray.settings = settings.spray;
        self.fill.settings = settings.fill;
        self.rectangle.settings = settings.rectangle;
        self.ellipse.settings = settings.ellipse;
        self.polygon.settings = settings.polygon;
        self.stamp.set_settings(settings.stamp);
        self.text.settings = settings.text;
        self.selection.magnetism = settings.magnetism;
    }
}
