#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod color;
pub mod command;
pub mod components;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod state;
pub mod tools;
pub mod util;

pub use app::PaintApp;
pub use canvas::{Canvas, CanvasSize};
pub use color::{ColorConfig, ColorPair};
pub use command::{Command, CommandHistory, EditorContext, ToolCommand};
pub use config::EditorConfig;
pub use editor::Editor;
pub use error::{EditorError, EditorResult};
pub use event::{EditorEvent, EventBus, EventHandler, EventLog, Subscription};
pub use renderer::Renderer;
pub use tools::{Tool, ToolKind, Toolbox};
