use egui::DroppedFile;
use image::RgbaImage;

use crate::error::EditorResult;

/// Turns files dropped onto the window into decoded rasters
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up files dropped this frame. Returns true if there were any.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if i.raw.dropped_files.is_empty() {
                false
            } else {
                self.dropped_files = i.raw.dropped_files.clone();
                true
            }
        })
    }

    /// Decode the first dropped image. Non-image files are skipped.
    pub fn take_dropped_image(&mut self) -> Option<EditorResult<RgbaImage>> {
        let files = std::mem::take(&mut self.dropped_files);
        for file in &files {
            let name = file_name(file);
            if !is_image_file(file) {
                log::warn!("Dropped file is not a supported type: {}", name);
                continue;
            }
            return match file_bytes(file) {
                Some(bytes) => {
                    log::info!("Opening dropped image {} ({} bytes)", name, bytes.len());
                    Some(decode_image(&bytes))
                }
                None => {
                    log::warn!("Dropped file has no accessible data: {}", name);
                    None
                }
            };
        }
        None
    }

    /// Darken the window while files hover over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop an image to open it",
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

/// Decode an encoded image into an RGBA raster
pub fn decode_image(bytes: &[u8]) -> EditorResult<RgbaImage> {
    let image = image::load_from_memory(bytes)?;
    log::debug!("Decoded image: {}x{}", image.width(), image.height());
    Ok(image.to_rgba8())
}

fn file_name(file: &DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

fn is_image_file(file: &DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let extension = file
        .path
        .as_ref()
        .and_then(|path| path.extension())
        .or_else(|| std::path::Path::new(&file.name).extension());
    match extension {
        Some(ext) => matches!(
            ext.to_string_lossy().to_lowercase().as_str(),
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"
        ),
        None => false,
    }
}

fn file_bytes(file: &DroppedFile) -> Option<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Some(bytes.to_vec());
    }
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        return match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::error!("Failed to read {}: {}", path.display(), err);
                None
            }
        };
    }
    None
}
