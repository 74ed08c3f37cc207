use egui::{Color32, ColorImage, Context, Painter, Pos2, Rect, TextureHandle, TextureId, TextureOptions};
use image::RgbaImage;

use crate::canvas::Canvas;

/// One GPU texture mirroring a raster, re-uploaded when its version moves
struct CachedTexture {
    name: &'static str,
    handle: Option<TextureHandle>,
    version: Option<u64>,
}

impl std::fmt::Debug for CachedTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedTexture")
            .field("name", &self.name)
            .field("uploaded", &self.handle.is_some())
            .field("version", &self.version)
            .finish()
    }
}

impl CachedTexture {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            handle: None,
            version: None,
        }
    }

    fn update(&mut self, ctx: &Context, image: &RgbaImage, version: u64) -> TextureId {
        let created = self.handle.is_none();
        let handle = self
            .handle
            .get_or_insert_with(|| ctx.load_texture(self.name, to_color_image(image), TextureOptions::NEAREST));
        if !created && self.version != Some(version) {
            handle.set(to_color_image(image), TextureOptions::NEAREST);
        }
        self.version = Some(version);
        handle.id()
    }
}

fn to_color_image(image: &RgbaImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Draws the canvas and its preview overlay into the central panel
#[derive(Debug)]
pub struct Renderer {
    canvas: CachedTexture,
    preview: CachedTexture,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            canvas: CachedTexture::new("canvas"),
            preview: CachedTexture::new("canvas_preview"),
        }
    }

    /// Paint `canvas` with its top-left corner at `origin`. Returns the screen
    /// rect the canvas covers.
    pub fn render(&mut self, ctx: &Context, painter: &Painter, origin: Pos2, canvas: &Canvas) -> Rect {
        let size = egui::vec2(canvas.width() as f32, canvas.height() as f32);
        let rect = Rect::from_min_size(origin, size);
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));

        painter.rect_filled(rect.expand(1.0), 0.0, Color32::from_gray(60));
        let canvas_texture = self.canvas.update(ctx, canvas.image(), canvas.version());
        painter.image(canvas_texture, rect, uv, Color32::WHITE);
        let preview_texture = self.preview.update(ctx, canvas.preview(), canvas.preview_version());
        painter.image(preview_texture, rect, uv, Color32::WHITE);
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_names_textures_before_upload() {
        let text = format!("{:?}", Renderer::new());
        assert!(text.contains("canvas_preview"));
        assert!(text.contains("uploaded: false"));
    }
}
