use egui::{Color32, Rect};
use image::{imageops, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::color::{from_rgba, to_rgba};

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The raster being edited.
///
/// Holds three images: the document `base` that replay starts from (blank or
/// the loaded file), the current `image`, and a transparent `preview` overlay
/// that tools use for in-progress feedback. Every mutable access bumps a
/// version so the renderer knows when to re-upload a texture.
#[derive(Debug, Clone)]
pub struct Canvas {
    base: RgbaImage,
    image: RgbaImage,
    preview: RgbaImage,
    background: Color32,
    checkpoint: Option<RgbaImage>,
    checkpoints: u64,
    version: u64,
    preview_version: u64,
}

impl Canvas {
    /// A blank canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        let base = RgbaImage::from_pixel(width, height, to_rgba(background));
        Self::from_image(base, background)
    }

    /// A canvas whose document origin is `image`
    pub fn from_image(image: RgbaImage, background: Color32) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image: image.clone(),
            base: image,
            preview: RgbaImage::new(width, height),
            background,
            checkpoint: None,
            checkpoints: 0,
            version: 0,
            preview_version: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width(), self.height())
    }

    /// Pixel bounds of the canvas as a rect
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(self.width() as f32, self.height() as f32),
        )
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        self.version += 1;
        &mut self.image
    }

    pub fn preview(&self) -> &RgbaImage {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut RgbaImage {
        self.preview_version += 1;
        &mut self.preview
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn preview_version(&self) -> u64 {
        self.preview_version
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if x < self.width() && y < self.height() {
            Some(from_rgba(*self.image.get_pixel(x, y)))
        } else {
            None
        }
    }

    /// Reset to the document base, including its size. Replay starts here.
    pub fn clear(&mut self) {
        self.image = self.base.clone();
        self.reset_preview();
        self.version += 1;
    }

    /// Replace the raster by a `width`x`height` background fill
    pub fn fill_background(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::from_pixel(width, height, to_rgba(self.background));
        self.reset_preview();
        self.version += 1;
    }

    /// Start a new blank document of the given size
    pub fn start_blank(&mut self, width: u32, height: u32) {
        self.fill_background(width, height);
        self.base = self.image.clone();
        self.checkpoint = None;
    }

    /// Start a new document from `image`
    pub fn load(&mut self, image: RgbaImage) {
        self.base = image;
        self.clear();
        self.checkpoint = None;
    }

    /// Overwrite the raster with `image`, size included. The document base
    /// is left alone.
    pub fn replace_image(&mut self, image: RgbaImage) {
        self.image = image;
        self.reset_preview();
        self.version += 1;
    }

    /// Change the canvas size, keeping the top-left content and padding with
    /// the background
    pub fn resize(&mut self, width: u32, height: u32) {
        let mut resized = RgbaImage::from_pixel(width, height, to_rgba(self.background));
        imageops::replace(&mut resized, &self.image, 0, 0);
        self.image = resized;
        self.reset_preview();
        self.version += 1;
    }

    /// Checkpoint the current raster and return the checkpoint number
    pub fn save(&mut self) -> u64 {
        self.checkpoint = Some(self.image.clone());
        self.checkpoints += 1;
        self.checkpoints
    }

    /// The last raster stored by [`Canvas::save`]
    pub fn checkpoint(&self) -> Option<&RgbaImage> {
        self.checkpoint.as_ref()
    }

    pub fn clear_preview(&mut self) {
        for pixel in self.preview_mut().pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Copy `patch` onto the canvas verbatim, alpha included
    pub fn blit(&mut self, patch: &RgbaImage, x: i64, y: i64) {
        imageops::replace(self.image_mut(), patch, x, y);
    }

    /// Alpha-composite `top` over the canvas
    pub fn composite(&mut self, top: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(self.image_mut(), top, x, y);
    }

    /// Fill the pixels covered by `rect` with the background color
    pub fn fill_rect_background(&mut self, rect: Rect) {
        let color = self.background;
        crate::raster::fill_rect(self.image_mut(), rect, color);
    }

    /// Copy out the pixels covered by `rect`, clamped to the canvas
    pub fn crop(&self, rect: Rect) -> RgbaImage {
        let bounds = rect.intersect(self.rect());
        if bounds.width() < 1.0 || bounds.height() < 1.0 {
            return RgbaImage::new(0, 0);
        }
        let x = bounds.min.x.round() as u32;
        let y = bounds.min.y.round() as u32;
        let width = (bounds.width().round() as u32).min(self.width() - x);
        let height = (bounds.height().round() as u32).min(self.height() - y);
        imageops::crop_imm(&self.image, x, y, width, height).to_image()
    }

    fn reset_preview(&mut self) {
        self.preview = RgbaImage::new(self.image.width(), self.image.height());
        self.preview_version += 1;
    }
}
