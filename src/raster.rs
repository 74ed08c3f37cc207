//! Pixel-level drawing primitives shared by the tools.
//!
//! Everything here writes opaque pixels with nearest-pixel sampling, so the
//! same inputs always produce the same raster. Replay depends on that.

use egui::{Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};

use crate::color::to_rgba;

/// Distance between disc stamps when stroking a segment
const STROKE_STEP: f32 = 0.5;

/// Write one pixel, ignoring coordinates outside the image
pub fn put(image: &mut RgbaImage, x: i64, y: i64, pixel: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, pixel);
    }
}

/// Fill every pixel whose center lies within `radius` of `center`
pub fn stamp_disc(image: &mut RgbaImage, center: Pos2, radius: f32, color: Color32) {
    let pixel = to_rgba(color);
    let radius = radius.max(0.5);
    let min_x = (center.x - radius).floor() as i64;
    let max_x = (center.x + radius).ceil() as i64;
    let min_y = (center.y - radius).floor() as i64;
    let max_y = (center.y + radius).ceil() as i64;
    let radius_sq = radius * radius;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= radius_sq {
                put(image, x, y, pixel);
            }
        }
    }
}

/// Stroke an open polyline with round caps and joins
pub fn stroke_polyline(image: &mut RgbaImage, points: &[Pos2], thickness: f32, color: Color32) {
    let radius = thickness / 2.0;
    match points {
        [] => {}
        [point] => stamp_disc(image, *point, radius, color),
        _ => {
            for segment in points.windows(2) {
                stroke_segment(image, segment[0], segment[1], radius, color);
            }
        }
    }
}

/// Stroke a closed polygon outline
pub fn stroke_polygon(image: &mut RgbaImage, points: &[Pos2], thickness: f32, color: Color32) {
    if let (Some(first), true) = (points.first(), points.len() > 2) {
        let mut closed = points.to_vec();
        closed.push(*first);
        stroke_polyline(image, &closed, thickness, color);
    } else {
        stroke_polyline(image, points, thickness, color);
    }
}

fn stroke_segment(image: &mut RgbaImage, from: Pos2, to: Pos2, radius: f32, color: Color32) {
    let length = from.distance(to);
    let steps = (length / STROKE_STEP).ceil().max(1.0) as usize;
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        stamp_disc(image, from.lerp(to, t), radius, color);
    }
}

/// Pixel index range covered by `rect`, clamped to the image
fn pixel_span(image: &RgbaImage, rect: Rect) -> (i64, i64, i64, i64) {
    let min_x = (rect.min.x.round() as i64).max(0);
    let min_y = (rect.min.y.round() as i64).max(0);
    let max_x = (rect.max.x.round() as i64).min(image.width() as i64);
    let max_y = (rect.max.y.round() as i64).min(image.height() as i64);
    (min_x, min_y, max_x, max_y)
}

pub fn fill_rect(image: &mut RgbaImage, rect: Rect, color: Color32) {
    let pixel = to_rgba(color);
    let (min_x, min_y, max_x, max_y) = pixel_span(image, rect);
    for y in min_y..max_y {
        for x in min_x..max_x {
            put(image, x, y, pixel);
        }
    }
}

/// Outline `rect` with a border of `width` pixels drawn inside it
pub fn stroke_rect(image: &mut RgbaImage, rect: Rect, width: f32, color: Color32) {
    let width = width.max(1.0).min(rect.width().min(rect.height()) / 2.0).max(1.0);
    let top = Rect::from_min_max(rect.min, Pos2::new(rect.max.x, rect.min.y + width));
    let bottom = Rect::from_min_max(Pos2::new(rect.min.x, rect.max.y - width), rect.max);
    let left = Rect::from_min_max(rect.min, Pos2::new(rect.min.x + width, rect.max.y));
    let right = Rect::from_min_max(Pos2::new(rect.max.x - width, rect.min.y), rect.max);
    for band in [top, bottom, left, right] {
        fill_rect(image, band, color);
    }
}

fn inside_ellipse(point: Pos2, center: Pos2, radii: Vec2) -> bool {
    if radii.x <= 0.0 || radii.y <= 0.0 {
        return false;
    }
    let dx = (point.x - center.x) / radii.x;
    let dy = (point.y - center.y) / radii.y;
    dx * dx + dy * dy <= 1.0
}

pub fn fill_ellipse(image: &mut RgbaImage, center: Pos2, radii: Vec2, color: Color32) {
    let pixel = to_rgba(color);
    let rect = Rect::from_center_size(center, radii * 2.0);
    let (min_x, min_y, max_x, max_y) = pixel_span(image, rect.expand(1.0));
    for y in min_y..max_y {
        for x in min_x..max_x {
            let point = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if inside_ellipse(point, center, radii) {
                put(image, x, y, pixel);
            }
        }
    }
}

/// Ellipse ring of `width` pixels drawn inside the ellipse bounds
pub fn stroke_ellipse(image: &mut RgbaImage, center: Pos2, radii: Vec2, width: f32, color: Color32) {
    let pixel = to_rgba(color);
    let inner = radii - Vec2::splat(width.max(1.0));
    let rect = Rect::from_center_size(center, radii * 2.0);
    let (min_x, min_y, max_x, max_y) = pixel_span(image, rect.expand(1.0));
    for y in min_y..max_y {
        for x in min_x..max_x {
            let point = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            if inside_ellipse(point, center, radii) && !inside_ellipse(point, center, inner) {
                put(image, x, y, pixel);
            }
        }
    }
}

/// Even-odd point in polygon test
fn inside_polygon(point: Pos2, points: &[Pos2]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

pub fn fill_polygon(image: &mut RgbaImage, points: &[Pos2], color: Color32) {
    if points.len() < 3 {
        return;
    }
    let pixel = to_rgba(color);
    let bounds = Rect::from_points(points);
    let (min_x, min_y, max_x, max_y) = pixel_span(image, bounds.expand(1.0));
    for y in min_y..max_y {
        for x in min_x..max_x {
            if inside_polygon(Pos2::new(x as f32 + 0.5, y as f32 + 0.5), points) {
                put(image, x, y, pixel);
            }
        }
    }
}

/// Pixels 4-connected to `(x, y)` whose color is within `tolerance` of the
/// seed color, in discovery order
pub fn flood_region(image: &RgbaImage, x: u32, y: u32, tolerance: u8) -> Vec<(u32, u32)> {
    if x >= image.width() || y >= image.height() {
        return Vec::new();
    }
    let seed = *image.get_pixel(x, y);
    let matches = |pixel: &Rgba<u8>| {
        pixel
            .0
            .iter()
            .zip(seed.0.iter())
            .all(|(a, b)| a.abs_diff(*b) <= tolerance)
    };

    let (width, height) = image.dimensions();
    let mut visited = vec![false; (width * height) as usize];
    let mut region = Vec::new();
    let mut stack = vec![(x, y)];
    while let Some((px, py)) = stack.pop() {
        let index = (py * width + px) as usize;
        if visited[index] || !matches(image.get_pixel(px, py)) {
            continue;
        }
        visited[index] = true;
        region.push((px, py));
        if px > 0 {
            stack.push((px - 1, py));
        }
        if px + 1 < width {
            stack.push((px + 1, py));
        }
        if py > 0 {
            stack.push((px, py - 1));
        }
        if py + 1 < height {
            stack.push((px, py + 1));
        }
    }
    region
}

/// Rotate (radians) and scale `source` about its center, nearest-pixel
pub fn rotate_scale(source: &RgbaImage, angle: f32, scale: f32) -> RgbaImage {
    let scale = scale.max(0.01);
    let (src_w, src_h) = (source.width() as f32, source.height() as f32);
    let (sin, cos) = angle.sin_cos();
    let out_w = ((src_w * cos.abs() + src_h * sin.abs()) * scale).ceil().max(1.0);
    let out_h = ((src_w * sin.abs() + src_h * cos.abs()) * scale).ceil().max(1.0);
    let mut out = RgbaImage::new(out_w as u32, out_h as u32);

    for y in 0..out.height() {
        for x in 0..out.width() {
            let dx = x as f32 + 0.5 - out_w / 2.0;
            let dy = y as f32 + 0.5 - out_h / 2.0;
            let sx = (dx * cos + dy * sin) / scale + src_w / 2.0;
            let sy = (-dx * sin + dy * cos) / scale + src_h / 2.0;
            if sx >= 0.0 && sy >= 0.0 && sx < src_w && sy < src_h {
                out.put_pixel(x, y, *source.get_pixel(sx as u32, sy as u32));
            }
        }
    }
    out
}
