//! Visible text overlay.
//!
//! Text is drawn with the 8x8 bitmap glyphs of `font8x8`, scaled by an integer
//! factor to roughly match the requested font size, and alpha blended onto the
//! carrier.

use std::str::FromStr;

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, Rgba, RgbaImage};

use crate::result::Result;
use crate::StegmarkError;

const GLYPH_SIZE: u32 = 8;
const MARGIN: i64 = 20;
const SHADOW_OFFSET: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl FromStr for Position {
    type Err = StegmarkError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "center" => Ok(Self::Center),
            "topLeft" | "top-left" => Ok(Self::TopLeft),
            "topRight" | "top-right" => Ok(Self::TopRight),
            "bottomLeft" | "bottom-left" => Ok(Self::BottomLeft),
            "bottomRight" | "bottom-right" => Ok(Self::BottomRight),
            other => Err(StegmarkError::UnknownPosition(other.to_string())),
        }
    }
}

impl Position {
    /// Top left corner of a `text_width` x `text_height` box on a `width` x `height` canvas.
    ///
    /// Corner anchors keep a fixed margin and place the vertical middle of the
    /// text `font_size + margin` away from the top or bottom edge.
    pub fn origin(
        &self,
        width: u32,
        height: u32,
        text_width: u32,
        text_height: u32,
        font_size: u32,
    ) -> (i64, i64) {
        let (w, h) = (i64::from(width), i64::from(height));
        let (tw, th) = (i64::from(text_width), i64::from(text_height));
        let top = i64::from(font_size) + MARGIN - th / 2;
        let bottom = h - i64::from(font_size) - MARGIN - th / 2;

        match self {
            Position::Center => ((w - tw) / 2, (h - th) / 2),
            Position::TopLeft => (MARGIN, top),
            Position::TopRight => (w - tw - MARGIN, top),
            Position::BottomLeft => (MARGIN, bottom),
            Position::BottomRight => (w - tw - MARGIN, bottom),
        }
    }
}

/// Options for the visible text overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayOptions {
    pub position: Position,
    /// Overlay opacity, must be within (0, 1]
    pub opacity: f32,
    /// Font size in pixels, `None` scales with the image width
    pub font_size: Option<u32>,
    pub color: Rgb<u8>,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            position: Position::Center,
            opacity: 0.5,
            font_size: None,
            color: Rgb([255, 255, 255]),
        }
    }
}

impl OverlayOptions {
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_font_size(mut self, font_size: Option<u32>) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, color: Rgb<u8>) -> Self {
        self.color = color;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.opacity > 0.0 && self.opacity <= 1.0 {
            Ok(())
        } else {
            Err(StegmarkError::InvalidOpacity(self.opacity))
        }
    }

    /// Requested font size, or 5% of the image width but at least 20px
    pub fn font_size_for(&self, image_width: u32) -> u32 {
        self.font_size
            .unwrap_or_else(|| (image_width / 20).max(20))
            .max(1)
    }
}

/// Draws `text` onto a copy of `carrier`.
pub fn render_text(carrier: &RgbaImage, text: &str, opts: &OverlayOptions) -> Result<RgbaImage> {
    opts.validate()?;

    let font_size = opts.font_size_for(carrier.width());
    let scale = (font_size / GLYPH_SIZE).max(1);
    let cell = GLYPH_SIZE * scale;
    let glyph_count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    let (x, y) = opts.position.origin(
        carrier.width(),
        carrier.height(),
        glyph_count.saturating_mul(cell),
        cell,
        font_size,
    );

    let mut canvas = carrier.clone();
    let shadow = Rgb([0, 0, 0]);
    draw_glyphs(
        &mut canvas,
        text,
        (x + SHADOW_OFFSET, y + SHADOW_OFFSET),
        scale,
        shadow,
        opts.opacity * 0.5,
    );
    draw_glyphs(&mut canvas, text, (x, y), scale, opts.color, opts.opacity);

    Ok(canvas)
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .unwrap_or([0; 8])
}

fn draw_glyphs(
    canvas: &mut RgbaImage,
    text: &str,
    (x, y): (i64, i64),
    scale: u32,
    color: Rgb<u8>,
    alpha: f32,
) {
    let cell = i64::from(GLYPH_SIZE * scale);
    let scale = i64::from(scale);

    for (i, c) in text.chars().enumerate() {
        let left = x + i as i64 * cell;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = left + i64::from(col) * scale;
                let py = y + row as i64 * scale;
                fill_block(canvas, (px, py), scale, color, alpha);
            }
        }
    }
}

fn fill_block(canvas: &mut RgbaImage, (x, y): (i64, i64), size: i64, color: Rgb<u8>, alpha: f32) {
    let (w, h) = (i64::from(canvas.width()), i64::from(canvas.height()));
    for py in y.max(0)..(y + size).min(h) {
        for px in x.max(0)..(x + size).min(w) {
            blend(canvas.get_pixel_mut(px as u32, py as u32), color, alpha);
        }
    }
}

/// Source-over blending of `color` with `alpha` onto `dst`.
fn blend(dst: &mut Rgba<u8>, color: Rgb<u8>, alpha: f32) {
    let dst_alpha = f32::from(dst.0[3]) / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return;
    }

    for c in 0..3 {
        let src = f32::from(color.0[c]) * alpha;
        let below = f32::from(dst.0[c]) * dst_alpha * (1.0 - alpha);
        dst.0[c] = ((src + below) / out_alpha).round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}
