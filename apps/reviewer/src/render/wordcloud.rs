//! Word-cloud bitmap from term frequencies.
//!
//! Text is measured and rasterised with `imageproc` over the bundled DejaVu
//! Sans face (`ab_glyph`). Words are placed largest first along an
//! Archimedean spiral from the canvas centre; a word that cannot be placed is
//! retried a step smaller and dropped below the minimum size. Layout is
//! deterministic for a given input.

use std::io::Cursor;

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use imageproc::rect::Rect;

use super::ExportError;
use crate::analysis::TermFrequency;

static FONT_DATA: &[u8] = include_bytes!("../../data/fonts/DejaVuSans.ttf");

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

const PALETTE: &[[u8; 3]] = &[
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [49, 104, 142],
    [72, 40, 120],
    [38, 130, 142],
    [53, 183, 121],
];

/// Spiral steps tried per word and size before shrinking.
const MAX_SPIRAL_STEPS: u32 = 4000;
/// Layout stops once this many words in a row could not be placed.
const MAX_CONSECUTIVE_MISSES: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct WordCloudOptions {
    pub width: u32,
    pub height: u32,
    /// Font sizes in pixels.
    pub min_font_size: u32,
    pub max_font_size: u32,
    pub font_step: u32,
    /// Empty pixels kept around every word.
    pub padding: u32,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 300,
            min_font_size: 10,
            max_font_size: 72,
            font_step: 2,
            padding: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    pub term: String,
    pub x: i32,
    pub y: i32,
    pub font_size: u32,
    pub width: u32,
    pub height: u32,
    pub color: [u8; 3],
}

impl PlacedWord {
    fn rect(&self) -> Rect {
        Rect::at(self.x, self.y).of_size(self.width, self.height)
    }
}

pub fn bundled_font() -> Result<FontRef<'static>, ExportError> {
    FontRef::try_from_slice(FONT_DATA)
        .map_err(|e| ExportError::Image(format!("bundled font is unreadable: {e}")))
}

/// Bounding box of `term` drawn at `font_size`: advance width by line height.
fn measure(font: &impl Font, term: &str, font_size: u32) -> (u32, u32) {
    let scale = PxScale::from(font_size as f32);
    let (width, _) = text_size(scale, font, term);
    let height = font.as_scaled(scale).height().ceil() as u32;
    (width, height)
}

/// Font size for a term: the square root of its share of the top count,
/// mapped onto `min_font_size..=max_font_size`.
fn font_size_for(count: u32, max_count: u32, options: &WordCloudOptions) -> u32 {
    let ratio = (count as f32 / max_count.max(1) as f32).sqrt();
    let span = options.max_font_size.saturating_sub(options.min_font_size) as f32;
    options.min_font_size + (span * ratio).round() as u32
}

/// Positions as many terms as fit on the canvas.
pub fn layout(
    terms: &[TermFrequency],
    options: &WordCloudOptions,
    font: &impl Font,
) -> Vec<PlacedWord> {
    let max_count = terms.iter().map(|t| t.count).max().unwrap_or(1);
    let step = options.font_step.max(1);
    let floor = options.min_font_size.max(1);
    let mut placed: Vec<PlacedWord> = Vec::new();
    let mut misses = 0;

    for (i, term) in terms.iter().enumerate() {
        if misses >= MAX_CONSECUTIVE_MISSES {
            break;
        }
        let before = placed.len();
        let mut font_size = font_size_for(term.count, max_count, options);
        while font_size >= floor {
            let (width, height) = measure(font, &term.term, font_size);
            if let Some((x, y)) = find_spot(width, height, &placed, options) {
                placed.push(PlacedWord {
                    term: term.term.clone(),
                    x,
                    y,
                    font_size,
                    width,
                    height,
                    color: PALETTE[i % PALETTE.len()],
                });
                break;
            }
            font_size = font_size.saturating_sub(step);
        }
        misses = if placed.len() > before { 0 } else { misses + 1 };
    }
    placed
}

fn find_spot(w: u32, h: u32, placed: &[PlacedWord], options: &WordCloudOptions) -> Option<(i32, i32)> {
    if w == 0 || h == 0 || w > options.width || h > options.height {
        return None;
    }

    let cx = options.width as f32 / 2.0;
    let cy = options.height as f32 / 2.0;
    // stretch the spiral horizontally to follow the canvas shape
    let aspect = options.width as f32 / options.height as f32;
    let pad = options.padding as i32;
    let occupied: Vec<Rect> = placed.iter().map(PlacedWord::rect).collect();

    for step in 0..MAX_SPIRAL_STEPS {
        let theta = step as f32 * 0.1;
        let radius = 1.5 * theta;
        let x = (cx + radius * theta.cos() * aspect - w as f32 / 2.0) as i32;
        let y = (cy + radius * theta.sin() - h as f32 / 2.0) as i32;
        if x < 0 || y < 0 || x as u32 + w > options.width || y as u32 + h > options.height {
            continue;
        }
        let padded = Rect::at(x - pad, y - pad).of_size(w + 2 * options.padding, h + 2 * options.padding);
        if occupied.iter().all(|r| r.intersect(padded).is_none()) {
            return Some((x, y));
        }
    }
    None
}

/// Draws placed words onto a white canvas.
pub fn draw(placed: &[PlacedWord], options: &WordCloudOptions, font: &impl Font) -> RgbImage {
    let mut image = RgbImage::from_pixel(options.width, options.height, BACKGROUND);
    for word in placed {
        draw_text_mut(
            &mut image,
            Rgb(word.color),
            word.x,
            word.y,
            PxScale::from(word.font_size as f32),
            font,
            &word.term,
        );
    }
    image
}

/// Lays out, draws and PNG-encodes a word cloud.
pub fn render_wordcloud_png(
    terms: &[TermFrequency],
    options: &WordCloudOptions,
) -> Result<Vec<u8>, ExportError> {
    let font = bundled_font()?;
    let placed = layout(terms, options, &font);
    let image = draw(&placed, options, &font);
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ExportError::Image(e.to_string()))?;
    Ok(png)
}
