use std::io::Cursor;

use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::{Color, Image, ImageTransform, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex, PdfLayerReference, PdfPageIndex, Point, Rgb};

pub use crate::font::Weight;
use crate::font::{load_fonts, Fonts};
use crate::SheetError;

pub const PAGE_WIDTH: f64 = 1920.0;
pub const PAGE_HEIGHT: f64 = 1080.0;

pub const BACKGROUND: (u8, u8, u8) = (44, 62, 80);
pub const TEXT: (u8, u8, u8) = (236, 240, 241);

pub enum Alignment {
    Left,
    Center,
}

/// Draws on 1920x1080 pt pages using top-left coordinates in points.
pub struct SheetGenerator {
    document: PdfDocumentReference,
    fonts: Fonts,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
}

fn mm(pt: f64) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

fn color((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0, None))
}

impl SheetGenerator {
    pub fn new(title: &str) -> Result<SheetGenerator, SheetError> {
        let document = PdfDocument::empty(title);
        let fonts = load_fonts(&document)?;
        Ok(SheetGenerator { document, fonts, pages: vec![] })
    }

    /// Starts a new page filled with the background colour.
    pub fn add_page(&mut self) {
        let (page, layer) = self.document.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "");
        self.pages.push((page, layer));
        self.fill_rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT, BACKGROUND);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_layer(&self) -> Option<PdfLayerReference> {
        let (page, layer) = *self.pages.last()?;
        Some(self.document.get_page(page).get_layer(layer))
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: (u8, u8, u8)) {
        self.draw_rect(x, y, width, height, fill, true);
    }

    pub fn outline_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: (u8, u8, u8)) {
        self.draw_rect(x, y, width, height, stroke, false);
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, rgb: (u8, u8, u8), fill: bool) {
        let Some(layer) = self.current_layer() else { return };
        let points = vec![
            (Point::new(mm(x), mm(PAGE_HEIGHT - y)), false),
            (Point::new(mm(x + width), mm(PAGE_HEIGHT - y)), false),
            (Point::new(mm(x + width), mm(PAGE_HEIGHT - y - height)), false),
            (Point::new(mm(x), mm(PAGE_HEIGHT - y - height)), false),
        ];
        let rect = Line {
            points,
            is_closed: true,
            has_fill: fill,
            has_stroke: !fill,
            is_clipping_path: false,
        };
        if fill {
            layer.set_fill_color(color(rgb));
        }
        else {
            layer.set_outline_color(color(rgb));
            layer.set_outline_thickness(2.0);
        }
        layer.add_shape(rect);
    }

    /// `y` is the text baseline.
    pub fn write(&mut self, string: &str, x: f64, y: f64, font_size: f64, alignment: Alignment, weight: Weight) {
        let Some(layer) = self.current_layer() else { return };
        let font = self.fonts.pdf(weight);
        let x = match alignment {
            Alignment::Left => x,
            Alignment::Center => x - self.fonts.text_width(string, font_size, weight) / 2.0,
        };
        layer.set_fill_color(color(TEXT));
        layer.begin_text_section();
        layer.set_text_cursor(mm(x), mm(PAGE_HEIGHT - y));
        layer.set_font(font, font_size);
        layer.write_text(string, font);
        layer.end_text_section();
    }

    /// Draws a JPEG scaled into a `size` by `size` square with its top-left corner at (`x`, `y`).
    pub fn jpeg(&mut self, jpeg: &[u8], x: f64, y: f64, size: f64) -> Result<(), SheetError> {
        let decoder = JpegDecoder::new(Cursor::new(jpeg))
            .map_err(|e| SheetError::Image(e.to_string()))?;
        let image = Image::try_from(decoder)
            .map_err(|e| SheetError::Image(e.to_string()))?;
        let (width, height) = (image.image.width.0 as f64, image.image.height.0 as f64);
        if width == 0.0 || height == 0.0 {
            return Err(SheetError::Image("empty image".into()));
        }
        let Some(layer) = self.current_layer() else { return Ok(()) };
        // At 72 dpi one pixel is one point.
        image.add_to_layer(layer, ImageTransform {
            translate_x: Some(mm(x)),
            translate_y: Some(mm(PAGE_HEIGHT - y - size)),
            scale_x: Some(size / width),
            scale_y: Some(size / height),
            dpi: Some(72.0),
            ..Default::default()
        });
        Ok(())
    }

    /// Longest prefix of `string` that fits in `width`, with an ellipsis when cut.
    pub fn fit(&self, string: &str, width: f64, font_size: f64) -> String {
        let measure = |s: &str| self.fonts.text_width(s, font_size, Weight::Normal);
        if measure(string) <= width {
            return string.to_string();
        }
        let mut fitted = String::new();
        for c in string.chars() {
            fitted.push(c);
            if measure(&fitted) + measure("...") > width {
                fitted.pop();
                break;
            }
        }
        format!("{}...", fitted.trim_end())
    }

    pub fn save(self) -> Result<Vec<u8>, SheetError> {
        self.document.save_to_bytes().map_err(|e| SheetError::Pdf(format!("{e:?}")))
    }
}
