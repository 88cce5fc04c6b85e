use std::sync::Arc;

use font_kit::loaders::default::Font;
use printpdf::{IndirectFontRef, PdfDocumentReference};

use crate::SheetError;

pub type FontWidth = Font;
pub type FontPDF = IndirectFontRef;

const NORMAL: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");
const BOLD: &[u8] = include_bytes!("../fonts/DejaVuSans-Bold.ttf");

#[derive(Clone, Copy)]
pub enum Weight {
    Normal,
    Bold,
}

/// Embedded PDF font plus its metrics, one per weight.
pub struct Fonts {
    normal: (FontWidth, FontPDF),
    bold: (FontWidth, FontPDF),
}

impl Fonts {
    pub fn pdf(&self, weight: Weight) -> &FontPDF {
        match weight {
            Weight::Normal => &self.normal.1,
            Weight::Bold => &self.bold.1,
        }
    }

    pub fn text_width(&self, text: &str, font_size: f64, weight: Weight) -> f64 {
        match weight {
            Weight::Normal => text_width(&self.normal.0, text, font_size),
            Weight::Bold => text_width(&self.bold.0, text, font_size),
        }
    }
}

pub fn font_width(weight: Weight) -> Result<FontWidth, SheetError> {
    let bytes = match weight {
        Weight::Normal => NORMAL,
        Weight::Bold => BOLD,
    };
    Font::from_bytes(Arc::new(bytes.to_vec()), 0)
        .map_err(|e| SheetError::Font(format!("{e:?}")))
}

fn load_font(doc: &PdfDocumentReference, weight: Weight) -> Result<(FontWidth, FontPDF), SheetError> {
    let bytes = match weight {
        Weight::Normal => NORMAL,
        Weight::Bold => BOLD,
    };
    let font = doc.add_external_font(bytes)
        .map_err(|e| SheetError::Font(format!("{e:?}")))?;
    Ok((font_width(weight)?, font))
}

pub fn load_fonts(doc: &PdfDocumentReference) -> Result<Fonts, SheetError> {
    Ok(Fonts {
        normal: load_font(doc, Weight::Normal)?,
        bold: load_font(doc, Weight::Bold)?,
    })
}

/// Width of `text` in points. Characters without a glyph count as a quarter em.
pub fn text_width(font: &FontWidth, text: &str, font_size: f64) -> f64 {
    let upem = font.metrics().units_per_em as f64;
    let units: f64 = text.chars()
        .map(|c| {
            font.glyph_for_char(c)
                .and_then(|id| font.advance(id).ok())
                .map_or(upem / 4.0, |advance| advance.x() as f64)
        })
        .sum();
    units * font_size / upem
}
