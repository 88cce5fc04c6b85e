//! Display sheets for the competitor list screen: who competes in a group and who staffs it.

mod font;
mod sheet;
mod draw_sheet;
mod sheet_generator;

use thiserror::Error;

pub use sheet::{render_sheet, Sheet, SheetKind, SheetPerson};

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("could not load font: {0}")]
    Font(String),

    #[error("could not write pdf: {0}")]
    Pdf(String),

    #[error("could not embed image: {0}")]
    Image(String),
}
