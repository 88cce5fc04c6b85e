use std::path::PathBuf;

use tracing::debug;

use crate::draw_sheet::draw_sheet;
use crate::sheet_generator::SheetGenerator;
use crate::SheetError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetKind {
    /// Shown while a group competes.
    Round,
    /// Shown while the next group hands in their puzzles.
    HandIn,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SheetPerson {
    pub name: String,
    pub wca_id: Option<String>,
    /// JPEG drawn next to the name. Without one, or when it cannot be read,
    /// the tile shows the person's initials.
    pub avatar: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub kind: SheetKind,
    /// Event and round, e.g. `3x3x3 Round 1`.
    pub event_name: String,
    pub competitors: Vec<SheetPerson>,
    pub staff: Vec<SheetPerson>,
    /// Rows are sized for `max(competitors, staff) * row_multiplier / 2` people per column.
    pub row_multiplier: usize,
}

impl Sheet {
    pub fn info_line(&self) -> String {
        match self.kind {
            SheetKind::Round => format!("Current round: {}", self.event_name),
            SheetKind::HandIn => format!("Preparing {}, please hand in your puzzles!", self.event_name),
        }
    }

    pub fn staff_title(&self) -> &'static str {
        if self.staff.is_empty() { "No staff assigned" } else { "Staff" }
    }

    pub fn rows(&self) -> usize {
        let people = self.competitors.len().max(self.staff.len()) * self.row_multiplier;
        people.div_ceil(2).max(1)
    }
}

pub fn render_sheet(sheet: &Sheet) -> Result<Vec<u8>, SheetError> {
    let mut generator = SheetGenerator::new(&sheet.event_name)?;
    draw_sheet(&mut generator, sheet);
    debug!(event = %sheet.event_name, kind = ?sheet.kind, pages = generator.page_count(), "sheet rendered");
    generator.save()
}
