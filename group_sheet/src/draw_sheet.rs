use tracing::warn;

use crate::sheet::{Sheet, SheetKind, SheetPerson};
use crate::sheet_generator::{SheetGenerator, Alignment::*, Weight::*, PAGE_HEIGHT, PAGE_WIDTH, TEXT};

const MARGIN: f64 = 50.0;
const TITLE_HEIGHT: f64 = 40.0;
const INFO_LINE: f64 = 50.0;
const INFO_BAR: f64 = 60.0;
const NAME_SIZE: f64 = 24.0;
const TITLE_SIZE: f64 = 36.0;
const ID_SIZE: f64 = 16.0;
const MAX_IMAGE: f64 = 160.0;
const IMAGE_GAP: f64 = 10.0;

const HAND_IN_BAR: (u8, u8, u8) = (120, 176, 117);
const ROUND_BAR: (u8, u8, u8) = (83, 96, 242);

const COLUMN_WIDTH: f64 = (PAGE_WIDTH - MARGIN * 3.0) / 2.0;
const LEFT: f64 = MARGIN;
const RIGHT: f64 = MARGIN * 2.0 + COLUMN_WIDTH;
const Y_START: f64 = MARGIN + TITLE_HEIGHT + 20.0;

#[derive(Debug, PartialEq)]
pub struct Layout {
    pub line_height: f64,
    pub rows_per_page: usize,
}

pub fn layout(sheet: &Sheet) -> Layout {
    let available = PAGE_HEIGHT - Y_START - MARGIN - INFO_LINE;
    let line_height = available / sheet.rows() as f64;
    let rows_per_page = (((PAGE_HEIGHT - MARGIN - Y_START) / line_height).floor() as usize).max(1);
    Layout { line_height, rows_per_page }
}

pub fn draw_sheet(generator: &mut SheetGenerator, sheet: &Sheet) {
    let layout = layout(sheet);
    let rows = sheet.competitors.len().max(sheet.staff.len()).max(1);
    let pages = rows.div_ceil(layout.rows_per_page);

    for page in 0..pages {
        generator.add_page();
        draw_frame(generator, sheet, page == 0);
        let first = page * layout.rows_per_page;
        for row in 0..layout.rows_per_page {
            let y = Y_START + row as f64 * layout.line_height;
            if let Some(person) = sheet.competitors.get(first + row) {
                draw_person(generator, person, LEFT, y, layout.line_height);
            }
            if let Some(person) = sheet.staff.get(first + row) {
                draw_person(generator, person, RIGHT, y, layout.line_height);
            }
        }
    }
}

fn draw_frame(generator: &mut SheetGenerator, sheet: &Sheet, first_page: bool) {
    let bar = match sheet.kind {
        SheetKind::Round => ROUND_BAR,
        SheetKind::HandIn => HAND_IN_BAR,
    };
    let bar_center = PAGE_HEIGHT - INFO_LINE;
    generator.fill_rect(0.0, bar_center - INFO_BAR / 2.0, PAGE_WIDTH, INFO_BAR, bar);
    generator.write(&sheet.info_line(), 60.0, bar_center + 12.0, TITLE_SIZE, Left, Bold);

    let title_baseline = MARGIN - 20.0 + TITLE_HEIGHT * 0.8;
    generator.write("Competitors", LEFT, title_baseline, TITLE_SIZE, Left, Bold);
    let staff_title = if first_page { sheet.staff_title() } else { "Staff" };
    generator.write(staff_title, RIGHT, title_baseline, TITLE_SIZE, Left, Bold);
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(3)
        .collect()
}

/// Side of the square avatar tile for a row. Short lists get large tiles, capped
/// so the name keeps most of the column.
pub fn image_size(line_height: f64) -> f64 {
    (line_height - 5.0).clamp(1.0, MAX_IMAGE)
}

pub fn name_width(image: f64) -> f64 {
    COLUMN_WIDTH - image - IMAGE_GAP
}

fn draw_avatar(generator: &mut SheetGenerator, person: &SheetPerson, x: f64, y: f64, image: f64) -> bool {
    let Some(path) = &person.avatar else { return false };
    let drawn = std::fs::read(path)
        .map_err(|e| e.to_string())
        .and_then(|jpeg| generator.jpeg(&jpeg, x, y, image).map_err(|e| e.to_string()));
    match drawn {
        Ok(()) => true,
        Err(err) => {
            warn!(path = %path.display(), %err, "could not draw avatar");
            false
        }
    }
}

fn draw_person(generator: &mut SheetGenerator, person: &SheetPerson, x: f64, y: f64, line_height: f64) {
    let image = image_size(line_height);
    if !draw_avatar(generator, person, x, y, image) {
        generator.outline_rect(x, y, image, image, TEXT);
        let initials_size = (image * 0.4).min(NAME_SIZE * 2.0);
        if initials_size >= 8.0 {
            generator.write(&initials(&person.name), x + image / 2.0, y + image / 2.0 + initials_size * 0.35, initials_size, Center, Bold);
        }
    }

    let text_x = x + image + IMAGE_GAP;
    let name = generator.fit(&person.name, name_width(image), NAME_SIZE);
    generator.write(&name, text_x, y + image / 2.0 + 8.0, NAME_SIZE, Left, Normal);
    if let (Some(wca_id), true) = (&person.wca_id, image >= 60.0) {
        generator.write(wca_id, text_x, y + image / 2.0 + 32.0, ID_SIZE, Left, Normal);
    }
}
