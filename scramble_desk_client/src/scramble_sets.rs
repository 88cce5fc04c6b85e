use std::io::ErrorKind;
use std::path::Path;

use scramble_desk::Result;
use tracing::warn;

/// File names of the scramble set PDFs in `dir`, sorted. A missing directory yields none.
pub fn list_scramble_sets(dir: &Path) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(dir = %dir.display(), "no scramble set directory");
            return Ok(vec![]);
        }
        Err(err) => return Err(err.into()),
    };
    let mut names = vec![];
    for entry in entries {
        let path = entry?.path();
        let is_pdf = path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"));
        if let (true, Some(name)) = (is_pdf, path.file_name().and_then(|n| n.to_str())) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
