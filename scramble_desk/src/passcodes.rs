use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::{DeskError, Result};

/// Unlock codes of the encrypted scramble set PDFs, keyed by scramble set name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Passcodes(HashMap<String, String>);

impl Passcodes {
    pub fn get(&self, scramble_set: &str) -> Option<&str> {
        self.0.get(scramble_set).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Reads `name: code` lines. Lines without a colon are headers and skipped.
pub fn parse_passcodes(text: &str) -> Passcodes {
    Passcodes(text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(name, code)| (name.trim().to_string(), code.trim().to_string()))
        .filter(|(name, code)| !name.is_empty() && !code.is_empty())
        .collect())
}

pub fn load_passcodes(path: &Path) -> Result<Passcodes> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(parse_passcodes(&text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(DeskError::NotFound(format!("passcode file {}", path.display())))
        }
        Err(err) => Err(err.into()),
    }
}
