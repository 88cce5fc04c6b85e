use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Person;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    Pending,
    Open,
    Finished,
}

/// One group of a round: the competitors solving a single scramble set and
/// the staff running it.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub activity_id: usize,
    pub activity_code: String,
    pub event_name: String,
    pub event_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub round_number: usize,
    pub group_number: usize,
    pub opened: bool,
    #[serde(default)]
    pub opened_timestamps: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub closed_timestamps: Vec<DateTime<Utc>>,
    pub finished: bool,
    #[serde(default)]
    pub competitors: Vec<Person>,
    #[serde(default)]
    pub staff: Vec<Person>,
    pub unlock_code: String,
}

impl Group {
    pub fn state(&self) -> GroupState {
        if self.finished {
            GroupState::Finished
        }
        else if self.opened {
            GroupState::Open
        }
        else {
            GroupState::Pending
        }
    }

    pub fn short_event_name(&self) -> String {
        short_event_name(&self.event_name)
    }

    /// Name of the scramble set PDF (without extension) and key of its unlock code,
    /// e.g. `3x3x3 Round 1 Scramble Set B` for the second group.
    pub fn scramble_set(&self) -> String {
        scramble_set_name(&self.event_name, self.group_number)
    }

    pub fn record_open(&mut self, at: DateTime<Utc>) {
        self.opened = true;
        self.opened_timestamps.push(at);
    }

    pub fn record_close(&mut self, at: DateTime<Utc>) {
        self.closed_timestamps.push(at);
    }
}

/// `3x3x3 Cube, Round 1, Group 2` becomes `3x3x3 Round 1`.
pub fn short_event_name(event_name: &str) -> String {
    let name = match event_name.find(" Group") {
        Some(idx) => &event_name[..idx],
        None => event_name,
    };
    name.replace(',', "").replace(" Cube", "").trim().to_string()
}

pub fn scramble_set_name(event_name: &str, group_number: usize) -> String {
    let letter = (b'A' + (group_number.saturating_sub(1) % 26) as u8) as char;
    format!("{} Scramble Set {}", short_event_name(event_name), letter)
}
