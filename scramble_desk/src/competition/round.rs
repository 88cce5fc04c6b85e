use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Group;
use crate::{DeskError, Result};

/// A posted result: lower ranking is better.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub person_id: usize,
    pub ranking: usize,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: usize,
    pub event_id: String,
    pub event_name: String,
    pub activity_code: String,
    pub round_number: usize,
    pub group_count: usize,
    pub groups: Vec<Group>,
    pub finished: bool,
    #[serde(default)]
    pub results: Vec<Ranking>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Round {
    pub fn next_group_index(&self) -> Option<usize> {
        self.groups.iter().position(|g| !g.finished)
    }

    pub fn is_last_group(&self, group: &Group) -> bool {
        group.group_number == self.group_count
    }

    pub fn check_group_count(&self) -> Result<()> {
        if self.group_count != self.groups.len() {
            return Err(DeskError::DataInconsistency(format!(
                "{} declares {} groups but has {}",
                self.activity_code, self.group_count, self.groups.len()
            )));
        }
        Ok(())
    }

    pub fn reset_progress(&mut self) {
        self.finished = false;
        for group in self.groups.iter_mut() {
            group.finished = false;
        }
    }
}
