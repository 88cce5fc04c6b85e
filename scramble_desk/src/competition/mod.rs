use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

mod group;
mod person;
mod round;

pub use group::*;
pub use person::*;
pub use round::*;

use crate::{DeskError, Policy, Result};

/// Aggregate root of the scramble desk state. This is what the snapshot stores.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: String,
    pub name: String,
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub persons: Vec<Person>,
}

impl Competition {
    /// Stable sort by scheduled start, keeping document order for rounds starting together.
    pub fn sort_rounds(&mut self) {
        self.rounds.sort_by_key(|r| r.start_time);
    }

    /// The first unfinished group of the first round that still has one.
    pub fn next_group(&self) -> Option<&Group> {
        let (r, g) = self.next_group_position()?;
        Some(&self.rounds[r].groups[g])
    }

    pub fn next_group_position(&self) -> Option<(usize, usize)> {
        self.rounds.iter()
            .enumerate()
            .filter(|(_, round)| !round.finished)
            .find_map(|(r, round)| Some((r, round.next_group_index()?)))
    }

    pub fn find_group(&self, activity_code: &str) -> Option<&Group> {
        let (r, g) = self.find_group_position(activity_code)?;
        Some(&self.rounds[r].groups[g])
    }

    pub fn find_group_position(&self, activity_code: &str) -> Option<(usize, usize)> {
        self.rounds.iter().enumerate().find_map(|(r, round)| {
            round.groups.iter()
                .position(|g| g.activity_code == activity_code)
                .map(|g| (r, g))
        })
    }

    /// Index of the round of the same event with round number one lower.
    pub fn previous_round_index(&self, round_idx: usize) -> Option<usize> {
        let round = self.rounds.get(round_idx)?;
        self.rounds.iter().position(|r| {
            r.event_id == round.event_id && r.round_number + 1 == round.round_number
        })
    }

    pub fn person(&self, id: usize) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }

    /// Replaces every round's results. Rounds missing from `results` end up with none.
    pub fn apply_results(&mut self, mut results: HashMap<String, Vec<Ranking>>) {
        for round in self.rounds.iter_mut() {
            round.results = results.remove(&round.activity_code).unwrap_or_default();
            debug!(round = %round.activity_code, results = round.results.len(), "results merged");
        }
    }

    /// Person ids must be unique.
    pub fn check_registry(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for person in &self.persons {
            if !seen.insert(person.id) {
                return Err(DeskError::DataInconsistency(format!("person id {} ({}) appears twice", person.id, person.name)));
            }
        }
        Ok(())
    }

    /// Round and group activity codes must be unique; lookups by code only ever reach the first match.
    pub fn check_activity_codes(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let codes = self.rounds.iter().flat_map(|round| {
            std::iter::once(&round.activity_code).chain(round.groups.iter().map(|g| &g.activity_code))
        });
        for code in codes {
            if !seen.insert(code) {
                return Err(DeskError::DataInconsistency(format!("activity code {code} appears twice")));
            }
        }
        Ok(())
    }

    /// Competitors from the preceding round's results, then staff rotation, for one round.
    pub fn finalize_assignments(&mut self, round_idx: usize, policy: &Policy) -> Result<()> {
        self.assign_advanced_round_competitors(round_idx, policy)?;
        self.rounds[round_idx].rotate_staff();
        Ok(())
    }

    /// Clears every finished flag, then finishes everything scheduled before `activity_code`.
    pub fn start_from(&mut self, activity_code: &str) -> Result<()> {
        for round in self.rounds.iter_mut() {
            round.reset_progress();
        }
        for round in self.rounds.iter_mut() {
            for group in round.groups.iter_mut() {
                if group.activity_code == activity_code {
                    info!(%activity_code, "progress rolled back");
                    return Ok(());
                }
                group.finished = true;
            }
            round.finished = true;
        }
        Err(DeskError::NotFound(format!("no group with activity code {activity_code}")))
    }

    /// One line per round and group with its finished flag.
    pub fn progress_report(&self) -> String {
        let mut report = String::new();
        for round in &self.rounds {
            report.push_str(&format!(
                "{}: RoundNumber ({}), GroupCount ({}) [Finished = {}]\n",
                round.event_name, round.round_number, round.group_count, round.finished
            ));
            for group in &round.groups {
                report.push_str(&format!(
                    "\t{} ({}): GroupNumber ({}) [Finished = {}]\n",
                    group.event_name, group.activity_code, group.group_number, group.finished
                ));
            }
        }
        report
    }

    /// Copy for archiving: no persons, results or group rosters.
    pub fn exported(&self) -> Competition {
        let mut export = self.clone();
        export.persons.clear();
        for round in export.rounds.iter_mut() {
            round.results.clear();
            for group in round.groups.iter_mut() {
                group.competitors.clear();
                group.staff.clear();
            }
        }
        export
    }
}
