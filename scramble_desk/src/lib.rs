//! Round and group progression for the scramble desk of a WCA competition.
//!
//! A [`Competition`] is built once from a WCIF document, persisted as a JSON
//! snapshot, and mutated one operation per invocation: opening the next group,
//! rolling back to a group, opening a scramble set out of order, or closing the
//! active set. Collaborators that touch the outside world (results registry,
//! display uploads, operator prompts, the clock) sit behind the traits in
//! [`collaborator`].

mod advancement;
mod builder;
pub mod collaborator;
mod competition;
mod config;
mod error;
mod passcodes;
mod sequencer;
mod snapshot;
mod staff;

pub use advancement::{advancing_count, distribute, group_sizes, select_advancing};
pub use builder::{build_competition, persons_from_wcif, rankings_by_round};
pub use collaborator::{Clock, Operator, Publisher, ResultsSource, SystemClock};
pub use competition::*;
pub use config::{Config, Policy, APP_NAME};
pub use error::{DeskError, Result};
pub use passcodes::{load_passcodes, parse_passcodes, Passcodes};
pub use sequencer::{CloseOutcome, Desk, StartOutcome};
pub use snapshot::{export, JsonFileStore, SnapshotStore};
pub use staff::rotate_staff;
