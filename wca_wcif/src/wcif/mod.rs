use serde::{Deserialize, Serialize};

mod activity;
mod assignment;
mod avatar;
mod event;
mod person;
mod result;
mod role;
mod room;
mod round;
mod schedule;
mod venue;
mod wca_id;

pub use activity::*;
pub use assignment::*;
pub use avatar::*;
pub use event::*;
pub use person::*;
pub use result::*;
pub use role::*;
pub use room::*;
pub use round::*;
pub use schedule::*;
pub use venue::*;
pub use wca_id::*;
pub use super::{Date, DateTime};

use crate::RegistryError;

pub type WcifResult = std::result::Result<Wcif, RegistryError>;

/// The subset of a public WCIF document the scramble desk reads. Unknown fields are ignored.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Wcif {
    #[serde(default)]
    pub format_version: String,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub events: Vec<Event>,
    pub schedule: Schedule,
}

/// Error body returned by the registry instead of a WCIF document.
#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct WcifError {
    pub error: String
}

pub fn parse(json: &str) -> WcifResult {
    match serde_json::from_str::<Wcif>(json) {
        Ok(wcif) => Ok(wcif),
        Err(err) => match serde_json::from_str::<WcifError>(json) {
            Ok(api) => Err(RegistryError::Api(api.error)),
            Err(_) => Err(RegistryError::Parse(err))
        }
    }
}

impl Wcif {
    pub fn persons_iter(&self) -> impl Iterator<Item = &Person> {
        self.persons.iter()
    }

    pub fn events_iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn round_iter(&self) -> impl Iterator<Item = &Round> {
        self.events_iter().flat_map(|e|e.rounds.iter())
    }

    /// Top level activities of a single room, in schedule document order.
    pub fn room_activities(&self, venue_id: usize, room_id: usize) -> impl Iterator<Item = &Activity> {
        self.schedule.venues.iter()
            .filter(move |venue| venue.id == venue_id)
            .flat_map(|venue| &venue.rooms)
            .filter(move |room| room.id == room_id)
            .flat_map(|room| &room.activities)
    }
}
