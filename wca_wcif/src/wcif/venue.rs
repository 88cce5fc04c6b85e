use serde::{Deserialize, Serialize};

use super::*;

#[derive(PartialEq, Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: usize,
    pub name: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
}
