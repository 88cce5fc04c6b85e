use serde::{Deserialize, Serialize};

use super::*;

#[derive(PartialEq, Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: usize,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}
