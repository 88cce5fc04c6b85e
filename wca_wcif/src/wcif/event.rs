use serde::{Deserialize, Serialize};

use super::*;

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub rounds: Vec<Round>,
}
