use serde::{Deserialize, Serialize};

use super::*;

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: String,
    #[serde(default)]
    pub results: Vec<RoundResult>,
    #[serde(default)]
    pub scramble_set_count: usize,
}
