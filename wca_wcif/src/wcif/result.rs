use serde::{Deserialize, Serialize};

/// One person's line in a round's results. `ranking` stays empty until the round is scored.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub person_id: usize,
    pub ranking: Option<usize>,
}
