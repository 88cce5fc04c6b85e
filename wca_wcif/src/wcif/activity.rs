use serde::{Deserialize, Serialize};
use super::DateTime;

#[derive(PartialEq, Debug, Deserialize, Serialize, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: usize,
    pub name: String,
    pub activity_code: String,
    #[serde(deserialize_with = "crate::de_date_time", serialize_with = "crate::ser_date_time")]
    pub start_time: DateTime,
    #[serde(deserialize_with = "crate::de_date_time", serialize_with = "crate::ser_date_time")]
    pub end_time: DateTime,
    #[serde(default)]
    pub child_activities: Vec<Activity>,
    #[serde(default)]
    pub scramble_set_id: Option<usize>,
}

impl Activity {
    /// Number following the `-<marker>` segment of the activity code, e.g. `r` in `333-r2-g1` gives 2.
    pub fn code_number(&self, marker: char) -> Option<usize> {
        code_number(&self.activity_code, marker)
    }
}

pub fn code_number(activity_code: &str, marker: char) -> Option<usize> {
    activity_code.split('-')
        .skip(1)
        .find_map(|part| part.strip_prefix(marker)?.parse().ok())
}
