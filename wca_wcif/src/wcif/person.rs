use serde::{Deserialize, Serialize};

use super::*;

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub registrant_id: Option<usize>,
    pub name: String,
    pub wca_user_id: usize,
    pub wca_id: Option<WcaId>,
    #[serde(default)]
    pub country_iso_2: String,
    #[serde(default)]
    pub avatar: Option<Avatar>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}
