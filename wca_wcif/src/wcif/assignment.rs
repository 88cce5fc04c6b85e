use serde::{Deserialize, Serialize};

/// A person's task in one activity. Competitor assignments decide the
/// initial group lists; staff codes are carried through untouched.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub activity_id: usize,
    pub assignment_code: AssignmentCode,
    #[serde(default)]
    pub station_number: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(from = "String", into = "String")]
pub enum AssignmentCode {
    Competitor,
    Staff(String),
}

impl From<String> for AssignmentCode {
    fn from(code: String) -> Self {
        if code == "competitor" {
            AssignmentCode::Competitor
        }
        else {
            AssignmentCode::Staff(code)
        }
    }
}

impl From<AssignmentCode> for String {
    fn from(code: AssignmentCode) -> Self {
        match code {
            AssignmentCode::Competitor => "competitor".to_string(),
            AssignmentCode::Staff(code) => code,
        }
    }
}
