use serde::{Deserialize, Serialize};

/// Competition role. Only delegates are told apart; everything else is kept as sent.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Delegate,
    Other(String),
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "delegate" => Role::Delegate,
            _ => Role::Other(role),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Delegate => "delegate".to_string(),
            Role::Other(role) => role,
        }
    }
}
