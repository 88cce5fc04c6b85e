use serde::{Deserialize, Serialize};
use wca_wcif::{Assignment, AssignmentCode, Avatar, Role};

/// A registered person. Copies placed in a group's competitor or staff list
/// are [simplified](Person::simplified).
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: usize,
    pub name: String,
    pub wca_id: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub avatar: Option<Avatar>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Person {
    /// `None` for persons without a registrant id (staff-only entries never registered to compete).
    pub fn from_wcif(person: &wca_wcif::Person) -> Option<Person> {
        Some(Person {
            id: person.registrant_id?,
            name: person.name.clone(),
            wca_id: person.wca_id.as_ref().map(|id| id.to_string()),
            roles: person.roles.clone(),
            avatar: person.avatar.clone(),
            assignments: person.assignments.clone(),
        })
    }

    pub fn simplified(&self) -> Person {
        Person {
            id: self.id,
            name: self.name.clone(),
            wca_id: self.wca_id.clone(),
            roles: self.roles.clone(),
            avatar: None,
            assignments: vec![],
        }
    }

    pub fn competes_in(&self, activity_id: usize) -> bool {
        self.assignments.iter()
            .any(|a| a.activity_id == activity_id && a.assignment_code == AssignmentCode::Competitor)
    }

    /// Name of the stored avatar image, without extension.
    pub fn avatar_stem(&self) -> Option<&str> {
        self.avatar.as_ref()?;
        self.wca_id.as_deref()
    }
}
