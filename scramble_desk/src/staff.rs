use crate::{Competition, Group, Round};

/// Each group is staffed by the competitors of the group before it, the first
/// by the last. A single group has no one to rotate with and gets no staff.
pub fn rotate_staff(groups: &mut [Group]) {
    let count = groups.len();
    if count <= 1 {
        for group in groups.iter_mut() {
            group.staff.clear();
        }
        return;
    }
    let staff: Vec<_> = (0..count)
        .map(|j| groups[(j + count - 1) % count].competitors.clone())
        .collect();
    for (group, staff) in groups.iter_mut().zip(staff) {
        group.staff = staff;
    }
}

impl Round {
    pub fn rotate_staff(&mut self) {
        rotate_staff(&mut self.groups);
    }
}

impl Competition {
    pub fn assign_staff(&mut self) {
        for round in self.rounds.iter_mut() {
            round.rotate_staff();
        }
    }
}
