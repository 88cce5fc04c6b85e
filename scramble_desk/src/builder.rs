use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use wca_wcif::{Activity, Wcif};

use crate::{short_event_name, Competition, DeskError, Group, Passcodes, Person, Ranking, Result, Round};

const SCHEDULE_VENUE: usize = 1;
const SCHEDULE_ROOM: usize = 1;

fn utc(time: wca_wcif::DateTime) -> DateTime<Utc> {
    time.and_utc()
}

/// Builds the desk state for a competition. Rounds come from the main room's
/// schedule; rounds whose groups are not in the schedule get one group per
/// matching file in `scramble_sets` (file names from the scramble set directory).
pub fn build_competition(wcif: &Wcif, scramble_sets: &[String], passcodes: &Passcodes) -> Result<Competition> {
    let persons = persons_from_wcif(wcif);

    let mut rounds = round_activities(wcif).iter()
        .map(|activities| build_round(activities, &persons, scramble_sets, passcodes))
        .collect::<Result<Vec<_>>>()?;
    rounds.sort_by_key(|r| r.start_time);

    let mut competition = Competition {
        id: wcif.id.clone(),
        name: wcif.name.clone(),
        rounds,
        persons,
    };
    competition.check_registry()?;
    competition.check_activity_codes()?;
    competition.assign_staff();
    info!(id = %competition.id, rounds = competition.rounds.len(), persons = competition.persons.len(), "competition built");
    Ok(competition)
}

/// Registered persons. Entries without a registrant id are dropped.
pub fn persons_from_wcif(wcif: &Wcif) -> Vec<Person> {
    wcif.persons_iter().filter_map(Person::from_wcif).collect()
}

impl Competition {
    /// Swaps in a freshly fetched person registry. Group rosters are left alone.
    pub fn reload_persons(&mut self, wcif: &Wcif) -> Result<()> {
        let previous = std::mem::replace(&mut self.persons, persons_from_wcif(wcif));
        if let Err(err) = self.check_registry() {
            self.persons = previous;
            return Err(err);
        }
        info!(persons = self.persons.len(), "person registry reloaded");
        Ok(())
    }
}

/// Main room activities grouped by round code, in order of first appearance.
/// A round may be split over several schedule activities sharing one code.
fn round_activities(wcif: &Wcif) -> Vec<Vec<&Activity>> {
    let mut rounds: Vec<Vec<&Activity>> = vec![];
    for activity in wcif.room_activities(SCHEDULE_VENUE, SCHEDULE_ROOM) {
        if activity.activity_code.contains("other") {
            continue;
        }
        match rounds.iter_mut().find(|r| r[0].activity_code == activity.activity_code) {
            Some(round) => round.push(activity),
            None => rounds.push(vec![activity]),
        }
    }
    rounds
}

fn build_round(activities: &[&Activity], persons: &[Person], scramble_sets: &[String], passcodes: &Passcodes) -> Result<Round> {
    let activity = activities[0];
    let code = &activity.activity_code;
    let event_id = code.split('-').next().unwrap_or(code).to_string();
    let round_number = activity.code_number('r').unwrap_or(1);
    let start_time = activities.iter().map(|a| utc(a.start_time)).min().unwrap_or(utc(activity.start_time));
    let end_time = activities.iter().map(|a| utc(a.end_time)).max().unwrap_or(utc(activity.end_time));

    let mut children: Vec<&Activity> = activities.iter().copied().flat_map(|a| &a.child_activities).collect();
    let mut groups = if children.is_empty() {
        synthesise_groups(activity, start_time, end_time, scramble_sets)
    }
    else {
        children.sort_by_key(|child| (child.code_number('g').unwrap_or(usize::MAX), child.start_time));
        children.into_iter().enumerate().map(|(i, child)| {
            let mut competitors: Vec<Person> = persons.iter()
                .filter(|p| p.competes_in(child.id))
                .map(Person::simplified)
                .collect();
            competitors.sort_by(|a, b| a.name.cmp(&b.name));
            group(child.id, code, i + 1, activity.name.clone(), utc(child.start_time), utc(child.end_time), competitors)
        }).collect()
    };

    for group in groups.iter_mut() {
        group.event_id = event_id.clone();
        group.round_number = round_number;
        let set = group.scramble_set();
        group.unlock_code = passcodes.get(&set)
            .ok_or_else(|| DeskError::NotFound(format!("unlock code for {set}")))?
            .to_string();
    }
    if groups.is_empty() {
        warn!(round = %code, "round has no groups and will never be called up");
    }

    Ok(Round {
        id: activity.id,
        event_id,
        event_name: activity.name.clone(),
        activity_code: code.clone(),
        round_number,
        group_count: groups.len(),
        groups,
        finished: false,
        results: vec![],
        start_time,
        end_time,
    })
}

fn synthesise_groups(activity: &Activity, start_time: DateTime<Utc>, end_time: DateTime<Utc>, scramble_sets: &[String]) -> Vec<Group> {
    let prefix = format!("{} Scramble Set ", short_event_name(&activity.name));
    let mut files: Vec<&String> = scramble_sets.iter().filter(|f| f.starts_with(&prefix)).collect();
    files.sort();
    files.into_iter().enumerate().map(|(i, file)| {
        let event_name = file.split(" Scramble").next().unwrap_or(file).to_string();
        group(
            activity.id * 1000 + i + 1,
            &activity.activity_code,
            i + 1,
            event_name,
            start_time,
            end_time,
            vec![],
        )
    }).collect()
}

fn group(activity_id: usize, round_code: &str, group_number: usize, event_name: String, start_time: DateTime<Utc>, end_time: DateTime<Utc>, competitors: Vec<Person>) -> Group {
    Group {
        activity_id,
        activity_code: format!("{round_code}-g{group_number}"),
        event_name,
        event_id: String::new(),
        start_time,
        end_time,
        round_number: 0,
        group_number,
        opened: false,
        opened_timestamps: vec![],
        closed_timestamps: vec![],
        finished: false,
        competitors,
        staff: vec![],
        unlock_code: String::new(),
    }
}

/// Ranked results per round code. Unranked entries are left out.
pub fn rankings_by_round(wcif: &Wcif) -> HashMap<String, Vec<Ranking>> {
    wcif.round_iter()
        .map(|round| {
            let rankings = round.results.iter()
                .filter_map(|r| Some(Ranking { person_id: r.person_id, ranking: r.ranking? }))
                .collect();
            (round.id.clone(), rankings)
        })
        .collect()
}
