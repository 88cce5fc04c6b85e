//! Deterministic collaborators and a small competition for progression tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use scramble_desk::*;

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 2, hour, minute, 0).unwrap()
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Answers prompts from a script; an exhausted script answers no.
#[derive(Default)]
pub struct ScriptedOperator {
    answers: RefCell<VecDeque<bool>>,
    pub prompts: RefCell<Vec<String>>,
}

impl ScriptedOperator {
    pub fn answering(answers: &[bool]) -> Self {
        ScriptedOperator {
            answers: RefCell::new(answers.iter().copied().collect()),
            prompts: RefCell::new(vec![]),
        }
    }
}

impl Operator for ScriptedOperator {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(false)
    }
}

#[derive(Default)]
pub struct FakeResults {
    pub results: HashMap<String, Vec<Ranking>>,
    pub unreachable: bool,
}

#[async_trait]
impl ResultsSource for FakeResults {
    async fn fetch_results(&self, _competition_id: &str) -> Result<HashMap<String, Vec<Ranking>>> {
        if self.unreachable {
            return Err(DeskError::ExternalFailure("registry unreachable".into()));
        }
        Ok(self.results.clone())
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    pub calls: Mutex<Vec<String>>,
    pub fail_uploads: bool,
}

impl RecordingPublisher {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        if self.fail_uploads {
            return Err(DeskError::ExternalFailure(format!("upload failed: {call}")));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn show_round_sheet(&self, group: &Group) -> Result<()> {
        let names: Vec<_> = group.competitors.iter().map(|p| p.name.as_str()).collect();
        self.record(format!("round {} [{}]", group.activity_code, names.join(", ")))
    }

    async fn show_hand_in_sheet(&self, group: &Group) -> Result<()> {
        self.record(format!("hand-in {}", group.activity_code))
    }

    async fn show_intermission(&self) -> Result<()> {
        self.record("intermission".to_string())
    }

    async fn show_scramble_set(&self, competition_name: &str, group: &Group) -> Result<()> {
        self.record(format!("scrambles {competition_name}/{} ({})", group.scramble_set(), group.unlock_code))
    }
}

pub type TestDesk = Desk<ScriptedOperator, FixedClock, FakeResults, RecordingPublisher>;

pub fn desk(answers: &[bool], now: DateTime<Utc>, results: FakeResults) -> TestDesk {
    Desk::new(
        ScriptedOperator::answering(answers),
        FixedClock(now),
        results,
        RecordingPublisher::default(),
        Policy::default(),
    )
}

pub const NAMES: [&str; 8] = ["Hedda", "Gustav", "Frida", "Erik", "Dina", "Carl", "Bea", "Aksel"];

fn person(id: usize) -> Person {
    Person { id, name: NAMES[id - 1].to_string(), wca_id: None, roles: vec![], avatar: None, assignments: vec![] }
}

fn round(id: usize, event: &str, number: usize, groups: usize, start: DateTime<Utc>) -> Round {
    let code = format!("{event}-r{number}");
    let event_name = format!("{event} Round {number}");
    Round {
        id,
        event_id: event.to_string(),
        event_name: event_name.clone(),
        activity_code: code.clone(),
        round_number: number,
        group_count: groups,
        groups: (1..=groups).map(|g| Group {
            activity_id: id * 1000 + g,
            activity_code: format!("{code}-g{g}"),
            event_name: event_name.clone(),
            event_id: event.to_string(),
            start_time: start + Duration::minutes(30 * (g as i64 - 1)),
            end_time: start + Duration::minutes(30 * g as i64),
            round_number: number,
            group_number: g,
            opened: false,
            opened_timestamps: vec![],
            closed_timestamps: vec![],
            finished: false,
            competitors: vec![],
            staff: vec![],
            unlock_code: format!("{code}-secret-{g}"),
        }).collect(),
        finished: false,
        results: vec![],
        start_time: start,
        end_time: start + Duration::hours(1),
    }
}

/// 333 round 1 at 09:00 (two groups of four), 222 round 1 at 10:00 (one group),
/// 333 round 2 at 11:00 (two groups, filled by advancement).
pub fn competition() -> Competition {
    let mut rounds = vec![
        round(1, "333", 1, 2, at(9, 0)),
        round(2, "222", 1, 1, at(10, 0)),
        round(3, "333", 2, 2, at(11, 0)),
    ];
    let persons: Vec<Person> = (1..=8).map(person).collect();
    rounds[0].groups[0].competitors = persons[..4].to_vec();
    rounds[0].groups[1].competitors = persons[4..].to_vec();
    rounds[1].groups[0].competitors = persons.clone();
    let mut competition = Competition {
        id: "Fixture2024".into(),
        name: "Fixture 2024".into(),
        rounds,
        persons,
    };
    competition.assign_staff();
    competition
}

/// Person `i` ranked `i` in 333 round 1.
pub fn first_round_results() -> FakeResults {
    let rankings = (1..=8).map(|i| Ranking { person_id: i, ranking: i }).collect();
    FakeResults { results: HashMap::from([("333-r1".to_string(), rankings)]), unreachable: false }
}

pub fn finish_all(competition: &mut Competition) {
    for round in competition.rounds.iter_mut() {
        round.finished = true;
        for group in round.groups.iter_mut() {
            group.finished = true;
        }
    }
}
