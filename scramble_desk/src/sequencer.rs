use chrono::Duration;
use tracing::{info, warn};

use crate::{Clock, Competition, DeskError, Operator, Policy, Publisher, Result, ResultsSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Every round is finished.
    NoNewRounds,
    /// The operator said no. Nothing changed.
    Declined,
    Started { activity_code: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The upcoming group was asked to hand in their puzzles.
    HandIn { activity_code: String },
    /// Nothing left to run; only the intermission screen went up.
    Intermission,
}

/// Drives the competition from one group to the next.
pub struct Desk<O, C, R, P> {
    pub operator: O,
    pub clock: C,
    pub results: R,
    pub publisher: P,
    pub policy: Policy,
}

impl<O, C, R, P> Desk<O, C, R, P>
where
    O: Operator,
    C: Clock,
    R: ResultsSource,
    P: Publisher,
{
    pub fn new(operator: O, clock: C, results: R, publisher: P, policy: Policy) -> Self {
        Desk { operator, clock, results, publisher, policy }
    }

    /// Finishes the next group, shows its round sheet and opens its scramble set.
    pub async fn start_next_group(&self, competition: &mut Competition) -> Result<StartOutcome> {
        let r = match competition.rounds.iter().position(|round| !round.finished) {
            Some(r) => r,
            None => return Ok(StartOutcome::NoNewRounds),
        };
        let g = match competition.rounds[r].next_group_index() {
            Some(g) => g,
            None => return Ok(StartOutcome::NoNewRounds),
        };

        let group = &competition.rounds[r].groups[g];
        if !self.operator.confirm(&format!("Are you sure you want to open {}", group.scramble_set())) {
            return Ok(StartOutcome::Declined);
        }
        let until_start = group.start_time - self.clock.now();
        if until_start > Duration::minutes(self.policy.early_open_threshold_minutes) {
            let prompt = format!(
                "Are you sure? {} is not supposed to start for another {}h {}m",
                group.activity_code,
                until_start.num_hours(),
                until_start.num_minutes() % 60
            );
            if !self.operator.confirm(&prompt) {
                return Ok(StartOutcome::Declined);
            }
        }

        let round = &mut competition.rounds[r];
        if round.is_last_group(&round.groups[g]) {
            round.finished = true;
        }
        round.groups[g].finished = true;
        let activity_code = round.groups[g].activity_code.clone();

        if round.round_number >= 2 {
            self.refresh_results(competition).await?;
            competition.finalize_assignments(r, &self.policy)?;
        }

        self.publisher.show_round_sheet(&competition.rounds[r].groups[g]).await?;
        self.open_scramble_set(competition, &activity_code).await?;
        info!(%activity_code, "group started");
        Ok(StartOutcome::Started { activity_code })
    }

    /// Puts a group's scramble set on screen without touching progress.
    pub async fn open_scramble_set(&self, competition: &mut Competition, activity_code: &str) -> Result<()> {
        let (r, g) = competition.find_group_position(activity_code)
            .ok_or_else(|| DeskError::NotFound(format!("no group with activity code {activity_code}")))?;
        self.publisher.show_scramble_set(&competition.name, &competition.rounds[r].groups[g]).await?;
        competition.rounds[r].groups[g].record_open(self.clock.now());
        info!(%activity_code, "scramble set opened");
        Ok(())
    }

    /// Takes the scramble set off screen and calls up the group after it.
    pub async fn close_active(&self, competition: &mut Competition) -> Result<CloseOutcome> {
        let (r, g) = match competition.next_group_position() {
            Some(position) => position,
            None => {
                warn!("no upcoming group to call up");
                self.publisher.show_intermission().await?;
                return Ok(CloseOutcome::Intermission);
            }
        };
        if competition.rounds[r].round_number >= 2 {
            self.refresh_results(competition).await?;
            competition.finalize_assignments(r, &self.policy)?;
        }

        self.publisher.show_intermission().await?;
        let group = &mut competition.rounds[r].groups[g];
        group.record_close(self.clock.now());
        self.publisher.show_hand_in_sheet(group).await?;
        let activity_code = group.activity_code.clone();
        info!(upcoming = %activity_code, "scramble set closed");
        Ok(CloseOutcome::HandIn { activity_code })
    }

    pub async fn refresh_results(&self, competition: &mut Competition) -> Result<()> {
        let results = self.results.fetch_results(&competition.id).await?;
        competition.apply_results(results);
        Ok(())
    }
}
