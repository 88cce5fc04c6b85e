//! Seams between the progression engine and the outside world.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;
use wca_wcif::Registry;

use crate::{rankings_by_round, Group, Ranking, Result};

/// Blocking yes/no question to the person at the desk.
pub trait Operator {
    /// True only for an explicit yes. Read failures count as no.
    fn confirm(&self, prompt: &str) -> bool;
}

/// `y` or `yes`, any case, surrounding whitespace ignored.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Posted rankings per round activity code.
#[async_trait]
pub trait ResultsSource: Send + Sync {
    async fn fetch_results(&self, competition_id: &str) -> Result<HashMap<String, Vec<Ranking>>>;
}

#[async_trait]
impl ResultsSource for Registry {
    async fn fetch_results(&self, competition_id: &str) -> Result<HashMap<String, Vec<Ranking>>> {
        let wcif = self.get_wcif(competition_id).await?;
        info!(competition = competition_id, "results refreshed from registry");
        Ok(rankings_by_round(&wcif))
    }
}

/// Renders and delivers what the stage screens show.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Competitor and staff list of a group that is about to start.
    async fn show_round_sheet(&self, group: &Group) -> Result<()>;

    /// Same list, asking the upcoming group to hand in their puzzles.
    async fn show_hand_in_sheet(&self, group: &Group) -> Result<()>;

    /// Replaces the scramble screen with the intermission template.
    async fn show_intermission(&self) -> Result<()>;

    /// Unlocks the group's scramble set and puts it on the scramble screen.
    async fn show_scramble_set(&self, competition_name: &str, group: &Group) -> Result<()>;
}
