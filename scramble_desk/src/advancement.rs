use tracing::{info, warn};

use crate::{Competition, DeskError, Person, Policy, Ranking, Result};

/// Number of people advancing out of `result_count`, truncated.
pub fn advancing_count(result_count: usize, advance_fraction: f64) -> usize {
    (result_count as f64 * advance_fraction).floor() as usize
}

/// The advancing results, worst advancing ranking first.
pub fn select_advancing(results: &[Ranking], advance_fraction: f64) -> Vec<Ranking> {
    let mut sorted = results.to_vec();
    sorted.sort_by_key(|r| r.ranking);
    sorted.truncate(advancing_count(results.len(), advance_fraction));
    sorted.sort_by(|a, b| b.ranking.cmp(&a.ranking));
    sorted
}

/// Sizes of `group_count` contiguous groups holding `n` people. The first `n % group_count` get one extra.
pub fn group_sizes(n: usize, group_count: usize) -> Vec<usize> {
    if group_count == 0 {
        return vec![];
    }
    let base = n / group_count;
    let leftovers = n % group_count;
    (0..group_count)
        .map(|i| if i < leftovers { base + 1 } else { base })
        .collect()
}

/// Splits `items` in order into [`group_sizes`] slices.
pub fn distribute<T: Clone>(items: &[T], group_count: usize) -> Vec<Vec<T>> {
    let mut start = 0;
    group_sizes(items.len(), group_count).into_iter()
        .map(|size| {
            let slice = items[start..start + size].to_vec();
            start += size;
            slice
        })
        .collect()
}

impl Competition {
    /// Fills a later round's groups from the preceding round's results.
    /// Returns false when there is nothing to advance from yet.
    pub fn assign_advanced_round_competitors(&mut self, round_idx: usize, policy: &Policy) -> Result<bool> {
        let round = &self.rounds[round_idx];
        if round.round_number < 2 {
            return Ok(false);
        }
        let previous = match self.previous_round_index(round_idx) {
            Some(previous) => &self.rounds[previous],
            None => {
                warn!(round = %round.activity_code, "no preceding round to advance from");
                return Ok(false);
            }
        };
        if previous.results.is_empty() {
            warn!(round = %round.activity_code, previous = %previous.activity_code, "preceding round has no results yet");
            return Ok(false);
        }
        round.check_group_count()?;

        let advancing = select_advancing(&previous.results, policy.advance_fraction)
            .into_iter()
            .map(|result| {
                self.person(result.person_id)
                    .map(Person::simplified)
                    .ok_or_else(|| DeskError::DataInconsistency(format!(
                        "person {} in results of {} is not registered", result.person_id, previous.activity_code
                    )))
            })
            .collect::<Result<Vec<_>>>()?;

        info!(round = %round.activity_code, advancing = advancing.len(), groups = round.group_count, "assigning advanced competitors");
        let slices = distribute(&advancing, round.group_count);
        for (group, mut competitors) in self.rounds[round_idx].groups.iter_mut().zip(slices) {
            competitors.sort_by(|a, b| a.name.cmp(&b.name));
            group.competitors = competitors;
        }
        Ok(true)
    }
}
