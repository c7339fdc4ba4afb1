//! Per-tournament podiums.
//!
//! Individual podium: the first three players in rank order.
//!
//! Team podium: players are grouped by affiliation; an affiliation with at
//! least three players (and not excluded) is scored by the sum of its three
//! best ranks. Lower is better. Ties are broken by
//!   1. higher total points of all the affiliation's players,
//!   2. lower best individual rank,
//!   3. affiliation name, ascending.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::model::{IndividualPlacement, StandingRow, TeamCandidate, TeamPlacement, TournamentResult};

/// Players an affiliation needs to be scored as a team.
pub const TEAM_SIZE: usize = 3;

/// Number of podium places reported per category.
pub const PODIUM_SIZE: usize = 3;

/// Rows in ascending rank order. The sort is stable, so source order is
/// kept among tied players.
fn rank_sorted(rows: &[StandingRow]) -> Vec<&StandingRow> {
    let mut sorted: Vec<&StandingRow> = rows.iter().collect();
    sorted.sort_by_key(|row| row.rank);
    sorted
}

/// First three players by rank; shorter when fewer rows exist.
pub fn individual_top3(rows: &[StandingRow]) -> Vec<IndividualPlacement> {
    rank_sorted(rows)
        .into_iter()
        .take(PODIUM_SIZE)
        .map(|row| IndividualPlacement {
            affiliation: row.affiliation.clone(),
            rank: row.rank,
        })
        .collect()
}

/// Scores every affiliation eligible for the team ranking, in name order.
pub fn team_candidates(rows: &[StandingRow], excluded: &HashSet<String>) -> Vec<TeamCandidate> {
    let mut groups: BTreeMap<&str, Vec<&StandingRow>> = BTreeMap::new();
    for row in rank_sorted(rows) {
        groups.entry(row.affiliation.as_str()).or_default().push(row);
    }

    groups
        .into_iter()
        .filter(|(affiliation, players)| {
            players.len() >= TEAM_SIZE && !excluded.contains(*affiliation)
        })
        .map(|(affiliation, players)| TeamCandidate {
            affiliation: affiliation.to_string(),
            best_three_rank_sum: players.iter().take(TEAM_SIZE).map(|p| p.rank).sum(),
            total_points: players.iter().map(|p| p.points).sum(),
            min_rank: players.iter().map(|p| p.rank).min().unwrap_or(u32::MAX),
        })
        .collect()
}

/// Total order used for the team ranking; `Less` ranks higher.
pub fn compare_teams(a: &TeamCandidate, b: &TeamCandidate) -> Ordering {
    a.best_three_rank_sum
        .cmp(&b.best_three_rank_sum)
        .then_with(|| b.total_points.total_cmp(&a.total_points))
        .then_with(|| a.min_rank.cmp(&b.min_rank))
        .then_with(|| a.affiliation.cmp(&b.affiliation))
}

/// Best three teams; shorter when fewer affiliations qualify.
pub fn team_top3(rows: &[StandingRow], excluded: &HashSet<String>) -> Vec<TeamPlacement> {
    let mut candidates = team_candidates(rows, excluded);
    candidates.sort_by(compare_teams);
    candidates
        .into_iter()
        .take(PODIUM_SIZE)
        .map(|c| TeamPlacement {
            affiliation: c.affiliation,
            score: c.best_three_rank_sum,
        })
        .collect()
}

/// Individual and team podiums of one tournament.
pub fn rank_tournament(
    title: &str,
    rows: &[StandingRow],
    excluded: &HashSet<String>,
) -> TournamentResult {
    TournamentResult {
        title: title.to_string(),
        individual_top3: individual_top3(rows),
        team_top3: team_top3(rows, excluded),
    }
}
