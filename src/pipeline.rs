//! End-to-end standings run: sources → normalize → rank → aggregate.
//!
//! Inputs are processed strictly in the order given. The first error aborts
//! the whole run.

use std::collections::HashSet;

use crate::analysis::aggregate::{aggregate, PlacementWeights, Standings};
use crate::analysis::normalize::normalize;
use crate::analysis::ranking::rank_tournament;
use crate::ingest::{InputIdentifier, ResultSource};
use crate::logging::{self, Stage};
use crate::model::{StandingsError, TournamentResult};

/// Loads, normalizes and ranks a single tournament.
pub fn process_tournament(
    source: &dyn ResultSource,
    input: &InputIdentifier,
    excluded: &HashSet<String>,
) -> Result<TournamentResult, StandingsError> {
    let sheet = source.load(input)?;
    let standings = normalize(&sheet)?;

    let name = input.display_name();
    logging::info(
        Stage::Sheet,
        Some(&name),
        &format!("Read tournament: {}", standings.title),
    );
    logging::debug(
        Stage::Sheet,
        Some(&name),
        &format!(
            "{} complete standing rows, grouped by '{}'",
            standings.rows.len(),
            standings.affiliation_column
        ),
    );

    let result = rank_tournament(&standings.title, &standings.rows, excluded);
    if result.team_top3.len() < 3 {
        logging::warn(
            Stage::Rank,
            Some(&name),
            &format!("Only {} team(s) qualify for the team ranking", result.team_top3.len()),
        );
    }
    Ok(result)
}

/// Runs every input through the pipeline and aggregates the results.
///
/// All identifiers are classified before anything is loaded, so a typo in
/// the last argument fails before the first download.
pub fn compute_standings(
    source: &dyn ResultSource,
    inputs: &[String],
    excluded: &[String],
    weights: PlacementWeights,
) -> Result<Standings, StandingsError> {
    let identifiers = inputs
        .iter()
        .map(|input| InputIdentifier::parse(input))
        .collect::<Result<Vec<_>, _>>()?;
    let excluded: HashSet<String> = excluded.iter().cloned().collect();

    let results = identifiers
        .iter()
        .map(|input| process_tournament(source, input, &excluded))
        .collect::<Result<Vec<_>, _>>()?;

    let standings = aggregate(results.iter(), weights);
    let totals: Vec<String> = standings
        .points
        .entries()
        .iter()
        .map(|(affiliation, points)| format!("{} {}", affiliation, points))
        .collect();
    logging::debug(Stage::Rank, None, &format!("Overall points: {}", totals.join(", ")));
    logging::log_run_summary(standings.tournaments, standings.points.len());
    Ok(standings)
}
