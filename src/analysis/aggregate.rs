//! Cross-tournament aggregation.
//!
//! Every tournament contributes two columns to the combined table and awards
//! weighted points to the affiliations on its podiums. Once all tournaments
//! are folded in, the three affiliations with the most points form the
//! overall column.

use crate::model::{
    ColumnHeader, CombinedTable, Placement, TournamentResult, INDIVIDUAL_CATEGORY, OVERALL_GROUP,
    TEAM_CATEGORY,
};

/// Points for 1st/2nd/3rd place in each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementWeights {
    pub individual: [u32; 3],
    pub team: [u32; 3],
}

impl Default for PlacementWeights {
    fn default() -> Self {
        PlacementWeights {
            individual: [10, 6, 4],
            team: [30, 18, 12],
        }
    }
}

// ---------------------------------------------------------------------------
// Overall points
// ---------------------------------------------------------------------------

/// Accumulated points per affiliation, in first-credited order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverallPointsTable {
    entries: Vec<(String, u32)>,
}

impl OverallPointsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, affiliation: &str, points: u32) {
        match self.entries.iter_mut().find(|(name, _)| name == affiliation) {
            Some((_, total)) => *total = total.saturating_add(points),
            None => self.entries.push((affiliation.to_string(), points)),
        }
    }

    pub fn get(&self, affiliation: &str) -> u32 {
        self.entries
            .iter()
            .find(|(name, _)| name == affiliation)
            .map(|(_, total)| *total)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-credited order.
    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    /// The `n` highest totals. Equal totals keep first-credited order.
    pub fn leaders(&self, n: usize) -> Vec<(String, u32)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Fold state over the ordered sequence of tournament results.
#[derive(Debug, Clone)]
pub struct CrossEventAggregator {
    weights: PlacementWeights,
    points: OverallPointsTable,
    table: CombinedTable,
    tournaments: usize,
}

/// Output of a completed aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    pub table: CombinedTable,
    pub points: OverallPointsTable,
    pub tournaments: usize,
}

impl CrossEventAggregator {
    pub fn new(weights: PlacementWeights) -> Self {
        CrossEventAggregator {
            weights,
            points: OverallPointsTable::new(),
            table: CombinedTable::with_placement_rows(),
            tournaments: 0,
        }
    }

    /// Adds one tournament's columns and credits its podium points.
    pub fn absorb(mut self, result: &TournamentResult) -> Self {
        let individual = Placement::ALL.map(|p| result.individual_at(p).map(|i| i.affiliation.clone()));
        let team = Placement::ALL.map(|p| result.team_at(p).map(|t| t.affiliation.clone()));

        self.table.push_column(
            ColumnHeader {
                group: result.title.clone(),
                category: INDIVIDUAL_CATEGORY.to_string(),
            },
            individual.clone(),
        );
        self.table.push_column(
            ColumnHeader {
                group: result.title.clone(),
                category: TEAM_CATEGORY.to_string(),
            },
            team.clone(),
        );

        // Individual before team within each slot; this order decides
        // overall ties.
        for placement in Placement::ALL {
            let i = placement.index();
            if let Some(affiliation) = &individual[i] {
                self.points.add(affiliation, self.weights.individual[i]);
            }
            if let Some(affiliation) = &team[i] {
                self.points.add(affiliation, self.weights.team[i]);
            }
        }

        self.tournaments += 1;
        self
    }

    /// Appends the overall column and returns the finished standings.
    pub fn finish(mut self) -> Standings {
        let leaders = self.points.leaders(Placement::ALL.len());
        let overall = Placement::ALL.map(|p| leaders.get(p.index()).map(|(name, _)| name.clone()));
        self.table.push_column(
            ColumnHeader {
                group: OVERALL_GROUP.to_string(),
                category: String::new(),
            },
            overall,
        );

        Standings {
            table: self.table,
            points: self.points,
            tournaments: self.tournaments,
        }
    }
}

/// Folds tournament results, in order, into the combined standings.
pub fn aggregate<'a, I>(results: I, weights: PlacementWeights) -> Standings
where
    I: IntoIterator<Item = &'a TournamentResult>,
{
    results
        .into_iter()
        .fold(CrossEventAggregator::new(weights), CrossEventAggregator::absorb)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IndividualPlacement, TeamPlacement};

    fn result(title: &str, individual: &[&str], team: &[&str]) -> TournamentResult {
        TournamentResult {
            title: title.to_string(),
            individual_top3: individual
                .iter()
                .enumerate()
                .map(|(i, a)| IndividualPlacement {
                    affiliation: a.to_string(),
                    rank: i as u32 + 1,
                })
                .collect(),
            team_top3: team
                .iter()
                .enumerate()
                .map(|(i, a)| TeamPlacement {
                    affiliation: a.to_string(),
                    score: 6 + i as u32,
                })
                .collect(),
        }
    }

    #[test]
    fn test_points_table_preserves_first_seen_order() {
        let mut table = OverallPointsTable::new();
        table.add("B", 5);
        table.add("A", 5);
        table.add("B", 1);
        assert_eq!(table.entries(), &[("B".to_string(), 6), ("A".to_string(), 5)]);
        assert_eq!(table.get("C"), 0);
    }

    #[test]
    fn test_oversized_weights_saturate_instead_of_overflowing() {
        let weights = PlacementWeights {
            individual: [u32::MAX, 6, 4],
            team: [u32::MAX, 18, 12],
        };
        let event = result("Open", &["A", "B", "C"], &["A", "B"]);
        let standings = aggregate([&event, &event], weights);
        assert_eq!(standings.points.get("A"), u32::MAX);
        assert_eq!(standings.points.get("B"), 2 * (6 + 18));
    }

    #[test]
    fn test_leaders_break_ties_by_first_seen() {
        let mut table = OverallPointsTable::new();
        table.add("X", 10);
        table.add("Y", 30);
        table.add("Z", 10);
        table.add("W", 10);
        let names: Vec<_> = table.leaders(3).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Y", "X", "Z"]);
    }

    #[test]
    fn test_same_affiliation_across_events_accumulates() {
        let first = result("Event 1", &["X", "P", "Q"], &[]);
        let second = result("Event 2", &["R", "S", "T"], &["X"]);
        let standings = aggregate([&first, &second], PlacementWeights::default());
        assert_eq!(standings.points.get("X"), 40);
        assert_eq!(standings.tournaments, 2);
    }

    #[test]
    fn test_single_event_weights() {
        let event = result("Open", &["A", "B", "C"], &["C", "A", "D"]);
        let standings = aggregate([&event], PlacementWeights::default());
        assert_eq!(standings.points.get("A"), 10 + 18);
        assert_eq!(standings.points.get("B"), 6);
        assert_eq!(standings.points.get("C"), 4 + 30);
        assert_eq!(standings.points.get("D"), 12);
    }

    #[test]
    fn test_missing_placements_earn_nothing() {
        let event = result("Tiny", &["A"], &[]);
        let standings = aggregate([&event], PlacementWeights::default());
        assert_eq!(standings.points.entries(), &[("A".to_string(), 10)]);
        assert_eq!(standings.table.cell(Placement::Second, 0), None);
        assert_eq!(standings.table.cell(Placement::First, 1), None);
        // Overall column only has one leader
        assert_eq!(standings.table.cell(Placement::First, 2), Some("A"));
        assert_eq!(standings.table.cell(Placement::Second, 2), None);
    }

    #[test]
    fn test_totals_do_not_depend_on_event_order() {
        let events = [
            result("E1", &["A", "B", "C"], &["B", "C", "A"]),
            result("E2", &["C", "C", "D"], &["D", "A"]),
            result("E3", &["B"], &["A", "B", "C"]),
        ];
        let forward = aggregate(events.iter(), PlacementWeights::default());
        let backward = aggregate(events.iter().rev(), PlacementWeights::default());

        for name in ["A", "B", "C", "D"] {
            assert_eq!(forward.points.get(name), backward.points.get(name), "total for {}", name);
        }
        // Column order follows input order
        assert_eq!(forward.table.columns[0].group, "E1");
        assert_eq!(backward.table.columns[0].group, "E3");
    }

    #[test]
    fn test_table_layout_has_pair_per_event_and_overall_last() {
        let events = [
            result("Open", &["A", "B", "C"], &["A", "B", "C"]),
            result("Blitz", &["C", "B", "A"], &["C", "B", "A"]),
        ];
        let standings = aggregate(events.iter(), PlacementWeights::default());
        let headers: Vec<(&str, &str)> = standings
            .table
            .columns
            .iter()
            .map(|c| (c.group.as_str(), c.category.as_str()))
            .collect();
        assert_eq!(
            headers,
            vec![
                ("Open", "Individual"),
                ("Open", "Team"),
                ("Blitz", "Individual"),
                ("Blitz", "Team"),
                ("Overall", ""),
            ]
        );
        let labels: Vec<_> = standings.table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["1st", "2nd", "3rd"]);
        assert!(standings.table.rows.iter().all(|r| r.cells.len() == 5));
    }

    #[test]
    fn test_overall_column_ranks_by_total() {
        let events = [
            result("E1", &["A", "B", "C"], &["B", "C", "A"]),
            result("E2", &["B", "A", "C"], &["B", "A", "C"]),
        ];
        // A: 10+12+6+18 = 46, B: 6+30+10+30 = 76, C: 4+18+4+12 = 38
        let standings = aggregate(events.iter(), PlacementWeights::default());
        assert_eq!(standings.table.cell(Placement::First, 4), Some("B"));
        assert_eq!(standings.table.cell(Placement::Second, 4), Some("A"));
        assert_eq!(standings.table.cell(Placement::Third, 4), Some("C"));
    }

    #[test]
    fn test_no_events_gives_empty_overall() {
        let standings = aggregate(std::iter::empty(), PlacementWeights::default());
        assert!(standings.points.is_empty());
        assert_eq!(standings.table.columns.len(), 1);
        assert!(standings.table.rows.iter().all(|r| r.cells == vec![None]));
    }
}
