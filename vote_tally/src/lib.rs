/*!
Tallies for classroom ballots.

Each ballot ([VoteRecord]) carries two kinds of answers:
* for every category (a value such as "Kindness"), the peers the respondent
  chose, in no particular order
* a ranked list of preferred peers, best first

This crate computes the number of votes per person in a category
([aggregate_category]) and a weighted leaderboard from the ranked lists
([aggregate_ranking]). Identifiers are turned into display names with a
[Roster]. All the functions are pure: they never fail and can be called
concurrently on the same data.

```
use vote_tally::*;

let roster = Roster::from_pairs(&[("R1", "Alice"), ("R2", "Bob")]);
let record = VoteRecord {
    ranked_peers: vec!["R1".to_string(), "R2".to_string(), "R3".to_string()],
    ..Default::default()
};
let ranking = aggregate_ranking(&[record], &roster);
assert_eq!(ranking[0].name, "Alice");
assert_eq!(ranking[0].score, 3);
assert_eq!(ranking[2].name, "R3");
```
*/

mod config;
pub mod roster;
use log::{debug, info};

use std::collections::{BTreeSet, HashMap};

pub use crate::config::*;
pub use crate::roster::{Roster, RosterEntry};

/// The names of all the categories found in the records, in sorted order.
///
/// Every record is inspected: a category that only shows up in the last
/// record is still returned.
pub fn discover_categories(records: &[VoteRecord]) -> Vec<String> {
    let found: BTreeSet<&String> = records
        .iter()
        .flat_map(|r| r.categories.keys())
        .collect();
    debug!(
        "discover_categories: {} categories in {} records",
        found.len(),
        records.len()
    );
    found.into_iter().cloned().collect()
}

/// Counts the votes received by each person in one category.
///
/// Every occurrence counts: an identifier listed twice by the same respondent
/// gets two votes. Records without this category do not contribute.
pub fn aggregate_category(records: &[VoteRecord], category: &str, roster: &Roster) -> CountTable {
    let mut counts: CountTable = HashMap::new();
    for r in records.iter() {
        for id in r.choices(category) {
            let name = roster.resolve(id);
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
    }
    info!(
        "aggregate_category: {:?}: {} votes for {} people",
        category,
        counts.values().sum::<u64>(),
        counts.len()
    );
    counts
}

/// The content of a count table, most voted first. Equal counts are ordered by name.
pub fn sort_by_votes(counts: &CountTable) -> Vec<(String, u64)> {
    let mut sorted: Vec<(String, u64)> = counts.iter().map(|(n, c)| (n.clone(), *c)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

// Running totals for one person.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
struct Standing {
    selections: u64,
    score: u64,
}

/// Computes the weighted leaderboard of the ranked preferences.
///
/// The first three positions of each ranked list are worth the points in
/// [POSITION_WEIGHTS]; anything after the third position is ignored. The
/// full leaderboard is returned, highest score first. People with the same
/// score keep the order in which they were first encountered.
pub fn aggregate_ranking(records: &[VoteRecord], roster: &Roster) -> Vec<RankingEntry> {
    // Insertion order, to keep the ties stable.
    let mut order: Vec<String> = Vec::new();
    let mut standings: HashMap<String, Standing> = HashMap::new();

    for r in records.iter() {
        for (id, points) in r.ranked_peers.iter().zip(POSITION_WEIGHTS.iter()) {
            let name = roster.resolve(id);
            let st = standings.entry(name.to_string()).or_insert_with(|| {
                order.push(name.to_string());
                Standing::default()
            });
            st.selections += 1;
            st.score += points;
        }
        if r.ranked_peers.len() > POSITION_WEIGHTS.len() {
            debug!(
                "aggregate_ranking: ignoring {} positions beyond {}",
                r.ranked_peers.len() - POSITION_WEIGHTS.len(),
                POSITION_WEIGHTS.len()
            );
        }
    }

    let mut res: Vec<RankingEntry> = order
        .into_iter()
        .map(|name| {
            let st = standings.get(&name).cloned().unwrap_or_default();
            RankingEntry {
                name,
                total_selections: st.selections,
                score: st.score,
            }
        })
        .collect();
    res.sort_by(|a, b| b.score.cmp(&a.score));
    info!(
        "aggregate_ranking: {} records, {} people ranked",
        records.len(),
        res.len()
    );
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn test_roster() -> Roster {
        Roster::from_pairs(&[("R1", "Alice"), ("R2", "Bob")])
    }

    fn ids(l: &[&str]) -> Vec<String> {
        l.iter().map(|s| s.to_string()).collect()
    }

    fn category_record(cats: &[(&str, &[&str])]) -> VoteRecord {
        VoteRecord {
            categories: cats.iter().map(|(c, l)| (c.to_string(), ids(l))).collect(),
            ranked_peers: Vec::new(),
        }
    }

    fn ranked_record(l: &[&str]) -> VoteRecord {
        VoteRecord {
            categories: Default::default(),
            ranked_peers: ids(l),
        }
    }

    fn entry(name: &str, total_selections: u64, score: u64) -> RankingEntry {
        RankingEntry {
            name: name.to_string(),
            total_selections,
            score,
        }
    }

    #[test]
    fn category_counts_per_name() {
        init();
        let records = vec![
            category_record(&[("Kindness", &["R1", "R2"])]),
            category_record(&[("Kindness", &["R1"])]),
        ];
        let counts = aggregate_category(&records, "Kindness", &test_roster());
        let expected: CountTable = [("Alice".to_string(), 2), ("Bob".to_string(), 1)]
            .into_iter()
            .collect();
        assert_eq!(counts, expected);
    }

    #[test]
    fn category_counts_every_occurrence() {
        init();
        let records = vec![
            category_record(&[("Kindness", &["R1", "R1", "X9"]), ("Respect", &["R2"])]),
            category_record(&[("Respect", &["R1", "R2"])]),
            VoteRecord::default(),
        ];
        let roster = test_roster();
        let counts = aggregate_category(&records, "Kindness", &roster);
        assert_eq!(counts.get("Alice"), Some(&2));
        assert_eq!(counts.get("X9"), Some(&1));
        assert_eq!(counts.get("Bob"), None);
        assert_eq!(counts.values().sum::<u64>(), 3);

        let respect = aggregate_category(&records, "Respect", &roster);
        assert_eq!(respect.values().sum::<u64>(), 3);
        assert!(aggregate_category(&records, "Courage", &roster).is_empty());
    }

    #[test]
    fn category_sorting() {
        let counts: CountTable = [
            ("Carol".to_string(), 1),
            ("Bob".to_string(), 4),
            ("Alice".to_string(), 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            sort_by_votes(&counts),
            vec![
                ("Bob".to_string(), 4),
                ("Alice".to_string(), 1),
                ("Carol".to_string(), 1)
            ]
        );
    }

    #[test]
    fn categories_from_all_records() {
        let records = vec![
            category_record(&[("Kindness", &["R1"])]),
            VoteRecord::default(),
            category_record(&[("Respect", &[]), ("Courage", &["R2"])]),
        ];
        assert_eq!(
            discover_categories(&records),
            vec![
                "Courage".to_string(),
                "Kindness".to_string(),
                "Respect".to_string()
            ]
        );
    }

    #[test]
    fn ranking_top_three_only() {
        init();
        let records = vec![ranked_record(&["R1", "R2", "R3", "R4"])];
        let ranking = aggregate_ranking(&records, &test_roster());
        assert_eq!(
            ranking,
            vec![entry("Alice", 1, 3), entry("Bob", 1, 2), entry("R3", 1, 1)]
        );
    }

    #[test]
    fn ranking_missing_and_short_lists() {
        init();
        let records = vec![
            VoteRecord::default(),
            ranked_record(&["R2"]),
            ranked_record(&["R1", "R2"]),
        ];
        let ranking = aggregate_ranking(&records, &test_roster());
        assert_eq!(ranking, vec![entry("Bob", 2, 5), entry("Alice", 1, 3)]);
        assert!(aggregate_ranking(&[VoteRecord::default()], &test_roster()).is_empty());
    }

    #[test]
    fn ranking_duplicates_in_one_record() {
        let records = vec![ranked_record(&["R1", "R1", "R2"])];
        let ranking = aggregate_ranking(&records, &test_roster());
        assert_eq!(ranking, vec![entry("Alice", 2, 5), entry("Bob", 1, 1)]);
    }

    #[test]
    fn ranking_ties_keep_first_encounter() {
        let records = vec![ranked_record(&["C", "A"]), ranked_record(&["A", "C"])];
        let ranking = aggregate_ranking(&records, &Roster::default());
        assert_eq!(ranking, vec![entry("C", 2, 5), entry("A", 2, 5)]);
    }

    #[test]
    fn ranking_selections_match_positions() {
        let records = vec![
            ranked_record(&["R1", "R2", "R3", "R1"]),
            ranked_record(&["R3", "R1"]),
            ranked_record(&["R2", "R2", "R2", "R2", "R2"]),
        ];
        let ranking = aggregate_ranking(&records, &test_roster());
        let selections: HashMap<String, u64> = ranking
            .iter()
            .map(|e| (e.name.clone(), e.total_selections))
            .collect();
        assert_eq!(selections.get("Alice"), Some(&2));
        assert_eq!(selections.get("Bob"), Some(&4));
        assert_eq!(selections.get("R3"), Some(&2));
        let scores: Vec<u64> = ranking.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![8, 5, 4]);
    }

    #[test]
    fn empty_input() {
        let roster = test_roster();
        assert!(aggregate_category(&[], "Kindness", &roster).is_empty());
        assert!(aggregate_ranking(&[], &roster).is_empty());
        assert!(discover_categories(&[]).is_empty());
    }

    #[test]
    fn idempotent() {
        let records = vec![
            category_record(&[("Kindness", &["R1", "R2"])]),
            ranked_record(&["R2", "R1", "R9"]),
        ];
        let roster = test_roster();
        assert_eq!(
            aggregate_category(&records, "Kindness", &roster),
            aggregate_category(&records, "Kindness", &roster)
        );
        assert_eq!(
            aggregate_ranking(&records, &roster),
            aggregate_ranking(&records, &roster)
        );
    }
}
