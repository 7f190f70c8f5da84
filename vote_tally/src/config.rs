// ********* Input data structures ***********

use std::collections::BTreeMap;

/// One respondent's submission.
///
/// Readers are expected to fill in empty values for the fields that were
/// missing in the source, a record is never rejected for that reason.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct VoteRecord {
    /// For each category, the identifiers chosen by the respondent.
    /// The order inside a category does not matter.
    pub categories: BTreeMap<String, Vec<String>>,
    /// The preferred peers, best first.
    pub ranked_peers: Vec<String>,
}

impl VoteRecord {
    /// The identifiers chosen for a category, empty if the respondent did not answer it.
    pub fn choices(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

// ******** Output data structures *********

/// Number of votes received in a single category, keyed by display name.
/// Names that did not receive any vote are absent.
pub type CountTable = std::collections::HashMap<String, u64>;

/// Standing of one person in the peer ranking.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankingEntry {
    pub name: String,
    /// How many times this person appeared in the scored positions.
    pub total_selections: u64,
    pub score: u64,
}

// ********* Scoring **********

/// Points granted for the first, second and third position of a ranked list.
/// Positions beyond the length of this table are not counted at all.
pub const POSITION_WEIGHTS: [u64; 3] = [3, 2, 1];
