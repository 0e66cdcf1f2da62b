// Pure filtering of a season's draft records by team and round selection.

use crate::stats::DraftRecord;
use crate::teams;

/// Team selection meaning "no team filter applied".
pub const ALL_TEAMS: &str = "All Teams";

/// Round selection meaning "no round filter applied".
pub const ALL_ROUNDS: &str = "All Rounds";

/// Selectable round values, in selector order.
pub const ROUND_OPTIONS: &[&str] = &[
    ALL_ROUNDS, "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10",
];

/// Narrow `records` by the given team and round selections.
///
/// Pure and order-preserving: a record is included iff both predicates pass,
/// and the input order is kept. A team selection that does not resolve in the
/// franchise directory yields an empty result, a deliberate "no matches"
/// outcome rather than an error. Round comparison is string-normalized exact
/// equality, so a numeric round field `2` matches the selection `"2"`.
pub fn filter_records(
    records: &[DraftRecord],
    team_selection: &str,
    round_selection: &str,
) -> Vec<DraftRecord> {
    let team_token = if team_selection == ALL_TEAMS {
        None
    } else {
        match teams::resolve(team_selection) {
            Some(token) => Some(token),
            // Unknown franchise name: nothing can match.
            None => return Vec::new(),
        }
    };

    records
        .iter()
        .filter(|record| {
            let team_match = match team_token {
                None => true,
                Some(token) => record.team_name().as_deref() == Some(token),
            };

            let round_match = if round_selection == ALL_ROUNDS {
                true
            } else {
                record.round_number().as_deref() == Some(round_selection)
            };

            team_match && round_match
        })
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
