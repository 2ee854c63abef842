//! Per-player cost totals derived from recorded sessions.

use indexmap::IndexMap;

use crate::dto::game::GameSession;

/// Amount owed by each participant of `session`, or `None` when nobody took part.
pub fn share(session: &GameSession) -> Option<f64> {
    if session.participants.is_empty() {
        return None;
    }
    Some(session.amount / session.participants.len() as f64)
}

/// Sum every player's shares across `sessions`.
///
/// Sessions are folded in slice order and participants in list order, so results are
/// reproducible bit for bit. Keys appear in order of first participation; a player who never
/// took part in a non-empty session has no entry and should be read as zero.
pub fn compute_totals(sessions: &[GameSession]) -> IndexMap<String, f64> {
    let mut totals = IndexMap::new();
    for session in sessions {
        let Some(share) = share(session) else {
            continue;
        };
        for participant in &session.participants {
            *totals.entry(participant.clone()).or_insert(0.0) += share;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, participants: &[&str], amount: f64) -> GameSession {
        GameSession {
            id: id.into(),
            date: "2024-01-01".into(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
            amount,
        }
    }

    #[test]
    fn splits_evenly_between_two_players() {
        let totals = compute_totals(&[session("g1", &["1", "2"], 100.0)]);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["1"], 50.0);
        assert_eq!(totals["2"], 50.0);
    }

    #[test]
    fn three_way_split_sums_back_to_amount() {
        let totals = compute_totals(&[session("g1", &["1", "2", "3"], 100.0)]);
        for id in ["1", "2", "3"] {
            assert!((totals[id] - 100.0 / 3.0).abs() < 1e-12);
        }
        let sum: f64 = totals.values().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn shares_sum_to_amount_for_assorted_sessions() {
        for (count, amount) in [(1, 7.5), (4, 1_000_000.0), (7, -42.0), (9, 0.01)] {
            let ids: Vec<String> = (0..count).map(|i| i.to_string()).collect();
            let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            let s = session("g", &refs, amount);
            let per_head = share(&s).unwrap();
            let total = per_head * count as f64;
            assert!((total - amount).abs() < 1e-9 * amount.abs().max(1.0));
        }
    }

    #[test]
    fn empty_participant_list_is_skipped() {
        let sessions = [
            session("g1", &["1"], 30.0),
            session("g2", &[], 999.0),
            session("g3", &["1", "2"], 10.0),
        ];
        let totals = compute_totals(&sessions);

        assert_eq!(share(&sessions[1]), None);
        assert_eq!(totals["1"], 35.0);
        assert_eq!(totals["2"], 5.0);
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn keys_follow_first_participation_order() {
        let totals = compute_totals(&[
            session("g1", &["3", "1"], 20.0),
            session("g2", &["2", "3"], 20.0),
        ]);
        let keys: Vec<&str> = totals.keys().map(String::as_str).collect();
        assert_eq!(keys, ["3", "1", "2"]);
    }

    #[test]
    fn repeated_participant_is_charged_per_listing() {
        let totals = compute_totals(&[session("g1", &["1", "1", "2"], 90.0)]);
        assert_eq!(totals["1"], 60.0);
        assert_eq!(totals["2"], 30.0);
    }

    #[test]
    fn no_sessions_means_no_totals() {
        assert!(compute_totals(&[]).is_empty());
    }
}
