// RaidTally - core/attendance.rs
//
// The attendance matcher: roster × participant list → per-player results.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{AttendanceResult, PlayerRecord};
use std::collections::HashSet;

/// Compute per-player attendance for one participant list.
///
/// A character attends iff it equals some participant under case-insensitive,
/// whitespace-exact comparison: no trimming beyond what callers already did,
/// no substring or fuzzy matching. A player attends iff at least one of their
/// characters does.
///
/// The output has the same length and order as `roster`;
/// `attended_characters` preserves each player's original character order,
/// filtered to matches. Pure function of its two inputs.
pub fn compute_attendance(
    roster: &[PlayerRecord],
    participants: &[String],
) -> Vec<AttendanceResult> {
    // One lowercase pass over the participants, then O(1) membership checks
    // per character. Duplicate characters across players match independently.
    let participant_set: HashSet<String> =
        participants.iter().map(|p| p.to_lowercase()).collect();

    roster
        .iter()
        .map(|player| {
            let attended_characters: Vec<String> = player
                .characters
                .iter()
                .filter(|c| participant_set.contains(&c.to_lowercase()))
                .cloned()
                .collect();
            let count = attended_characters.len();

            AttendanceResult {
                player: player.name.clone(),
                characters: player.characters.clone(),
                attended: count > 0,
                attended_characters,
                count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_player(name: &str, characters: &[&str]) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            characters: characters.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn participants(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let roster = vec![make_player("A", &["Arthas"])];
        let results = compute_attendance(&roster, &participants(&["ARTHAS"]));
        assert!(results[0].attended);
        assert_eq!(results[0].count, 1);
        assert_eq!(results[0].attended_characters, vec!["Arthas"]);
    }

    #[test]
    fn test_matching_is_not_substring_based() {
        let roster = vec![make_player("A", &["Jaina"])];
        let results = compute_attendance(&roster, &participants(&["Jain"]));
        assert!(!results[0].attended);
        assert_eq!(results[0].count, 0);
    }

    #[test]
    fn test_whitespace_is_significant() {
        // Callers are responsible for trimming; the matcher compares exactly.
        let roster = vec![make_player("A", &["Arthas"])];
        let results = compute_attendance(&roster, &participants(&["Arthas "]));
        assert!(!results[0].attended);
    }

    #[test]
    fn test_output_preserves_roster_order_and_length() {
        let roster = vec![
            make_player("C", &["Uther"]),
            make_player("A", &["Arthas"]),
            make_player("B", &["Jaina"]),
        ];
        let results = compute_attendance(&roster, &participants(&["jaina", "uther"]));
        assert_eq!(results.len(), 3);
        let names: Vec<_> = results.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_attended_characters_preserve_character_order() {
        let roster = vec![make_player("Bob", &["Arthas", "Illidan", "Jaina"])];
        // Participants listed in a different order than the player's characters.
        let results = compute_attendance(&roster, &participants(&["jaina", "arthas"]));
        assert_eq!(results[0].attended_characters, vec!["Arthas", "Jaina"]);
        assert_eq!(results[0].count, 2);
    }

    #[test]
    fn test_empty_participants_marks_everyone_absent() {
        let roster = vec![
            make_player("A", &["Arthas"]),
            make_player("B", &["Jaina"]),
            make_player("C", &["Uther"]),
        ];
        let results = compute_attendance(&roster, &[]);
        assert_eq!(results.len(), 3);
        for r in &results {
            assert!(!r.attended);
            assert_eq!(r.count, 0);
            assert!(r.attended_characters.is_empty());
        }
    }

    #[test]
    fn test_empty_roster_yields_empty_output() {
        let results = compute_attendance(&[], &participants(&["Arthas"]));
        assert!(results.is_empty());
    }

    #[test]
    fn test_duplicate_characters_across_players_match_independently() {
        let roster = vec![
            make_player("Main", &["Arthas"]),
            make_player("Alt", &["Arthas"]),
        ];
        let results = compute_attendance(&roster, &participants(&["arthas"]));
        assert!(results[0].attended);
        assert!(results[1].attended);
    }

    #[test]
    fn test_attended_flag_matches_count() {
        let roster = vec![
            make_player("A", &["Arthas", "Illidan"]),
            make_player("B", &["Jaina"]),
        ];
        let results = compute_attendance(&roster, &participants(&["arthas", "illidan"]));
        for r in &results {
            assert_eq!(r.attended, r.count > 0);
        }
        assert_eq!(results[0].count, 2);
        assert_eq!(results[1].count, 0);
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let roster = vec![make_player("Bob", &["Arthas", "Illidan"])];
        let p = participants(&["arthas"]);
        let first = compute_attendance(&roster, &p);
        let second = compute_attendance(&roster, &p);
        assert_eq!(first, second);
    }
}
