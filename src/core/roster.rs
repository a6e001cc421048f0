// RaidTally - core/roster.rs
//
// The roster store: an ordered list of player records with add, positional
// delete, and wholesale-replace operations.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::PlayerRecord;
use crate::util::error::ValidationError;

/// Split a raw comma-separated character string into trimmed, non-empty
/// tokens.
///
/// Shared by the add-player form, roster imports, and manual participant
/// entry, so all of them agree on what a character list means.
pub fn split_characters(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Ordered list of registered players. Output order of attendance checks
/// follows insertion order here.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<PlayerRecord>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in insertion order.
    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Append a new record built from raw form input.
    ///
    /// The name is trimmed; `characters_raw` is split on commas with empty
    /// tokens dropped. Fails without state change unless both a non-empty
    /// name and at least one character result. On success returns the newly
    /// appended record.
    pub fn add(
        &mut self,
        name: &str,
        characters_raw: &str,
    ) -> Result<&PlayerRecord, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingPlayerName);
        }

        let characters = split_characters(characters_raw);
        if characters.is_empty() {
            return Err(ValidationError::MissingCharacters);
        }

        self.players.push(PlayerRecord {
            name: name.to_string(),
            characters,
        });

        tracing::debug!(players = self.players.len(), "Player added to roster");

        // Just pushed, so the list is non-empty; index directly.
        Ok(&self.players[self.players.len() - 1])
    }

    /// Remove and return the record at `index`.
    ///
    /// An out-of-range index is a defined no-op returning `None`, never a
    /// panic; the row may have vanished between render and click.
    pub fn remove(&mut self, index: usize) -> Option<PlayerRecord> {
        if index < self.players.len() {
            Some(self.players.remove(index))
        } else {
            tracing::debug!(index, len = self.players.len(), "Roster remove out of range");
            None
        }
    }

    /// Replace the whole roster with an imported list.
    ///
    /// Row-level leniency is the importer's concern; this commits whatever
    /// it is given, including an empty list.
    pub fn replace(&mut self, players: Vec<PlayerRecord>) {
        tracing::debug!(
            old = self.players.len(),
            new = players.len(),
            "Roster replaced"
        );
        self.players = players;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_characters_trims_and_drops_empty_tokens() {
        assert_eq!(
            split_characters(" Arthas, Illidan ,, Jaina ,"),
            vec!["Arthas", "Illidan", "Jaina"]
        );
        assert!(split_characters("").is_empty());
        assert!(split_characters(" , ,").is_empty());
    }

    #[test]
    fn test_add_appends_record() {
        let mut roster = Roster::new();
        let record = roster.add("Bob", "Arthas, Illidan").unwrap();
        assert_eq!(record.name, "Bob");
        assert_eq!(record.characters, vec!["Arthas", "Illidan"]);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut roster = Roster::new();
        let result = roster.add("   ", "Arthas");
        assert!(matches!(result, Err(ValidationError::MissingPlayerName)));
        assert!(roster.is_empty(), "no state change on failure");
    }

    #[test]
    fn test_add_rejects_empty_character_list() {
        let mut roster = Roster::new();
        let result = roster.add("Bob", " , ,");
        assert!(matches!(result, Err(ValidationError::MissingCharacters)));
        assert!(roster.is_empty(), "no state change on failure");
    }

    #[test]
    fn test_remove_returns_record_at_index() {
        let mut roster = Roster::new();
        roster.add("A", "Arthas").unwrap();
        roster.add("B", "Jaina").unwrap();

        let removed = roster.remove(0).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.players()[0].name, "B");
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut roster = Roster::new();
        roster.add("A", "Arthas").unwrap();

        assert!(roster.remove(5).is_none());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut roster = Roster::new();
        roster.add("Old", "Uther").unwrap();

        roster.replace(vec![PlayerRecord {
            name: "New".to_string(),
            characters: vec!["Arthas".to_string()],
        }]);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.players()[0].name, "New");

        roster.replace(Vec::new());
        assert!(roster.is_empty());
    }
}
