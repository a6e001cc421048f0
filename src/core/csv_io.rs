// RaidTally - core/csv_io.rs
//
// Roster CSV import/export and attendance-result CSV export.
// Core layer: reads/writes any Read/Write trait object; the caller owns
// file handles and path choices.
//
// On disk a character list is one comma-joined field, in memory a
// Vec<String>; the round trip is lossless as long as no name or character
// contains a comma.

use crate::core::model::{AttendanceResult, PlayerRecord, RosterImport};
use crate::core::roster::split_characters;
use crate::util::constants;
use crate::util::error::{ExportError, ImportError};
use std::io::{Read, Write};
use std::path::Path;

/// Export the roster to CSV with `name,characters` columns.
///
/// Returns the number of player rows written.
pub fn export_roster_csv<W: Write>(
    players: &[PlayerRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([constants::CSV_NAME_HEADER, constants::CSV_CHARACTERS_HEADER])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for player in players {
        csv_writer
            .write_record([
                player.name.as_str(),
                &player.characters.join(constants::CHARACTER_JOIN_SEPARATOR),
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Import a roster from CSV.
///
/// The `name` and `characters` headers are located case-insensitively.
/// Each row yields a PlayerRecord only if it has a non-empty name and at
/// least one character after comma-splitting; every other row is skipped
/// and counted, never fatal. Whatever rows succeed are returned.
pub fn import_roster_csv<R: Read>(
    reader: R,
    source_path: &Path,
) -> Result<RosterImport, ImportError> {
    // flexible: rows with missing trailing fields become short records
    // (and are then skipped) instead of failing the whole batch.
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| ImportError::Csv {
        path: source_path.to_path_buf(),
        source: e,
    })?;

    let name_idx = find_column(headers, constants::CSV_NAME_HEADER);
    let characters_idx = find_column(headers, constants::CSV_CHARACTERS_HEADER);
    let (name_idx, characters_idx) = match (name_idx, characters_idx) {
        (Some(n), Some(c)) => (n, c),
        _ => {
            return Err(ImportError::MissingColumns {
                source_name: source_path.display().to_string(),
                expected: "'name' and 'characters'",
            })
        }
    };

    let mut import = RosterImport::default();
    for record in csv_reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable CSV row");
                import.skipped += 1;
                continue;
            }
        };

        let name = record.get(name_idx).unwrap_or("").trim();
        let characters = split_characters(record.get(characters_idx).unwrap_or(""));
        if name.is_empty() || characters.is_empty() {
            import.skipped += 1;
            continue;
        }

        import.players.push(PlayerRecord {
            name: name.to_string(),
            characters,
        });
    }

    tracing::info!(
        players = import.players.len(),
        skipped = import.skipped,
        path = %source_path.display(),
        "Roster CSV imported"
    );

    Ok(import)
}

/// Export one result set (the current check or a history entry) to CSV.
///
/// Columns: player, characters, attended, attended_characters, count.
/// Returns the number of result rows written.
pub fn export_results_csv<W: Write>(
    results: &[AttendanceResult],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "player",
            "characters",
            "attended",
            "attended_characters",
            "count",
        ])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for result in results {
        csv_writer
            .write_record([
                result.player.as_str(),
                &result.characters.join(constants::CHARACTER_JOIN_SEPARATOR),
                if result.attended { "true" } else { "false" },
                &result
                    .attended_characters
                    .join(constants::CHARACTER_JOIN_SEPARATOR),
                &result.count.to_string(),
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Case-insensitive header lookup.
fn find_column(headers: &csv::StringRecord, wanted: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_player(name: &str, characters: &[&str]) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            characters: characters.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn out_path() -> PathBuf {
        PathBuf::from("out.csv")
    }

    #[test]
    fn test_roster_export_writes_header_and_joined_characters() {
        let players = vec![
            make_player("Bob", &["Arthas", "Illidan"]),
            make_player("Alice", &["Jaina"]),
        ];
        let mut buf = Vec::new();
        let count = export_roster_csv(&players, &mut buf, &out_path()).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("name,characters\n"));
        assert!(output.contains("Bob,\"Arthas, Illidan\""));
        assert!(output.contains("Alice,Jaina"));
    }

    #[test]
    fn test_import_locates_headers_case_insensitively() {
        let csv = "Name,CHARACTERS\nBob,\"Arthas, Illidan\"\n";
        let import = import_roster_csv(csv.as_bytes(), &out_path()).unwrap();
        assert_eq!(import.skipped, 0);
        assert_eq!(import.players, vec![make_player("Bob", &["Arthas", "Illidan"])]);
    }

    #[test]
    fn test_import_skips_rows_missing_either_field() {
        let csv = "name,characters\n\
                   Bob,\"Arthas, Illidan\"\n\
                   ,Jaina\n\
                   Carol,\n\
                   Dave,Uther\n";
        let import = import_roster_csv(csv.as_bytes(), &out_path()).unwrap();
        assert_eq!(import.skipped, 2);
        let names: Vec<_> = import.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Dave"]);
    }

    #[test]
    fn test_import_tolerates_short_rows() {
        // The second row has no characters field at all (flexible mode).
        let csv = "name,characters\nBob,Arthas\nCarol\n";
        let import = import_roster_csv(csv.as_bytes(), &out_path()).unwrap();
        assert_eq!(import.players.len(), 1);
        assert_eq!(import.skipped, 1);
    }

    #[test]
    fn test_import_without_required_columns_fails() {
        let csv = "player,mains\nBob,Arthas\n";
        let result = import_roster_csv(csv.as_bytes(), &out_path());
        assert!(matches!(
            result,
            Err(ImportError::MissingColumns { .. })
        ));
    }

    #[test]
    fn test_roster_round_trip_is_lossless() {
        let players = vec![
            make_player("Bob", &["Arthas", "Illidan"]),
            make_player("Alice", &["Jaina"]),
            make_player("Carol", &["Uther", "Sylvanas", "Thrall"]),
        ];

        let mut buf = Vec::new();
        export_roster_csv(&players, &mut buf, &out_path()).unwrap();
        let import = import_roster_csv(buf.as_slice(), &out_path()).unwrap();

        assert_eq!(import.skipped, 0);
        assert_eq!(import.players, players);
    }

    #[test]
    fn test_results_export_columns() {
        let results = vec![AttendanceResult {
            player: "Bob".to_string(),
            characters: vec!["Arthas".to_string(), "Illidan".to_string()],
            attended: true,
            attended_characters: vec!["Arthas".to_string()],
            count: 1,
        }];
        let mut buf = Vec::new();
        let count = export_results_csv(&results, &mut buf, &out_path()).unwrap();
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("player,characters,attended,attended_characters,count\n"));
        assert!(output.contains("Bob,\"Arthas, Illidan\",true,Arthas,1"));
    }
}
