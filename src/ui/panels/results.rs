// RaidTally - ui/panels/results.rs
//
// Shared attendance-results table.
//
// Rendered both for the latest check (analysis panel) and for each stored
// history entry, so callers supply a unique grid id.

use crate::core::model::AttendanceResult;
use crate::ui::theme;
use crate::util::constants::CHARACTER_JOIN_SEPARATOR;

/// Render one result set as a striped five-column table.
pub fn render(ui: &mut egui::Ui, results: &[AttendanceResult], grid_id: &str) {
    if results.is_empty() {
        ui.label(egui::RichText::new("No results.").weak());
        return;
    }

    egui::Grid::new(grid_id.to_string())
        .num_columns(5)
        .striped(true)
        .spacing([12.0, 3.0])
        .show(ui, |ui| {
            ui.strong("Player");
            ui.strong("Characters");
            ui.strong("Attended");
            ui.strong("Attending characters");
            ui.strong("Count");
            ui.end_row();

            for result in results {
                let colour = theme::attended_colour(result.attended);
                let verdict = if result.attended { "Yes" } else { "No" };
                // Absence shows a dash rather than an empty cell.
                let attended_chars = if result.attended_characters.is_empty() {
                    "-".to_string()
                } else {
                    result.attended_characters.join(CHARACTER_JOIN_SEPARATOR)
                };

                ui.label(&result.player);
                ui.label(result.characters.join(CHARACTER_JOIN_SEPARATOR));
                ui.colored_label(colour, verdict);
                ui.label(attended_chars);
                ui.colored_label(colour, result.count.to_string());
                ui.end_row();
            }
        });
}
