// RaidTally - ui/panels/history.rs
//
// Session history: every completed attendance check, newest first.
//
// Each entry is a collapsible section headed by its timestamp and source,
// holding the full result table plus export/delete controls. Deletion and
// export are deferred to after the loop so the iteration never observes a
// mutating history list.

use crate::app::{actions, state::AppState};
use crate::ui::panels::results;
use crate::util::constants::RESULTS_EXPORT_FILE_NAME;
use std::path::PathBuf;

/// Render the history list.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("History");
    ui.separator();

    if state.history.is_empty() {
        ui.label(
            egui::RichText::new("No checks recorded this session.")
                .small()
                .weak(),
        );
        return;
    }

    let mut pending_delete: Option<usize> = None;
    let mut pending_export: Option<(usize, PathBuf)> = None;

    let newest = state.history.len() - 1;
    for (idx, entry) in state.history.newest_first() {
        let header = format!("{} \u{2014} {}", entry.timestamp, entry.source);
        egui::CollapsingHeader::new(egui::RichText::new(header).strong())
            .id_salt(format!("history_entry_{idx}"))
            .default_open(idx == newest)
            .show(ui, |ui| {
                results::render(ui, &entry.results, &format!("history_results_{idx}"));

                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui
                        .small_button("Export CSV\u{2026}")
                        .on_hover_text("Write this result set to a CSV file")
                        .clicked()
                    {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .set_file_name(RESULTS_EXPORT_FILE_NAME)
                            .save_file()
                        {
                            pending_export = Some((idx, path));
                        }
                    }
                    if ui
                        .small_button("Delete")
                        .on_hover_text("Remove this entry from the session history")
                        .clicked()
                    {
                        pending_delete = Some(idx);
                    }
                });
            });
    }

    if let Some((idx, path)) = pending_export {
        actions::export_history_entry(state, idx, &path);
    }
    if let Some(idx) = pending_delete {
        actions::delete_history_entry(state, idx);
    }
}
