// RaidTally - ui/panels/roster.rs
//
// Roster tab for the left sidebar.
//
// Contains three logical sections:
//   1. Add-player form (name + comma-separated characters).
//   2. The player list with a per-row remove button.
//   3. Import/export: CSV file dialogs and the Google Sheets importer.
//
// All mutations go through app::actions so the status bar and history
// stay consistent with menu-driven paths.

use crate::app::{actions, state::AppState};
use crate::util::constants::{CHARACTER_JOIN_SEPARATOR, ROSTER_EXPORT_FILE_NAME};

/// Render the roster sidebar.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Roster");
    ui.separator();

    // -------------------------------------------------------------------------
    // Section 1: Add-player form. The button stays enabled even with blank
    // fields so validation feedback lands in the status bar; rejected input
    // is preserved for correction.
    // -------------------------------------------------------------------------
    ui.label(egui::RichText::new("Add player").strong());
    ui.add(
        egui::TextEdit::singleline(&mut state.player_name_input)
            .hint_text("Player name")
            .desired_width(f32::INFINITY),
    );
    let chars_resp = ui.add(
        egui::TextEdit::singleline(&mut state.player_characters_input)
            .hint_text("Characters, comma-separated")
            .desired_width(f32::INFINITY),
    );
    let pressed_enter = chars_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if ui.button("Add player").clicked() || pressed_enter {
        actions::add_player(state);
    }

    ui.add_space(6.0);
    ui.separator();

    // -------------------------------------------------------------------------
    // Section 2: Player list. Deletion is deferred to after the loop so the
    // row iteration never observes a shrinking roster.
    // -------------------------------------------------------------------------
    ui.label(
        egui::RichText::new(format!("{} player(s)", state.roster.len()))
            .strong(),
    );

    let mut pending_delete: Option<usize> = None;
    if state.roster.is_empty() {
        ui.label(
            egui::RichText::new("No players yet. Add one above or import a roster.")
                .small()
                .weak(),
        );
    } else {
        egui::ScrollArea::vertical()
            .id_salt("roster_player_list")
            .auto_shrink([false, true])
            .max_height(ui.available_height() * 0.45)
            .show(ui, |ui| {
                for (idx, player) in state.roster.players().iter().enumerate() {
                    ui.horizontal(|ui| {
                        if ui
                            .add(
                                egui::Button::new(
                                    egui::RichText::new("\u{2715}")
                                        .small()
                                        .color(egui::Color32::from_rgb(156, 163, 175)),
                                )
                                .small()
                                .frame(false),
                            )
                            .on_hover_text("Remove this player")
                            .clicked()
                        {
                            pending_delete = Some(idx);
                        }
                        ui.label(&player.name);
                        ui.label(
                            egui::RichText::new(
                                player.characters.join(CHARACTER_JOIN_SEPARATOR),
                            )
                            .small()
                            .weak(),
                        );
                    });
                }
            });
    }
    if let Some(idx) = pending_delete {
        actions::delete_player(state, idx);
    }

    ui.add_space(6.0);
    ui.separator();

    // -------------------------------------------------------------------------
    // Section 3: Import / export.
    // -------------------------------------------------------------------------
    ui.label(egui::RichText::new("Roster file").strong());
    ui.horizontal(|ui| {
        if ui
            .button("Import CSV\u{2026}")
            .on_hover_text("Replace the roster with rows from a CSV file")
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new().add_filter("CSV", &["csv"]).pick_file() {
                actions::import_roster_from_path(state, &path);
            }
        }
        if ui
            .add_enabled(!state.roster.is_empty(), egui::Button::new("Export CSV\u{2026}"))
            .on_hover_text("Write the current roster to a CSV file")
            .on_disabled_hover_text("Add players first")
            .clicked()
        {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("CSV", &["csv"])
                .set_file_name(ROSTER_EXPORT_FILE_NAME)
                .save_file()
            {
                actions::export_roster_to_path(state, &path);
            }
        }
    });

    ui.add_space(6.0);

    // Google Sheets importer. Controls stay visible but disabled when no
    // service account is configured, with the reason on hover.
    ui.label(egui::RichText::new("Google Sheets").strong());
    let sheets_available = state.sheets_available();
    if !sheets_available {
        ui.label(
            egui::RichText::new("No service account configured. See Help \u{2192} Setup Guide.")
                .small()
                .weak(),
        );
    }
    ui.horizontal(|ui| {
        if ui
            .add_enabled(sheets_available, egui::Button::new("Connect"))
            .on_hover_text("Exchange the service-account key for an access token")
            .on_disabled_hover_text("Add a [google_service_account] section to secrets.toml")
            .clicked()
        {
            actions::connect_sheets(state);
        }
        if state.sheets_connected() {
            ui.colored_label(egui::Color32::from_rgb(46, 125, 50), "\u{2713} Connected");
        }
    });
    ui.add(
        egui::TextEdit::singleline(&mut state.sheet_url_input)
            .hint_text("Spreadsheet link")
            .desired_width(f32::INFINITY),
    );
    ui.add(
        egui::TextEdit::singleline(&mut state.worksheet_input)
            .hint_text("Worksheet name")
            .desired_width(f32::INFINITY),
    );
    let can_import = state.sheets_connected()
        && !state.sheet_url_input.trim().is_empty()
        && !state.worksheet_input.trim().is_empty();
    if ui
        .add_enabled(can_import, egui::Button::new("Import from sheet"))
        .on_hover_text("Replace the roster with Player/Characters rows from the worksheet")
        .on_disabled_hover_text("Connect first, then fill in the link and worksheet name")
        .clicked()
    {
        actions::import_from_sheets(state);
    }
}
