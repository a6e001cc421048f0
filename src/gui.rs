// RaidTally - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the menu bar, status bar, roster sidebar, and the
// attendance/history central area.

use crate::app::actions;
use crate::app::state::AppState;
use crate::ui;
use crate::util::constants::{RESULTS_EXPORT_FILE_NAME, ROSTER_EXPORT_FILE_NAME};

/// The RaidTally application.
pub struct RaidTallyApp {
    pub state: AppState,
}

impl RaidTallyApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RaidTallyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Import Roster\u{2026}").clicked() {
                        if let Some(path) =
                            rfd::FileDialog::new().add_filter("CSV", &["csv"]).pick_file()
                        {
                            actions::import_roster_from_path(&mut self.state, &path);
                        }
                        ui.close_menu();
                    }
                    let has_players = !self.state.roster.is_empty();
                    ui.add_enabled_ui(has_players, |ui| {
                        if ui.button("Export Roster\u{2026}").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("CSV", &["csv"])
                                .set_file_name(ROSTER_EXPORT_FILE_NAME)
                                .save_file()
                            {
                                actions::export_roster_to_path(&mut self.state, &path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    // Enabled only once a check has produced results.
                    let has_results = !self.state.last_results.is_empty();
                    ui.add_enabled_ui(has_results, |ui| {
                        if ui.button("Export Last Results\u{2026}").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("CSV", &["csv"])
                                .set_file_name(RESULTS_EXPORT_FILE_NAME)
                                .save_file()
                            {
                                actions::export_last_results(&mut self.state, &path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("Setup Guide").clicked() {
                        self.state.show_guide = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    ui::theme::tone_colour(self.state.status_tone),
                    &self.state.status_message,
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let players = self.state.roster.len();
                    let checks = self.state.history.len();
                    ui.label(format!("{players} player(s) \u{b7} {checks} check(s)"));
                });
            });
        });

        // Left sidebar: the roster.
        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("sidebar_roster")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::roster::render(ui, &mut self.state);
                    });
            });

        // Central panel: attendance check above, history below.
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("central_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui::panels::analysis::render(ui, &mut self.state);
                    ui.add_space(12.0);
                    ui::panels::history::render(ui, &mut self.state);
                });
        });

        // Setup guide window (modal-ish)
        ui::panels::guide::render(ctx, &mut self.state);
    }
}
