// RaidTally - ui/panels/analysis.rs
//
// Attendance-check panel for the central area.
//
// The participant list comes from one of two sources, chosen by radio:
//   Report: a Warcraft Logs report link, fetched via net::wcl.
//   Manual: a comma-separated character list pasted straight in.
//
// Running a check computes per-player results, shows them below, and
// appends exactly one history entry.

use crate::app::{actions, state::AppState};
use crate::core::model::ParticipantSource;
use crate::core::roster::split_characters;
use crate::net::wcl;
use crate::ui::panels::results;

/// Render the attendance-check form and the latest result set.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Attendance check");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Participants from:");
        ui.radio_value(
            &mut state.participant_source,
            ParticipantSource::Report,
            ParticipantSource::Report.label(),
        );
        ui.radio_value(
            &mut state.participant_source,
            ParticipantSource::Manual,
            ParticipantSource::Manual.label(),
        );
    });
    ui.add_space(4.0);

    match state.participant_source {
        ParticipantSource::Report => render_report_source(ui, state),
        ParticipantSource::Manual => render_manual_source(ui, state),
    }

    ui.add_space(8.0);
    if ui
        .add_enabled(
            !state.roster.is_empty(),
            egui::Button::new("Run attendance check"),
        )
        .on_hover_text("Match the participant list against every roster player")
        .on_disabled_hover_text("Add players to the roster first")
        .clicked()
    {
        actions::run_attendance_check(state);
    }

    if !state.last_results.is_empty() {
        ui.add_space(8.0);
        ui.separator();
        ui.label(egui::RichText::new("Latest results").strong());
        results::render(ui, &state.last_results, "latest_results");
    }
}

/// Report-link input, fetch button, and the fetched-report banner.
fn render_report_source(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut state.report_link_input)
                .hint_text("https://www.warcraftlogs.com/reports/\u{2026}")
                .desired_width(ui.available_width() - 130.0),
        );
        if ui
            .add_enabled(state.wcl_configured(), egui::Button::new("Fetch participants"))
            .on_hover_text("Look up the report and load its player list")
            .on_disabled_hover_text("Set wcl_api_key in secrets.toml. See Help \u{2192} Setup Guide.")
            .clicked()
        {
            actions::fetch_report_participants(state);
        }
    });

    // Live hint: show the report id the link resolves to, or flag the link
    // as unusable before the user burns a fetch on it.
    let link = state.report_link_input.trim();
    if !link.is_empty() {
        match wcl::extract_report_id(link) {
            Some(code) => {
                ui.label(
                    egui::RichText::new(format!("Report ID: {code}"))
                        .small()
                        .weak(),
                );
            }
            None => {
                ui.label(
                    egui::RichText::new("\u{2717} No report ID in link")
                        .small()
                        .color(egui::Color32::from_rgb(248, 113, 113)),
                );
            }
        }
    }

    if !state.participants.is_empty() {
        ui.add_space(4.0);
        if let Some(title) = &state.report_title {
            ui.label(egui::RichText::new(title).strong());
        }
        if let Some(context) = &state.report_context {
            ui.label(egui::RichText::new(context).small().weak());
        }
        ui.label(
            egui::RichText::new(format!("{} participant(s) loaded", state.participants.len()))
                .small()
                .color(egui::Color32::from_rgb(46, 125, 50)),
        );
    }
}

/// Manual participant entry: a free-text character list.
fn render_manual_source(ui: &mut egui::Ui, state: &mut AppState) {
    ui.add(
        egui::TextEdit::multiline(&mut state.manual_participants_input)
            .hint_text("Arthas, Jaina, Thrall, \u{2026}")
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    let count = split_characters(&state.manual_participants_input).len();
    if count > 0 {
        ui.label(
            egui::RichText::new(format!("{count} participant(s)"))
                .small()
                .weak(),
        );
    }
}
