// RaidTally - ui/theme.rs
//
// Colour scheme, status tone mapping, and layout constants.
// No dependencies on business logic.

use crate::app::state::StatusTone;
use egui::Color32;

/// Colour for an attendance verdict cell.
pub fn attended_colour(attended: bool) -> Color32 {
    if attended {
        Color32::from_rgb(46, 125, 50) // Green 800
    } else {
        Color32::from_rgb(198, 40, 40) // Red 800
    }
}

/// Colour for a status bar message by tone.
pub fn tone_colour(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Info => Color32::from_rgb(209, 213, 219),   // Gray 300
        StatusTone::Success => Color32::from_rgb(46, 125, 50),  // Green 800
        StatusTone::Error => Color32::from_rgb(198, 40, 40),    // Red 800
    }
}

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 320.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
