// RaidTally - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config and secrets loading (config first: it carries the log level)
// 3. Logging initialisation (debug mode support)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use raidtally::app;

pub use raidtally::core;
pub use raidtally::net;
pub use raidtally::platform;
pub use raidtally::ui;
pub use raidtally::util;

use clap::Parser;
use std::path::PathBuf;

/// Apply the configured theme and base font size to the egui context.
///
/// Text styles scale proportionally from their egui defaults so headings
/// stay larger than body text at any configured size.
fn apply_theme(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    if dark_mode {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }
    // 12.5 is egui's default body size; the ratio scales every text style.
    let scale = font_size / 12.5;
    if (scale - 1.0).abs() > f32::EPSILON {
        ctx.all_styles_mut(|style| {
            for font_id in style.text_styles.values_mut() {
                font_id.size *= scale;
            }
        });
    }
}

/// RaidTally - Guild raid attendance tracker.
///
/// Keeps a roster of players and their characters, matches it against the
/// participant list of a Warcraft Logs report (or a pasted character list),
/// and records each check in a session history.
#[derive(Parser, Debug)]
#[command(name = "RaidTally", version, about)]
struct Cli {
    /// Roster CSV to preload (starts with an empty roster if omitted).
    roster: Option<PathBuf>,

    /// Alternative secrets.toml path (default: the platform config directory).
    #[arg(short = 's', long = "secrets")]
    secrets: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config before logging: the config file
    // carries the fallback log level.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_file());

    // Initialise logging subsystem
    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "RaidTally starting"
    );
    tracing::info!(
        path = %platform_paths.config_dir.display(),
        "Config directory"
    );

    // Determine secrets path: CLI override > platform default
    let secrets_path = cli
        .secrets
        .clone()
        .unwrap_or_else(|| platform_paths.secrets_file());
    let (secrets, secret_warnings) = platform::secrets::load_secrets(&secrets_path);

    let mut warnings = config_warnings;
    warnings.extend(secret_warnings);
    for w in &warnings {
        tracing::warn!("{}", w);
    }

    // Create application state
    let mut state = app::state::AppState::new(config, secrets, cli.debug);

    // If a roster CSV was provided on the CLI, preload it.
    if let Some(ref path) = cli.roster {
        app::actions::import_roster_from_path(&mut state, path);
    }

    // Startup warnings outrank the preload message in the status bar; all of
    // them are in the log either way.
    if let Some(first) = warnings.first() {
        state.set_status_info(first.clone());
    }

    let dark_mode = state.config.dark_mode;
    let font_size = state.config.font_size;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 520.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            apply_theme(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::RaidTallyApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch RaidTally GUI: {e}");
        std::process::exit(1);
    }
}
