use std::path::PathBuf;
use std::process::ExitCode;

use vcad_editor_lib::command::execute_json_batch;
use vcad_editor_lib::harness::TestHarness;
use vcad_editor_lib::state::EditorSettings;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vcad_editor=info,vcad_editor_lib=info".into()),
        )
        .init();

    let Some(script) = parse_path_arg("--script") else {
        eprintln!(
            "usage: vcad-editor --script <commands.json> [--settings <settings.json>] [--save-settings]"
        );
        return ExitCode::FAILURE;
    };

    let settings = match parse_path_arg("--settings") {
        Some(path) => match EditorSettings::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => EditorSettings::load(),
    };

    let json = match std::fs::read_to_string(&script) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to read script file {}: {e}", script.display());
            return ExitCode::FAILURE;
        }
    };

    // Persist the effective settings to the user config directory
    if std::env::args().any(|a| a == "--save-settings") {
        settings.save();
    }

    let mut harness = TestHarness::with_settings(settings);
    let responses = match execute_json_batch(&mut harness, &json) {
        Ok(responses) => responses,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let failures = responses.iter().filter(|r| !r.success).count();
    tracing::info!(
        "Ran {} commands from {} ({failures} failed)",
        responses.len(),
        script.display()
    );

    match serde_json::to_string_pretty(&responses) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            tracing::error!("Failed to serialize responses: {e}");
            return ExitCode::FAILURE;
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
        i += 1;
    }
    None
}
