pub mod completions;
pub mod down;
pub mod status;
pub mod up;
pub mod validate;

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_BLUEPRINT_ERROR: u8 = 2;
pub const EXIT_STATE_ERROR: u8 = 3;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn spin_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✓ {msg}"));
}

pub fn spin_fail(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✗ {msg}"));
}

/// Short display label for a state entry tag, colorized per kind.
pub fn colorize_kind(tag: &str) -> String {
    use console::Style;
    let label = tag.strip_prefix("config.").unwrap_or(tag);
    match label {
        "Network" => Style::new().cyan().apply_to(label).to_string(),
        "Container" | "Ingress" | "Docs" => Style::new().green().apply_to(label).to_string(),
        "Cluster" | "Helm" | "K8sConfig" => Style::new().blue().apply_to(label).to_string(),
        "LocalExec" | "RemoteExec" => Style::new().yellow().apply_to(label).to_string(),
        other => other.to_owned(),
    }
}
