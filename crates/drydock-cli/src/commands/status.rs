use super::{colorize_kind, json_pretty, EXIT_STATE_ERROR, EXIT_SUCCESS};
use drydock_state::{load_entries, StateLayout};

pub fn run(layout: &StateLayout, json: bool) -> Result<u8, String> {
    let state_path = layout.state_path();
    if !state_path.exists() {
        println!("no environment state found");
        return Ok(EXIT_SUCCESS);
    }

    let entries = match load_entries(&state_path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("state error: {e}");
            return Ok(EXIT_STATE_ERROR);
        }
    };

    if json {
        println!("{}", json_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("environment is empty");
    } else {
        println!("{:<12} NAME", "KIND");
        for entry in &entries {
            println!(
                "{:<12} {}",
                colorize_kind(entry.kind_tag()),
                entry.resource_name()
            );
        }
        println!();
        println!("{} resources", entries.len());
    }

    Ok(EXIT_SUCCESS)
}
