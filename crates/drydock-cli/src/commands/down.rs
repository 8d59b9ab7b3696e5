use super::{spin_ok, spinner, EXIT_STATE_ERROR, EXIT_SUCCESS};
use drydock_core::{CoreError, Engine};
use drydock_state::StateLayout;

pub fn run(layout: StateLayout, yes: bool) -> Result<u8, String> {
    let state_path = layout.state_path();
    if !state_path.exists() {
        println!("no environment state found at {}", state_path.display());
        return Ok(EXIT_SUCCESS);
    }

    let engine = match Engine::from_state(&state_path, layout) {
        Ok(engine) => engine,
        Err(CoreError::State(e)) => {
            eprintln!("state error: {e}");
            return Ok(EXIT_STATE_ERROR);
        }
        Err(e) => return Err(e.to_string()),
    };

    if !yes && !confirm(engine.resource_count())? {
        println!("aborted");
        return Ok(EXIT_SUCCESS);
    }

    let pb = spinner(&format!(
        "Destroying {} resources...",
        engine.resource_count()
    ));
    engine.destroy().map_err(|e| e.to_string())?;
    spin_ok(&pb, "Environment down");

    Ok(EXIT_SUCCESS)
}

fn confirm(count: usize) -> Result<bool, String> {
    dialoguer::Confirm::new()
        .with_prompt(format!("Destroy {count} resources?"))
        .default(false)
        .interact()
        .map_err(|e| e.to_string())
}
