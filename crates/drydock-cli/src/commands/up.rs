use super::{spin_fail, spin_ok, spinner, EXIT_BLUEPRINT_ERROR, EXIT_SUCCESS};
use drydock_core::{CoreError, Engine};
use drydock_state::StateLayout;
use std::path::Path;

pub fn run(blueprint: &Path, layout: StateLayout) -> Result<u8, String> {
    let engine = match Engine::from_folder(blueprint, layout) {
        Ok(engine) => engine,
        Err(CoreError::Config(e)) => {
            eprintln!("blueprint error: {e}");
            return Ok(EXIT_BLUEPRINT_ERROR);
        }
        Err(e) => return Err(e.to_string()),
    };

    if let Some(bp) = engine.blueprint() {
        if !bp.title.is_empty() {
            println!("{}", bp.title);
        }
        if !bp.intro.is_empty() {
            println!("{}", bp.intro);
        }
    }

    let pb = spinner(&format!(
        "Creating {} resources...",
        engine.resource_count()
    ));
    match engine.apply() {
        Ok(()) => {
            spin_ok(
                &pb,
                &format!("Environment up ({} resources created)", engine.state_snapshot().len()),
            );
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            spin_fail(
                &pb,
                &format!(
                    "Apply failed after {} resources; state saved for teardown",
                    engine.state_snapshot().len()
                ),
            );
            Err(e.to_string())
        }
    }
}
