use super::{EXIT_BLUEPRINT_ERROR, EXIT_SUCCESS};
use drydock_config::{parse_folder, resolve_references};
use std::path::Path;

pub fn run(blueprint: &Path) -> Result<u8, String> {
    let config = match parse_folder(blueprint) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("blueprint error: {e}");
            return Ok(EXIT_BLUEPRINT_ERROR);
        }
    };
    if let Err(e) = resolve_references(&config) {
        eprintln!("blueprint error: {e}");
        return Ok(EXIT_BLUEPRINT_ERROR);
    }

    if let Some(bp) = &config.blueprint {
        if !bp.title.is_empty() {
            println!("{}", bp.title);
        }
    }
    print_count("networks", config.networks.len());
    print_count("containers", config.containers.len());
    print_count("ingresses", config.ingresses.len());
    print_count("docs sites", usize::from(config.docs.is_some()));
    print_count("clusters", config.clusters.len());
    print_count("helm releases", config.helm_charts.len());
    print_count("manifest bundles", config.k8s_configs.len());
    print_count("local exec steps", config.local_execs.len());
    print_count("remote exec steps", config.remote_execs.len());
    println!();
    println!("{} resources, blueprint is valid", config.resource_count());

    Ok(EXIT_SUCCESS)
}

fn print_count(label: &str, count: usize) {
    if count > 0 {
        println!("  {count} {label}");
    }
}
