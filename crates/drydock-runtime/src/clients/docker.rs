//! Container runtime access via the `docker` CLI.
//!
//! Argument construction is kept in pure functions so the exact invocation
//! shape is testable without a daemon; only `run_output` touches the
//! process table.

use crate::clients::{ContainerRuntime, ContainerTasks, RunOptions};
use crate::ClientError;
use std::collections::BTreeMap;
use std::process::Command;
use std::sync::Arc;
use tracing::debug;

const DOCKER_BINARY: &str = "docker";

/// Network-level handle to the docker daemon.
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    /// Probe the docker binary before handing out a client.
    pub fn new() -> Result<Self, ClientError> {
        let cli = Self {
            binary: DOCKER_BINARY.to_owned(),
        };
        cli.run_output(&["version".to_owned(), "--format".to_owned(), "{{.Client.Version}}".to_owned()])?;
        Ok(cli)
    }

    fn run_output(&self, args: &[String]) -> Result<String, ClientError> {
        let rendered = format!("{} {}", self.binary, args.join(" "));
        debug!("running {rendered}");
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| ClientError::Spawn {
                command: rendered.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(ClientError::CommandFailed {
                command: rendered,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

pub fn network_create_args(name: &str, subnet: &str) -> Vec<String> {
    vec![
        "network".to_owned(),
        "create".to_owned(),
        "--driver".to_owned(),
        "bridge".to_owned(),
        "--subnet".to_owned(),
        subnet.to_owned(),
        name.to_owned(),
    ]
}

pub fn network_remove_args(name: &str) -> Vec<String> {
    vec!["network".to_owned(), "rm".to_owned(), name.to_owned()]
}

fn is_not_found(err: &ClientError) -> bool {
    match err {
        ClientError::CommandFailed { stderr, .. } => {
            let msg = stderr.to_lowercase();
            msg.contains("no such") || msg.contains("not found")
        }
        _ => false,
    }
}

impl ContainerRuntime for DockerCli {
    fn create_network(&self, name: &str, subnet: &str) -> Result<(), ClientError> {
        self.run_output(&network_create_args(name, subnet)).map(drop)
    }

    fn remove_network(&self, name: &str) -> Result<(), ClientError> {
        self.run_output(&network_remove_args(name)).map(drop)
    }

    fn network_exists(&self, name: &str) -> Result<bool, ClientError> {
        let args = vec![
            "network".to_owned(),
            "inspect".to_owned(),
            "--format".to_owned(),
            "{{.Name}}".to_owned(),
            name.to_owned(),
        ];
        match self.run_output(&args) {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Container lifecycle operations, layered over [`DockerCli`].
pub struct DockerTasks {
    docker: Arc<DockerCli>,
}

impl DockerTasks {
    pub fn new(docker: Arc<DockerCli>) -> Self {
        Self { docker }
    }
}

/// `docker run` invocation for `opts`. Only the first network is attached
/// here; the rest are connected after start.
pub fn run_args(opts: &RunOptions) -> Vec<String> {
    let mut args = vec![
        "run".to_owned(),
        "-d".to_owned(),
        "--name".to_owned(),
        opts.name.clone(),
    ];
    if let Some(network) = opts.networks.first() {
        args.push("--network".to_owned());
        args.push(network.clone());
    }
    for (key, value) in &opts.env {
        args.push("-e".to_owned());
        args.push(format!("{key}={value}"));
    }
    for volume in &opts.volumes {
        args.push("-v".to_owned());
        args.push(format!("{}:{}", volume.source, volume.destination));
    }
    for port in &opts.ports {
        args.push("-p".to_owned());
        args.push(format!("{}:{}/{}", port.host, port.local, port.protocol));
    }
    if opts.privileged {
        args.push("--privileged".to_owned());
    }
    args.push(opts.image.clone());
    args.extend(opts.command.iter().cloned());
    args
}

pub fn exec_args(container: &str, command: &[String], env: &BTreeMap<String, String>) -> Vec<String> {
    let mut args = vec!["exec".to_owned()];
    for (key, value) in env {
        args.push("-e".to_owned());
        args.push(format!("{key}={value}"));
    }
    args.push(container.to_owned());
    args.extend(command.iter().cloned());
    args
}

impl ContainerTasks for DockerTasks {
    fn run_container(&self, opts: &RunOptions) -> Result<(), ClientError> {
        self.docker.run_output(&run_args(opts))?;
        for network in opts.networks.iter().skip(1) {
            self.docker.run_output(&[
                "network".to_owned(),
                "connect".to_owned(),
                network.clone(),
                opts.name.clone(),
            ])?;
        }
        Ok(())
    }

    fn remove_container(&self, name: &str) -> Result<(), ClientError> {
        self.docker
            .run_output(&[
                "rm".to_owned(),
                "-f".to_owned(),
                "-v".to_owned(),
                name.to_owned(),
            ])
            .map(drop)
    }

    fn container_exists(&self, name: &str) -> Result<bool, ClientError> {
        let args = vec![
            "inspect".to_owned(),
            "--format".to_owned(),
            "{{.Name}}".to_owned(),
            name.to_owned(),
        ];
        match self.docker.run_output(&args) {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn exec(
        &self,
        container: &str,
        command: &[String],
        env: &BTreeMap<String, String>,
    ) -> Result<String, ClientError> {
        if command.is_empty() {
            return Err(ClientError::EmptyCommand);
        }
        self.docker.run_output(&exec_args(container, command, env))
    }
}
