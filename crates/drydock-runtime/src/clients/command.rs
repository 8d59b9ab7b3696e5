//! Host shell execution with a hard timeout.

use crate::clients::Command as CommandClient;
use crate::ClientError;
use std::collections::BTreeMap;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct ShellCommand {
    timeout: Duration,
}

impl ShellCommand {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandClient for ShellCommand {
    fn run(
        &self,
        command: &[String],
        env: &BTreeMap<String, String>,
        working_dir: Option<&str>,
    ) -> Result<(), ClientError> {
        let (program, args) = command.split_first().ok_or(ClientError::EmptyCommand)?;
        let rendered = command.join(" ");
        debug!("running '{rendered}'");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| ClientError::Spawn {
            command: rendered.clone(),
            source,
        })?;

        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                if status.success() {
                    return Ok(());
                }
                return Err(ClientError::CommandFailed {
                    command: rendered,
                    code: status.code().unwrap_or(-1),
                    stderr: String::new(),
                });
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ClientError::Timeout {
                    command: rendered,
                    timeout: self.timeout,
                });
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}
