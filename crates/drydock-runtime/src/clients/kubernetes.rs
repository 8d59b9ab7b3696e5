//! Cluster access via the `kubectl` and `helm` CLIs.

use crate::clients::Kubernetes;
use crate::ClientError;
use drydock_config::Helm;
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tracing::debug;

pub struct KubectlCli {
    timeout: Duration,
}

impl KubectlCli {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn run(&self, binary: &str, kubeconfig: &Path, args: &[String]) -> Result<String, ClientError> {
        let rendered = format!("{binary} {}", args.join(" "));
        debug!("running {rendered}");
        let output = Command::new(binary)
            .arg("--kubeconfig")
            .arg(kubeconfig)
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

pub fn apply_args(path: &str, timeout: Duration) -> Vec<String> {
    vec![
        format!("--request-timeout={}s", timeout.as_secs()),
        "apply".to_owned(),
        "-f".to_owned(),
        path.to_owned(),
    ]
}

pub fn delete_args(path: &str, timeout: Duration) -> Vec<String> {
    vec![
        format!("--request-timeout={}s", timeout.as_secs()),
        "delete".to_owned(),
        "--ignore-not-found".to_owned(),
        "-f".to_owned(),
        path.to_owned(),
    ]
}

pub fn wait_pods_args(timeout: Duration) -> Vec<String> {
    vec![
        "wait".to_owned(),
        "--all".to_owned(),
        "--for=condition=Ready".to_owned(),
        "pods".to_owned(),
        format!("--timeout={}s", timeout.as_secs()),
    ]
}

pub fn wait_nodes_args(timeout: Duration) -> Vec<String> {
    vec![
        "wait".to_owned(),
        "--all".to_owned(),
        "--for=condition=Ready".to_owned(),
        "nodes".to_owned(),
        format!("--timeout={}s", timeout.as_secs()),
    ]
}

pub fn install_args(release: &Helm, timeout: Duration) -> Vec<String> {
    let mut args = vec![
        "upgrade".to_owned(),
        "--install".to_owned(),
        release.name.clone(),
        release.chart.clone(),
        "--wait".to_owned(),
        format!("--timeout={}s", timeout.as_secs()),
    ];
    if let Some(values) = &release.values {
        args.push("--values".to_owned());
        args.push(values.clone());
    }
    for (key, value) in &release.set {
        args.push("--set".to_owned());
        args.push(format!("{key}={value}"));
    }
    args
}

pub fn uninstall_args(release: &Helm) -> Vec<String> {
    vec!["uninstall".to_owned(), release.name.clone()]
}

impl Kubernetes for KubectlCli {
    fn apply_manifests(
        &self,
        kubeconfig: &Path,
        paths: &[String],
        wait_until_ready: bool,
    ) -> Result<(), ClientError> {
        for path in paths {
            self.run("kubectl", kubeconfig, &apply_args(path, self.timeout))?;
        }
        if wait_until_ready {
            self.run("kubectl", kubeconfig, &wait_pods_args(self.timeout))?;
        }
        Ok(())
    }

    fn delete_manifests(&self, kubeconfig: &Path, paths: &[String]) -> Result<(), ClientError> {
        for path in paths {
            self.run("kubectl", kubeconfig, &delete_args(path, self.timeout))?;
        }
        Ok(())
    }

    fn wait_node_ready(&self, kubeconfig: &Path) -> Result<(), ClientError> {
        self.run("kubectl", kubeconfig, &wait_nodes_args(self.timeout))
            .map(drop)
    }

    fn install_release(&self, kubeconfig: &Path, release: &Helm) -> Result<(), ClientError> {
        self.run("helm", kubeconfig, &install_args(release, self.timeout))
            .map(drop)
    }

    fn uninstall_release(&self, kubeconfig: &Path, release: &Helm) -> Result<(), ClientError> {
        self.run("helm", kubeconfig, &uninstall_args(release))
            .map(drop)
    }
}
