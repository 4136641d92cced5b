//! Infrastructure implementation of the `NetworkRuntime` port.
//!
//! `DockerCli<R>` routes the two network operations through a
//! `CommandRunner` invoking the docker binary.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, NetworkRuntime};
use crate::domain::RuntimeError;
use crate::infra::command_runner::TokioCommandRunner;

const LIST_ARGS: &[&str] = &["network", "ls", "--format", "{{ .Name }}", "-q"];

/// Docker CLI adapter.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct DockerCli<R: CommandRunner> {
    docker_bin: PathBuf,
    runner: R,
}

impl<R: CommandRunner> DockerCli<R> {
    pub fn new(docker_bin: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            docker_bin: docker_bin.into(),
            runner,
        }
    }

    async fn docker(&self, args: &[&str]) -> Result<Output> {
        let program = self.docker_bin.to_string_lossy();
        let output = self.runner.run(&program, args).await?;
        if !output.status.success() {
            return Err(RuntimeError::Failed {
                command: format!("{program} {}", args.join(" ")),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(output)
    }
}

impl DockerCli<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn with_timeout(docker_bin: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self::new(docker_bin, TokioCommandRunner::new(timeout))
    }
}

impl<R: CommandRunner> NetworkRuntime for DockerCli<R> {
    async fn list_networks(&self) -> Result<Vec<String>> {
        let output = self.docker(LIST_ARGS).await.context("docker network ls")?;
        Ok(parse_network_listing(&output.stdout))
    }

    async fn remove_network(&self, name: &str) -> Result<()> {
        self.docker(&["network", "rm", name])
            .await
            .with_context(|| format!("docker network rm {name}"))?;
        Ok(())
    }
}

/// Split `docker network ls` output into names, one per line.
///
/// Nothing is filtered: a trailing newline yields a trailing empty entry,
/// which the naming-convention check later ignores.
#[must_use]
pub fn parse_network_listing(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .split('\n')
        .map(ToString::to_string)
        .collect()
}
