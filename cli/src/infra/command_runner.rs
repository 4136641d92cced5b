//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with a guaranteed timeout and kill.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::Result;
use tokio::io::AsyncReadExt;

use crate::application::ports::CommandRunner;
use crate::domain::RuntimeError;

/// Production `CommandRunner`. Spawns the program with piped stdout/stderr
/// and kills it if it outlives the timeout.
///
/// `tokio::time::timeout` around `.output().await` only drops the future;
/// the child must be killed explicitly, hence the `select!` with
/// `child.kill()`.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RuntimeError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stdout_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stderr_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                );
                let status = status.map_err(|source| RuntimeError::Wait {
                    program: program.to_string(),
                    source,
                })?;
                Ok::<Output, anyhow::Error>(Output { status, stdout, stderr })
            } => result,
            () = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                Err(RuntimeError::Timeout {
                    program: program.to_string(),
                    timeout,
                }
                .into())
            }
        }
    }
}
