//! Local command-line assistant backend (`gh copilot suggest`).
//!
//! The prompt is written to the child's stdin; stdout is the answer. The
//! child is killed when its time limit expires.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use namer_core::{PromptContext, ProviderKind};
use namer_settings::CliAssistantSettings;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::http::millis;
use crate::prompt;
use crate::provider::SuggestionProvider;

/// Subprocess-backed provider.
pub struct CopilotProvider {
    program: String,
    suggest_args: Vec<String>,
    probe_args: Vec<String>,
    timeout: Duration,
    probe_timeout: Duration,
}

impl CopilotProvider {
    /// `{program} copilot suggest`, probed with `{program} copilot --version`.
    pub fn new(settings: &CliAssistantSettings) -> Self {
        Self {
            program: settings.program.clone(),
            suggest_args: vec!["copilot".into(), "suggest".into()],
            probe_args: vec!["copilot".into(), "--version".into()],
            timeout: millis(settings.timeout_ms),
            probe_timeout: millis(settings.probe_timeout_ms),
        }
    }

    /// Replace the command lines used for suggesting and probing.
    pub fn with_commands(
        mut self,
        program: impl Into<String>,
        suggest_args: Vec<String>,
        probe_args: Vec<String>,
    ) -> Self {
        self.program = program.into();
        self.suggest_args = suggest_args;
        self.probe_args = probe_args;
        self
    }

    fn timeout_ms(limit: Duration) -> u64 {
        u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)
    }
}

#[async_trait]
impl SuggestionProvider for CopilotProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Copilot
    }

    async fn is_available(&self) -> bool {
        let mut cmd = Command::new(&self.program);
        let _ = cmd
            .args(&self.probe_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(error) => {
                debug!(program = %self.program, %error, "assistant probe failed to spawn");
                return false;
            }
        };

        tokio::select! {
            status = child.wait() => status.is_ok_and(|s| s.success()),
            () = tokio::time::sleep(self.probe_timeout) => {
                let _ = child.kill().await;
                debug!(program = %self.program, "assistant probe timed out");
                false
            }
        }
    }

    fn build_prompt(&self, ctx: &PromptContext) -> String {
        prompt::build_cli_prompt(ctx)
    }

    async fn complete(&self, prompt: &str) -> ProviderResult<String> {
        let mut cmd = Command::new(&self.program);
        let _ = cmd
            .args(&self.suggest_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(program = %self.program, "spawning assistant");
        let mut child = cmd.spawn().map_err(|e| ProviderError::Process {
            message: format!("failed to spawn {}: {e}", self.program),
        })?;

        // Stdin is fed while output is collected, both under the time limit.
        // The pipe closes when `stdin` drops at the end of `feed`.
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                if let Err(error) = stdin.write_all(prompt.as_bytes()).await {
                    debug!(%error, "assistant closed stdin early");
                }
            }
        };
        let run = async move {
            let ((), output) = tokio::join!(feed, child.wait_with_output());
            output
        };

        // Dropping `run` on timeout kills the child (kill_on_drop).
        let output = match tokio::time::timeout(self.timeout, run).await {
            Ok(output) => output.map_err(|e| ProviderError::Process {
                message: format!("wait failed: {e}"),
            })?,
            Err(_) => {
                let timeout_ms = Self::timeout_ms(self.timeout);
                warn!(program = %self.program, timeout_ms, "assistant timed out");
                return Err(ProviderError::Timeout { timeout_ms });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProviderError::Process {
                message: format!(
                    "exit code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
