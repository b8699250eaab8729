//! Interactive, line-based review of suggestions.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use namer_analyzer::{AnalysisResult, analyze_file};
use namer_core::{FileContext, Identifier};
use namer_suggest::SuggestionOrchestrator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::decision_log::{Decision, DecisionLog};

/// Above this many files, review asks before starting.
pub const LARGE_RUN_THRESHOLD: usize = 20;

/// Imports shown per file before eliding.
const SHOWN_IMPORTS: usize = 3;

/// Totals printed at the end of a review.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReviewStats {
    /// Files analyzed.
    pub files: usize,
    /// Identifiers found in them.
    pub identifiers: usize,
    /// Identifiers given a new name.
    pub renamed: usize,
}

/// A reply to the per-identifier prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    /// `0`: keep the current name.
    Keep,
    /// `1..=n`: zero-based index into the suggestions.
    Select(usize),
    /// `q`: stop reviewing.
    Quit,
}

/// Parse one reply against a list of `count` suggestions.
pub fn parse_choice(reply: &str, count: usize) -> Option<Choice> {
    let reply = reply.trim();
    if reply.eq_ignore_ascii_case("q") {
        return Some(Choice::Quit);
    }
    match reply.parse::<usize>().ok()? {
        0 => Some(Choice::Keep),
        n if n <= count => Some(Choice::Select(n - 1)),
        _ => None,
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Drives prompts over `input` and `output` for a list of files.
pub struct Reviewer<'a, R, W> {
    orchestrator: &'a SuggestionOrchestrator,
    log: &'a DecisionLog,
    input: R,
    output: W,
}

impl<'a, R, W> Reviewer<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Reviewer reading replies from `input` and printing to `output`.
    pub fn new(
        orchestrator: &'a SuggestionOrchestrator,
        log: &'a DecisionLog,
        input: R,
        output: W,
    ) -> Self {
        Self {
            orchestrator,
            log,
            input,
            output,
        }
    }

    /// Ask once before a large run. Empty or `y` means yes.
    pub async fn confirm_large_run(&mut self, file_count: usize) -> Result<bool> {
        if file_count <= LARGE_RUN_THRESHOLD {
            return Ok(true);
        }
        write!(self.output, "Found {file_count} files. Continue? [Y/n] ")?;
        self.output.flush()?;
        let Some(reply) = self.read_reply().await? else {
            return Ok(false);
        };
        let reply = reply.trim();
        Ok(reply.is_empty() || reply.eq_ignore_ascii_case("y") || reply.eq_ignore_ascii_case("yes"))
    }

    /// Review every file in order, stopping early on `q` or end of input.
    pub async fn run(&mut self, files: &[PathBuf]) -> Result<ReviewStats> {
        let mut stats = ReviewStats::default();
        writeln!(self.output, "Found {} files to analyze.", files.len())?;

        for path in files {
            writeln!(self.output, "\nFile: {}", path.display())?;
            let analysis = match analyze_file(path) {
                Ok(analysis) => analysis,
                Err(e) => {
                    warn!(?path, error = %e, "skipping file");
                    writeln!(self.output, "  skipped: {e}")?;
                    continue;
                }
            };
            stats.files += 1;
            if let Flow::Quit = self.review_file(path, &analysis, &mut stats).await? {
                break;
            }
        }

        self.print_stats(&stats)?;
        Ok(stats)
    }

    async fn review_file(
        &mut self,
        path: &Path,
        analysis: &AnalysisResult,
        stats: &mut ReviewStats,
    ) -> Result<Flow> {
        if analysis.identifiers.is_empty() {
            writeln!(self.output, "  No identifiers to review in this file.")?;
            return Ok(Flow::Continue);
        }
        stats.identifiers += analysis.identifiers.len();

        let ctx = &analysis.file_context;
        writeln!(
            self.output,
            "  {} identifiers, domain: {}",
            analysis.identifiers.len(),
            ctx.domain
        )?;
        if !ctx.imports.is_empty() {
            let shown = ctx.imports.iter().take(SHOWN_IMPORTS).cloned().collect::<Vec<_>>();
            let more = if ctx.imports.len() > SHOWN_IMPORTS { ", ..." } else { "" };
            writeln!(self.output, "  imports: {}{more}", shown.join(", "))?;
        }

        for identifier in &analysis.identifiers {
            let suggestions = self
                .orchestrator
                .get_suggestions(&identifier.name, identifier.kind, &identifier.source_context, ctx)
                .await;

            let Some(selected) = self.ask(identifier, &suggestions).await? else {
                return Ok(Flow::Quit);
            };
            if selected == identifier.name {
                writeln!(self.output, "  -> kept `{selected}`")?;
            } else {
                stats.renamed += 1;
                writeln!(self.output, "  -> renamed to `{selected}`")?;
            }
            self.record(path, identifier, ctx, &suggestions, &selected)?;
        }
        Ok(Flow::Continue)
    }

    /// Prompt until a valid reply; `None` on quit or end of input.
    async fn ask(
        &mut self,
        identifier: &Identifier,
        suggestions: &[String],
    ) -> Result<Option<String>> {
        let line = identifier
            .line
            .map_or_else(|| "N/A".to_string(), |l| l.to_string());
        writeln!(
            self.output,
            "\n{} `{}` (line {line})",
            identifier.kind, identifier.name
        )?;
        writeln!(self.output, "  0) {} (keep)", identifier.name)?;
        for (i, name) in suggestions.iter().enumerate() {
            writeln!(self.output, "  {}) {name}", i + 1)?;
        }

        loop {
            write!(self.output, "choice [0-{}, q]: ", suggestions.len())?;
            self.output.flush()?;
            let Some(reply) = self.read_reply().await? else {
                return Ok(None);
            };
            match parse_choice(&reply, suggestions.len()) {
                Some(Choice::Keep) => return Ok(Some(identifier.name.clone())),
                Some(Choice::Select(i)) => return Ok(Some(suggestions[i].clone())),
                Some(Choice::Quit) => return Ok(None),
                None => writeln!(self.output, "  invalid choice: {}", reply.trim())?,
            }
        }
    }

    fn record(
        &mut self,
        path: &Path,
        identifier: &Identifier,
        ctx: &FileContext,
        suggestions: &[String],
        selected: &str,
    ) -> Result<()> {
        let decision = Decision {
            timestamp: Local::now(),
            file: path,
            identifier,
            file_context: ctx,
            suggestions,
            selected,
        };
        if let Err(e) = self.log.record(&decision) {
            warn!(error = %e, "decision not logged");
            writeln!(
                self.output,
                "  could not save decision: `{}` -> {}",
                identifier.name,
                suggestions.join(", ")
            )?;
        }
        Ok(())
    }

    async fn read_reply(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn print_stats(&mut self, stats: &ReviewStats) -> Result<()> {
        writeln!(self.output, "\nSummary")?;
        writeln!(self.output, "  files analyzed:      {}", stats.files)?;
        writeln!(self.output, "  identifiers found:   {}", stats.identifiers)?;
        writeln!(self.output, "  identifiers renamed: {}", stats.renamed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use namer_settings::ProviderPolicy;

    use super::*;

    fn rules_only() -> SuggestionOrchestrator {
        SuggestionOrchestrator::with_providers(ProviderPolicy::Rules, Vec::new())
    }

    fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn choices() {
        assert_eq!(parse_choice("0\n", 3), Some(Choice::Keep));
        assert_eq!(parse_choice(" 2 ", 3), Some(Choice::Select(1)));
        assert_eq!(parse_choice("Q", 3), Some(Choice::Quit));
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("abc", 3), None);
        assert_eq!(parse_choice("", 3), None);
    }

    #[tokio::test]
    async fn selects_and_logs() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(dir.path(), "api.js", "function getData() {}\nconst x = 1;\n");
        let log_path = dir.path().join("decisions.log");
        let log = DecisionLog::with_candidates(vec![log_path.clone()]);
        let orchestrator = rules_only();
        let mut out = Vec::new();

        let stats = Reviewer::new(&orchestrator, &log, &b"1\n0\n"[..], &mut out)
            .run(&[file])
            .await
            .unwrap();

        assert_eq!(
            stats,
            ReviewStats {
                files: 1,
                identifiers: 2,
                renamed: 1
            }
        );
        let log_text = std::fs::read_to_string(log_path).unwrap();
        assert!(log_text.contains("- **Original**: `getData`"));
        assert!(log_text.contains("- **Selected**: `x`"));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("0) getData (keep)"));
        assert!(printed.contains("identifiers renamed: 1"));
    }

    #[tokio::test]
    async fn invalid_reply_reprompts() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(dir.path(), "a.js", "let count = 0;\n");
        let log = DecisionLog::with_candidates(vec![dir.path().join("log")]);
        let orchestrator = rules_only();
        let mut out = Vec::new();

        let stats = Reviewer::new(&orchestrator, &log, &b"99\nzzz\n0\n"[..], &mut out)
            .run(&[file])
            .await
            .unwrap();

        assert_eq!(stats.renamed, 0);
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("invalid choice").count(), 2);
    }

    #[tokio::test]
    async fn quit_stops_everything() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_file(dir.path(), "a.js", "const a = 1;\nconst b = 2;\n");
        let second = write_file(dir.path(), "b.js", "const c = 3;\n");
        let log = DecisionLog::with_candidates(vec![dir.path().join("log")]);
        let orchestrator = rules_only();
        let mut out = Vec::new();

        let stats = Reviewer::new(&orchestrator, &log, &b"q\n"[..], &mut out)
            .run(&[first, second])
            .await
            .unwrap();

        assert_eq!(stats.files, 1);
        assert_eq!(stats.identifiers, 2);
        assert!(!dir.path().join("log").exists());
    }

    #[tokio::test]
    async fn end_of_input_quits() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(dir.path(), "a.ts", "const a = 1;\n");
        let log = DecisionLog::with_candidates(vec![dir.path().join("log")]);
        let orchestrator = rules_only();

        let stats = Reviewer::new(&orchestrator, &log, &b""[..], Vec::new())
            .run(&[file])
            .await
            .unwrap();
        assert_eq!(stats.renamed, 0);
    }

    #[tokio::test]
    async fn unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::with_candidates(vec![dir.path().join("log")]);
        let orchestrator = rules_only();

        let stats = Reviewer::new(&orchestrator, &log, &b""[..], Vec::new())
            .run(&[dir.path().join("gone.js")])
            .await
            .unwrap();
        assert_eq!(stats, ReviewStats::default());
    }

    #[tokio::test]
    async fn large_runs_ask_first() {
        let dir = tempfile::tempdir().unwrap();
        let log = DecisionLog::with_candidates(vec![dir.path().join("log")]);
        let orchestrator = rules_only();

        let mut small = Reviewer::new(&orchestrator, &log, &b""[..], Vec::new());
        assert!(small.confirm_large_run(LARGE_RUN_THRESHOLD).await.unwrap());

        let mut yes = Reviewer::new(&orchestrator, &log, &b"\n"[..], Vec::new());
        assert!(yes.confirm_large_run(LARGE_RUN_THRESHOLD + 1).await.unwrap());

        let mut no = Reviewer::new(&orchestrator, &log, &b"n\n"[..], Vec::new());
        assert!(!no.confirm_large_run(LARGE_RUN_THRESHOLD + 1).await.unwrap());
    }
}
