//! CLI command execution helpers with automatic timing
//!
//! Wraps the `qz` binary: every command gets its own config file (through
//! `QUIESCE_CONFIG`) so tests never touch the user's configuration.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Isolated environment for one test
pub struct QzEnv {
    dir: TempDir,
}

impl QzEnv {
    /// Create a fresh temp directory for the config file
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("Failed to create temp dir")?,
        })
    }

    /// Config file path used by commands from this environment
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("quiesce").join("config.toml")
    }

    /// Start building a command
    pub fn cmd(&self, args: &[&str]) -> QzCommand {
        let mut cmd = QzCommand::new(self.dir.path());
        cmd.env("QUIESCE_CONFIG", &self.config_path().to_string_lossy());
        cmd.args(args);
        cmd
    }
}

/// CLI command builder with timing
pub struct QzCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
}

impl QzCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_qz")),
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .envs(&self.env)
            .output()
            .context("Failed to execute command")?;

        Ok(CommandResult {
            stdout: strip_ansi(&String::from_utf8_lossy(&output.stdout)),
            stderr: strip_ansi(&String::from_utf8_lossy(&output.stderr)),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Terms reported as settled, in order
    pub fn settled_terms(&self) -> Vec<String> {
        self.stdout
            .lines()
            .filter_map(parse_settled_line)
            .map(|(_, term)| term)
            .collect()
    }

    /// Lines describing dropdown state after each step
    pub fn state_lines(&self) -> Vec<String> {
        self.stdout
            .lines()
            .filter(|l| l.contains("selected="))
            .map(|l| l.trim().to_string())
            .collect()
    }
}

/// Remove ANSI color sequences (`ESC [ ... letter`)
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Parse `"  1234ms  settled term"` into (offset, term)
pub fn parse_settled_line(line: &str) -> Option<(u64, String)> {
    let (offset, rest) = line.trim().split_once("ms")?;
    let term = rest.trim().strip_prefix("settled ")?;
    Some((offset.trim().parse().ok()?, term.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settled_line() {
        assert_eq!(
            parse_settled_line("   950ms  settled abc"),
            Some((950, "abc".to_string()))
        );
        assert_eq!(parse_settled_line("   900ms  typed abc"), None);
        assert_eq!(parse_settled_line("Results [3]"), None);
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[32msettled\x1b[39m abc"), "settled abc");
        assert_eq!(strip_ansi("plain"), "plain");
    }
}
