//! Interaction script parsing
//!
//! Search scripts: comma-separated `offset_ms:term`, offsets measured from the
//! start and non-decreasing, e.g. `0:a,200:ab,900:abc`.
//!
//! Dropdown scripts: comma-separated steps, each one of `toggle`, `outside`,
//! `option:<value>` or `unmount`.

use anyhow::{Context, Result};

/// One keystroke in a search script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystroke {
    /// Offset from script start
    pub at_ms: u64,
    /// Input value after the keystroke
    pub term: String,
}

/// Parse a search script
pub fn parse_search(script: &str) -> Result<Vec<Keystroke>> {
    let mut keystrokes = Vec::new();
    let mut last = 0u64;

    for (i, step) in script.split(',').enumerate() {
        let step = step.trim();
        if step.is_empty() {
            continue;
        }
        let (offset, term) = step
            .split_once(':')
            .with_context(|| format!("Step {} ('{}') must look like offset_ms:term", i + 1, step))?;
        let at_ms: u64 = offset
            .trim()
            .parse()
            .with_context(|| format!("Step {}: invalid offset '{}'", i + 1, offset))?;
        if at_ms < last {
            anyhow::bail!(
                "Step {}: offset {}ms is earlier than previous offset {}ms",
                i + 1,
                at_ms,
                last
            );
        }
        last = at_ms;
        keystrokes.push(Keystroke {
            at_ms,
            term: term.to_string(),
        });
    }

    if keystrokes.is_empty() {
        anyhow::bail!("Search script is empty");
    }
    Ok(keystrokes)
}

/// One step in a dropdown script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownStep {
    /// Click the toggle control
    Toggle,
    /// Click somewhere outside the dropdown
    Outside,
    /// Press the pointer down outside the dropdown
    Press,
    /// Touch outside the dropdown
    Touch,
    /// Click the option with this value
    Option(String),
    /// Tear the dropdown down
    Unmount,
}

impl std::fmt::Display for DropdownStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropdownStep::Toggle => write!(f, "toggle"),
            DropdownStep::Outside => write!(f, "outside"),
            DropdownStep::Press => write!(f, "press"),
            DropdownStep::Touch => write!(f, "touch"),
            DropdownStep::Option(value) => write!(f, "option:{}", value),
            DropdownStep::Unmount => write!(f, "unmount"),
        }
    }
}

/// Parse a dropdown script
pub fn parse_dropdown(script: &str) -> Result<Vec<DropdownStep>> {
    let steps: Vec<DropdownStep> = script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|step| match step {
            "toggle" => Ok(DropdownStep::Toggle),
            "outside" => Ok(DropdownStep::Outside),
            "press" => Ok(DropdownStep::Press),
            "touch" => Ok(DropdownStep::Touch),
            "unmount" => Ok(DropdownStep::Unmount),
            other => match other.strip_prefix("option:") {
                Some(value) if !value.is_empty() => Ok(DropdownStep::Option(value.to_string())),
                _ => anyhow::bail!(
                    "Unknown dropdown step '{}' (expected toggle, outside, press, touch, \
                     option:<value> or unmount)",
                    other
                ),
            },
        })
        .collect::<Result<_>>()?;

    if steps.is_empty() {
        anyhow::bail!("Dropdown script is empty");
    }
    Ok(steps)
}
