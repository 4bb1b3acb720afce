//! Search workflows: keystroke bursts, spaced terms, lookup output

use crate::common::cli::parse_settled_line;
use crate::common::QzEnv;
use anyhow::Result;

#[test]
fn test_burst_settles_once_on_last_term() -> Result<()> {
    let env = QzEnv::new()?;
    let result = env
        .cmd(&["search", "--window-ms", "300", "0:a,50:ab,150:abc"])
        .assert_success()?;

    assert_eq!(result.settled_terms(), vec!["abc".to_string()]);

    // Settles no earlier than one window after the last keystroke
    let (offset, _) = result
        .stdout
        .lines()
        .find_map(parse_settled_line)
        .expect("settled line");
    assert!(offset >= 450, "settled too early at {}ms", offset);
    Ok(())
}

#[test]
fn test_spaced_terms_each_settle() -> Result<()> {
    let env = QzEnv::new()?;
    let result = env
        .cmd(&["search", "--window-ms", "100", "0:rust,400:memory"])
        .assert_success()?;

    assert_eq!(
        result.settled_terms(),
        vec!["rust".to_string(), "memory".to_string()]
    );
    assert!(result.contains_stdout("Memory safety"));
    Ok(())
}

#[test]
fn test_initial_term_looked_up_first() -> Result<()> {
    let env = QzEnv::new()?;
    let result = env
        .cmd(&["search", "--initial", "--window-ms", "100", "--latency-ms", "20", "300:debounce"])
        .assert_success()?;

    assert_eq!(
        result.settled_terms(),
        vec!["programming".to_string(), "debounce".to_string()]
    );
    assert!(result.contains_stdout("term: debounce"));
    assert!(result.contains_stdout("Debounce"));
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let env = QzEnv::new()?;
    let result = env
        .cmd(&["search", "--json", "--window-ms", "50", "0:debounce"])
        .assert_success()?;

    let hits: serde_json::Value = serde_json::from_str(&result.stdout)?;
    let hits = hits.as_array().expect("array of hits");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "Debounce");
    assert_eq!(hits[0]["id"], 9845);
    Ok(())
}

#[test]
fn test_rejects_invalid_window() -> Result<()> {
    let env = QzEnv::new()?;
    let result = env
        .cmd(&["search", "--window-ms", "0", "0:a"])
        .assert_failure()?;
    assert!(result.contains_stderr("window"));
    Ok(())
}

#[test]
fn test_rejects_malformed_script() -> Result<()> {
    let env = QzEnv::new()?;
    env.cmd(&["search", "abc"]).assert_failure()?;
    env.cmd(&["search", "500:a,100:b"]).assert_failure()?;
    Ok(())
}
