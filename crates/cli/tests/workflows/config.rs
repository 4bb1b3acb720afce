//! Config workflows: get/set/path/example and config-driven behavior

use crate::common::QzEnv;
use anyhow::Result;

#[test]
fn test_get_defaults() -> Result<()> {
    let env = QzEnv::new()?;

    let result = env.cmd(&["config", "--get", "debounce.window_ms"]).assert_success()?;
    assert_eq!(result.stdout.trim(), "1000");

    let result = env.cmd(&["config", "--get", "dismiss.order"]).assert_success()?;
    assert_eq!(result.stdout.trim(), "local-first");

    env.cmd(&["config", "--get", "nope"]).assert_failure()?;
    Ok(())
}

#[test]
fn test_set_persists_and_validates() -> Result<()> {
    let env = QzEnv::new()?;

    env.cmd(&["config", "--set", "debounce.window_ms", "250"]).assert_success()?;
    assert!(env.config_path().exists());

    let result = env.cmd(&["config", "--get", "debounce.window_ms"]).assert_success()?;
    assert_eq!(result.stdout.trim(), "250");

    env.cmd(&["config", "--set", "debounce.window_ms", "0"]).assert_failure()?;
    env.cmd(&["config", "--set", "dismiss.order", "sideways"]).assert_failure()?;

    // Rejected values leave the file untouched
    let result = env.cmd(&["config", "--get", "debounce.window_ms"]).assert_success()?;
    assert_eq!(result.stdout.trim(), "250");
    Ok(())
}

#[test]
fn test_path_create_and_example() -> Result<()> {
    let env = QzEnv::new()?;

    let result = env.cmd(&["config", "--path"]).assert_success()?;
    assert!(result.contains_stdout("does not exist"));

    env.cmd(&["config", "--path", "--create"]).assert_success()?;
    assert!(env.config_path().exists());

    let result = env.cmd(&["config", "--example"]).assert_success()?;
    assert!(result.contains_stdout("[debounce]"));
    assert!(result.contains_stdout("window_ms = 1000"));

    let result = env.cmd(&["config", "--list"]).assert_success()?;
    assert!(result.contains_stdout("initial_term"));
    Ok(())
}

#[test]
fn test_search_uses_configured_window() -> Result<()> {
    let env = QzEnv::new()?;
    env.cmd(&["config", "--set", "debounce.window_ms", "100"]).assert_success()?;

    // 400ms apart: separate settles with a 100ms window
    let result = env.cmd(&["search", "0:a,400:b"]).assert_success()?;
    assert_eq!(result.settled_terms(), vec!["a".to_string(), "b".to_string()]);
    Ok(())
}

#[test]
fn test_dropdown_uses_configured_order() -> Result<()> {
    let env = QzEnv::new()?;
    env.cmd(&["config", "--set", "dismiss.order", "ambient-first"]).assert_success()?;

    let result = env.cmd(&["dropdown", "toggle"]).assert_success()?;
    assert!(result.contains_stdout("ambient-first"));
    Ok(())
}
