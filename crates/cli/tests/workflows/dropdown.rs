//! Dropdown workflows: toggle, outside dismissal, selection, teardown

use crate::common::{CommandResult, QzEnv};
use anyhow::Result;

/// (step, open/closed) for every state line
fn states(result: &CommandResult) -> Vec<(String, String)> {
    result
        .state_lines()
        .iter()
        .map(|line| {
            let mut words = line.split_whitespace();
            let step = words.next().unwrap_or_default().to_string();
            let state = words.next().unwrap_or_default().to_string();
            (step, state)
        })
        .collect()
}

fn pair(step: &str, state: &str) -> (String, String) {
    (step.to_string(), state.to_string())
}

#[test]
fn test_toggle_then_outside_closes() -> Result<()> {
    let env = QzEnv::new()?;
    for order in ["local-first", "ambient-first"] {
        let result = env
            .cmd(&["dropdown", "--order", order, "toggle,outside"])
            .assert_success()?;

        assert_eq!(
            states(&result),
            vec![pair("start", "closed"), pair("toggle", "open"), pair("outside", "closed")],
            "order {}",
            order
        );
    }
    Ok(())
}

#[test]
fn test_press_and_touch_outside_close() -> Result<()> {
    let env = QzEnv::new()?;
    let result = env
        .cmd(&["dropdown", "toggle,press,toggle,touch"])
        .assert_success()?;

    assert_eq!(
        states(&result),
        vec![
            pair("start", "closed"),
            pair("toggle", "open"),
            pair("press", "closed"),
            pair("toggle", "open"),
            pair("touch", "closed"),
        ]
    );
    Ok(())
}

#[test]
fn test_option_selects_and_closes() -> Result<()> {
    let env = QzEnv::new()?;
    let result = env
        .cmd(&["dropdown", "toggle,option:green"])
        .assert_success()?;

    let lines = result.state_lines();
    let last = lines.last().expect("state line");
    assert!(last.contains("closed"));
    assert!(last.contains("selected=green"));
    assert!(last.contains("menu=[red, blue]"));
    Ok(())
}

#[test]
fn test_selected_option_not_clickable() -> Result<()> {
    let env = QzEnv::new()?;
    let result = env
        .cmd(&["dropdown", "toggle,option:red"])
        .assert_failure()?;
    assert!(result.contains_stderr("not listed"));
    Ok(())
}

#[test]
fn test_outside_after_unmount_is_harmless() -> Result<()> {
    let env = QzEnv::new()?;
    let result = env
        .cmd(&["dropdown", "toggle,unmount,outside"])
        .assert_success()?;

    let lines = result.state_lines();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].contains("(unmounted)"));
    assert!(lines[3].contains("(unmounted)"));
    Ok(())
}

#[test]
fn test_toggle_after_unmount_fails() -> Result<()> {
    let env = QzEnv::new()?;
    let result = env
        .cmd(&["dropdown", "unmount,toggle"])
        .assert_failure()?;
    assert!(result.contains_stderr("not mounted"));
    Ok(())
}
