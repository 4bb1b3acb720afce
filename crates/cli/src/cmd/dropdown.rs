//! Scripted dropdown session

use crate::script::{self, DropdownStep};
use crate::system_config;
use anyhow::{Context, Result};
use dismiss::{AmbientScope, InteractionKind};
use owo_colors::OwoColorize;
use quiesce_core::DispatchOrder;
use widgets::{Dropdown, DropdownOption};

/// Options offered by the demo dropdown
pub fn demo_options() -> Vec<DropdownOption> {
    vec![
        DropdownOption::new("The Color Red", "red"),
        DropdownOption::new("The Color Green", "green"),
        DropdownOption::new("A Shade of Blue", "blue"),
    ]
}

pub fn run(script: &str, order: Option<DispatchOrder>) -> Result<()> {
    let mut settings = system_config::load()?;
    if let Some(order) = order {
        settings.dismiss.order = order;
    }
    let steps = script::parse_dropdown(script)?;

    // body
    // ├── dropdown
    // └── elsewhere
    let scope = AmbientScope::from_config(&settings.dismiss);
    let body = scope.mount_root();
    let options = demo_options();
    let mut dropdown = Dropdown::new("select a color", options.clone(), options[0].clone());
    dropdown
        .mount(&scope, body)
        .context("Failed to mount dropdown")?;
    let elsewhere = scope.mount_child(body).context("Failed to mount page content")?;

    println!(
        "{} {} ({})",
        "Dropdown".bold(),
        dropdown.label(),
        scope.order().dimmed()
    );
    print_state("start", &dropdown);

    for step in steps {
        match &step {
            DropdownStep::Toggle => {
                let toggle = dropdown
                    .toggle_node()
                    .context("Dropdown is not mounted")?;
                scope.click(toggle);
            }
            DropdownStep::Outside => {
                scope.click(elsewhere);
            }
            DropdownStep::Press => {
                scope.dispatch(InteractionKind::PointerDown, elsewhere);
            }
            DropdownStep::Touch => {
                scope.dispatch(InteractionKind::Touch, elsewhere);
            }
            DropdownStep::Option(value) => {
                let node = dropdown.option_node(value).with_context(|| {
                    format!("Option '{}' is not listed (selected or unknown)", value)
                })?;
                scope.click(node);
            }
            DropdownStep::Unmount => {
                dropdown.unmount();
            }
        }
        print_state(&step.to_string(), &dropdown);
    }

    Ok(())
}

fn print_state(step: &str, dropdown: &Dropdown) {
    let open = if dropdown.is_open() {
        "open".green().to_string()
    } else {
        "closed".dimmed().to_string()
    };
    let listed: Vec<String> = dropdown
        .visible_options()
        .into_iter()
        .map(|o| o.value)
        .collect();
    println!(
        "  {:<14} {:<8} selected={} menu=[{}]{}",
        step,
        open,
        dropdown.selected().value.cyan(),
        listed.join(", "),
        if dropdown.is_mounted() { "" } else { " (unmounted)" }
    );
}
