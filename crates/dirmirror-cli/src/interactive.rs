//! Interactive profile selection loop

use crate::display;
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};
use dirmirror_config::{ProfileCatalog, Settings};
use tracing::debug;

/// Select a profile, run it, and offer another run until the user declines
pub fn run(settings: &Settings, quiet: bool) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        print_banner();

        let catalog = ProfileCatalog::scan(&settings.profiles.directory)
            .map_err(dirmirror_types::Error::from)?;

        let Some(index) = select_profile(&theme, &catalog)? else {
            display::display_warning("Cancelled, no backup was run.");
            return Ok(());
        };
        let entry = &catalog.entries()[index];
        debug!("Selected profile {}", entry.path.display());

        let dry_run = Confirm::with_theme(&theme)
            .with_prompt("Dry run (list changes without applying them)?")
            .default(false)
            .interact()?;

        crate::run_profile(&entry.path, dry_run, quiet)?;

        println!();
        let another = Confirm::with_theme(&theme)
            .with_prompt("Start another run?")
            .default(false)
            .interact()?;
        if !another {
            return Ok(());
        }
        println!();
    }
}

fn print_banner() {
    println!(
        "{}",
        style(format!("dirmirror v{}", env!("CARGO_PKG_VERSION")))
            .bold()
            .underlined()
    );
    println!("Pick a backup profile to mirror its locations onto their destinations.");
    println!("A dry run lists the changes without touching the destination.");
    println!();
}

/// Index into the catalog entries, `None` when the user cancels
fn select_profile(theme: &ColorfulTheme, catalog: &ProfileCatalog) -> Result<Option<usize>> {
    let items = selection_items(catalog);
    let cancel = items.len() - 1;

    let selection = Select::with_theme(theme)
        .with_prompt("Backup profile")
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(selection.filter(|&index| index != cancel))
}

/// Catalog lines followed by the cancel option
fn selection_items(catalog: &ProfileCatalog) -> Vec<String> {
    let mut items = display::catalog_lines(catalog);
    items.push("[0]: Cancel".to_string());
    items
}
