//! Table formatting utilities using comfy-table.

use std::path::PathBuf;

use comfy_table::{Cell, Table};
use monopack_core::{Change, Manifest};

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(*h).add_attribute(comfy_table::Attribute::Bold))
                .collect::<Vec<_>>(),
        )
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    table
}

/// Prints discovered packages with their manifest paths.
pub fn print_package_table(manifests: &[Manifest]) {
    let mut table = new_table(&["Package", "Dependencies", "Manifest"]);

    for manifest in manifests {
        let deps = if manifest.dependency_names.is_empty() {
            "-".to_string()
        } else {
            manifest
                .dependency_names
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![
            Cell::new(&manifest.name).fg(comfy_table::Color::White),
            Cell::new(deps).fg(comfy_table::Color::DarkGrey),
            Cell::new(manifest.location.display()).fg(comfy_table::Color::DarkGrey),
        ]);
    }

    println!("{}", table);
}

/// Prints a resolved build order, flagging packages caught in cycles.
pub fn print_order_table(order: &[(String, PathBuf, bool)]) {
    let mut table = new_table(&["#", "Package", "Manifest"]);

    for (idx, (name, location, in_cycle)) in order.iter().enumerate() {
        let name_color = if *in_cycle {
            comfy_table::Color::Yellow
        } else {
            comfy_table::Color::White
        };
        table.add_row(vec![
            Cell::new(idx + 1).fg(comfy_table::Color::DarkGrey),
            Cell::new(name).fg(name_color),
            Cell::new(location.display()).fg(comfy_table::Color::DarkGrey),
        ]);
    }

    println!("{}", table);
}

/// Prints planned dev dependency changes.
pub fn print_change_table(changes: &[Change]) {
    let mut table = new_table(&["Action", "Dependency", "Version"]);

    for change in changes {
        let (label, color, version) = match change {
            Change::Add { version, .. } => ("ADD", comfy_table::Color::Green, version.clone()),
            Change::Update { from, to, .. } => {
                ("UPDATE", comfy_table::Color::Yellow, format!("{} → {}", from, to))
            }
        };
        table.add_row(vec![
            Cell::new(label).fg(color),
            Cell::new(change.name()).fg(comfy_table::Color::White),
            Cell::new(version).fg(comfy_table::Color::Cyan),
        ]);
    }

    println!("{}", table);
}
