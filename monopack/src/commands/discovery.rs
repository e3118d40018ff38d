//! Discovery and ordering commands.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use monopack_core::{find_cycles, JsonFileReader, Resolver};
use owo_colors::OwoColorize;

use crate::formatting::{
    print_key_value, print_order_table, print_package_table, print_section_header, print_warning,
    SectionStyle,
};

use super::Workspace;

pub fn cmd_scan(workspace: &Workspace, json: bool) -> Result<()> {
    let scanner = workspace.scanner();
    let manifests = scanner.scan_manifests(&JsonFileReader)?;

    if json {
        let packages: Vec<_> = manifests
            .iter()
            .map(|m| {
                serde_json::json!({
                    "name": m.name,
                    "location": m.location,
                    "dependencies": m.dependency_names.iter().collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(());
    }

    print_section_header("[Scanning packages...]", SectionStyle::Primary);
    print_key_value("Directory", &scanner.packages_dir().display().to_string());
    println!();

    if manifests.is_empty() {
        print_warning("No packages found");
    } else {
        println!(
            "  {} Found {} {}",
            "OK".green(),
            manifests.len().to_string().bold().cyan(),
            "packages".bold()
        );
        println!();
        print_package_table(&manifests);
    }
    println!();

    Ok(())
}

pub fn cmd_order(
    workspace: &Workspace,
    manifests: Vec<PathBuf>,
    retry_budget: Option<u32>,
    json: bool,
) -> Result<()> {
    let locations = if manifests.is_empty() {
        workspace.scanner().scan()?
    } else {
        manifests
    };

    let resolver = Resolver::new()
        .with_retry_budget(retry_budget.unwrap_or_else(|| workspace.config.retry_budget()));
    let loaded = resolver.load_all(&locations)?;
    let cycles = find_cycles(&loaded);
    let ordered = resolver.resolve_manifests(loaded);

    if json {
        let order: Vec<_> = ordered
            .iter()
            .map(|m| serde_json::json!({"name": m.name, "location": m.location}))
            .collect();
        let output = serde_json::json!({
            "order": order,
            "cycles": cycles,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_section_header("[Build Order]", SectionStyle::Primary);
    print_key_value("Retry budget", &resolver.retry_budget().to_string());
    println!();

    if ordered.is_empty() {
        print_warning("No packages found");
        println!();
        return Ok(());
    }

    let cyclic: HashSet<&str> = cycles.iter().flatten().map(String::as_str).collect();
    let rows: Vec<(String, PathBuf, bool)> = ordered
        .iter()
        .map(|m| {
            (
                m.name.clone(),
                m.location.clone(),
                cyclic.contains(m.name.as_str()),
            )
        })
        .collect();
    print_order_table(&rows);

    if !cycles.is_empty() {
        println!();
        print_section_header("[Dependency Cycles]", SectionStyle::Warning);
        for cycle in &cycles {
            print_warning(&cycle.join(" <-> "));
        }
        println!();
        println!(
            "  {}",
            "Packages in a cycle are placed once their retry budget runs out; their relative order is not guaranteed."
                .bright_black()
        );
    }
    println!();

    Ok(())
}
