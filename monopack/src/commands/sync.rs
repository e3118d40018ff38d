//! Dev dependency synchronization command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use monopack_core::{find_manifest, DevDepSync};
use owo_colors::OwoColorize;

use crate::formatting::{print_change_table, print_section_header, print_success, print_summary_box, SectionStyle};

use super::Workspace;

pub fn cmd_sync_dev_deps(
    workspace: &Workspace,
    source: PathBuf,
    target: Option<PathBuf>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let target = match target {
        Some(path) => path,
        None => find_manifest(&workspace.root).context("Cannot locate the project manifest")?,
    };

    let sync = DevDepSync::new().with_skipped(workspace.config.skip_dev_deps.iter().cloned());
    let plan = sync
        .sync_file(&source, &target, dry_run)
        .with_context(|| format!("Failed to sync dev dependencies into {}", target.display()))?;

    if json {
        let output = serde_json::json!({
            "target": target,
            "dry_run": dry_run,
            "changes": plan.changes,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let title = if dry_run {
        "[Dev Dependencies (Dry Run)]"
    } else {
        "[Dev Dependencies]"
    };
    print_section_header(title, SectionStyle::Primary);

    if plan.is_empty() {
        print_success("All dev dependencies are installed.");
        println!();
        return Ok(());
    }

    println!("Update dev dependencies in {}", target.display());
    for change in &plan.changes {
        println!(" - {}", change);
    }
    println!();
    print_change_table(&plan.changes);
    println!();

    let added = plan
        .changes
        .iter()
        .filter(|c| matches!(c, monopack_core::Change::Add { .. }))
        .count();
    print_summary_box(
        "Summary",
        &[
            ("Added", &added.to_string()),
            ("Updated", &(plan.changes.len() - added).to_string()),
        ],
    );
    println!();

    if dry_run {
        println!("  {}", "Dry run: no files were written.".bright_black());
    } else {
        println!("Run `npm install` to install packages.");
    }

    Ok(())
}
