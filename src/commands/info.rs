use super::{load_features, CommandResult, ViewArgs};
use colored::Colorize;
use election_map::model::Feature;
use election_map::StyleEngine;
use std::path::Path;

/// Bar width for a 100% share.
const BAR_WIDTH: f64 = 40.0;

fn matches(feature: &Feature, uik: Option<&str>, name: Option<&str>) -> bool {
    let props = &feature.properties;
    match (uik, name) {
        (Some(uik), _) => props.uik_num().as_deref() == Some(uik),
        (None, Some(name)) => props.name() == Some(name),
        (None, None) => false,
    }
}

pub fn info(
    input: Option<&Path>,
    uik: Option<&str>,
    name: Option<&str>,
    json: bool,
    args: &ViewArgs,
) -> CommandResult {
    if uik.is_none() && name.is_none() {
        return Err("Pass --uik or --name to pick a feature".into());
    }
    let catalog = args.load_catalog()?;
    let engine = StyleEngine::new(&catalog, args.view_state());
    let (_, features) = load_features(input, args, &engine)?;

    let feature = features
        .iter()
        .find(|f| matches(f, uik, name))
        .ok_or("No matching feature")?;
    let panel = engine
        .info_panel(&feature.properties)
        .ok_or_else(|| format!("No catalog entry for {}", engine.view().context))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&panel)?);
        return Ok(());
    }

    println!("{}", panel.title.bold());
    if panel.rows.is_empty() {
        println!("  {}", "Нет данных".dimmed());
    }
    for row in &panel.rows {
        let width = (row.share.max(0.0).min(100.0) / 100.0 * BAR_WIDTH).round() as usize;
        println!(
            "  {:<24} {:>6} {} {}",
            row.candidate,
            row.label,
            "█".repeat(width),
            row.color.dimmed()
        );
    }
    let style = engine.style(&feature.properties);
    println!("  {} {}", "fill:".dimmed(), style.fill_color);
    Ok(())
}
