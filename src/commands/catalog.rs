use super::{load_catalog, CommandResult};
use colored::Colorize;
use election_map::model::ElectionLevel;
use std::path::Path;

/// Print the catalog as JSON, or write it and list what it contains.
pub fn catalog(source: Option<&Path>, output: Option<&Path>) -> CommandResult {
    let catalog = load_catalog(source)?;

    let output = match output {
        Some(output) => output,
        None => {
            println!("{}", serde_json::to_string_pretty(&catalog)?);
            return Ok(());
        }
    };

    catalog.save(output)?;
    for level in ElectionLevel::ALL.iter() {
        let years = catalog.years(*level);
        if years.is_empty() {
            continue;
        }
        let years = years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {}: {}", level.to_string().bold(), years);
    }
    println!(
        "✅ Wrote {} elections to {}",
        catalog.elections.len().to_string().bright_green().bold(),
        output.display().to_string().bright_green()
    );
    Ok(())
}
