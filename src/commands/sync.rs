use super::{load_catalog, CommandResult};
use colored::Colorize;
use election_map::model::Granularity;
use election_map::util::file_sha1;
use std::path::Path;

/// Record the SHA-1 of every dataset file in the catalog at `catalog_path`.
/// A missing catalog file starts from the built-in elections.
pub fn sync(catalog_path: &Path, data_dir: &Path) -> CommandResult {
    let source = if catalog_path.exists() {
        Some(catalog_path)
    } else {
        None
    };
    let mut catalog = load_catalog(source)?;

    let mut updated = 0;
    let mut missing = 0;
    for config in catalog.elections.iter_mut() {
        let (level, year) = (config.level, config.year);
        for &granularity in &[Granularity::District, Granularity::Precinct] {
            let file = match config.datasets.get_mut(granularity) {
                Some(file) => file,
                None => continue,
            };
            let path = data_dir.join(&file.path);
            if !path.exists() {
                eprintln!(
                    "❌ {} {} {}: missing {}",
                    level,
                    year,
                    granularity,
                    path.display()
                );
                missing += 1;
                continue;
            }

            let digest = file_sha1(&path)?;
            match &file.sha1 {
                Some(existing) if *existing == digest => continue,
                Some(existing) => println!(
                    "🔄 {} changed: {} → {}",
                    file.path.bright_cyan(),
                    existing.dimmed(),
                    digest.bright_yellow()
                ),
                None => println!("➕ {} {}", file.path.bright_cyan(), digest.bright_yellow()),
            }
            file.sha1 = Some(digest);
            updated += 1;
        }
    }

    catalog.save(catalog_path)?;
    println!(
        "✅ Synced {}: {} updated, {} missing",
        catalog_path.display().to_string().bright_green(),
        updated.to_string().bright_green().bold(),
        missing.to_string().bright_red()
    );
    Ok(())
}
