use super::{load_features, CommandResult, ViewArgs};
use colored::Colorize;
use election_map::reports::LegendReport;
use election_map::util::write_serialized;
use election_map::StyleEngine;
use instant::Instant;
use std::path::Path;

pub fn legend(input: Option<&Path>, output: Option<&Path>, args: &ViewArgs) -> CommandResult {
    let catalog = args.load_catalog()?;
    let engine = StyleEngine::new(&catalog, args.view_state());

    println!(
        "📊 Building legend for {}",
        engine.view().context.to_string().bright_cyan()
    );
    let (path, features) = load_features(input, args, &engine)?;
    println!("📂 Read {}", path.display().to_string().bright_cyan());
    let started = Instant::now();
    let report = LegendReport::build(&engine, &features);
    let elapsed = started.elapsed();

    for candidate in &report.candidates {
        let tiers = candidate
            .swatches
            .iter()
            .map(|s| s.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {} → {}", candidate.candidate.bold(), tiers);
    }
    for band in &report.bands {
        println!("  {} {}", band.color.dimmed(), band.label);
    }
    println!(
        "✅ {} candidates over {} features in {:.2} ms",
        report.candidates.len().to_string().bright_green().bold(),
        features.len(),
        elapsed.as_secs_f64() * 1000.0
    );

    if let Some(output) = output {
        write_serialized(output, &report)?;
        println!("📄 Wrote {}", output.display().to_string().bright_green());
    }
    Ok(())
}
