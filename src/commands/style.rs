use super::{load_features, CommandResult, ViewArgs};
use colored::Colorize;
use election_map::reports::StyleReport;
use election_map::util::write_serialized;
use election_map::StyleEngine;
use instant::Instant;
use std::path::Path;

pub fn style(input: Option<&Path>, output: &Path, args: &ViewArgs) -> CommandResult {
    let catalog = args.load_catalog()?;
    let engine = StyleEngine::new(&catalog, args.view_state());
    let context = engine.view().context;

    println!(
        "🎨 Styling {} ({})",
        context.to_string().bright_cyan(),
        engine.view().mode.to_string().bright_cyan()
    );
    if engine.config().is_none() {
        eprintln!(
            "{}",
            format!("⚠️  {} is not in the catalog, every feature is neutral", context).yellow()
        );
    }

    let (path, features) = load_features(input, args, &engine)?;
    println!("📂 Read {}", path.display().to_string().bright_cyan());
    let started = Instant::now();
    let report = StyleReport::build(&engine, &features);
    let elapsed = started.elapsed();

    let with_winner = report
        .features
        .iter()
        .filter(|f| f.advantage.is_some())
        .count();
    write_serialized(output, &report)?;

    println!(
        "✅ Styled {} features ({} with a winner) in {:.2} ms",
        report.features.len().to_string().bright_green().bold(),
        with_winner.to_string().bright_yellow(),
        elapsed.as_secs_f64() * 1000.0
    );
    println!("📄 Wrote {}", output.display().to_string().bright_green());
    Ok(())
}
