use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use nd_sdk::{DiffRequest, DiffService, DiffStats, EngineConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let service = DiffService::with_config(&config)?;

    match cli.command {
        Command::Diff(args) => cmd_diff(&service, args, cli.format),
        Command::Stats(args) => cmd_stats(&service, args, cli.format),
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn cmd_diff(service: &DiffService, args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let original = read_text(&args.original)?;
    let current = read_text(&args.current)?;
    let request = DiffRequest {
        key: args.key,
        include_content: args.content,
    };
    let stats = service
        .compute_diff_with(&original, &current, &request)
        .with_context(|| {
            format!(
                "failed to compare {} with {}",
                args.original.display(),
                args.current.display()
            )
        })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&*stats)?),
        OutputFormat::Text => print!("{}", render_diff(&stats)),
    }
    Ok(())
}

fn cmd_stats(service: &DiffService, args: StatsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let text = read_text(&args.file)?;
    // Comparing a text with itself takes the unchanged path and yields totals.
    let stats = service.compute_diff(&text, &text, None)?;

    match format {
        OutputFormat::Json => {
            let totals = serde_json::json!({
                "totalLines": stats.total_lines,
                "totalWords": stats.total_words,
                "totalChars": stats.total_chars,
            });
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
        OutputFormat::Text => print!("{}", render_totals(&stats)),
    }
    Ok(())
}

fn render_diff(stats: &DiffStats) -> String {
    let mut out = String::new();
    if stats.is_unchanged() {
        let _ = writeln!(out, "{}", "No changes.".green());
    } else {
        let _ = writeln!(
            out,
            "Lines: {} {} {}",
            format!("+{}", stats.lines_added).green(),
            format!("-{}", stats.lines_removed).red(),
            format!("~{}", stats.lines_modified).yellow(),
        );
        let _ = writeln!(
            out,
            "Words: {} {}",
            format!("+{}", stats.words_added).green(),
            format!("-{}", stats.words_removed).red(),
        );
        let _ = writeln!(
            out,
            "Chars: {} {}",
            format!("+{}", stats.chars_added).green(),
            format!("-{}", stats.chars_removed).red(),
        );
    }
    out.push_str(&render_totals(stats));

    if let Some(content) = &stats.diff_content {
        out.push('\n');
        for line in content.lines() {
            let colored = match line.chars().next() {
                Some('+') => line.green().to_string(),
                Some('-') => line.red().to_string(),
                _ => line.dimmed().to_string(),
            };
            let _ = writeln!(out, "{colored}");
        }
    }
    out
}

fn render_totals(stats: &DiffStats) -> String {
    format!(
        "{} {} lines, {} words, {} chars\n",
        "Total:".bold(),
        stats.total_lines,
        stats.total_words,
        stats.total_chars
    )
}
