use std::path::Path;

use anyhow::Context;
use colored::{ColoredString, Colorize};
use sidediff_core::{
    compute_line_information_from_bytes, fold_unchanged, ComputedLineInformation, DiffConfig,
    DiffInformation, DiffType, DiffValue, DisplayBlock, LineInformation, SkippedBlock,
};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli { command, format, config, .. } = cli;
    let config = match config {
        Some(path) => DiffConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DiffConfig::default(),
    };
    match command {
        Command::Diff(args) => cmd_diff(args, config, &format),
        Command::Stats(args) => cmd_stats(args, config, &format),
    }
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read input");
    Ok(data)
}

fn compute(old: &Path, new: &Path, config: &DiffConfig) -> anyhow::Result<ComputedLineInformation> {
    let old_data = read_input(old)?;
    let new_data = read_input(new)?;
    let computed = compute_line_information_from_bytes(&old_data, &new_data, &config.compute_options())
        .with_context(|| format!("failed to compare {} and {}", old.display(), new.display()))?;
    Ok(computed)
}

fn apply_diff_args(config: &mut DiffConfig, args: &DiffArgs) {
    if let Some(method) = args.method {
        config.compare_method = method;
    }
    if args.no_word_diff {
        config.disable_word_diff = true;
    }
    if let Some(offset) = args.offset {
        config.line_number_offset = offset;
    }
    if let Some(context) = args.context {
        config.extra_lines_surrounding_diff = context;
    }
    if args.all {
        config.show_diff_only = false;
    }
}

fn cmd_diff(args: DiffArgs, mut config: DiffConfig, format: &OutputFormat) -> anyhow::Result<()> {
    apply_diff_args(&mut config, &args);
    let computed = compute(&args.old, &args.new, &config)?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&computed)?);
        return Ok(());
    }

    if computed.is_unchanged() {
        println!("No changes.");
        return Ok(());
    }

    let blocks = if config.show_diff_only {
        fold_unchanged(&computed, &config.fold_options())
    } else {
        (0..computed.line_information.len()).map(DisplayBlock::Row).collect()
    };
    for block in blocks {
        match block {
            DisplayBlock::Row(index) => println!("{}", format_row(&computed.line_information[index])),
            DisplayBlock::Skipped(skipped) => println!("{}", format_skipped(&skipped)),
        }
    }
    Ok(())
}

fn cmd_stats(args: StatsArgs, mut config: DiffConfig, format: &OutputFormat) -> anyhow::Result<()> {
    if let Some(method) = args.method {
        config.compare_method = method;
    }
    let stats = compute(&args.old, &args.new, &config)?.stats();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => println!(
            "{} additions, {} deletions, {} modified",
            format!("+{}", stats.additions).green(),
            format!("-{}", stats.deletions).red(),
            format!("~{}", stats.modifications).yellow(),
        ),
    }
    Ok(())
}

fn format_skipped(skipped: &SkippedBlock) -> String {
    let position = match (skipped.left_line_number, skipped.right_line_number) {
        (Some(left), Some(right)) => format!(" at {left}/{right}"),
        _ => String::new(),
    };
    format!("@@ {} unchanged lines{} @@", skipped.count, position)
        .cyan()
        .to_string()
}

fn format_row(row: &LineInformation) -> String {
    format!("{} | {}", format_side(row.left.as_ref()), format_side(row.right.as_ref()))
}

fn format_side(side: Option<&DiffInformation>) -> String {
    let Some(side) = side else {
        return format!("{:>5}   ", "");
    };
    let number = side
        .line_number
        .map(|n| n.to_string())
        .unwrap_or_default();
    let marker = match side.diff_type {
        DiffType::Default => " ",
        DiffType::Added => "+",
        DiffType::Removed => "-",
    };
    let text: String = match &side.value {
        DiffValue::Text(text) => paint(side.diff_type, text, false).to_string(),
        DiffValue::Segments(segments) => segments
            .iter()
            .map(|segment| paint(side.diff_type, &segment.text(), segment.diff_type.is_changed()).to_string())
            .collect(),
    };
    format!("{:>5} {} {}", number.dimmed(), marker, text)
}

fn paint(diff_type: DiffType, text: &str, emphasize: bool) -> ColoredString {
    let painted = match diff_type {
        DiffType::Default => text.normal(),
        DiffType::Added => text.green(),
        DiffType::Removed => text.red(),
    };
    if emphasize {
        painted.bold().underline()
    } else {
        painted
    }
}
