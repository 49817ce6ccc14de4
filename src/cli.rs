//! Command-line interface definition using clap.
//!
//! This module defines [`Args`], the argument structure for the `chatscope`
//! binary. The library itself never parses arguments; the binary feeds an
//! [`Args`] value into the pipeline.

use clap::Parser;

/// Analyze a plain-text chat export and produce a JSON statistics report.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatscope")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatscope chat.txt
    chatscope chat.txt -o stats.json --pretty
    chatscope chat.txt --summary
    chatscope chat.txt --reference-date 2024-06-01")]
pub struct Args {
    /// Path to the exported transcript (plain text)
    pub input: String,

    /// Path to the JSON report
    #[arg(short, long, default_value = "report.json")]
    pub output: String,

    /// Pretty-print the JSON report
    #[arg(short, long)]
    pub pretty: bool,

    /// Print a human-readable summary after writing the report
    #[arg(short, long)]
    pub summary: bool,

    /// Pin "today" for date plausibility checks (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub reference_date: Option<chrono::NaiveDate>,
}
