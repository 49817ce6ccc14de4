//! # chatscope CLI
//!
//! Command-line interface for the chatscope library.

use std::fs;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatscope::cli::Args;
use chatscope::{AnalyzerConfig, ChatAnalyzer, ChatscopeError, Report};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatscopeError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    println!("💬 chatscope v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", args.output);
    if let Some(date) = args.reference_date {
        println!("📅 Pinned:  {}", date);
    }
    println!();

    println!("⏳ Reading transcript...");
    let text = fs::read_to_string(&args.input)?;

    let mut config = AnalyzerConfig::new();
    if let Some(date) = args.reference_date {
        config = config.with_reference_date(date);
    }

    println!("🔎 Analyzing...");
    let analyze_start = Instant::now();
    let report = ChatAnalyzer::with_config(config).analyze(&text)?;
    let analyze_time = analyze_start.elapsed();
    println!(
        "   Found {} messages ({:.2}s)",
        report.total_messages,
        analyze_time.as_secs_f64()
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    fs::write(&args.output, json)?;

    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done! Report saved to {}", args.output);

    if args.summary {
        print_summary(&report);
    }

    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = report.total_messages as f64 / total_time.as_secs_f64().max(f64::MIN_POSITIVE);
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}

/// Human-readable highlights of the report.
fn print_summary(report: &Report) {
    println!();
    println!("📊 Summary:");
    println!("   Messages:   {}", report.total_messages);
    println!("   Words:      {}", report.total_words);
    println!("   Authors:    {}", report.authors.len());
    println!("   Days:       {}", report.distinct_days);
    println!("   Msgs/day:   {:.1}", report.average_messages_per_day);
    if let Some(ref author) = report.most_active_author {
        println!("   Most active: {}", author);
    }
    if report.skipped_lines > 0 {
        println!("   Skipped:    {} lines", report.skipped_lines);
    }
    if !report.system_notes.is_empty() {
        println!("   Notes:      {} system lines", report.system_notes.len());
    }
    if let Some(ref gap) = report.biggest_time_stop {
        println!(
            "   Longest silence: {:.1}h ({} → {})",
            gap.gap_hours, gap.last_author, gap.next_author
        );
    }
    if report.response_times.sample_count > 0 {
        println!(
            "   Avg response: {:.0}s over {} samples",
            report.response_times.average_secs, report.response_times.sample_count
        );
    }
}
