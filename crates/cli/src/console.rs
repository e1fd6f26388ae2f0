//! Terminal presentation: banner, target box and the colored report sink

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Local};
use colored::*;
use vibe_test_core::reporting::{NoteKind, ReportSink};

const BANNER: &str = r"
╦  ╦╦╔╗ ╔═╗  ╔╦╗╔═╗╔═╗╔╦╗
╚╗╔╝║╠╩╗║╣    ║ ║╣ ╚═╗ ║
 ╚╝ ╩╚═╝╚═╝   ╩ ╚═╝╚═╝ ╩
";

pub fn print_banner() {
    println!("{}", BANNER.cyan().bold());
    println!("{}", "  Testing suite that actually vibes".dimmed());
    println!();
}

/// Print the target and mode inside a rounded box
pub fn print_target_box(target: &str, mode: &str) {
    let lines = [
        (
            format!("Testing: {}", target),
            format!("{} {}", "Testing:".white().bold(), target.cyan()),
        ),
        (
            format!("Mode: {}", mode),
            format!("Mode: {}", mode).dimmed().to_string(),
        ),
    ];
    let width = lines
        .iter()
        .map(|(plain, _)| plain.chars().count())
        .max()
        .unwrap_or_default()
        + 2;

    let border = "─".repeat(width);
    let blank = " ".repeat(width);
    println!();
    println!(" {}", format!("╭{}╮", border).cyan());
    println!(" {}{}{}", "│".cyan(), blank, "│".cyan());
    for (plain, styled) in &lines {
        // One leading space plus content plus padding fills the inner width
        let padding = " ".repeat(width - 1 - plain.chars().count());
        println!(" {} {}{}{}", "│".cyan(), styled, padding, "│".cyan());
    }
    println!(" {}{}{}", "│".cyan(), blank, "│".cyan());
    println!(" {}", format!("╰{}╯", border).cyan());
    println!();
}

/// Colored terminal renderer for run events
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for ConsoleReporter {
    fn run_started(&self, _target: &str, started_at: DateTime<Local>) {
        println!();
        println!(
            "{}",
            format!("Starting tests at {}", started_at.format("%H:%M:%S")).dimmed()
        );
        println!();
    }

    fn default_suite(&self) {
        println!(
            "{}",
            "No tests specified. Running quick default suite...".yellow()
        );
        println!();
    }

    fn section(&self, title: &str) {
        println!();
        println!("{}", title.cyan().bold());
        println!();
    }

    fn task_started(&self, description: &str) {
        // Finished line overwrites this one
        print!("{} {}", "◌".cyan(), description);
        if let Err(e) = std::io::stdout().flush() {
            tracing::debug!("Failed to flush task status line: {}", e);
        }
    }

    fn task_finished(&self, description: &str, success: bool) {
        if success {
            println!("\r{} {}", "✔".green().bold(), description.green());
        } else {
            println!("\r{} {}", "✖".red().bold(), description.red());
        }
    }

    fn output(&self, text: &str) {
        println!("{}", text.dimmed());
    }

    fn warning(&self, text: &str) {
        println!("{}", "⚠️  Warnings:".yellow());
        println!("{}", text.dimmed());
    }

    fn error_output(&self, text: &str) {
        println!("{}", text.red());
    }

    fn note(&self, kind: NoteKind, text: &str) {
        match kind {
            NoteKind::Artifact => {
                println!();
                println!("{}", format!("📊 {}", text).green());
            }
            NoteKind::Hint => println!("   {}", text.dimmed()),
            NoteKind::Label => {
                println!();
                println!("{}", format!("📊 {}", text).cyan());
            }
        }
    }

    fn run_finished(&self, duration: Duration) {
        println!();
        println!(
            "{}",
            format!("Completed in {:.2}s", duration.as_secs_f64()).dimmed()
        );
    }
}
