use anyhow::Result;
use colored::*;
use vibe_test_core::configs::VibeConfig;
use vibe_test_core::execution::{ShellExecutor, TaskRunner};
use vibe_test_core::selection::RunOptions;

use crate::console::{print_target_box, ConsoleReporter};

pub async fn execute(target: &str, options: &RunOptions, config: &VibeConfig) -> Result<()> {
    let mode = if options.all { "Complete" } else { "Custom" };
    print_target_box(target, mode);

    let executor = ShellExecutor::new();
    let reporter = ConsoleReporter::new();

    TaskRunner::new(config, &executor, &reporter)
        .run(target, options)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run tests: {}", e))?;

    println!();
    println!("{}", "✨ All tests complete! ✨".green().bold());
    println!();

    Ok(())
}
