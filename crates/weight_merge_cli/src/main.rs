use clap::Parser;
use weight_merge_cli::{Cli, execute, init_tracing, summary_line};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let summary = execute(&cli)?;
    tracing::info!(users = summary.users, rows = summary.rows, "weight-merge: done");
    println!("{}", summary_line(&summary));
    Ok(())
}
