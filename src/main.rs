use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use galaxy_console::cli::Cli;
use galaxy_console::config::ConsoleConfigurator;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut configurator = ConsoleConfigurator::new(cli.into_raw_input())?;
    let config = configurator.configure()?;

    println!(
        "{} console on {} (announcements at {}, ping every {}s, logging to {})",
        "galaxy".green().bold(),
        config.host,
        config.announcement_url,
        config.ping_interval,
        config.log
    );

    Ok(())
}
