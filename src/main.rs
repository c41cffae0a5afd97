use anyhow::Result;
use clap::{CommandFactory, Parser};

mod cli;
mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let Some(command) = args.command.clone() else {
        cli::Cli::command().print_help()?;
        return Ok(());
    };

    // Start installs tracing itself once the configured level and format are known
    if !matches!(command, cli::Commands::Start { .. }) {
        school_booking::init_tracing("warn", "text");
    }

    match command {
        cli::Commands::Start { host, port } => {
            commands::start::execute(&args.config, host, port).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Version => {
            println!("School Booking v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
