//! Distributed portgroup NIC mover (dvsnic)

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use dvsnic::cli::{needs_password_prompt, password_prompt, Cli, Commands};
use dvsnic::commands::{HostCommand, VmCommand};
use vim_client::{VimClient, VimConfig};

async fn run(cli: &Cli) -> Result<()> {
    let mut config = VimConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    if needs_password_prompt(&config, std::io::stdin().is_terminal()) {
        let password = rpassword::prompt_password(password_prompt(&config))
            .context("Failed to read password")?;
        config.password = Some(password);
    }

    let mut client = VimClient::connect(&config)
        .await
        .with_context(|| format!("Failed to connect to {}:{}", config.host, config.port))?;

    let request = cli.request();
    let options = cli.run_options();
    let result = match cli.command {
        Commands::Vm { .. } => VmCommand::new(&client, cli.format)
            .execute(&request, options)
            .await
            .map(|_| ()),
        Commands::Host { .. } => HostCommand::new(&client, cli.format)
            .execute(&request, options)
            .await
            .map(|_| ()),
    };

    if let Err(err) = client.logout().await {
        log::warn!("Failed to log out of {}: {}", config.host, err);
    }
    result
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    // Handle errors with appropriate exit codes
    match run(&cli).await {
        Ok(()) => {
            if !cli.quiet {
                log::info!("Command completed successfully");
            }
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);

            // Print error chain if in verbose mode
            if cli.verbose || cli.debug {
                for cause in e.chain().skip(1) {
                    eprintln!("  Caused by: {}", cause);
                }
            }
            std::process::exit(1);
        }
    }
}
