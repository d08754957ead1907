//! Command-line definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dvs_nic_core::{MoveRequest, RunOptions};
use vim_client::VimConfig;

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "dvsnic")]
#[command(about = "Move VM network adapters between distributed portgroups")]
#[command(version, disable_version_flag = true)]
#[command(long_about = "
Distributed portgroup NIC mover

Moves one numbered network adapter of a virtual machine, or of every
virtual machine registered on a host, onto a distributed virtual portgroup.
Connection settings come from /etc/dvsnic/dvsnic.toml or ./dvsnic.toml,
then DVSNIC_* environment variables, then the flags below.

Examples:
  dvsnic -s vc01 -u admin vm --vmname web01 --unitnumber 1 --portgroup PG-B
  dvsnic host --hostname esx01 --unitnumber 1 --portgroup PG-B
  dvsnic --dry-run --format json vm -n web01 -m 2 -g PG-B
  dvsnic host -n esx01 -m 1 -g PG-B --continue-on-error
")]
pub struct Cli {
    /// Management endpoint to connect to
    #[arg(short = 's', long, global = true)]
    pub host: Option<String>,

    /// Port to connect on
    #[arg(short = 'o', long, global = true)]
    pub port: Option<u16>,

    /// User name to use when connecting
    #[arg(short = 'u', long, global = true)]
    pub user: Option<String>,

    /// Password to use when connecting
    #[arg(short = 'p', long, global = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Show the edit that would be submitted without reconfiguring anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Move a network adapter of one virtual machine
    Vm {
        /// Virtual machine display name
        #[arg(short = 'n', long)]
        vmname: String,

        /// Network adapter number, as in "Network adapter <N>"
        #[arg(short = 'm', long)]
        unitnumber: u32,

        /// Target distributed portgroup name
        #[arg(short = 'g', long)]
        portgroup: String,
    },

    /// Move a network adapter of every virtual machine on a host
    Host {
        /// Host display name
        #[arg(short = 'n', long)]
        hostname: String,

        /// Network adapter number, as in "Network adapter <N>"
        #[arg(short = 'm', long)]
        unitnumber: u32,

        /// Target distributed portgroup name
        #[arg(short = 'g', long)]
        portgroup: String,

        /// Keep going when a VM fails and report it at the end
        #[arg(long)]
        continue_on_error: bool,
    },
}

impl Cli {
    /// Filter for env_logger when RUST_LOG is unset
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Layer connection flags over the loaded configuration
    pub fn apply_overrides(&self, config: &mut VimConfig) {
        if let Some(ref host) = self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(ref user) = self.user {
            config.user = user.clone();
        }
        if let Some(ref password) = self.password {
            config.password = Some(password.clone());
        }
        if self.insecure {
            config.insecure = true;
        }
    }

    pub fn request(&self) -> MoveRequest {
        let (target, adapter, portgroup) = match &self.command {
            Commands::Vm {
                vmname,
                unitnumber,
                portgroup,
            } => (vmname, unitnumber, portgroup),
            Commands::Host {
                hostname,
                unitnumber,
                portgroup,
                ..
            } => (hostname, unitnumber, portgroup),
        };
        MoveRequest {
            target: target.clone(),
            adapter: *adapter,
            portgroup: portgroup.clone(),
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run,
            continue_on_error: matches!(
                self.command,
                Commands::Host {
                    continue_on_error: true,
                    ..
                }
            ),
        }
    }
}

/// Ask for the password only when nothing supplied one and someone is at
/// the terminal to answer
pub fn needs_password_prompt(config: &VimConfig, interactive: bool) -> bool {
    interactive && config.password.is_none()
}

pub fn password_prompt(config: &VimConfig) -> String {
    format!(
        "Enter password for host {} and user {}: ",
        config.host, config.user
    )
}
