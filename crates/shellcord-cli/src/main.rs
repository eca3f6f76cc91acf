mod cmd_generate;
mod cmd_record;
mod cmd_tag;
mod error;
mod settings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cmd_tag::TagCmd;
use crate::error::CliError;
use crate::settings::{Settings, ENV_DEBUG, ENV_LAST_SCORD_ID, ENV_LOG_FILE};

#[derive(Parser)]
#[command(
    name = "shellcord",
    version,
    about = "Turn recorded shell sessions into markdown runbooks"
)]
struct Cli {
    /// The scord log file. If unset, `generate` uses the newest scord-log-*.json in the working directory
    #[arg(long, global = true, env = ENV_LOG_FILE)]
    log_file: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Force debug logging (also enabled by SCORD_DEBUG=1)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a markdown runbook from a scord log
    Generate {
        /// Where to write the runbook (defaults to scord-runbook-<session>.md)
        #[arg(long)]
        out_file: Option<PathBuf>,
        /// Exit code that counts as success (repeatable, defaults to 0)
        #[arg(long = "allow-exit-code", allow_negative_numbers = true)]
        allow_exit_codes: Vec<i64>,
        /// Leave commands with a disallowed exit code out of the runbook
        #[arg(long)]
        omit_failed: bool,
    },
    /// Attach a label to a command
    Tag {
        #[command(subcommand)]
        cmd: TagCmd,
    },
    /// Append an executed command to the scord log (used by the shell hook)
    Record {
        /// Identifier of the command: scord-<session>-<command>
        #[arg(long)]
        scord_id: String,
        /// Exit status of the command
        #[arg(long, allow_negative_numbers = true)]
        exit_code: i64,
        /// The command text (after --)
        #[arg(last = true)]
        argv: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let debug_env = std::env::var(ENV_DEBUG).ok();
    Settings::new(&cli.log_level, cli.debug, debug_env.as_deref()).init_logging();

    let cwd = std::env::current_dir()?;
    let log_file = cli.log_file.as_deref();

    match cli.cmd {
        Command::Generate {
            out_file,
            allow_exit_codes,
            omit_failed,
        } => {
            cmd_generate::execute(&cmd_generate::GenerateParams {
                cwd: &cwd,
                log_file,
                out_file: out_file.as_deref(),
                allowed_exit_codes: &allow_exit_codes,
                omit_failed,
            })?;
            Ok(())
        }
        Command::Tag { cmd } => {
            let last_scord_id = std::env::var(ENV_LAST_SCORD_ID).ok();
            cmd_tag::run(cmd, log_file, last_scord_id.as_deref())
        }
        Command::Record {
            scord_id,
            exit_code,
            argv,
        } => {
            let log_file = log_file.ok_or(CliError::MissingLogFile)?;
            cmd_record::execute(log_file, &scord_id, exit_code, &argv)
        }
    }
}
