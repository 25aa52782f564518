// SPDX-License-Identifier: MIT

//! `nsctl`: the control-socket client for `nsgod` (SPEC_FULL.md §6).
//!
//! A single-threaded runtime dispatches one subcommand and exits; there's no long-lived
//! daemon state here to justify the multi-threaded default the `#[tokio::main]` macro picks.

mod client;
mod commands;
mod error;
mod terminal;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use client::RpcClient;
use error::ClientError;

#[derive(Parser)]
#[command(name = "nsctl", about = "Control client for nsgod")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print this message
    Help,
    /// Print version
    Version,
    /// Monitor service's log
    Log { service: Option<String> },
    /// Show runtime status of services
    Status { service: Option<String> },
    /// Start service (configuration is read from stdin)
    Start { service: String },
    /// Send SIGTERM to service
    Stop { service: String },
    /// Send signal (number) to service
    Kill { service: String, signal: i32 },
    /// Erase service (must be exited state)
    Erase { service: String },
    /// Send text to service
    Send { service: String },
    /// Wait for service to stop, then erase it
    Wait { service: String },
    /// Attach stdin/stdout to service's pty
    Attach { service: String },
    /// Request daemon shutdown
    Shutdown,
}

fn api_addr() -> String {
    std::env::var("NSGOD_API").unwrap_or_else(|_| "ws+unix://nsgod.socket".to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        commands::help::run();
        return ExitCode::SUCCESS;
    };

    if matches!(command, Command::Help) {
        commands::help::run();
        return ExitCode::SUCCESS;
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(dispatch(command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ClientError::Remote(message)) => {
            println!("{message}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(command: Command) -> Result<(), ClientError> {
    let addr = api_addr();

    match command {
        Command::Help => Ok(()),
        Command::Version => {
            let mut client = RpcClient::connect(&addr).await?;
            commands::version::run(&mut client).await
        }
        Command::Log { service } => {
            let mut client = RpcClient::connect(&addr).await?;
            commands::log::run(&mut client, service).await
        }
        Command::Status { service } => {
            let mut client = RpcClient::connect(&addr).await?;
            commands::status::run(&mut client, service).await
        }
        Command::Start { service } => {
            let mut client = RpcClient::connect(&addr).await?;
            commands::start::run(&mut client, service).await
        }
        Command::Stop { service } => {
            let mut client = RpcClient::connect(&addr).await?;
            commands::stop::run(&mut client, service).await
        }
        Command::Kill { service, signal } => {
            let mut client = RpcClient::connect(&addr).await?;
            commands::kill::run(&mut client, service, signal).await
        }
        Command::Erase { service } => {
            let mut client = RpcClient::connect(&addr).await?;
            commands::erase::run(&mut client, service).await
        }
        Command::Send { service } => {
            let mut client = RpcClient::connect(&addr).await?;
            commands::send::run(&mut client, service).await
        }
        Command::Wait { service } => {
            let mut client = RpcClient::connect(&addr).await?;
            commands::wait::run(&mut client, service).await
        }
        Command::Attach { service } => {
            let client = RpcClient::connect(&addr).await?;
            commands::attach::run(client, service).await
        }
        Command::Shutdown => {
            let mut client = RpcClient::connect(&addr).await?;
            commands::shutdown::run(&mut client).await
        }
    }
}
