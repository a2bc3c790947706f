// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! RuleCraft - chat with a rule-based assistant from your terminal
//!
//! Entry point for the rulecraft CLI application.

use std::path::Path;
use std::sync::{Arc, Mutex};

use clap::Parser;

use rulecraft::chat::{
    sanitize_for_terminal, ChatController, ReplyDelay, SendOutcome, SendState, SubmitOutcome,
};
use rulecraft::cli::{AskArgs, ChatArgs, Cli, Commands, ConfigArgs, ConfigCommand};
use rulecraft::client::HttpTransport;
use rulecraft::config::Settings;
use rulecraft::error::{Result, RuleCraftError};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Chat(_)));
    init_tracing(cli.verbose, interactive);

    let settings_path = cli.config.unwrap_or_else(Settings::default_path);
    let server = cli.server.as_deref();

    match cli.command {
        None => run_chat(ChatArgs::default(), load_settings(&settings_path, server)?).await,
        Some(Commands::Chat(args)) => run_chat(args, load_settings(&settings_path, server)?).await,
        Some(Commands::Ask(args)) => {
            let succeeded = run_ask(args, load_settings(&settings_path, server)?).await?;
            if !succeeded {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Config(args)) => run_config(args, &settings_path, server),
    }
}

/// Initialize tracing.
///
/// The interactive UI owns the terminal, so its logs go to a file instead of
/// stderr.
fn init_tracing(verbose: u8, interactive: bool) {
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    if verbose > 0 {
        let directive = if verbose > 1 {
            "rulecraft=trace"
        } else {
            "rulecraft=debug"
        };
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    if interactive {
        if let Some(file) = open_log_file() {
            builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
            return;
        }
        // No log file available: stay quiet rather than draw over the UI
        builder.with_writer(std::io::sink).init();
        return;
    }
    builder.with_writer(std::io::stderr).init();
}

fn open_log_file() -> Option<std::fs::File> {
    Settings::ensure_directories().ok()?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(Settings::log_path())
        .ok()
}

/// Load settings from `path` and apply the `--server` override.
fn load_settings(path: &Path, server: Option<&str>) -> Result<Settings> {
    Settings::load_from(path)?.with_server_override(server)
}

/// Run interactive chat mode
async fn run_chat(args: ChatArgs, settings: Settings) -> Result<()> {
    let transport = HttpTransport::new(&settings.server)?;
    let controller = ChatController::from_settings(&settings);
    rulecraft::tui::run_chat_tui(controller, Arc::new(transport), args.transcript).await
}

/// Send one message and print the reply. Returns false if the send failed.
async fn run_ask(args: AskArgs, settings: Settings) -> Result<bool> {
    let transport = HttpTransport::new(&settings.server)?;
    let mut controller =
        ChatController::from_settings(&settings).with_reply_delay(ReplyDelay::none());

    let ticket = match controller.submit_text(&args.text()) {
        SubmitOutcome::Started(ticket) => ticket,
        _ => {
            return Err(RuleCraftError::InvalidInput(
                "message is empty".to_string(),
            ))
        }
    };
    controller.drive(&transport, ticket).await;

    let reply = controller
        .ui()
        .log
        .last()
        .map(|bubble| sanitize_for_terminal(&bubble.raw_text()))
        .unwrap_or_default();

    match controller.send_state() {
        SendState::Done {
            outcome: SendOutcome::Failed,
            ..
        } => {
            eprintln!("{}", reply);
            if let Some(error) = controller.last_error() {
                eprintln!("{}", error);
            }
            Ok(false)
        }
        _ => {
            println!("{}", reply);
            Ok(true)
        }
    }
}

fn run_config(args: ConfigArgs, path: &Path, server: Option<&str>) -> Result<()> {
    match args.command.unwrap_or(ConfigCommand::Show) {
        ConfigCommand::Show => {
            let settings = load_settings(path, server)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigCommand::Path => {
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            init_settings(path, force)?;
            println!("Wrote default settings to {}", path.display());
        }
    }
    Ok(())
}

fn init_settings(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(RuleCraftError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Settings::default().save_to(path)
}
