// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RuleCraft - chat with a rule-based assistant from your terminal
#[derive(Parser, Debug)]
#[command(name = "rulecraft")]
#[command(version, about = "Chat with a RuleCraft server from your terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides server.base_url)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session (default when no command given)
    Chat(ChatArgs),

    /// Send one message and print the reply
    Ask(AskArgs),

    /// Show or initialise the settings file
    #[command(alias = "settings")]
    Config(ConfigArgs),
}

/// Arguments for the chat subcommand
#[derive(clap::Args, Debug, Default)]
pub struct ChatArgs {
    /// Write the conversation as HTML to this file on exit
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,
}

/// Arguments for the ask subcommand
#[derive(clap::Args, Debug)]
pub struct AskArgs {
    /// The message to send; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

impl AskArgs {
    pub fn text(&self) -> String {
        self.message.join(" ")
    }
}

/// Arguments for the config subcommand
#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the effective settings as JSON (default)
    Show,
    /// Print the settings file path
    Path,
    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
