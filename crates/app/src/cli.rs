//! Argument parsing for the `flashcards` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use flash_core::model::Role;

use crate::logging::Verbosity;

/// flashcards - study and manage question/answer decks
#[derive(Debug, Parser)]
#[command(name = "flashcards")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a configuration file (default: ./flashcards.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database URL, overrides the configured one
    #[arg(long, global = true, value_name = "URL")]
    pub db: Option<String>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

/// Login triple shared by every command.
#[derive(Debug, Clone, Args)]
pub struct Credentials {
    /// Username (case and surrounding spaces are ignored)
    #[arg(short, long)]
    pub user: String,

    /// Password for the selected role
    #[arg(short, long, env = "FLASHCARDS_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Role to log in as: user, admin or superadmin
    #[arg(short, long, default_value = "user")]
    pub role: Role,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Study the deck interactively
    Study(Credentials),

    /// Add a card to the shared deck (admin or superadmin)
    AddCard {
        #[command(flatten)]
        login: Credentials,
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
    },

    /// List the shared deck in stored order
    Cards(Credentials),

    /// Register a username (superadmin)
    AddUser {
        #[command(flatten)]
        login: Credentials,
        /// Username to register
        name: String,
    },

    /// List registered usernames (superadmin)
    Users(Credentials),

    /// Manage one user's personal deck (superadmin)
    UserDeck {
        #[command(flatten)]
        login: Credentials,
        /// Whose deck to manage
        #[arg(long)]
        owner: String,
        #[command(subcommand)]
        action: UserDeckAction,
    },

    /// Write a few demo cards to the shared deck (admin or superadmin)
    Seed(Credentials),
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserDeckAction {
    /// Show the deck with indices
    List,
    /// Append a card
    Add {
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
    },
    /// Remove the card at a zero-based index
    Delete { index: usize },
}
