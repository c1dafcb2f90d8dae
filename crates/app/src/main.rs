//! `flashcards` - study and manage flashcard decks from the terminal.

#![forbid(unsafe_code)]

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use flash_core::model::{Card, CardDraft, Session};
use services::AppServices;

use app::cli::{Cli, Command, Credentials, UserDeckAction};
use app::db::{normalize_sqlite_url, prepare_sqlite_file};
use app::study_loop::{StudyOutcome, run_study};
use app::{AppConfig, init_logging};

const DEMO_CARDS: [(&str, &str); 4] = [
    ("What is the capital of France?", "Paris"),
    ("How many legs does a spider have?", "8"),
    ("What is the chemical symbol for gold?", "Au"),
    ("Which planet is known as the red planet?", "Mars"),
];

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let config = AppConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    let raw_url = cli.db.as_deref().unwrap_or(&config.storage.database_url);
    let db_url = normalize_sqlite_url(raw_url);
    prepare_sqlite_file(&db_url)?;
    tracing::debug!(db_url = %db_url, "opening database");

    let services = AppServices::new_sqlite(&db_url, config.auth)
        .await
        .with_context(|| format!("opening {db_url}"))?;

    match cli.command {
        Command::Study(login) => study(&services, &login).await,
        Command::AddCard {
            login,
            question,
            answer,
        } => {
            let session = login_as(&services, &login)?;
            let cards = services
                .cards()
                .add_shared_card(&session, CardDraft::new(question, answer))
                .await?;
            println!("Added card #{} to the shared deck.", cards.len());
            services.auth().logout(session);
            Ok(())
        }
        Command::Cards(login) => {
            let session = login_as(&services, &login)?;
            let cards = services.cards().list_shared_cards().await?;
            print_cards(&cards);
            services.auth().logout(session);
            Ok(())
        }
        Command::AddUser { login, name } => {
            let session = login_as(&services, &login)?;
            let users = services.users().add_user(&session, &name).await?;
            println!("Registered {} ({} users).", name.trim().to_lowercase(), users.len());
            services.auth().logout(session);
            Ok(())
        }
        Command::Users(login) => {
            let session = login_as(&services, &login)?;
            let users = services.users().list_users(&session).await?;
            if users.is_empty() {
                println!("No users registered.");
            }
            for user in &users {
                println!("{user}");
            }
            services.auth().logout(session);
            Ok(())
        }
        Command::UserDeck {
            login,
            owner,
            action,
        } => {
            let session = login_as(&services, &login)?;
            let decks = services.user_decks();
            let cards = match action {
                UserDeckAction::List => decks.list(&session, &owner).await?,
                UserDeckAction::Add { question, answer } => {
                    decks
                        .add_card(&session, &owner, CardDraft::new(question, answer))
                        .await?
                }
                UserDeckAction::Delete { index } => {
                    decks.delete_card(&session, &owner, index).await?
                }
            };
            print_cards(&cards);
            services.auth().logout(session);
            Ok(())
        }
        Command::Seed(login) => {
            let session = login_as(&services, &login)?;
            let mut total = 0;
            for (question, answer) in DEMO_CARDS {
                total = services
                    .cards()
                    .add_shared_card(&session, CardDraft::new(question, answer))
                    .await?
                    .len();
            }
            println!("Seeded {} cards; the shared deck now has {total}.", DEMO_CARDS.len());
            services.auth().logout(session);
            Ok(())
        }
    }
}

fn login_as(services: &AppServices, login: &Credentials) -> Result<Session> {
    let session = services
        .auth()
        .login(&login.user, &login.password, login.role)?;
    Ok(session)
}

async fn study(services: &AppServices, login: &Credentials) -> Result<()> {
    let session = login_as(services, login)?;
    let study_service = services.study();
    let mut study = study_service.start(session).await?;
    println!(
        "Welcome, {}! Type `h` for commands.",
        study.session().username()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let outcome = run_study(&study_service, &mut study, stdin.lock(), &mut stdout).await?;
    stdout.flush()?;

    if outcome == StudyOutcome::Quit {
        println!("Goodbye.");
    }
    services.auth().logout(study.into_session());
    Ok(())
}

fn print_cards(cards: &[Card]) {
    if cards.is_empty() {
        println!("No flashcards yet.");
        return;
    }
    for (index, card) in cards.iter().enumerate() {
        println!("{index:>3}. {}  ->  {}", card.question(), card.answer());
    }
}
