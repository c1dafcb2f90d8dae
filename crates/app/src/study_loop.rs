//! Line-oriented study screen.
//!
//! Reads one command per line from `input` and redraws the current card to
//! `out` after each one. Rejected commands print a notice and the loop keeps
//! going.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use flash_core::model::Role;
use flash_core::{AnswerStatus, Score};
use services::{StudyError, StudyService, StudySession};

const HELP: &str = "commands: n(ext) p(rev) f(lip) a(nswer) <text> d(elete) r(eload) done q(uit) h(elp)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyCommand {
    Next,
    Previous,
    Flip,
    Answer(String),
    Delete,
    Reload,
    Finish,
    Quit,
    Help,
}

impl FromStr for StudyCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match word.to_ascii_lowercase().as_str() {
            "n" | "next" => Ok(Self::Next),
            "p" | "prev" | "previous" => Ok(Self::Previous),
            "f" | "flip" => Ok(Self::Flip),
            "a" | "answer" => Ok(Self::Answer(rest.to_owned())),
            "d" | "delete" => Ok(Self::Delete),
            "r" | "reload" => Ok(Self::Reload),
            "done" | "finish" => Ok(Self::Finish),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            "h" | "help" | "?" => Ok(Self::Help),
            other => Err(format!("unknown command `{other}`")),
        }
    }
}

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyOutcome {
    Finished(Score),
    Quit,
}

/// Drive `study` from `input` until the pass is finished, the user quits, or
/// input runs out.
///
/// # Errors
///
/// Only I/O errors on `input`/`out` end the loop with an error.
pub async fn run_study<R: BufRead, W: Write>(
    service: &StudyService,
    study: &mut StudySession,
    input: R,
    out: &mut W,
) -> Result<StudyOutcome> {
    render(study, out)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<StudyCommand>() {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "! {msg}")?;
                writeln!(out, "{HELP}")?;
                continue;
            }
        };

        let result = match command {
            StudyCommand::Quit => return Ok(StudyOutcome::Quit),
            StudyCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            StudyCommand::Finish => match study.finish() {
                Ok(score) => {
                    render_finished(study, score, out)?;
                    return Ok(StudyOutcome::Finished(score));
                }
                Err(err) => Err(err),
            },
            StudyCommand::Next => study.next().map(drop),
            StudyCommand::Previous => study.previous().map(drop),
            StudyCommand::Flip => study.flip_current().map(drop),
            StudyCommand::Answer(text) => {
                study.set_draft(text);
                study.submit_answer().map(drop)
            }
            StudyCommand::Delete => {
                let index = study.navigator().cursor();
                service.delete_card(study, index).await.map(|removed| {
                    tracing::debug!(question = removed.question(), "card removed from view");
                })
            }
            StudyCommand::Reload => service.reload(study).await,
        };

        if let Err(err) = result {
            writeln!(out, "! {}", notice(&err))?;
        }
        render(study, out)?;
    }
    Ok(StudyOutcome::Quit)
}

fn notice(err: &StudyError) -> String {
    match err {
        StudyError::Storage(inner) => format!("could not save changes: {inner}"),
        other => other.to_string(),
    }
}

fn render<W: Write>(study: &StudySession, out: &mut W) -> Result<()> {
    let nav = study.navigator();
    let role = study.session().role();

    let Some(card) = nav.current_card() else {
        let hint = if role == Role::Editor {
            "Create your first one!"
        } else {
            "Ask an admin to add some!"
        };
        writeln!(out, "No flashcards yet. {hint}")?;
        return Ok(());
    };

    let index = nav.cursor();
    writeln!(out, "[{}/{}] Q: {}", index + 1, nav.len(), card.question())?;
    if nav.is_flipped(index) {
        writeln!(out, "      A: {}", card.answer())?;
    }
    if let (Some(typed), Some(status)) = (nav.recorded_answer(index), nav.answer_status(index)) {
        let badge = match status {
            AnswerStatus::Correct => "correct",
            AnswerStatus::Incorrect => "incorrect",
        };
        writeln!(out, "      you answered: {typed} ({badge})")?;
    }
    if role.is_learner() {
        let score = nav.score();
        if let Some(pct) = score.percent() {
            writeln!(out, "Score: {}/{} ({pct}%)", score.correct, score.total)?;
        }
    }
    if nav.is_last() {
        writeln!(out, "(last card, type `done` to finish)")?;
    }
    Ok(())
}

fn render_finished<W: Write>(study: &StudySession, score: Score, out: &mut W) -> Result<()> {
    writeln!(out, "Congratulations! You have completed all the flashcards.")?;
    if study.session().role().is_learner() {
        if let Some(pct) = score.percent() {
            writeln!(out, "Final score: {}/{} ({pct}%)", score.correct, score.total)?;
        }
    }
    Ok(())
}
