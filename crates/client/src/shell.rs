//! Line-based terminal shell.
//!
//! Each line becomes one runtime command; what it means depends on what the
//! session is waiting for. Output is the ASCII maze plus one line per event.

use anyhow::Result;
use maze_core::{CoinReason, Direction, GameEvent, MoveReason, OPTION_LETTERS, Warning};
use maze_runtime::{CommandOutcome, Event, PhaseView, RuntimeHandle, SessionSnapshot, Topic};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

/// One interpreted line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Step(Direction),
    Answer(String),
    Override(bool),
    DebtRelief(bool),
    Regenerate,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    /// Interprets `line` against what `snapshot` is waiting for. An open
    /// question takes every line as an answer, so `a`..`d` pick options.
    pub fn parse(line: &str, snapshot: &SessionSnapshot) -> Self {
        let word = line.trim().to_ascii_lowercase();
        match word.as_str() {
            "quit" | "exit" => return Input::Quit,
            "help" | "?" => return Input::Help,
            _ => {}
        }

        match &snapshot.phase {
            PhaseView::AwaitingAnswer { .. } => return Input::Answer(line.trim().to_string()),
            PhaseView::AwaitingOverride { .. } => {
                if let Some(accept) = yes_no(&word) {
                    return Input::Override(accept);
                }
            }
            _ if snapshot.debt_relief_pending => {
                if let Some(accept) = yes_no(&word) {
                    return Input::DebtRelief(accept);
                }
            }
            _ => {}
        }

        match word.as_str() {
            "w" | "up" => Input::Step(Direction::Up),
            "a" | "left" => Input::Step(Direction::Left),
            "s" | "down" => Input::Step(Direction::Down),
            "d" | "right" => Input::Step(Direction::Right),
            "regen" => Input::Regenerate,
            _ => Input::Unknown(word),
        }
    }
}

fn yes_no(word: &str) -> Option<bool> {
    match word {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Player-facing line for an event, if it deserves one.
pub fn describe(event: &GameEvent) -> Option<String> {
    let line = match event {
        GameEvent::QuestionIssued { prompt, .. } => {
            let mut text = format!("\n{}\n", prompt.text);
            for (letter, option) in OPTION_LETTERS.iter().zip(&prompt.options) {
                text.push_str(&format!("  {letter}) {option}\n"));
            }
            text.push_str("Your answer:");
            text
        }
        GameEvent::AnswerEvaluated {
            correct,
            explanation,
        } => {
            let verdict = if *correct { "Correct!" } else { "Wrong." };
            if explanation.is_empty() {
                verdict.to_string()
            } else {
                format!("{verdict} {explanation}")
            }
        }
        GameEvent::CoinsChanged {
            delta,
            balance,
            reason,
        } => format!("{delta:+} coins ({}), balance {balance}", coin_reason(*reason)),
        GameEvent::OverrideOffered { cost, .. } => {
            format!("Pay {cost} coins to move anyway? (y/n)")
        }
        GameEvent::DebtReliefOffered { balance } => {
            format!("Your balance is {balance}. Reset it to 0? (y/n)")
        }
        GameEvent::MoveExecuted {
            reason: MoveReason::Retreat,
            to,
            ..
        } => format!("Sent back to {to}."),
        GameEvent::DeadEndMarked { position } => format!("{position} is now a dead end."),
        GameEvent::Warning(warning) => match warning {
            Warning::FalseExit => "This exit is fake! Answer more questions first.".into(),
            Warning::DeadEndBlocked => "Dead ends are closed now. Head for the exit.".into(),
            Warning::QuestionTimedOut => "Time is up, the question was dropped.".into(),
        },
        GameEvent::MazeRegenerated { size, .. } => format!("New {size}x{size} maze."),
        GameEvent::GameCompleted(summary) => format!(
            "Maze cleared on {}! Balance {}, bonus {}{}. Total coins: {}",
            summary.difficulty,
            summary.balance,
            summary.completion_bonus,
            if summary.all_clear_bonus > 0 {
                format!(" + all-clear {}", summary.all_clear_bonus)
            } else {
                String::new()
            },
            summary.total_coins
        ),
        GameEvent::PersistenceFailed(error) => format!("(progress not saved: {error})"),
        _ => return None,
    };
    Some(line)
}

fn coin_reason(reason: CoinReason) -> &'static str {
    match reason {
        CoinReason::CorrectAnswer => "correct answer",
        CoinReason::WrongAnswer => "wrong answer",
        CoinReason::Override => "override",
        CoinReason::DeadEnd => "dead end",
        CoinReason::CoinPickup => "coin",
        CoinReason::DebtRelief => "debt relief",
    }
}

const HELP: &str = "\
w/a/s/d or up/left/down/right  move
a-d or free text              answer an open question
y/n                           accept or decline an offer
regen                         new maze (keeps coins and questions)
quit                          leave";

fn print_status(snapshot: &SessionSnapshot) {
    print!("{}", snapshot.render());
    println!(
        "{} | balance {} | questions left {}",
        snapshot.difficulty, snapshot.balance, snapshot.remaining
    );
}

/// Drives the session from stdin until `quit`, end of input, or completion.
pub async fn run(handle: RuntimeHandle) -> Result<()> {
    // Timeout warnings arrive without any input, so they are read here too.
    let mut prompts = handle.subscribe(Topic::Prompt);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    print_status(&handle.snapshot().await?);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let snapshot = handle.snapshot().await?;
                let input = Input::parse(&line, &snapshot);
                tracing::debug!(?input, "Shell input");

                let outcome = match input {
                    Input::Quit => break,
                    Input::Help => {
                        println!("{HELP}");
                        continue;
                    }
                    Input::Unknown(word) => {
                        if !word.is_empty() {
                            println!("Unknown command '{word}'. Type 'help'.");
                        }
                        continue;
                    }
                    Input::Step(direction) => handle.step(direction).await?,
                    Input::Answer(raw) => handle.answer(raw).await?,
                    Input::Override(accept) => handle.resolve_override(accept).await?,
                    Input::DebtRelief(accept) => handle.resolve_debt_relief(accept).await?,
                    Input::Regenerate => handle.regenerate().await?,
                };
                // Prompt events of this command are printed from the outcome.
                drain(&mut prompts);

                match outcome {
                    CommandOutcome::Applied { events } => {
                        for line in events.iter().filter_map(describe) {
                            println!("{line}");
                        }
                    }
                    CommandOutcome::Ignored(reason) => println!("({reason})"),
                }

                let snapshot = handle.snapshot().await?;
                if !matches!(snapshot.phase, PhaseView::AwaitingAnswer { .. }) {
                    print_status(&snapshot);
                }
                if snapshot.is_complete() {
                    break;
                }
            }
            event = prompts.recv() => {
                if let Ok(Event::Game(event @ GameEvent::Warning(Warning::QuestionTimedOut))) = event
                    && let Some(line) = describe(&event)
                {
                    println!("{line}");
                    print_status(&handle.snapshot().await?);
                }
            }
        }
    }
    Ok(())
}

fn drain(receiver: &mut broadcast::Receiver<Event>) {
    while receiver.try_recv().is_ok() {}
}
