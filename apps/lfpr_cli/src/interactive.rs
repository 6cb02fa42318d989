//! Interactive session: stdin lines become form events while a prediction
//! request may be pending in the background.

use std::io::Write;

use anyhow::Result;
use client_core::{
    spawn_request, Dispatch, FormController, FormEvent, Key, KeyEvent, PredictionService,
    SubmitBlocked,
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
};
use tracing::{debug, warn};

use crate::terminal::TerminalView;

pub const HELP: &str = "\
commands:
  set <field> <value>   change a field (value may be empty)
  blur <field>          leave a field, running its validation
  submit                submit the form
  ctrl+enter            keyboard shortcut for submit
  esc                   hide the results
  reset                 restore default values
  sample                load sample data
  show                  print the form
  help                  print this help
  quit                  leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(FormEvent),
    Show,
    Help,
    Quit,
    Noop,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => Command::Noop,
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if field.is_empty() {
                return Err("usage: set <field> <value>".into());
            }
            Command::Event(FormEvent::Input {
                field: field.to_string(),
                value: value.trim().to_string(),
            })
        }
        "blur" => {
            if rest.is_empty() {
                return Err("usage: blur <field>".into());
            }
            Command::Event(FormEvent::Blur {
                field: rest.to_string(),
            })
        }
        "submit" => Command::Event(FormEvent::Submit),
        "ctrl+enter" | "cmd+enter" => Command::Event(FormEvent::Key(KeyEvent::ctrl(Key::Enter))),
        "esc" | "escape" => Command::Event(FormEvent::Key(KeyEvent::plain(Key::Escape))),
        "reset" => Command::Event(FormEvent::Reset),
        "sample" => Command::Event(FormEvent::LoadSample),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}'; type 'help'")),
    };
    Ok(command)
}

/// Runs until `quit` or end of input. A request still pending at end of input
/// is awaited so its result is rendered.
pub async fn run<W, S, R>(
    controller: &mut FormController<TerminalView<W>, S>,
    input: R,
) -> Result<()>
where
    W: Write,
    S: PredictionService + ?Sized + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();

    loop {
        tokio::select! {
            Some(outcome) = outcome_rx.recv() => {
                controller.finish_submit(outcome);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        print_line(controller, &message);
                        continue;
                    }
                };
                match command {
                    Command::Event(event) => match controller.dispatch(event) {
                        Dispatch::Request(payload) => {
                            spawn_request(controller.service(), payload, outcome_tx.clone());
                        }
                        Dispatch::Blocked(SubmitBlocked::InFlight) => {
                            print_line(controller, "A prediction is already in progress.");
                        }
                        Dispatch::Blocked(SubmitBlocked::Invalid(fields)) => {
                            let message =
                                format!("Fix the highlighted fields first: {}", fields.join(", "));
                            print_line(controller, &message);
                        }
                        Dispatch::Handled | Dispatch::Validated(_) => {}
                    },
                    Command::Show => {
                        let schema = controller.schema().clone();
                        controller.view_mut().print_summary(&schema);
                    }
                    Command::Help => print_line(controller, HELP),
                    Command::Quit => break,
                    Command::Noop => {}
                }
            }
        }
    }

    drop(outcome_tx);
    if controller.is_in_flight() {
        debug!("waiting for pending prediction before exit");
        match outcome_rx.recv().await {
            Some(outcome) => {
                controller.finish_submit(outcome);
            }
            None => warn!("prediction task ended without reporting an outcome"),
        }
    }
    Ok(())
}

fn print_line<W, S>(controller: &mut FormController<TerminalView<W>, S>, message: &str)
where
    W: Write,
    S: PredictionService + ?Sized,
{
    controller.view_mut().print_line(message);
}
