//! Line-driven search session.
//!
//! Each stdin line is one input event. Plain text replaces the search text;
//! `:m <name>`, `:t <name>`, `:clear`, `:reset` and `:q` drive the dropdowns
//! and buttons. Searches go through a [`LatestWins`] gate, so pasted bursts of
//! lines produce a single result.

use crate::render;
use anyhow::Result;
use errcat_search::{LatestWins, SearchEngine, UiState};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Text(String),
    Manufacturer(String),
    DeviceType(String),
    ClearSearch,
    ResetFilters,
    Quit,
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            return Input::Text(line.to_string());
        };
        let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
        match name {
            "m" => Input::Manufacturer(arg.trim().to_string()),
            "t" => Input::DeviceType(arg.trim().to_string()),
            "clear" => Input::ClearSearch,
            "reset" => Input::ResetFilters,
            "q" | "quit" => Input::Quit,
            _ => Input::Text(line.to_string()),
        }
    }

    /// Applies the input to `state`. Returns false for [`Input::Quit`].
    fn apply(self, state: &mut UiState) -> bool {
        match self {
            Input::Text(text) => state.search_text = text,
            Input::Manufacturer(name) => state.selected_manufacturer = name,
            Input::DeviceType(name) => state.selected_device_type = name,
            Input::ClearSearch => state.search_text.clear(),
            Input::ResetFilters => {
                state.selected_manufacturer.clear();
                state.selected_device_type.clear();
            }
            Input::Quit => return false,
        }
        true
    }
}

pub fn run(engine: &SearchEngine) -> Result<()> {
    let lines = spawn_reader();
    let stdout = io::stdout();
    let state = session(engine, &lines, &mut stdout.lock())?;
    debug!(?state, "interactive session finished");
    Ok(())
}

/// Feeds `lines` through the gate until `:q` or the end of input, then
/// shows whatever search is still pending. Returns the final state.
fn session(
    engine: &SearchEngine,
    lines: &Receiver<String>,
    out: &mut impl Write,
) -> Result<UiState> {
    let mut gate = LatestWins::new(engine.config().debounce);
    let mut state = UiState::default();

    loop {
        let received = match gate.deadline() {
            Some(deadline) => {
                lines.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => {
                if !Input::parse(&line).apply(&mut state) {
                    break;
                }
                gate.submit(state.clone(), Instant::now());
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if let Some(pending) = gate.poll(Instant::now()) {
            state = show(engine, &pending, out)?;
        }
    }

    if let Some(pending) = gate.take() {
        state = show(engine, &pending, out)?;
    }
    Ok(state)
}

/// Runs one search and returns the state with the corrected selection.
fn show(engine: &SearchEngine, state: &UiState, out: &mut impl Write) -> Result<UiState> {
    let outcome = engine.run(state);
    render::facets(out, &outcome.facets)?;
    writeln!(out)?;
    render::outcome(out, &outcome)?;
    writeln!(out, "---")?;
    out.flush()?;
    Ok(outcome.corrected_state(state))
}

fn spawn_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
