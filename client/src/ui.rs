use std::io::{self, Write};

use colored::*;
use crossterm::{
    event::{self, Event},
    terminal,
};
use rustyline::DefaultEditor;
use tracing::error;

use crate::api::ApiError;

pub fn clear_screen() -> io::Result<()> {
    print!("\x1B[2J\x1B[1;1H");
    io::stdout().flush()?;
    Ok(())
}

pub fn wait_for_keypress() -> io::Result<()> {
    terminal::enable_raw_mode()?;

    // Clear any buffered input first
    while event::poll(std::time::Duration::from_millis(10))? {
        event::read()?;
    }

    loop {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(_) = event::read()? {
                break;
            }
        }
    }

    terminal::disable_raw_mode()?;
    Ok(())
}

/// Blocking message, the terminal stand-in for a browser `alert()`.
pub fn alert(message: &str) {
    println!();
    println!("{}", message.bold());
    println!("{}", "Pressione qualquer tecla para continuar...".dimmed());
    let _ = wait_for_keypress();
}

/// Shared failure surface of every API-backed action: the server's own
/// text, the per-action fallback, or the connectivity message. Transport
/// failures also land in the log.
pub fn alert_api_error(err: &ApiError, fallback: &str) {
    if let ApiError::Connection(source) = err {
        error!("request failed: {source}");
    }
    alert(&err.alert_message(fallback));
}

/// `s`/`n` prompt, the stand-in for a browser `confirm()`. Anything other
/// than an explicit yes declines.
pub fn confirm(message: &str) -> bool {
    println!();
    println!("{}", message.bold());

    let Ok(mut rl) = DefaultEditor::new() else {
        return false;
    };
    match rl.readline("Confirmar? (s/n): ") {
        Ok(line) => {
            let answer = line.trim().to_lowercase();
            answer == "s" || answer == "sim"
        }
        Err(_) => false,
    }
}

/// Single-line prompt. `None` means the user bailed out (Ctrl+C/Ctrl+D).
pub fn prompt(label: &str) -> Option<String> {
    let mut rl = DefaultEditor::new().ok()?;
    rl.readline(label).ok()
}
