//! Colored terminal rendering for the command-line entry points.
//!
//! Cards are authored in the chat's light Markdown dialect; here `*bold*`
//! spans become bold and `_italic_` spans become dimmed italics.

use std::io::{self, Write};

use chrono::Utc;
use owo_colors::OwoColorize;

use crate::present::{DisplayCard, Keyboard};

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Truncate to at most `max_chars` characters, adding an ellipsis if cut.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return "...".to_string();
    }
    let kept: String = s.chars().take(max_chars - 3).collect();
    format!("{kept}...")
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Span {
    Plain,
    Bold,
    Italic,
}

fn push_span(out: &mut String, buf: &mut String, span: Span) {
    if buf.is_empty() {
        return;
    }
    match span {
        Span::Plain => out.push_str(buf),
        Span::Bold => out.push_str(&buf.as_str().bold().to_string()),
        Span::Italic => out.push_str(&buf.as_str().italic().dimmed().to_string()),
    }
    buf.clear();
}

/// Render chat markup with terminal styles.
#[must_use]
pub fn render_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut buf = String::new();
    let mut span = Span::Plain;

    for c in text.chars() {
        let toggled = match (c, span) {
            ('*', Span::Plain) => Some(Span::Bold),
            ('*', Span::Bold) | ('_', Span::Italic) => Some(Span::Plain),
            ('_', Span::Plain) => Some(Span::Italic),
            _ => None,
        };
        match toggled {
            Some(next) => {
                push_span(&mut out, &mut buf, span);
                span = next;
            }
            None => buf.push(c),
        }
    }
    // An unterminated span keeps its style to the end.
    push_span(&mut out, &mut buf, span);
    out
}

fn print_keyboard(keyboard: &Keyboard) {
    for row in &keyboard.rows {
        let labels: Vec<String> = row
            .iter()
            .map(|b| format!("[{}] {}", b.label, b.action.id().dimmed()))
            .collect();
        println!("  {}", labels.join("   "));
    }
}

/// Print a card, followed by its buttons.
pub fn print_card(card: &DisplayCard) {
    println!("{}", render_markup(&card.text));
    if let Some(keyboard) = &card.keyboard {
        println!();
        print_keyboard(keyboard);
    }
    let _ = io::stdout().flush();
}

/// Print a conversational reply.
pub fn print_reply(question: &str, reply: &str) {
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        "[ASK]".blue().bold(),
        truncate(question, 80).cyan()
    );
    println!("{}", render_markup(reply));
    let _ = io::stdout().flush();
}

/// Print whether a credential is configured, without its value.
pub fn print_credential(name: &str, present: bool) {
    let status = if present {
        "configured".green().to_string()
    } else {
        "missing".yellow().to_string()
    };
    println!(
        "{} {} {name}: {status}",
        timestamp().dimmed(),
        "[CONFIG]".blue().bold()
    );
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!(
        "{} {} {}",
        timestamp().dimmed(),
        "[ERROR]".red().bold(),
        message.red()
    );
}
