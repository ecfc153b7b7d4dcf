//! Terminal output for CLI handlers.
//!
//! Every helper has two renderings: an indented, colored line for people and
//! a `{"type", "payload"}` JSON line for scripts (`--json`). `--quiet` hides
//! the human rendering of informational lines but never errors or warnings.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};
use serde_json::{json, Value};

use super::command::ColorChoice;

/// Flags that shape output for the whole process.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn current() -> OutputConfig {
    match cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Apply the global flags. Call once, before any handler runs.
pub fn configure(config: OutputConfig, color: &ColorChoice) {
    match cell().write() {
        Ok(mut slot) => *slot = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
    match color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => owo_colors::unset_override(),
    }
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

/// Route one event to the right rendering.
///
/// `always` marks lines that survive `--quiet`.
fn emit(kind: &str, payload: Value, always: bool, human: impl FnOnce()) {
    let config = current();
    if config.json {
        println!("{}", json!({ "type": kind, "payload": payload }));
    } else if !suppressed(config, always) {
        human();
    }
}

fn suppressed(config: OutputConfig, always: bool) -> bool {
    !config.json && config.quiet && !always
}

fn bold(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.bold()).to_string()
}

fn dimmed(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.dimmed()).to_string()
}

/// `askdb <version>` banner.
pub fn header(version: &str) {
    emit(
        "header",
        json!({ "app": "askdb", "version": version }),
        false,
        || println!("{} {}\n", bold("askdb"), dimmed(version)),
    );
}

/// A `label  value` line.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": value }),
        false,
        || println!("  {:<12} {}", dimmed(label), value),
    );
}

pub fn section(title: &str) {
    emit("section", json!({ "title": title }), false, || {
        println!("\n{}", bold(title));
    });
}

pub fn success(message: &str) {
    emit("success", json!({ "message": message }), false, || {
        println!(
            "  {} {message}",
            "✓".if_supports_color(Stream::Stdout, |t| t.green())
        );
    });
}

pub fn warning(message: &str) {
    emit("warning", json!({ "message": message }), true, || {
        println!(
            "  {} {message}",
            "⚠".if_supports_color(Stream::Stdout, |t| t.yellow())
        );
    });
}

/// Print an error line on stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!(
            "  {} {message}",
            "×".if_supports_color(Stream::Stderr, |t| t.red())
        );
    }
}

pub fn note(message: &str) {
    emit("note", json!({ "message": message }), false, || {
        println!("  {}", dimmed(message));
    });
}

pub fn hint(message: &str) {
    emit("hint", json!({ "message": message }), false, || {
        println!(
            "  {}: {}",
            "hint".if_supports_color(Stream::Stdout, |t| t.cyan()),
            dimmed(message)
        );
    });
}

/// Indent a block such as SQL text or a rendered table.
///
/// Results are the point of a command, so this survives `--quiet`.
pub fn lines(content: &str) {
    emit("lines", json!({ "content": content }), true, || {
        for line in content.lines() {
            println!("  {line}");
        }
    });
}

/// Cyan value for inline emphasis. Plain in JSON mode.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    value
        .if_supports_color(Stream::Stdout, |t| t.cyan())
        .to_string()
}

/// Print a command's JSON result as a single line.
pub fn json_output(value: Value) {
    println!("{value}");
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a spinner. Hidden in JSON and quiet modes.
pub fn spinner(message: &str) -> ProgressBar {
    let config = current();
    let pb = if config.json || config.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(SPINNER_FRAMES)
            .template("  {spinner:.cyan} {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    };
    pb.set_message(message.to_string());
    pb
}

pub fn spinner_success(pb: &ProgressBar, message: &str) {
    finish(pb, "✓".if_supports_color(Stream::Stdout, |t| t.green()), message);
}

pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    finish(pb, "×".if_supports_color(Stream::Stdout, |t| t.red()), message);
}

fn finish(pb: &ProgressBar, mark: impl Display, message: &str) {
    if pb.is_hidden() {
        pb.finish_and_clear();
    } else {
        pb.finish_with_message(format!("{mark} {message}"));
    }
}
