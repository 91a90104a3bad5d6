//! Style-engine diagnostics with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same diagnostic multiple times
//! while a style tree is computed. Diagnostics are advisory: the style pipeline
//! always continues with a best-effort value, so nothing here returns an error.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of diagnostics we've already printed (to deduplicate)
static EMITTED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// How loudly a diagnostic is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The caller asked for something pointless but harmless
    /// (e.g. resolving a value that is already absolute).
    Info,
    /// A value could not be computed the way the author intended.
    Warning,
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Record `message` and report whether it is new.
fn record(component: &str, message: &str) -> bool {
    EMITTED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message))
}

/// Emit a diagnostic once per unique `(component, message)` pair.
pub fn emit_once(severity: Severity, component: &str, message: &str) {
    if !record(component, message) {
        return;
    }
    let line = format!("[Kestrel {component}] {message}");
    match severity {
        Severity::Info => eprintln!("{}", line.dimmed()),
        Severity::Warning => eprintln!("{}", format!("{line} ⚠").yellow()),
    }
}

/// Warn about a value the engine could not compute as written
/// (prints once per unique message).
///
/// # Example
/// ```
/// kestrel_common::warning::warn_once("CSS", "'top: 50%' needs the containing block height");
/// ```
pub fn warn_once(component: &str, message: &str) {
    emit_once(Severity::Warning, component, message);
}

/// Report a harmless misuse (prints once per unique message).
pub fn info_once(component: &str, message: &str) {
    emit_once(Severity::Info, component, message);
}

/// Whether `message` has been reported for `component` since the last
/// [`clear_warnings`].
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    EMITTED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded diagnostics (call when a new document is styled).
pub fn clear_warnings() {
    let mut guard = EMITTED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
