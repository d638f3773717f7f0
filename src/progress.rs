//! Progress bars for per-item loops
//!
//! Bars are drawn on stderr with `indicatif` and hidden when stderr is not
//! a terminal or quiet mode is on, so piped output and tests stay clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

/// Template for item loops
pub const TEMPLATE_ITEMS: &str = "{msg} [{bar:40}] {pos}/{len} ({percent}%) - {eta}";

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppresses all progress bars for the rest of the process
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Whether bars would currently be drawn
pub fn should_show_progress() -> bool {
    !QUIET.load(Ordering::Relaxed) && std::io::stderr().is_terminal()
}

/// Creates a bar for a loop over `len` items
pub fn item_bar(len: u64, message: &str) -> ProgressBar {
    if !should_show_progress() {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(TEMPLATE_ITEMS) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message(message.to_string());
    bar
}
