use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::ui;

/// Per-index document counter. Inert when progress output is off, so
/// callers never branch on it.
pub struct Progress {
    bar: Option<ProgressBar>,
}

fn bar_template() -> &'static str {
    let columns = std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());
    match columns {
        Some(cols) if cols >= 100 => {
            "{prefix:.bold} {bar:40.cyan/blue} {pos}/{len} docs {elapsed} {msg}"
        }
        Some(cols) if cols >= 70 => "{prefix:.bold} {wide_bar:.cyan/blue} {pos}/{len}",
        _ => "{prefix:.bold} {percent}%",
    }
}

impl Progress {
    /// A bar counting `documents` for the index `name`.
    #[must_use]
    pub fn bar(documents: u64, name: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::with_draw_target(Some(documents), ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_prefix(name.to_string());
        bar.enable_steady_tick(Duration::from_millis(250));
        Self { bar: Some(bar) }
    }

    /// Count one finished document. Safe to call from any worker.
    pub fn inc(&self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    /// Leave the bar where the build stopped.
    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}
