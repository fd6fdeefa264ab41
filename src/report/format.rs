// Formatting helpers - pluralization, elapsed time and ANSI colors

use console::Style;
use std::borrow::Cow;

/// Foreground colors used for per-spec progress characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
}

impl Color {
    /// Terminal style for this color. Styling is forced so the output does not
    /// depend on whether the sink is a TTY.
    pub fn style(self) -> Style {
        let style = Style::new().force_styling(true);
        match self {
            Self::Green => style.green(),
            Self::Red => style.red(),
        }
    }
}

/// Wrap `text` in the color's set / reset sequence when `enabled`
pub fn colorize(text: &str, color: Color, enabled: bool) -> Cow<'_, str> {
    if enabled {
        Cow::Owned(color.style().apply_to(text).to_string())
    } else {
        Cow::Borrowed(text)
    }
}

/// `word` with an `s` appended unless `count` is exactly 1
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Render an elapsed duration as seconds.
///
/// Whole seconds print as an integer (`1 second`, `3 seconds`); anything
/// else prints the fractional value and is always plural (`0.1 seconds`).
pub fn format_elapsed(elapsed_millis: u64) -> String {
    if elapsed_millis % 1000 == 0 {
        let seconds = (elapsed_millis / 1000) as usize;
        format!("{} {}", seconds, pluralize("second", seconds))
    } else {
        format!("{} seconds", elapsed_millis as f64 / 1000.0)
    }
}

/// `{count} {word}` with pluralization applied
pub fn count_of(word: &str, count: usize) -> String {
    format!("{} {}", count, pluralize(word, count))
}
