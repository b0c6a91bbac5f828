//! ANSI style codes and OSC 8 hyperlink utilities for terminal rendering

/// Style for code blocks - dim
pub const STYLE_CODE_BLOCK: &str = "\x1b[2m";

/// Style for inline code - cyan
pub const STYLE_INLINE_CODE: &str = "\x1b[36m";

/// Style for headings - cyan and bold
pub const STYLE_HEADING: &str = "\x1b[1;36m";

/// Style for links - blue and underlined
pub const STYLE_LINK: &str = "\x1b[4;34m";

pub const STYLE_BOLD: &str = "\x1b[1m";
pub const STYLE_ITALIC: &str = "\x1b[3m";

const RESET: &str = "\x1b[0m";

/// Wrap `text` in the given SGR codes, outermost first.
///
/// Returns `text` unchanged when `codes` is empty.
pub fn paint(text: &str, codes: &[&str]) -> String {
    if codes.is_empty() || text.is_empty() {
        return text.to_string();
    }
    format!("{}{}{}", codes.concat(), text, RESET)
}

/// Create an OSC 8 hyperlink escape sequence that wraps text
///
/// OSC 8 format: `\x1B]8;;{url}\x07{text}\x1B]8;;\x07`
/// Terminals without support show `text` only.
pub fn wrap_osc8_hyperlink(url: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x07{}\x1b]8;;\x07", url, text)
}
