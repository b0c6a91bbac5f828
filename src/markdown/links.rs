//! Link detection utilities for markdown rendering
//!
//! URL Detection:
//! - Detects plain text URLs using regex pattern `https?://[^\s<>\[\]()]+`
//! - Returns `LinkInfo` metadata alongside the rendered lines

use once_cell::sync::Lazy;
use regex::Regex;

use crate::markdown::styles::{paint, wrap_osc8_hyperlink, STYLE_LINK};
use crate::markdown::RenderOptions;

/// Matches URLs that don't contain whitespace, angle brackets, brackets or parentheses
pub(crate) static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>\[\]()]+").expect("Invalid URL regex pattern"));

/// Information about a detected link in rendered content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    /// The URL/destination of the link
    pub url: String,
    /// The display text for the link
    pub text: String,
    /// Start byte position in the source text
    pub start: usize,
    /// End byte position in the source text
    pub end: usize,
}

impl LinkInfo {
    pub fn new(url: String, text: String, start: usize, end: usize) -> Self {
        Self {
            url,
            text,
            start,
            end,
        }
    }
}

/// Result of rendering with link detection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMarkdown {
    /// The rendered lines
    pub lines: Vec<String>,
    /// All links in the content, markdown links and plain URLs, in source order
    pub links: Vec<LinkInfo>,
}

impl ParsedMarkdown {
    /// Lines joined with newlines
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Detect plain text URLs in a string
pub fn detect_plain_urls(text: &str) -> Vec<LinkInfo> {
    URL_REGEX
        .find_iter(text)
        .map(|m| {
            let url = m.as_str().to_string();
            LinkInfo::new(url.clone(), url, m.start(), m.end())
        })
        .collect()
}

/// Render one text fragment, styling any plain URLs in it.
///
/// `base_position` is the fragment's byte offset in the source, so recorded
/// links carry source positions.
pub(crate) fn render_text_with_urls(
    text: &str,
    codes: &[&str],
    options: &RenderOptions,
    links: &mut Vec<LinkInfo>,
    base_position: usize,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_end = 0;

    for m in URL_REGEX.find_iter(text) {
        out.push_str(&style(&text[last_end..m.start()], codes, options));

        let url = m.as_str();
        out.push_str(&render_link(url, url, options));
        links.push(LinkInfo::new(
            url.to_string(),
            url.to_string(),
            base_position + m.start(),
            base_position + m.end(),
        ));

        last_end = m.end();
    }

    out.push_str(&style(&text[last_end..], codes, options));
    out
}

/// Render a link label.
///
/// With hyperlinks on, the label is wrapped in OSC 8. With hyperlinks off the
/// target is written after the label, unless it is the label itself or the
/// `#` placeholder.
pub(crate) fn render_link(url: &str, label: &str, options: &RenderOptions) -> String {
    let painted = style(label, &[STYLE_LINK], options);
    let has_target = !url.is_empty() && url != "#";

    if options.hyperlinks && has_target {
        wrap_osc8_hyperlink(url, &painted)
    } else if !options.hyperlinks && has_target && url != label {
        format!("{} ({})", painted, url)
    } else {
        painted
    }
}

fn style(text: &str, codes: &[&str], options: &RenderOptions) -> String {
    if options.ansi {
        paint(text, codes)
    } else {
        text.to_string()
    }
}
