//! Markdown rendering for terminal output
//!
//! Converts the display markdown into printable lines. Handles code blocks,
//! inline code, bold, italic, headings, lists and hyperlinks.
//!
//! URL Detection:
//! - Detects markdown links `[text](url)` via pulldown_cmark events
//! - Detects plain text URLs using a regex over text fragments
//! - Returns `LinkInfo` metadata with source byte positions
//!
//! # Module structure
//! - `links` - URL detection and link rendering
//! - `styles` - ANSI style codes and the OSC 8 wrapper

mod links;
mod styles;

pub use links::{detect_plain_urls, LinkInfo, ParsedMarkdown};
pub use styles::wrap_osc8_hyperlink;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::io::IsTerminal;

use crate::config::ClientConfig;
use crate::reducer::DisplayValue;
use links::{render_link, render_text_with_urls};
use styles::{
    paint, STYLE_BOLD, STYLE_CODE_BLOCK, STYLE_HEADING, STYLE_INLINE_CODE, STYLE_ITALIC,
};

/// Output options for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap link labels in OSC 8 hyperlinks
    pub hyperlinks: bool,
    /// Emit ANSI styling
    pub ansi: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hyperlinks: true,
            ansi: true,
        }
    }
}

impl RenderOptions {
    /// Options for stdout: styling only on a terminal, hyperlinks as configured.
    pub fn for_stdout(config: &ClientConfig) -> Self {
        let tty = std::io::stdout().is_terminal();
        Self {
            hyperlinks: config.hyperlinks && tty,
            ansi: tty,
        }
    }
}

/// Render a display value.
///
/// A summary is markdown and goes through [`render_markdown_with_links`].
/// Plain transcripts hold progress lines and pretty-printed JSON, so they
/// keep their line structure and only get plain URL detection.
pub fn render_display(display: &DisplayValue, options: &RenderOptions) -> ParsedMarkdown {
    match display {
        DisplayValue::Summary { markdown, .. } => render_markdown_with_links(markdown, options),
        DisplayValue::Plain { markdown } => render_plain(markdown, options),
    }
}

fn render_plain(text: &str, options: &RenderOptions) -> ParsedMarkdown {
    let mut links = Vec::new();
    let mut position = 0;
    let mut lines = Vec::new();
    // Transcripts end every line with a newline
    let text = text.strip_suffix('\n').unwrap_or(text);

    for line in text.split('\n') {
        lines.push(render_text_with_urls(line, &[], options, &mut links, position));
        position += line.len() + 1;
    }

    if text.is_empty() {
        lines.clear();
    }

    ParsedMarkdown { lines, links }
}

/// Render markdown text to printable lines.
pub fn render_markdown(text: &str, options: &RenderOptions) -> Vec<String> {
    render_markdown_with_links(text, options).lines
}

/// Render markdown text to printable lines with link detection.
///
/// Supports:
/// - Code blocks (fenced with ```) - dim, whitespace preserved
/// - Inline code (`code`) - cyan
/// - Bold (**text**) and italic (*text*)
/// - Headings (# Heading) - cyan and bold
/// - Lists - one bullet line per item
/// - Markdown links [text](url) - blue and underlined, recorded once each
/// - Plain text URLs (http:// and https://)
///
/// Blocks are separated by a blank line. Incomplete markdown renders without
/// failing.
pub fn render_markdown_with_links(text: &str, options: &RenderOptions) -> ParsedMarkdown {
    let mut md_options = Options::empty();
    md_options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, md_options).into_offset_iter();
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut links: Vec<LinkInfo> = Vec::new();

    // Style stack for nested formatting
    let mut style_stack: Vec<&'static str> = Vec::new();
    let mut code_block: Option<String> = None;
    let mut list_depth: usize = 0;

    // Current link: (url, label, source range start)
    let mut current_link: Option<(String, String, usize)> = None;

    for (event, range) in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::CodeBlock(_) => {
                    flush(&mut lines, &mut current);
                    separate(&mut lines, list_depth);
                    code_block = Some(String::new());
                }
                Tag::Heading { .. } => {
                    flush(&mut lines, &mut current);
                    separate(&mut lines, list_depth);
                    style_stack.push(STYLE_HEADING);
                }
                Tag::Paragraph => {
                    flush(&mut lines, &mut current);
                    separate(&mut lines, list_depth);
                }
                Tag::Strong => style_stack.push(STYLE_BOLD),
                Tag::Emphasis => style_stack.push(STYLE_ITALIC),
                Tag::List(_) => {
                    flush(&mut lines, &mut current);
                    if list_depth == 0 {
                        separate(&mut lines, list_depth);
                    }
                    list_depth += 1;
                }
                Tag::Item => {
                    flush(&mut lines, &mut current);
                    current.push_str(&"  ".repeat(list_depth.saturating_sub(1)));
                    current.push_str("• ");
                }
                Tag::Link { dest_url, .. } => {
                    current_link = Some((dest_url.to_string(), String::new(), range.start));
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::CodeBlock => {
                    if let Some(code) = code_block.take() {
                        let body = code.strip_suffix('\n').unwrap_or(&code);
                        for line in body.split('\n') {
                            lines.push(styled(line, &[STYLE_CODE_BLOCK], options));
                        }
                    }
                }
                TagEnd::Heading(_) => {
                    flush(&mut lines, &mut current);
                    style_stack.pop();
                }
                TagEnd::Paragraph | TagEnd::Item => flush(&mut lines, &mut current),
                TagEnd::Strong | TagEnd::Emphasis => {
                    style_stack.pop();
                }
                TagEnd::List(_) => {
                    flush(&mut lines, &mut current);
                    list_depth = list_depth.saturating_sub(1);
                }
                TagEnd::Link => {
                    if let Some((url, label, start)) = current_link.take() {
                        current.push_str(&render_link(&url, &label, options));
                        links.push(LinkInfo::new(url, label, start, range.end));
                    }
                }
                _ => {}
            },
            Event::Text(content) => {
                if let Some((_, label, _)) = current_link.as_mut() {
                    label.push_str(&content);
                } else if let Some(code) = code_block.as_mut() {
                    code.push_str(&content);
                } else {
                    current.push_str(&render_text_with_urls(
                        &content,
                        &style_stack,
                        options,
                        &mut links,
                        range.start,
                    ));
                }
            }
            Event::Code(code) => {
                if let Some((_, label, _)) = current_link.as_mut() {
                    label.push_str(&code);
                } else {
                    current.push_str(&styled(&code, &[STYLE_INLINE_CODE], options));
                }
            }
            Event::InlineHtml(html) | Event::Html(html) => {
                current.push_str(&html);
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, label, _)) = current_link.as_mut() {
                    label.push(' ');
                } else {
                    lines.push(std::mem::take(&mut current));
                }
            }
            Event::Rule => {
                flush(&mut lines, &mut current);
                separate(&mut lines, list_depth);
                lines.push("─".repeat(20));
            }
            _ => {}
        }
    }

    flush(&mut lines, &mut current);
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    ParsedMarkdown { lines, links }
}

fn flush(lines: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        lines.push(std::mem::take(current));
    }
}

// Blank line between top-level blocks
fn separate(lines: &mut Vec<String>, list_depth: usize) {
    if list_depth == 0 && lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push(String::new());
    }
}

fn styled(text: &str, codes: &[&str], options: &RenderOptions) -> String {
    if options.ansi {
        paint(text, codes)
    } else {
        text.to_string()
    }
}
