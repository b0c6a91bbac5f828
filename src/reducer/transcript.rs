//! Append-only transcript of one request

/// The cumulative text log of one request's progress and results.
///
/// Lines can only be appended. A new request starts from a new transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    /// Lines in arrival order, without trailing newlines
    lines: Vec<String>,
    /// Every line followed by a newline, kept in sync with `lines`
    text: String,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line. A trailing newline is added to the accumulated text.
    pub fn push_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.text.push_str(&line);
        self.text.push('\n');
        self.lines.push(line);
    }

    /// Consume the transcript and return it with `line` appended
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.push_line(line);
        self
    }

    /// Lines in arrival order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The accumulated text, one newline-terminated line per entry
    pub fn as_text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether `earlier` is a prefix of this transcript
    pub fn extends(&self, earlier: &Transcript) -> bool {
        self.lines.starts_with(&earlier.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transcript_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.as_text(), "");
    }

    #[test]
    fn test_push_line_appends_newline() {
        let mut transcript = Transcript::new();
        transcript.push_line("Searching for organizations...");
        transcript.push_line("Found 2 organizations.");
        assert_eq!(
            transcript.as_text(),
            "Searching for organizations...\nFound 2 organizations.\n"
        );
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_multiline_entry_kept_as_one_line() {
        let transcript = Transcript::new().with_line("[\n  1\n]");
        assert_eq!(transcript.lines(), &["[\n  1\n]".to_string()]);
        assert_eq!(transcript.as_text(), "[\n  1\n]\n");
    }

    #[test]
    fn test_extends() {
        let earlier = Transcript::new().with_line("a");
        let later = earlier.clone().with_line("b");
        assert!(later.extends(&earlier));
        assert!(!earlier.extends(&later));
    }
}
