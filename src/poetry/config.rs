/// Tunables for turning prose into stanzas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Characters per wrapped line.
    pub line_width: usize,

    /// Number of full-width lines emitted before the rest of a segment is
    /// written out as one unwrapped tail line.
    pub wrapped_lines: usize,

    /// Sentence terminators. Dropped from the output.
    pub delimiters: Vec<char>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            line_width: 4,
            wrapped_lines: 3,
            delimiters: vec!['。', '！', '？'],
        }
    }
}
