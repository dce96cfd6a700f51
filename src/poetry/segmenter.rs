use crate::poetry::config::SegmenterConfig;

const LINE_BREAK: &str = "\n";
const STANZA_BREAK: &str = "\n\n";

/// Splits prose on sentence terminators and wraps each sentence into
/// short lines. Lengths are counted in `char`s, never bytes.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Sentences of `input` with terminators removed. Empty and
    /// whitespace-only pieces are skipped; the rest are kept verbatim.
    pub fn segments<'a>(&self, input: &'a str) -> Vec<&'a str> {
        input
            .split(|c: char| self.config.delimiters.contains(&c))
            .filter(|piece| !piece.trim().is_empty())
            .collect()
    }

    /// Wrap a single sentence. After `wrapped_lines` full lines the
    /// remainder goes out as one line, however long it is.
    pub fn wrap(&self, sentence: &str) -> String {
        let chars: Vec<char> = sentence.chars().collect();
        let width = self.config.line_width.max(1);

        let mut lines: Vec<String> = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = if lines.len() < self.config.wrapped_lines {
                (start + width).min(chars.len())
            } else {
                chars.len()
            };
            lines.push(chars[start..end].iter().collect());
            start = end;
        }

        lines.join(LINE_BREAK)
    }

    /// Full transformation: every sentence wrapped, stanzas separated by a
    /// blank line. Returns an empty string when nothing survives filtering.
    pub fn segment(&self, input: &str) -> String {
        self.segments(input)
            .into_iter()
            .map(|sentence| self.wrap(sentence))
            .collect::<Vec<_>>()
            .join(STANZA_BREAK)
    }
}

/// Segment with the default 4-character, 3-line layout.
pub fn segment(input: &str) -> String {
    Segmenter::default().segment(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(segment(""), "");
    }

    #[test]
    fn only_delimiters_and_whitespace_yield_empty_output() {
        assert_eq!(segment("。！？  。\n？"), "");
    }

    #[test]
    fn short_sentence_is_unchanged() {
        assert_eq!(segment("你好世界。"), "你好世界");
    }

    #[test]
    fn no_delimiter_still_counts_as_one_segment() {
        assert_eq!(segment("床前明月光"), "床前明月\n光");
    }

    #[test]
    fn up_to_eight_chars_wraps_once() {
        assert_eq!(segment("床前明月光疑是地"), "床前明月\n光疑是地");
    }

    #[test]
    fn up_to_twelve_chars_wraps_twice() {
        assert_eq!(segment("床前明月光疑是地上霜"), "床前明月\n光疑是地\n上霜");
        assert_eq!(
            segment("一二三四五六七八九十甲乙"),
            "一二三四\n五六七八\n九十甲乙"
        );
    }

    #[test]
    fn long_sentence_keeps_unwrapped_tail() {
        assert_eq!(
            segment("这是一个很长的句子超过八个字。"),
            "这是一个\n很长的句\n子超过八\n个字"
        );

        let long = "一二三四五六七八九十甲乙丙丁戊己庚辛";
        assert_eq!(
            segment(long),
            "一二三四\n五六七八\n九十甲乙\n丙丁戊己庚辛"
        );
    }

    #[test]
    fn sentences_are_separated_by_one_blank_line() {
        let out = segment("春眠不觉晓。处处闻啼鸟！");
        assert_eq!(out, "春眠不觉\n晓\n\n处处闻啼\n鸟");
        assert_eq!(out.matches("\n\n").count(), 1);
    }

    #[test]
    fn wrapping_counts_chars_not_bytes() {
        // Mixed ASCII and CJK; a byte-based cut would split inside a char.
        assert_eq!(segment("ab你好cd"), "ab你好\ncd");
    }

    #[test]
    fn surrounding_whitespace_is_preserved_inside_segments() {
        assert_eq!(segment(" 风起 。"), " 风起 ");
    }

    #[test]
    fn segments_skip_blank_pieces() {
        let segmenter = Segmenter::default();
        assert_eq!(
            segmenter.segments("月落乌啼。 ！霜满天？"),
            vec!["月落乌啼", "霜满天"]
        );
    }

    #[test]
    fn custom_config_changes_layout() {
        let segmenter = Segmenter::new(SegmenterConfig {
            line_width: 2,
            wrapped_lines: 1,
            delimiters: vec!['，'],
        });
        assert_eq!(segmenter.segment("白日依山尽，黄河"), "白日\n依山尽\n\n黄河");
    }

    #[test]
    fn zero_wrapped_lines_disables_wrapping() {
        let segmenter = Segmenter::new(SegmenterConfig {
            wrapped_lines: 0,
            ..SegmenterConfig::default()
        });
        assert_eq!(segmenter.segment("欲穷千里目更上一层楼"), "欲穷千里目更上一层楼");
    }
}
