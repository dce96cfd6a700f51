//! Property-based invariants for verse segmentation, floating-text sampling
//! and the history ledger:
//!
//! 1. Sampling output length is the input's ideograph count plus the draws.
//! 2. Sampling output starts with the input's ideographs, in order.
//! 3. Every draw comes from the alphabet.
//! 4. Segmenting never panics and never emits a delimiter.
//! 5. Segmenting yields one stanza per kept sentence, chars unchanged.
//! 6. No wrapped line before the tail exceeds the line width.
//! 7. The ledger never exceeds its capacity and keeps the newest records.

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use starry_verse_lib::{
    db::GenerationRecord,
    floating::{count_cjk, is_cjk, sample, DEFAULT_ALPHABET},
    history::{HistoryLedger, HISTORY_CAPACITY},
    poetry::{segment, Segmenter},
};

fn prose() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => prop::char::range('\u{4E00}', '\u{9FFF}'),
            1 => prop::sample::select(vec!['。', '！', '？', ' ', 'a', '1', '，']),
        ],
        0..60,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Sampler
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sample_length_is_cjk_count_plus_draws(
        input in any::<String>(),
        n in 0usize..64,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = sample(&input, n, DEFAULT_ALPHABET, &mut rng);
        prop_assert_eq!(out.chars().count(), count_cjk(&input) + n);
    }

    #[test]
    fn sample_prefix_is_filtered_input(
        input in prose(),
        n in 0usize..64,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = sample(&input, n, DEFAULT_ALPHABET, &mut rng);

        let expected: String = input.chars().filter(|c| is_cjk(*c)).collect();
        let prefix: String = out.chars().take(count_cjk(&input)).collect();
        prop_assert_eq!(prefix, expected);
    }

    #[test]
    fn draws_come_from_alphabet(
        input in prose(),
        n in 1usize..64,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = sample(&input, n, DEFAULT_ALPHABET, &mut rng);

        for c in out.chars().skip(count_cjk(&input)) {
            prop_assert!(DEFAULT_ALPHABET.contains(c));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-6. Segmenter
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn segment_is_total_and_drops_delimiters(input in any::<String>()) {
        let out = segment(&input);
        prop_assert!(!out.contains(|c: char| matches!(c, '。' | '！' | '？')));
    }

    #[test]
    fn segment_is_wrapped_sentences_joined(input in prose()) {
        let segmenter = Segmenter::default();
        let sentences = segmenter.segments(&input);
        let out = segment(&input);

        let stanzas: Vec<&str> = if out.is_empty() {
            Vec::new()
        } else {
            out.split("\n\n").collect()
        };
        prop_assert_eq!(stanzas.len(), sentences.len());
        for (stanza, sentence) in stanzas.iter().zip(&sentences) {
            prop_assert_eq!(stanza.replace('\n', ""), *sentence);
        }
    }

    #[test]
    fn wrapped_lines_respect_width(
        sentence in prop::collection::vec(prop::char::range('\u{4E00}', '\u{9FFF}'), 1..40)
            .prop_map(|chars| chars.into_iter().collect::<String>()),
    ) {
        let segmenter = Segmenter::default();
        let wrapped = segmenter.wrap(&sentence);
        let lines: Vec<&str> = wrapped.split('\n').collect();

        prop_assert!(lines.len() <= 4);
        for line in lines.iter().take(3) {
            prop_assert!(line.chars().count() <= 4);
        }
        prop_assert_eq!(lines.concat(), sentence);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Ledger
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ledger_keeps_newest_within_capacity(count in 0usize..40) {
        let mut ledger = HistoryLedger::new();
        for i in 0..count {
            let text = i.to_string();
            ledger.append(GenerationRecord::new(text.clone(), text.clone(), text));
        }

        prop_assert_eq!(ledger.len(), count.min(HISTORY_CAPACITY));
        for (offset, record) in ledger.list().iter().enumerate() {
            prop_assert_eq!(&record.input_text, &(count - 1 - offset).to_string());
        }
    }
}
