use rand::Rng;

/// Filler pool for the floating text.
pub const DEFAULT_ALPHABET: &str = "诗星梦幻美意空灵飘浮游荡飞翔闪烁宇宙星辰月光清风流水花香鸟语";

/// Filler characters appended per generation.
pub const DEFAULT_RANDOM_COUNT: usize = 30;

/// CJK Unified Ideographs block.
pub fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

pub fn count_cjk(input: &str) -> usize {
    input.chars().filter(|c| is_cjk(*c)).count()
}

/// Ideographs from `input` in order, followed by `random_count` draws
/// (uniform, with replacement) from `alphabet`.
///
/// An empty alphabet contributes nothing, so the result is just the
/// filtered input.
pub fn sample<R: Rng>(
    input: &str,
    random_count: usize,
    alphabet: &str,
    rng: &mut R,
) -> String {
    let pool: Vec<char> = alphabet.chars().collect();
    let mut floating: String = input.chars().filter(|c| is_cjk(*c)).collect();

    if pool.is_empty() {
        return floating;
    }

    floating.extend((0..random_count).map(|_| pool[rng.gen_range(0..pool.len())]));
    floating
}
