pub mod sampler;

pub use sampler::{count_cjk, is_cjk, sample, DEFAULT_ALPHABET, DEFAULT_RANDOM_COUNT};
