pub mod record;

pub use record::GenerationRecord;
