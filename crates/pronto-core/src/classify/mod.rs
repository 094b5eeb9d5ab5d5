pub mod engine;
pub mod outcome;

pub use engine::classify_entry;
pub use outcome::{ClearReason, EntryClass};
