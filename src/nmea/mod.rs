pub mod fields;
pub mod locator;

pub use fields::{extract_reading, FieldSet};
pub use locator::{find_gprmc, locate_sentence, sentence_at, GPRMC_MARKER};
