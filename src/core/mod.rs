pub mod paper;
pub mod match_response;
pub mod sample;

pub use paper::{Paper, PaperLink};
pub use match_response::{MatchEntry, MatchResponse, TRANSLATION_FAILED};
pub use sample::SAMPLE_TEXT;
