mod index;
mod parser;
mod types;
mod utils;

pub use index::SubtitleIndex;
pub use types::Cue;
pub use utils::title_case;
