pub mod r#box;
pub use r#box::{find_box, find_path, write_box_header, BoxHeader, Boxes};
pub mod moov;
pub use moov::read_moov_payload;
pub mod trak;
pub use trak::find_video_trak;
pub mod mdhd;
pub use mdhd::parse_mdhd;
pub mod sample_table;
pub use sample_table::{SampleTable, SampleToChunkEntry, SttsEntry};
pub mod stsd;
pub use stsd::{parse_visual_sample_entry, VisualSampleEntry};
pub mod avcc;
pub use avcc::AvccConfig;
