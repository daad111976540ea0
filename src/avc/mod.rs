pub mod nalus;

pub use nalus::{nalu_types, push_annexb, sample_to_annexb, split_sample, NaluType, START_CODE};
