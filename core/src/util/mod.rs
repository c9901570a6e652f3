mod base5;

pub use base5::{decode_index, encode_index};
