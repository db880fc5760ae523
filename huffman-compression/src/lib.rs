pub mod encode_decode;
pub mod error;
pub mod frequency;
pub mod header;
pub mod prefix_code_table;
pub mod tree;

pub use encode_decode::{decode, decode_stream, encode, encode_and_decode, encode_stream};
pub use error::{HuffmanError, Result};
pub use frequency::{count_frequencies, FrequencyTable};
pub use prefix_code_table::{generate_codes, CodeTable};
pub use tree::{build_tree, Node, Tree};
