//! Lossless byte compression with Huffman codes.
//!
//! ```
//! let container = huffpack::encode(b"abracadabra")?;
//! let bytes = container.to_bytes()?;
//!
//! let restored = huffpack::Container::from_bytes(&bytes)?;
//! assert_eq!(huffpack::decode(&restored)?, b"abracadabra");
//! # Ok::<(), huffpack::Error>(())
//! ```

pub mod bits;
pub mod code;
pub mod codec;
pub mod container;
pub mod error;
pub mod frequency;
pub mod report;
pub mod tree;

pub use code::{code_to_string, Bits, Code, Decoder, Encoder};
pub use codec::{decode, encode, huffman};
pub use container::Container;
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use report::{analyze, SizeReport, SymbolRow};
pub use tree::{HuffmanTree, Node};
