//! Per-symbol and size figures for callers that display a compression run.

use crate::code::code_to_string;
use crate::container::Container;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRow {
    pub byte: u8,
    /// The byte itself if printable ASCII, `.` otherwise.
    pub symbol: char,
    /// Only known on the encode side.
    pub frequency: Option<u64>,
    pub code: String,
}

fn printable(byte: u8) -> char {
    if (32..=126).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

/// Frequencies and codes of every byte present in `bytes`, ascending by byte.
pub fn analyze(bytes: &[u8]) -> Result<Vec<SymbolRow>> {
    let freq = FrequencyTable::count(bytes)?;
    let (e, _) = HuffmanTree::build(&freq)?.into_encoder_decoder_pair();

    let rows = e
        .codes()
        .map(|(byte, code)| SymbolRow {
            byte,
            symbol: printable(byte),
            frequency: Some(freq.get(byte)),
            code: code_to_string(code),
        })
        .collect();

    Ok(rows)
}

impl Container {
    pub fn symbol_rows(&self) -> Vec<SymbolRow> {
        self.decoder()
            .codes()
            .into_iter()
            .map(|(code, byte)| SymbolRow {
                byte,
                symbol: printable(byte),
                frequency: None,
                code: code_to_string(code),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    pub original: usize,
    pub encoded: usize,
}

impl SizeReport {
    pub fn new(original: usize, encoded: usize) -> Self {
        Self { original, encoded }
    }

    pub fn original_kib(&self) -> usize {
        self.original / 1024
    }

    pub fn encoded_kib(&self) -> usize {
        self.encoded / 1024
    }

    /// Encoded size over original size; `0.0` for an empty original.
    pub fn ratio(&self) -> f64 {
        if self.original == 0 {
            0.0
        } else {
            self.encoded as f64 / self.original as f64
        }
    }
}
