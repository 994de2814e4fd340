use crate::bits::{pack, packed_len, unpack};
use crate::error::{Error, Result};
use crate::tree::{HuffmanTree, Node};
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A growable bit-string, MSB-first within each byte.
pub type Bits = BitVec<u8, Msb0>;

/// The bits of one code, root to leaf, `false` = left.
pub type Code = BitBox<u8, Msb0>;

/// With at most 256 leaves no path is longer than this.
pub const MAX_CODE_LEN: usize = 255;

/// Renders a code the way it is shown to users, e.g. `"0110"`.
pub fn code_to_string(code: &BitSlice<u8, Msb0>) -> String {
    code.iter()
        .by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}

impl HuffmanTree {
    pub fn into_encoder_decoder_pair(self) -> (Encoder, Decoder) {
        fn traverse(node: &Node, v: &mut Bits, dec: &mut HashMap<Bits, u8>) {
            // symbol nodes have no children
            if let Some(sym) = node.symbol() {
                log::trace!("code {:#04x} -> {}", sym, code_to_string(v));
                dec.insert(v.clone(), sym);
                return;
            }

            if let Some((left, right)) = node.children() {
                v.push(false);
                traverse(left, v, dec);
                v.pop();

                v.push(true);
                traverse(right, v, dec);
                v.pop();
            }
        }

        let root = self.into_root();
        let mut bv = Bits::new();
        let mut dec = HashMap::new();
        traverse(&root, &mut bv, &mut dec);

        let decoder = Decoder::from_table(dec);
        (decoder.to_encoder(), decoder)
    }
}

/// Byte to code direction of a code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoder {
    encode_table: BTreeMap<u8, Code>,
}

impl Encoder {
    pub fn encode(&self, stream: impl Iterator<Item = u8>) -> Result<Bits> {
        let mut out = Bits::new();
        for s in stream {
            let code = self.encode_table.get(&s).ok_or(Error::UnknownSymbol(s))?;
            out.extend_from_bitslice(code.as_bitslice());
        }

        Ok(out)
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.encode_table.get(&symbol).map(|c| c.as_bitslice())
    }

    /// All `(byte, code)` pairs, ascending by byte value.
    pub fn codes(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.encode_table.iter().map(|(&s, c)| (s, c.as_bitslice()))
    }

    pub fn len(&self) -> usize {
        self.encode_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encode_table.is_empty()
    }
}

/// Code to byte direction of a code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    decode_table: HashMap<Bits, u8>,
    longest: usize,
}

impl Decoder {
    fn from_table(decode_table: HashMap<Bits, u8>) -> Self {
        let longest = decode_table.keys().map(|k| k.len()).max().unwrap_or(0);
        Self {
            decode_table,
            longest,
        }
    }

    pub fn to_encoder(&self) -> Encoder {
        Encoder {
            encode_table: self
                .decode_table
                .iter()
                .map(|(k, &v)| (v, k.clone().into_boxed_bitslice()))
                .collect(),
        }
    }

    /// Greedy prefix decoding: a byte is emitted the moment the accumulated
    /// bits equal a code. Leftover bits at the end mean the stream was cut.
    pub fn decode(&self, input: &BitSlice<u8, Msb0>) -> Result<Vec<u8>> {
        let mut out = Vec::new();

        let mut cursor = Bits::with_capacity(self.longest);
        for b in input.iter().by_vals() {
            cursor.push(b);
            if let Some(&sym) = self.decode_table.get(&cursor) {
                cursor.clear();
                out.push(sym);
            } else if cursor.len() >= self.longest {
                return Err(Error::MalformedContainer(format!(
                    "bit sequence {} matches no code",
                    code_to_string(&cursor)
                )));
            }
        }

        if !cursor.is_empty() {
            return Err(Error::TruncatedStream(format!(
                "{} trailing bit(s) do not complete a code",
                cursor.len()
            )));
        }

        Ok(out)
    }

    pub fn get(&self, code: &BitSlice<u8, Msb0>) -> Option<u8> {
        self.decode_table.get(&code.to_bitvec()).copied()
    }

    /// All `(code, byte)` pairs, ascending by byte value.
    pub fn codes(&self) -> Vec<(&BitSlice<u8, Msb0>, u8)> {
        let mut codes: Vec<_> = self
            .decode_table
            .iter()
            .map(|(k, &v)| (k.as_bitslice(), v))
            .collect();
        codes.sort_unstable_by_key(|&(_, v)| v);
        codes
    }

    pub fn len(&self) -> usize {
        self.decode_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decode_table.is_empty()
    }
}

/// Wire form of a [`Decoder`]: each code is stored as its bit length and
/// its bits packed the same way as the payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct SerializableDecoder {
    decode_table: BTreeMap<(usize, Box<[u8]>), u8>,
}

impl<'a> From<&'a Decoder> for SerializableDecoder {
    fn from(other: &'a Decoder) -> Self {
        Self {
            decode_table: other
                .decode_table
                .iter()
                .map(|(k, &v)| ((k.len(), pack(k).into_boxed_slice()), v))
                .collect(),
        }
    }
}

impl TryFrom<SerializableDecoder> for Decoder {
    type Error = Error;

    fn try_from(other: SerializableDecoder) -> Result<Self> {
        let malformed = |msg: String| -> Result<Self> { Err(Error::MalformedContainer(msg)) };

        if other.decode_table.len() < 2 {
            return malformed(format!(
                "code table has {} entries, at least 2 are required",
                other.decode_table.len()
            ));
        }

        let mut seen = [false; 256];
        let mut table = HashMap::with_capacity(other.decode_table.len());
        for ((len, bs), v) in other.decode_table {
            if len == 0 || len > MAX_CODE_LEN {
                return malformed(format!("code for byte {v:#04x} has length {len}"));
            }
            if bs.len() != packed_len(len) {
                return malformed(format!(
                    "code for byte {v:#04x} has {} bytes for {len} bits",
                    bs.len()
                ));
            }
            if std::mem::replace(&mut seen[v as usize], true) {
                return malformed(format!("byte {v:#04x} has more than one code"));
            }

            let code = unpack(&bs, len)?;
            if let Some(other) = table.insert(code, v) {
                return malformed(format!("bytes {other:#04x} and {v:#04x} share a code"));
            }
        }

        // in sorted order a prefix sits directly before its extensions
        let mut codes: Vec<&Bits> = table.keys().collect();
        codes.sort_unstable_by(|a, b| a.as_bitslice().cmp(b.as_bitslice()));
        for pair in codes.windows(2) {
            if pair[1].starts_with(pair[0].as_bitslice()) {
                return malformed(format!(
                    "code {} is a prefix of {}",
                    code_to_string(pair[0]),
                    code_to_string(pair[1])
                ));
            }
        }

        Ok(Decoder::from_table(table))
    }
}
