use crate::bits::{pack, packed_len, unpack};
use crate::code::{Bits, Decoder, SerializableDecoder};
use crate::error::{Error, Result};
use bitvec::prelude::*;
use std::io::{self, Read, Write};

/// The persisted result of an encode.
///
/// On the wire, in order:
/// 1. the code table, one MessagePack map of `(code length, packed code) -> byte`
/// 2. the number of meaningful payload bits, `u32` big-endian
/// 3. the packed payload, `ceil(bit_count / 8)` raw bytes to the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    decoder: Decoder,
    bit_count: u32,
    payload: Vec<u8>,
}

impl Container {
    pub fn new(decoder: Decoder, bits: &BitSlice<u8, Msb0>) -> Result<Self> {
        let bit_count = bits
            .len()
            .try_into()
            .map_err(|_| Error::PayloadTooLarge { bits: bits.len() })?;

        Ok(Self {
            decoder,
            bit_count,
            payload: pack(bits),
        })
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The payload as a bit-string of exactly `bit_count` bits.
    pub fn unpack(&self) -> Result<Bits> {
        unpack(&self.payload, self.bit_count as usize)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        rmp_serde::encode::write(&mut writer, &SerializableDecoder::from(&self.decoder))?;
        writer.write_all(&self.bit_count.to_be_bytes())?;
        writer.write_all(&self.payload)?;

        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads a container, consuming `reader` to its end.
    ///
    /// A payload shorter than the bit count implies is accepted here and
    /// reported by [`Container::unpack`]; a longer one is rejected.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let table: SerializableDecoder = rmp_serde::decode::from_read(&mut reader)
            .map_err(|e| Error::MalformedContainer(format!("unreadable code table: {e}")))?;
        let decoder = Decoder::try_from(table)?;

        let mut bit_count_bytes = [0u8; 4];
        reader
            .read_exact(&mut bit_count_bytes)
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => {
                    Error::MalformedContainer("missing bit count".to_string())
                }
                _ => Error::Io(e),
            })?;
        let bit_count = u32::from_be_bytes(bit_count_bytes);

        let mut payload = Vec::new();
        reader.read_to_end(&mut payload)?;

        let expected = packed_len(bit_count as usize);
        if payload.len() > expected {
            return Err(Error::MalformedContainer(format!(
                "{} payload bytes for {bit_count} bits, expected {expected}",
                payload.len()
            )));
        }

        Ok(Self {
            decoder,
            bit_count,
            payload,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from(bytes)
    }
}
