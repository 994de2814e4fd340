//! The encode/decode entry points.
//!
//! Every call builds its own frequency table, tree and code table and drops
//! them before returning.

use crate::container::Container;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// Counts `bytes` and builds their Huffman tree.
pub fn huffman(bytes: &[u8]) -> Result<HuffmanTree> {
    let freq = FrequencyTable::count(bytes)?;
    log::trace!("byte frequency: {:?}", freq.iter().collect::<Vec<_>>());

    HuffmanTree::build(&freq)
}

pub fn encode(input: &[u8]) -> Result<Container> {
    let tree = huffman(input)?;
    let (e, d) = tree.into_encoder_decoder_pair();

    let bits = e.encode(input.iter().copied())?;
    log::debug!(
        "encoded {} bytes with {} codes into {} bits",
        input.len(),
        e.len(),
        bits.len()
    );

    Container::new(d, &bits)
}

pub fn decode(container: &Container) -> Result<Vec<u8>> {
    let bits = container.unpack()?;
    let out = container.decoder().decode(&bits)?;
    log::debug!(
        "decoded {} bits with {} codes into {} bytes",
        bits.len(),
        container.decoder().len(),
        out.len()
    );

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn roundtrip(input: &[u8]) {
        let c = encode(input).unwrap();
        let bytes = c.to_bytes().unwrap();
        let restored = Container::from_bytes(&bytes).unwrap();

        assert_eq!(decode(&restored).unwrap(), input);
    }

    #[test]
    fn encode_empty() {
        assert!(matches!(encode(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn encode_single_symbol() {
        for n in [1, 2, 9, 1000] {
            assert!(matches!(
                encode(&vec![0x41; n]),
                Err(Error::InsufficientAlphabet { distinct: 1 })
            ));
        }
    }

    #[test]
    fn abracadabra() {
        let input = b"abracadabra";
        let c = encode(input).unwrap();
        let e = c.decoder().to_encoder();

        let expected: usize = [(b'a', 5), (b'b', 2), (b'r', 2), (b'c', 1), (b'd', 1)]
            .iter()
            .map(|&(s, f)| f * e.get(s).unwrap().len())
            .sum();
        assert_eq!(c.bit_count() as usize, expected);
        assert_eq!(decode(&c).unwrap(), input);
    }

    #[test]
    fn tie_break_stable_across_encodes() {
        let a = encode(b"AABBC").unwrap();
        let b = encode(b"AABBC").unwrap();

        assert_eq!(a.decoder(), b.decoder());
        // B=0, C=10, A=11 over "AABBC"
        assert_eq!(a.bit_count(), 8);
        assert_eq!(a.payload(), &[0b1111_0010]);
    }

    #[test]
    fn roundtrip_two_symbols() {
        roundtrip(&[0, 1]);
        roundtrip(&[0xff, 0xff, 0xff, 0x00]);
    }

    #[test]
    fn roundtrip_all_byte_values() {
        let input: Vec<u8> = (0..=255u8).cycle().take(256 * 3 + 17).collect();
        roundtrip(&input);
    }

    #[test]
    fn roundtrip_skewed() {
        // exponential weights give the deepest trees
        let mut input = Vec::new();
        for (i, n) in (0..16u8).zip((0..16).map(|k| 1usize << k)) {
            input.extend(std::iter::repeat(i).take(n));
        }
        roundtrip(&input);
    }

    #[test]
    fn roundtrip_pseudo_random() {
        let mut state = 0x1234_5678u32;
        for len in [2usize, 3, 7, 8, 9, 63, 64, 65, 1000, 4097] {
            let input: Vec<u8> = (0..len)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    (state % 23) as u8
                })
                .collect();
            if FrequencyTable::count(&input).unwrap().distinct() < 2 {
                continue;
            }
            roundtrip(&input);
        }
    }

    #[test]
    fn decode_truncated_payload() {
        let c = encode(b"abracadabra").unwrap();
        let mut bytes = c.to_bytes().unwrap();
        bytes.truncate(bytes.len() - 1);
        let short = Container::from_bytes(&bytes).unwrap();

        assert!(matches!(decode(&short), Err(Error::TruncatedStream(_))));
    }

    #[test]
    fn decode_bit_count_cut_mid_code() {
        let c = encode(b"abracadabra").unwrap();
        let bits = c.unpack().unwrap();
        // drop the final "0" (a) and the last bit of "111" (r)
        let cut = Container::new(c.decoder().clone(), &bits[..21]).unwrap();

        assert!(matches!(decode(&cut), Err(Error::TruncatedStream(_))));
    }
}
