use huffpack::{decode, encode, huffman};

fn main() -> Result<(), huffpack::Error> {
    let s = String::from("Hello my name is Sam!");
    let tree = huffman(s.as_bytes())?;
    let (e, d) = tree.into_encoder_decoder_pair();

    let out = e.encode(s.bytes())?;
    let dec = String::from_utf8(d.decode(&out)?);
    println!("{:?}", dec);

    let container = encode(s.as_bytes())?;
    println!(
        "{} bytes -> {} bits -> {:?}",
        s.len(),
        container.bit_count(),
        String::from_utf8(decode(&container)?)
    );

    Ok(())
}
