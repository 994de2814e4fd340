use huffpack::{analyze, decode, encode, Container, SizeReport, SymbolRow};
use std::env;
use std::error::Error;
use std::fs;

fn print_rows(rows: &[SymbolRow]) {
    println!("{:>6} {:>6} {:>10}  code", "byte", "symbol", "frequency");
    for r in rows {
        let freq = r.frequency.map(|f| f.to_string()).unwrap_or_default();
        println!("{:>6} {:>6} {:>10}  {}", r.byte, r.symbol, freq, r.code);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let fp = env::args()
        .nth(1)
        .ok_or("Please provide path to input file as first argument.")?;
    let encoded_path = format!("{fp}.huff");
    let decoded_path = format!("{fp}.decoded");

    let input_bytes = fs::read(&fp)?;

    // encode scope - save to file
    {
        print_rows(&analyze(&input_bytes)?);

        let data = encode(&input_bytes)?.to_bytes()?;
        fs::write(&encoded_path, &data)?;

        let sizes = SizeReport::new(input_bytes.len(), data.len());
        println!(
            "original {} KB, encoded {} KB ({:.1}%)",
            sizes.original_kib(),
            sizes.encoded_kib(),
            sizes.ratio() * 100.0
        );
    }

    // decode scope - read from file
    {
        let file_data = fs::read(&encoded_path)?;
        let container = Container::from_bytes(&file_data)?;
        print_rows(&container.symbol_rows());

        let decoded = decode(&container)?;
        fs::write(&decoded_path, &decoded)?;
        println!("decoded {} KB into {}", decoded.len() / 1024, decoded_path);
    }

    Ok(())
}
