//! xLights sequence to JSON dumper

use clap::Parser;
use lightshow::xsq::XsqReader;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "xsq2json")]
#[command(version)]
#[command(about = "Dump the head fields and channel effects of an .xsq file as JSON", long_about = None)]
struct Args {
    /// Input .xsq file
    input: PathBuf,

    /// Output JSON file (writes to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output compact JSON (default is pretty-printed)
    #[arg(short, long)]
    compact: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let text = fs::read_to_string(&args.input)?;
    let doc = XsqReader::new(&text).parse()?;

    let json_string = if args.compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };

    match args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(json_string.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            println!("{}", json_string);
        }
    }

    Ok(())
}
