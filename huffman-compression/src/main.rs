use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use huffman_compression::{decode, encode, encode_and_decode};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    match args.command {
        Command::Encode { input, output } => encode(&input, &output)
            .with_context(|| format!("Failed to encode {}", input.display()))?,
        Command::Decode { input, output } => decode(&input, &output)
            .with_context(|| format!("Failed to decode {}", input.display()))?,
        Command::Roundtrip {
            input,
            encoded,
            output,
        } => {
            let matches = encode_and_decode(&input, &encoded, &output)
                .with_context(|| format!("Failed to round trip {}", input.display()))?;
            if !matches {
                bail!(
                    "{} does not match {} after decoding",
                    output.display(),
                    input.display()
                );
            }
            println!("{} round trips through {}", input.display(), encoded.display());
        }
    }

    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Encode INPUT into OUTPUT
    Encode { input: PathBuf, output: PathBuf },
    /// Decode INPUT into OUTPUT
    Decode { input: PathBuf, output: PathBuf },
    /// Encode INPUT into ENCODED, decode it into OUTPUT and compare
    Roundtrip {
        input: PathBuf,
        encoded: PathBuf,
        output: PathBuf,
    },
}
