use std::fs;

use anyhow::{Context, Result};
use log::debug;

use crate::InputArgs;

/// Load the bytes named by `args`, decoding hex text when `--hex` is set.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid hex.
pub fn load(args: &InputArgs) -> Result<Vec<u8>> {
    let raw =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    if !args.hex {
        return Ok(raw);
    }
    let text = String::from_utf8(raw)
        .with_context(|| format!("{} is not hex text", args.file.display()))?;
    let bytes = parse_hex(&text)
        .with_context(|| format!("{} is not valid hex", args.file.display()))?;
    debug!("decoded {} bytes of hex input", bytes.len());
    Ok(bytes)
}

fn parse_hex(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(parse_hex("82 01\n\t0A ff\n").unwrap(), vec![0x82, 0x01, 0x0A, 0xFF]);
    }

    #[test]
    fn odd_length_rejected() {
        assert!(parse_hex("821").is_err());
        assert!(parse_hex("zz").is_err());
    }
}
