/// Implementation of `cbordiag diag`.
///
/// Renders every top-level item of the input as diagnostic notation and
/// prints the result as one line:
///
/// ```text
/// $ echo '82 01 a1 61 61 f5' > doc.hex
/// $ cbordiag diag --hex doc.hex
/// [1, {"a", true}]
/// ```
///
/// On failure nothing is printed to stdout; the error and the partial
/// rendering go to stderr.
use anyhow::{Context, Result};
use cbor_decoder::DecoderConfig;
use cbor_diag::{DiagConfig, DiagRenderer, InvalidTextPolicy};

use crate::DiagArgs;
use crate::input;

/// Run the `cbordiag diag` command.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or does not decode.
pub fn run(args: &DiagArgs) -> Result<()> {
    let bytes = input::load(&args.input)?;
    let renderer = DiagRenderer::new(config_from_args(args));
    let text = renderer
        .render(&bytes)
        .with_context(|| format!("cannot render {}", args.input.file.display()))?;
    println!("{text}");
    Ok(())
}

fn config_from_args(args: &DiagArgs) -> DiagConfig {
    DiagConfig {
        decoder: DecoderConfig {
            max_depth: args.max_depth,
        },
        invalid_text: if args.escape_invalid_text {
            InvalidTextPolicy::Escape
        } else {
            InvalidTextPolicy::Reject
        },
    }
}
