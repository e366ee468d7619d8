#![no_main]

use cbor_diag::{DiagConfig, DiagRenderer, InvalidTextPolicy};
use libfuzzer_sys::fuzz_target;

// Fuzz target: DiagRenderer::render on arbitrary bytes.
//
// Catches bugs in:
// - Panics or stack overflow on deep nesting
// - Non-deterministic output
// - Escaped output containing non-ASCII characters
fuzz_target!(|data: &[u8]| {
    let strict = DiagRenderer::default();
    let lenient = DiagRenderer::new(DiagConfig {
        invalid_text: InvalidTextPolicy::Escape,
        ..DiagConfig::default()
    });

    let first = strict.render(data);
    assert_eq!(first, strict.render(data));

    match (first, lenient.render(data)) {
        (Ok(a), Ok(b)) => {
            assert_eq!(a, b);
            assert!(a.is_ascii());
        }
        (Ok(_), Err(e)) => panic!("escape policy failed where reject succeeded: {e}"),
        (Err(_), Ok(text)) => assert!(text.is_ascii()),
        (Err(_), Err(_)) => {}
    }
});
