#![no_main]

use cbor_decoder::ItemCursor;
use libfuzzer_sys::fuzz_target;

// Fuzz target: skipping whole items with ItemCursor::advance.
//
// Catches bugs in:
// - Frame bookkeeping for nested and indefinite containers
// - Chunked string skipping
// - Offsets running past the end of the buffer
// - Skip and render disagreeing about well-formedness
fuzz_target!(|data: &[u8]| {
    let skipped = (|| {
        let mut cursor = ItemCursor::new(data)?;
        while !cursor.at_end() {
            cursor.advance()?;
            assert!(cursor.offset() <= data.len());
        }
        assert_eq!(cursor.offset(), data.len());
        Ok::<_, cbor_decoder::DecodeError>(())
    })();

    // Rendering also validates text, so it may fail where skipping
    // succeeds, but never the other way round.
    if cbor_diag::diagnostic(data).is_ok() {
        assert!(skipped.is_ok());
    }
});
