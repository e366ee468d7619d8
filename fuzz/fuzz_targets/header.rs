#![no_main]

use cbor_types::Item;
use cbor_wire::{Argument, ByteCursor, Header, MajorType};
use libfuzzer_sys::fuzz_target;

// Fuzz target: Header::read_from and Item::from_header on arbitrary bytes.
//
// Catches bugs in:
// - Argument width handling (1/2/4/8 bytes)
// - Reserved and indefinite additional-info checks
// - Cursor movement not matching the reported encoded length
// - Item classification disagreeing with the header it came from
fuzz_target!(|data: &[u8]| {
    let mut cursor = ByteCursor::new(data);
    let before = cursor;
    match Header::read_from(&mut cursor) {
        Ok(header) => {
            assert_eq!(cursor.offset(), header.encoded_len());
            assert_eq!(Header::peek(&before).unwrap(), header);

            match Item::from_header(&header) {
                Ok(item) => {
                    assert!(!header.is_break());
                    assert_eq!(item.major_type(), header.major);
                    assert_eq!(
                        item.is_length_known(),
                        !matches!(header.argument, Argument::Indefinite)
                    );
                }
                Err(_) => assert!(header.major == MajorType::SimpleOrFloat),
            }
        }
        Err(_) => assert!(Header::peek(&before).is_err()),
    }
});
