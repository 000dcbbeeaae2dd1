#![no_main]
use libfuzzer_sys::fuzz_target;
use passform::store::document::{decode, encode};

fuzz_target!(|data: &[u8]| {
    // Decoder must not panic on arbitrary inputs, and whatever decodes must re-encode
    if let Ok(map) = decode(data) {
        let bytes = encode(&map).expect("decoded map encodes");
        let again = decode(&bytes).expect("encoded map decodes");
        assert_eq!(again.len(), map.len());
    }
});
