#![no_main]
use libfuzzer_sys::fuzz_target;
use passform::store::tabular::format_row;

fuzz_target!(|fields: [String; 4]| {
    let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
    let row = format_row(&refs);
    assert!(row.ends_with('\n'));
});
