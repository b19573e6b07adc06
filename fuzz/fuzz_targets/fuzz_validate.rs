#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic — a verdict with errors is fine, a panic is a bug.
        let _ = fatturapa::sdi::validate(s);
    }
});
