//! Fuzz target: `payload::decode`
//!
//! Feeds arbitrary bytes to the status payload decoder.  Decoding must
//! never panic, and anything that does decode must re-encode to the
//! canonical compact form.
//!
//! cargo fuzz run fuzz_status_payload

#![no_main]

use eyespy_ble::payload;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(p) = payload::decode(data) else {
        return;
    };
    let canonical = format!(r#"{{"State":{},"Reason":{}}}"#, p.state, p.reason);
    if let Some(ev) = p.to_event() {
        let bytes = payload::encode(&ev).expect("encoding two integers cannot fail");
        assert_eq!(bytes, canonical.as_bytes());
    }
});
