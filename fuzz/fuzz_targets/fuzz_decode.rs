#![no_main]

use libfuzzer_sys::fuzz_target;

use fungible_token::Call;
use fungible_types::{AccountId, EventRecord, TokenAmount};

fuzz_target!(|data: &[u8]| {
    // Binary decoding of persisted values must never panic.
    let _ = bincode::deserialize::<EventRecord>(data);
    let _ = bincode::deserialize::<TokenAmount>(data);
    let _ = bincode::deserialize::<AccountId>(data);

    // Text decoding of calls and amounts must never panic, and anything
    // that decodes must stay inside the 256-bit range.
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = serde_json::from_str::<Call>(text);
        if let Ok(amount) = text.parse::<TokenAmount>() {
            assert!(amount.raw().bits() <= u64::from(TokenAmount::BITS));
        }
        let _ = text.parse::<AccountId>();
    }
});
