#![no_main]
use libfuzzer_sys::fuzz_target;
use ox88::chess::position::Position;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(position) = Position::try_from(s) {
            // Everything that was accepted is printed back in a form that is
            // accepted again and describes the same position.
            let serialized = position.to_string();
            let reparsed = Position::from_fen(&serialized).expect("serialized FEN is valid");
            assert_eq!(position, reparsed, "{serialized}");
        }
    }
});
