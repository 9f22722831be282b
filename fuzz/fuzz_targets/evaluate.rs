#![no_main]
use libfuzzer_sys::fuzz_target;

use safecalc::{evaluate, session::{Action, Session}};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = evaluate(s);
        let _ = Session::default()
            .apply(Action::SetExpr(s.to_string()))
            .apply(Action::Evaluate);
    }
});
