//! Fuzz target for color parsing.
//!
//! Tests that color strings never panic the parser and that anything it
//! accepts formats back to something it accepts again.

#![no_main]

use chromatext::{ColorValue, Rgba};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let parsed = Rgba::parse(data);
    let _ = Rgba::from_hex(data);
    let _ = ColorValue::from(data).to_rgba();

    if let Some(color) = parsed {
        let formatted = color.to_string();
        assert!(
            Rgba::parse(&formatted).is_some(),
            "formatted color {formatted:?} from {data:?} does not parse"
        );
    }

    // Functional syntax with the input as arguments.
    let _ = Rgba::parse(&format!("rgb({data})"));
    let _ = Rgba::parse(&format!("rgba({data})"));
});
