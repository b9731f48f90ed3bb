#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Deserialize → serialize → deserialize must not panic, and anything
    // accepted once must be accepted again unchanged.
    if let Ok(product) = serde_json::from_slice::<fv_invoice::Product>(data) {
        let json = serde_json::to_vec(&product).unwrap();
        let again: fv_invoice::Product = serde_json::from_slice(&json).unwrap();
        assert_eq!(again, product);
    }
});
