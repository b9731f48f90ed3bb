#![no_main]

use std::sync::Arc;

use fv_invoice::{Invoice, InvoiceNumberSequence, Product, ProductCategory};
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let numbering = InvoiceNumberSequence::new("FV-", 2025);
    let mut invoice = Invoice::new(&numbering);
    let mut last: Option<Arc<Product>> = None;

    for chunk in data.chunks_exact(4) {
        let category = ProductCategory::ALL[chunk[0] as usize % ProductCategory::ALL.len()];
        let price = Decimal::new(i64::from(u16::from_le_bytes([chunk[1], chunk[2]])), 2);
        let quantity = i64::from(chunk[3] as i8);

        // Odd selector bytes reuse the previous instance to exercise merging.
        let product = match &last {
            Some(prev) if chunk[0] % 2 == 1 => Arc::clone(prev),
            _ => match Product::new(category, "Fuzz", price) {
                Ok(p) => Arc::new(p),
                Err(_) => continue,
            },
        };
        last = Some(Arc::clone(&product));

        let before = invoice.totals();
        if invoice.add_product_quantity(&product, quantity).is_err() {
            assert!(quantity <= 0);
            assert_eq!(invoice.totals(), before);
        }
    }

    assert_eq!(
        invoice.tax_total(),
        invoice.gross_total() - invoice.net_total()
    );
    assert!(invoice.gross_total() >= invoice.net_total());
});
