use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use fv_invoice::core::*;

fn catalog() -> Vec<Arc<Product>> {
    vec![
        Arc::new(Product::tax_free("Owoce", dec!(12.50)).unwrap()),
        Arc::new(Product::dairy("Maslanka", dec!(3.49)).unwrap()),
        Arc::new(Product::other("Zeszyt", dec!(4.99)).unwrap()),
        Arc::new(Product::bottle_of_wine("Chianti", dec!(39.90)).unwrap()),
        Arc::new(Product::fuel_canister("Kanister", dec!(25)).unwrap()),
    ]
}

fn build_invoice(numbering: &InvoiceNumberSequence, lines: usize) -> Invoice {
    let mut invoice = Invoice::new(numbering);
    for i in 0..lines {
        let category = ProductCategory::ALL[i % ProductCategory::ALL.len()];
        let product = Arc::new(Product::new(category, format!("Item {i}"), dec!(9.99)).unwrap());
        invoice.add_product_quantity(&product, 2).unwrap();
    }
    invoice
}

fn bench_add_distinct(c: &mut Criterion) {
    let numbering = InvoiceNumberSequence::new("FV-", 2025);
    c.bench_function("add_1000_distinct_lines", |b| {
        b.iter(|| black_box(build_invoice(&numbering, 1000)));
    });
}

fn bench_add_merging(c: &mut Criterion) {
    let numbering = InvoiceNumberSequence::new("FV-", 2025);
    let products = catalog();
    c.bench_function("add_1000_merged_lines", |b| {
        b.iter(|| {
            let mut invoice = Invoice::new(&numbering);
            for i in 0..1000 {
                invoice
                    .add_product(black_box(&products[i % products.len()]))
                    .unwrap();
            }
            black_box(invoice)
        });
    });
}

fn bench_totals(c: &mut Criterion) {
    let invoice = build_invoice(&InvoiceNumberSequence::new("FV-", 2025), 1000);
    c.bench_function("totals_1000_lines", |b| {
        b.iter(|| black_box(black_box(&invoice).totals()));
    });
    c.bench_function("tax_breakdown_1000_lines", |b| {
        b.iter(|| black_box(black_box(&invoice).tax_breakdown()));
    });
}

fn bench_print(c: &mut Criterion) {
    let invoice = build_invoice(&InvoiceNumberSequence::new("FV-", 2025), 1000);
    c.bench_function("print_1000_lines", |b| {
        b.iter(|| black_box(black_box(&invoice).print()));
    });
}

fn bench_numbering(c: &mut Criterion) {
    let numbering = InvoiceNumberSequence::new("FV-", 2025);
    c.bench_function("next_number", |b| {
        b.iter(|| black_box(numbering.next_number()));
    });
}

criterion_group!(
    benches,
    bench_add_distinct,
    bench_add_merging,
    bench_totals,
    bench_print,
    bench_numbering,
);
criterion_main!(benches);
