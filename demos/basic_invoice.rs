use std::sync::Arc;

use fv_invoice::core::*;
use rust_decimal_macros::dec;

fn main() -> Result<(), InvoiceError> {
    let numbering = InvoiceNumberSequence::for_current_year();
    let mut invoice = Invoice::new(&numbering);

    let mango = Arc::new(Product::tax_free("Mango", dec!(12.50))?);
    let ham = Arc::new(Product::dairy("Szynka", dec!(6.99))?);
    let wine = Arc::new(Product::bottle_of_wine("Chianti", dec!(39.90))?);
    let fuel = Arc::new(Product::fuel_canister("Kanister 5l", dec!(32.00))?);

    invoice.add_product_quantity(&mango, 2)?;
    invoice.add_product(&ham)?;
    invoice.add_product(&wine)?;
    invoice.add_product(&fuel)?;
    // Same instance again: merges into the existing line.
    invoice.add_product(&mango)?;

    println!("{invoice}");
    println!("---");
    for line in invoice.tax_breakdown() {
        println!(
            "  rate {}: net {}, tax {}, excise {}",
            line.rate, line.net_amount, line.tax_amount, line.excise_amount
        );
    }
    println!("---");
    let totals = invoice.totals();
    println!("Net:     {} zł", totals.net_total);
    println!("Tax:     {} zł", totals.tax_total);
    println!("Gross:   {} zł", totals.gross_total);
    Ok(())
}
