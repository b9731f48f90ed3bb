use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::InvoiceError;
use super::numbering::InvoiceNumberSequence;
use super::product::Product;

/// Sales invoice — a numbered, ordered set of products with quantities.
///
/// Lines are keyed by product *instance*: adding the same `Arc<Product>`
/// again raises that line's quantity, while a separately built product with
/// identical name and price opens a new line.
///
/// ```
/// use std::sync::Arc;
/// use fv_invoice::core::*;
/// use rust_decimal_macros::dec;
///
/// let numbering = InvoiceNumberSequence::new("FV-", 2025);
/// let mut invoice = Invoice::new(&numbering);
///
/// let bread = Arc::new(Product::tax_free("Chleb", dec!(5.00)).unwrap());
/// invoice.add_product_quantity(&bread, 2).unwrap();
/// invoice.add_product_quantity(&bread, 3).unwrap();
///
/// assert_eq!(invoice.number(), "FV-2025-0001");
/// assert_eq!(invoice.line_count(), 1);
/// assert_eq!(invoice.net_total(), dec!(25));
/// ```
#[derive(Debug)]
pub struct Invoice {
    number: String,
    lines: Vec<LineItem>,
    /// Product allocation address → index into `lines`.
    index: HashMap<usize, usize>,
}

/// One distinct product on an invoice with its aggregated quantity.
#[derive(Debug, Clone)]
pub struct LineItem {
    product: Arc<Product>,
    quantity: u64,
}

impl LineItem {
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    /// Always at least 1.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Net unit price × quantity.
    pub fn net_amount(&self) -> Decimal {
        self.product.price() * Decimal::from(self.quantity)
    }

    /// (Unit price with tax + excise) × quantity.
    pub fn gross_amount(&self) -> Decimal {
        self.product.price_gross() * Decimal::from(self.quantity)
    }

    fn tax_amount(&self) -> Decimal {
        (self.product.price_with_tax() - self.product.price()) * Decimal::from(self.quantity)
    }

    fn excise_amount(&self) -> Decimal {
        self.product.excise() * Decimal::from(self.quantity)
    }
}

/// Invoice totals, computed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Sum of net line amounts.
    pub net_total: Decimal,
    /// `gross_total - net_total`; includes excise.
    pub tax_total: Decimal,
    /// Sum of gross line amounts.
    pub gross_total: Decimal,
}

/// Tax and excise per tax rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxBreakdown {
    /// Tax rate as a fraction.
    pub rate: Decimal,
    /// Net amount taxed at this rate.
    pub net_amount: Decimal,
    /// Rate-based tax.
    pub tax_amount: Decimal,
    /// Flat excise on lines at this rate.
    pub excise_amount: Decimal,
}

impl Invoice {
    /// Create an empty invoice numbered from `numbering`.
    pub fn new(numbering: &InvoiceNumberSequence) -> Self {
        Self::with_number(numbering.next_number())
    }

    /// Create an empty invoice numbered from the process-wide sequence,
    /// stamped with the current year.
    pub fn issue() -> Self {
        Self::with_number(InvoiceNumberSequence::process_wide().next_number_this_year())
    }

    fn with_number(number: String) -> Self {
        Self {
            number,
            lines: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Add one unit of `product`.
    pub fn add_product(&mut self, product: &Arc<Product>) -> Result<(), InvoiceError> {
        self.add_product_quantity(product, 1)
    }

    /// Add `quantity` units of `product`, merging with an existing line for
    /// the same instance.
    ///
    /// Fails without touching the invoice if `quantity` is not positive, or
    /// if the merged quantity or the invoice's gross total would overflow.
    pub fn add_product_quantity(
        &mut self,
        product: &Arc<Product>,
        quantity: i64,
    ) -> Result<(), InvoiceError> {
        if quantity <= 0 {
            return Err(InvoiceError::invalid(format!(
                "quantity of '{}' must be positive, got {quantity}",
                product.name()
            )));
        }
        let quantity = quantity as u64;

        let key = Arc::as_ptr(product) as usize;
        let existing = self.index.get(&key).copied();
        let previous = existing.map_or(0, |idx| self.lines[idx].quantity);
        let merged = previous.checked_add(quantity).ok_or_else(|| {
            InvoiceError::invalid(format!(
                "quantity of '{}' overflows on invoice {}",
                product.name(),
                self.number
            ))
        })?;

        // Every line amount and total is bounded by the gross total, so
        // keeping that representable keeps all other sums representable.
        let unit_gross = product.price_gross();
        let previous_gross = unit_gross * Decimal::from(previous);
        unit_gross
            .checked_mul(Decimal::from(merged))
            .and_then(|line_gross| (self.gross_total() - previous_gross).checked_add(line_gross))
            .ok_or_else(|| {
                InvoiceError::invalid(format!(
                    "adding {quantity} x '{}' overflows the total of invoice {}",
                    product.name(),
                    self.number
                ))
            })?;

        match existing {
            Some(idx) => {
                self.lines[idx].quantity = merged;
                tracing::debug!(
                    invoice = %self.number,
                    product = product.name(),
                    quantity = merged,
                    "merged invoice line"
                );
            }
            None => {
                self.index.insert(key, self.lines.len());
                self.lines.push(LineItem {
                    product: Arc::clone(product),
                    quantity,
                });
                tracing::debug!(
                    invoice = %self.number,
                    product = product.name(),
                    quantity,
                    "added invoice line"
                );
            }
        }
        Ok(())
    }

    /// Lines in order of first addition.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity recorded for this exact product instance.
    pub fn quantity_of(&self, product: &Arc<Product>) -> Option<u64> {
        self.index
            .get(&(Arc::as_ptr(product) as usize))
            .map(|&idx| self.lines[idx].quantity)
    }

    /// Sum of net unit price × quantity. Zero for an empty invoice.
    pub fn net_total(&self) -> Decimal {
        self.lines.iter().map(LineItem::net_amount).sum()
    }

    /// Sum of (unit price with tax + excise) × quantity.
    pub fn gross_total(&self) -> Decimal {
        self.lines.iter().map(LineItem::gross_amount).sum()
    }

    /// Gross minus net, so excise counts as tax here.
    pub fn tax_total(&self) -> Decimal {
        self.gross_total() - self.net_total()
    }

    pub fn totals(&self) -> Totals {
        let net_total = self.net_total();
        let gross_total = self.gross_total();
        Totals {
            net_total,
            tax_total: gross_total - net_total,
            gross_total,
        }
    }

    /// Tax and excise grouped by tax rate, in order of first appearance.
    pub fn tax_breakdown(&self) -> Vec<TaxBreakdown> {
        let mut breakdown: Vec<TaxBreakdown> = Vec::new();
        for line in &self.lines {
            let rate = line.product.tax_rate();
            let entry = match breakdown.iter().position(|b| b.rate == rate) {
                Some(pos) => &mut breakdown[pos],
                None => {
                    breakdown.push(TaxBreakdown {
                        rate,
                        net_amount: Decimal::ZERO,
                        tax_amount: Decimal::ZERO,
                        excise_amount: Decimal::ZERO,
                    });
                    let last = breakdown.len() - 1;
                    &mut breakdown[last]
                }
            };
            entry.net_amount += line.net_amount();
            entry.tax_amount += line.tax_amount();
            entry.excise_amount += line.excise_amount();
        }
        breakdown
    }

    /// Text report: number header, one line per product, line count footer.
    pub fn print(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Numer faktury: {}", self.number)?;
        for line in &self.lines {
            writeln!(
                f,
                "{}, {} szt., {} zł",
                line.product.name(),
                line.quantity,
                line.product.price()
            )?;
        }
        write!(f, "Liczba pozycji: {}", self.lines.len())
    }
}
