use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::InvoiceError;

/// Standard VAT rate (23%).
pub const STANDARD_RATE: Decimal = dec!(0.23);

/// Reduced VAT rate for dairy products (8%).
pub const REDUCED_RATE: Decimal = dec!(0.08);

/// Flat per-unit excise on wine and fuel.
pub const EXCISE_PER_UNIT: Decimal = dec!(5.56);

/// Lowest whole-unit price accepted for a tax-free product.
const TAX_FREE_MIN_PRICE: Decimal = dec!(2);

/// Product category — selects tax rate, excise and construction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// 0% VAT, no excise. Price must be at least 2 in whole units.
    TaxFree,
    /// Standard 23% VAT.
    Other,
    /// Reduced 8% VAT.
    Dairy,
    /// 23% VAT plus flat excise.
    BottleOfWine,
    /// 0% VAT plus flat excise.
    FuelCanister,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 5] = [
        Self::TaxFree,
        Self::Other,
        Self::Dairy,
        Self::BottleOfWine,
        Self::FuelCanister,
    ];

    /// Tax rate as a fraction (0.23 = 23%).
    pub fn tax_rate(&self) -> Decimal {
        match self {
            Self::TaxFree | Self::FuelCanister => Decimal::ZERO,
            Self::Other | Self::BottleOfWine => STANDARD_RATE,
            Self::Dairy => REDUCED_RATE,
        }
    }

    /// Flat excise added to every unit.
    pub fn excise(&self) -> Decimal {
        match self {
            Self::BottleOfWine | Self::FuelCanister => EXCISE_PER_UNIT,
            Self::TaxFree | Self::Other | Self::Dairy => Decimal::ZERO,
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TaxFree => "tax-free",
            Self::Other => "other",
            Self::Dairy => "dairy",
            Self::BottleOfWine => "bottle of wine",
            Self::FuelCanister => "fuel canister",
        }
    }

    fn validate(&self, name: &str, price: Decimal, tax_rate: Decimal) -> Result<(), InvoiceError> {
        if name.is_empty() {
            return Err(InvoiceError::invalid("product name cannot be empty"));
        }
        if price < Decimal::ZERO {
            return Err(InvoiceError::invalid(format!(
                "price of '{name}' cannot be negative, got {price}"
            )));
        }
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(InvoiceError::invalid(format!(
                "tax rate of '{name}' must lie between 0 and 1, got {tax_rate}"
            )));
        }

        if *self == Self::TaxFree {
            // Whole units only: 2.99 passes, 1.99 does not.
            if price.trunc() < TAX_FREE_MIN_PRICE {
                return Err(InvoiceError::invalid(format!(
                    "tax-free product '{name}' must cost at least {TAX_FREE_MIN_PRICE}, got {price}"
                )));
            }
            if !tax_rate.is_zero() {
                return Err(InvoiceError::invalid(format!(
                    "tax-free product '{name}' cannot carry tax rate {tax_rate}"
                )));
            }
        }

        // price_with_tax() and price_gross() rely on this never overflowing.
        price
            .checked_mul(tax_rate)
            .and_then(|tax| price.checked_add(tax))
            .and_then(|with_tax| with_tax.checked_add(self.excise()))
            .ok_or_else(|| {
                InvoiceError::invalid(format!(
                    "gross unit price of '{name}' overflows, got price {price}"
                ))
            })?;
        Ok(())
    }
}

/// A taxable product.
///
/// Immutable once built. Invoices merge lines by *instance*, not by value:
/// share a product as `Arc<Product>` and add the same handle to merge
/// quantities. Two separately built products with equal fields are two lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    name: String,
    price: Decimal,
    tax_rate: Decimal,
    excise: Decimal,
    category: ProductCategory,
}

impl Product {
    /// Build a product with the category's tax rate and excise.
    pub fn new(
        category: ProductCategory,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, InvoiceError> {
        ProductBuilder::new(category, name, price).build()
    }

    pub fn tax_free(name: impl Into<String>, price: Decimal) -> Result<Self, InvoiceError> {
        Self::new(ProductCategory::TaxFree, name, price)
    }

    pub fn other(name: impl Into<String>, price: Decimal) -> Result<Self, InvoiceError> {
        Self::new(ProductCategory::Other, name, price)
    }

    pub fn dairy(name: impl Into<String>, price: Decimal) -> Result<Self, InvoiceError> {
        Self::new(ProductCategory::Dairy, name, price)
    }

    pub fn bottle_of_wine(name: impl Into<String>, price: Decimal) -> Result<Self, InvoiceError> {
        Self::new(ProductCategory::BottleOfWine, name, price)
    }

    pub fn fuel_canister(name: impl Into<String>, price: Decimal) -> Result<Self, InvoiceError> {
        Self::new(ProductCategory::FuelCanister, name, price)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Net unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Flat per-unit excise (zero for most categories).
    pub fn excise(&self) -> Decimal {
        self.excise
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }

    /// Unit price including rate-based tax, excluding excise.
    pub fn price_with_tax(&self) -> Decimal {
        self.price + self.price * self.tax_rate
    }

    /// Unit price including tax and excise.
    pub fn price_gross(&self) -> Decimal {
        self.price_with_tax() + self.excise
    }
}

/// Builder for [`Product`], allowing an explicit tax rate.
///
/// ```
/// use fv_invoice::core::*;
/// use rust_decimal_macros::dec;
///
/// let kefir = ProductBuilder::new(ProductCategory::Dairy, "Kefir", dec!(3.49))
///     .tax_rate(dec!(0.05))
///     .build()
///     .unwrap();
/// assert_eq!(kefir.price_with_tax(), dec!(3.6645));
/// ```
pub struct ProductBuilder {
    category: ProductCategory,
    name: String,
    price: Decimal,
    tax_rate: Option<Decimal>,
}

impl ProductBuilder {
    pub fn new(category: ProductCategory, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            category,
            name: name.into(),
            price,
            tax_rate: None,
        }
    }

    /// Override the category's tax rate. Must lie in `[0, 1]`.
    pub fn tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = Some(rate);
        self
    }

    pub fn build(self) -> Result<Product, InvoiceError> {
        let tax_rate = self.tax_rate.unwrap_or_else(|| self.category.tax_rate());
        self.category.validate(&self.name, self.price, tax_rate)?;

        Ok(Product {
            name: self.name,
            price: self.price,
            tax_rate,
            excise: self.category.excise(),
            category: self.category,
        })
    }
}

/// Wire shape of a product; deserialization goes through the builder.
#[derive(Deserialize)]
struct ProductRecord {
    name: String,
    price: Decimal,
    category: ProductCategory,
    #[serde(default)]
    tax_rate: Option<Decimal>,
    #[serde(default)]
    excise: Option<Decimal>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = InvoiceError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        if let Some(excise) = record.excise {
            if excise != record.category.excise() {
                return Err(InvoiceError::invalid(format!(
                    "excise of {} products is {}, got {excise}",
                    record.category.label(),
                    record.category.excise()
                )));
            }
        }

        let mut builder = ProductBuilder::new(record.category, record.name, record.price);
        if let Some(rate) = record.tax_rate {
            builder = builder.tax_rate(rate);
        }
        builder.build()
    }
}
