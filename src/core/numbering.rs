use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Datelike, Local};

/// Default prefix of sales invoice numbers ("faktura VAT").
pub const DEFAULT_PREFIX: &str = "FV-";

/// Default zero-padding width of the sequence part.
pub const DEFAULT_PADDING: usize = 4;

static PROCESS_WIDE: OnceLock<InvoiceNumberSequence> = OnceLock::new();

/// Gapless invoice number sequence.
///
/// Generates invoice numbers in the format `{prefix}{year}-{sequential}`,
/// e.g. "FV-2025-0001", "FV-2025-0002", etc.
///
/// The counter is a single [`AtomicU64`], so a sequence can be shared by
/// reference between threads: every call to [`next_number`](Self::next_number)
/// gets a distinct value and no value is skipped. The counter is never reset
/// or decremented.
///
/// Sequence values that outgrow the padding width are printed in full
/// ("FV-2025-10000"), never truncated.
#[derive(Debug)]
pub struct InvoiceNumberSequence {
    prefix: String,
    year: i32,
    last_issued: AtomicU64,
    zero_pad: usize,
}

impl InvoiceNumberSequence {
    /// Create a new sequence. The first number issued has sequence 1.
    pub fn new(prefix: impl Into<String>, year: i32) -> Self {
        Self::starting_after(prefix, year, 0)
    }

    /// "FV-" sequence for the current local calendar year.
    pub fn for_current_year() -> Self {
        Self::new(DEFAULT_PREFIX, Local::now().year())
    }

    /// Create a sequence continuing after an already issued number.
    pub fn starting_after(prefix: impl Into<String>, year: i32, last_issued: u64) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            last_issued: AtomicU64::new(last_issued),
            zero_pad: DEFAULT_PADDING,
        }
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// The sequence shared by every [`Invoice::issue`](super::Invoice::issue)
    /// call in this process. Created on first use; its counter spans years.
    pub fn process_wide() -> &'static InvoiceNumberSequence {
        PROCESS_WIDE.get_or_init(Self::for_current_year)
    }

    /// Issue the next invoice number.
    pub fn next_number(&self) -> String {
        self.next_number_in(self.year)
    }

    /// Issue the next number stamped with the current local year rather
    /// than the year the sequence was created with.
    pub fn next_number_this_year(&self) -> String {
        self.next_number_in(Local::now().year())
    }

    /// Issue the next number stamped with `year`. Shares the counter with
    /// [`next_number`](Self::next_number); the counter is not reset.
    pub fn next_number_in(&self, year: i32) -> String {
        let seq = self.last_issued.fetch_add(1, Ordering::AcqRel) + 1;
        let number = self.format(year, seq);
        if seq.to_string().len() > self.zero_pad {
            tracing::warn!(
                number = %number,
                width = self.zero_pad,
                "invoice sequence outgrew its padding width"
            );
        }
        tracing::debug!(number = %number, "issued invoice number");
        number
    }

    /// Preview the next number without consuming it.
    ///
    /// Another thread may take this number before the caller does.
    pub fn peek(&self) -> String {
        self.format(self.year, self.last_issued() + 1)
    }

    /// Sequence value of the most recently issued number (0 if none yet).
    pub fn last_issued(&self) -> u64 {
        self.last_issued.load(Ordering::Acquire)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn format(&self, year: i32, seq: u64) -> String {
        format!(
            "{}{}-{:0>width$}",
            self.prefix,
            year,
            seq,
            width = self.zero_pad
        )
    }
}

impl Default for InvoiceNumberSequence {
    fn default() -> Self {
        Self::for_current_year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn sequential_numbering() {
        let seq = InvoiceNumberSequence::new("FV-", 2025);
        assert_eq!(seq.next_number(), "FV-2025-0001");
        assert_eq!(seq.next_number(), "FV-2025-0002");
        assert_eq!(seq.next_number(), "FV-2025-0003");
        assert_eq!(seq.last_issued(), 3);
    }

    #[test]
    fn peek_does_not_consume() {
        let seq = InvoiceNumberSequence::new("FV-", 2025);
        assert_eq!(seq.peek(), "FV-2025-0001");
        assert_eq!(seq.peek(), "FV-2025-0001");
        assert_eq!(seq.next_number(), "FV-2025-0001");
        assert_eq!(seq.peek(), "FV-2025-0002");
    }

    #[test]
    fn starting_after() {
        let seq = InvoiceNumberSequence::starting_after("FV-", 2025, 41);
        assert_eq!(seq.next_number(), "FV-2025-0042");
        assert_eq!(seq.next_number(), "FV-2025-0043");
    }

    #[test]
    fn custom_padding() {
        let seq = InvoiceNumberSequence::new("R", 2025).with_padding(6);
        assert_eq!(seq.next_number(), "R2025-000001");
    }

    #[test]
    fn widens_past_padding() {
        let seq = InvoiceNumberSequence::starting_after("FV-", 2025, 9998);
        assert_eq!(seq.next_number(), "FV-2025-9999");
        assert_eq!(seq.next_number(), "FV-2025-10000");
    }

    #[test]
    fn current_year_uses_fv_prefix() {
        let seq = InvoiceNumberSequence::for_current_year();
        assert_eq!(seq.prefix(), "FV-");
        assert_eq!(seq.year(), Local::now().year());
    }

    #[test]
    fn explicit_year_shares_the_counter() {
        let seq = InvoiceNumberSequence::new("FV-", 2025);
        assert_eq!(seq.next_number(), "FV-2025-0001");
        assert_eq!(seq.next_number_in(2026), "FV-2026-0002");
        assert_eq!(seq.next_number(), "FV-2025-0003");
    }

    #[test]
    fn this_year_follows_the_clock() {
        let seq = InvoiceNumberSequence::new("FV-", 1999);
        let number = seq.next_number_this_year();
        assert!(number.starts_with(&format!("FV-{}-", Local::now().year())));
        assert!(number.ends_with("-0001"));
    }

    #[test]
    fn concurrent_issuance_is_unique_and_gapless() {
        let seq = Arc::new(InvoiceNumberSequence::new("FV-", 2025));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let seq = Arc::clone(&seq);
                thread::spawn(move || (0..250).map(|_| seq.next_number()).collect::<Vec<_>>())
            })
            .collect();

        let mut issued = HashSet::new();
        for handle in handles {
            for number in handle.join().unwrap() {
                assert!(issued.insert(number), "duplicate invoice number");
            }
        }
        assert_eq!(issued.len(), 2000);
        assert_eq!(seq.last_issued(), 2000);
        assert!(issued.contains("FV-2025-0001"));
        assert!(issued.contains("FV-2025-2000"));
    }
}
