use thiserror::Error;

/// Errors that can occur while building products or filling an invoice.
///
/// Every error is returned before any state is touched, so a failed call
/// leaves the invoice exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvoiceError {
    /// A precondition on a product or on an invoice operation was violated.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl InvoiceError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// True for [`InvoiceError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
