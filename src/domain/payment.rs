use super::region::{Currency, Region};
use crate::error::PaymentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a positive monetary amount for a payment.
///
/// This is a wrapper around `rust_decimal::Decimal` that rejects zero and
/// negative values at construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Whether the amount can be expressed in `currency` without rounding.
    pub fn fits(&self, currency: Currency) -> bool {
        self.0.normalize().scale() <= currency.minor_units()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A request to pay `amount` within `region`.
///
/// `reference` is the caller's idempotency reference; retries at a higher
/// layer must reuse it so processors can deduplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub region: Region,
    pub amount: Amount,
    pub reference: String,
}

impl PaymentIntent {
    /// Creates a validated intent.
    ///
    /// # Errors
    ///
    /// Fails with [`PaymentError::ValidationError`] when the reference is blank
    /// or the amount carries more decimals than the region's currency allows.
    pub fn new(
        region: Region,
        amount: Amount,
        reference: impl Into<String>,
    ) -> Result<Self, PaymentError> {
        let intent = Self {
            region,
            amount,
            reference: reference.into(),
        };
        intent.validate()?;
        Ok(intent)
    }

    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.reference.trim().is_empty() {
            return Err(PaymentError::ValidationError(
                "Payment reference must not be empty".to_string(),
            ));
        }
        let currency = self.region.currency();
        if !self.amount.fits(currency) {
            return Err(PaymentError::ValidationError(format!(
                "Amount {} has more than {} decimals for {}",
                self.amount.value(),
                currency.minor_units(),
                currency
            )));
        }
        Ok(())
    }
}

/// Confirmation of a successfully executed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: String,
    pub processor_reference: Option<String>,
}

impl Receipt {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            processor_reference: None,
        }
    }

    pub fn with_processor_reference(mut self, reference: impl Into<String>) -> Self {
        self.processor_reference = Some(reference.into());
        self
    }
}
