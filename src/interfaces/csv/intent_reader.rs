use crate::domain::payment::{Amount, PaymentIntent};
use crate::domain::region::RegionRegistry;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

/// One raw row of an intents file, before any validation.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct IntentRecord {
    pub region: String,
    pub amount: String,
    pub reference: String,
}

impl IntentRecord {
    /// Validates the row against `registry` and builds the intent.
    ///
    /// Unknown or disabled region codes become
    /// [`PaymentError::UnrecognizedRegion`]; malformed amounts become
    /// [`PaymentError::ValidationError`].
    pub fn into_intent(self, registry: &RegionRegistry) -> Result<PaymentIntent> {
        let region = registry.resolve(&self.region)?;
        let value = Decimal::from_str(self.amount.trim()).map_err(|e| {
            PaymentError::ValidationError(format!("Invalid amount {:?}: {}", self.amount, e))
        })?;
        PaymentIntent::new(region, Amount::new(value)?, self.reference)
    }
}

/// Reads payment intents from a CSV source.
///
/// Expects a `region, amount, reference` header. Whitespace around fields is
/// trimmed.
pub struct IntentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> IntentReader<R> {
    /// Creates a new `IntentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads rows.
    ///
    /// Rows that cannot be deserialized yield an error without ending the
    /// stream.
    pub fn records(self) -> impl Iterator<Item = Result<IntentRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
