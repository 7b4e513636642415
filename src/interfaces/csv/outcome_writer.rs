use crate::domain::payment::{PaymentIntent, Receipt};
use crate::domain::region::Currency;
use crate::error::{PaymentError, Result};
use serde::Serialize;
use std::io::Write;

/// One output row: what happened to a single intent.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Outcome {
    pub reference: String,
    pub region: String,
    pub currency: Option<Currency>,
    /// `completed` or the error kind.
    pub status: String,
    pub receipt: Option<String>,
}

impl Outcome {
    pub fn completed(intent: &PaymentIntent, receipt: &Receipt) -> Self {
        Self {
            reference: intent.reference.clone(),
            region: intent.region.to_string(),
            currency: Some(intent.region.currency()),
            status: "completed".to_string(),
            receipt: Some(receipt.id.clone()),
        }
    }

    pub fn failed(intent: &PaymentIntent, error: &PaymentError) -> Self {
        Self {
            reference: intent.reference.clone(),
            region: intent.region.to_string(),
            currency: Some(intent.region.currency()),
            status: error.kind().to_string(),
            receipt: None,
        }
    }

    /// For rows rejected before an intent could be built; the region is
    /// echoed as given.
    pub fn rejected(reference: &str, region: &str, error: &PaymentError) -> Self {
        Self {
            reference: reference.to_string(),
            region: region.to_string(),
            currency: None,
            status: error.kind().to_string(),
            receipt: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    /// One JSON object per line.
    Json,
}

/// Writes outcomes as CSV or JSON lines.
pub struct OutcomeWriter<W: Write> {
    sink: Sink<W>,
}

enum Sink<W: Write> {
    Csv(csv::Writer<W>),
    Json(W),
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(destination: W, format: OutputFormat) -> Self {
        let sink = match format {
            OutputFormat::Csv => Sink::Csv(csv::Writer::from_writer(destination)),
            OutputFormat::Json => Sink::Json(destination),
        };
        Self { sink }
    }

    pub fn write(&mut self, outcome: &Outcome) -> Result<()> {
        match &mut self.sink {
            Sink::Csv(writer) => writer.serialize(outcome)?,
            Sink::Json(writer) => {
                serde_json::to_writer(&mut *writer, outcome).map_err(std::io::Error::from)?;
                writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        match &mut self.sink {
            Sink::Csv(writer) => writer.flush()?,
            Sink::Json(writer) => writer.flush()?,
        }
        Ok(())
    }
}
