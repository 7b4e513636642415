//! Application layer containing the payment routing logic.
//!
//! This module defines the `PaymentDispatcher`, the entry point for executing
//! payment intents. It resolves each intent's currency, picks the strategy
//! registered for the region and reports failures to an `EventReporter`.

pub mod dispatcher;
