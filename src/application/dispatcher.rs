use crate::domain::event::{FailureEvent, PaymentStage};
use crate::domain::payment::{PaymentIntent, Receipt};
use crate::domain::ports::{EventReporterBox, StrategyRef};
use crate::domain::region::{Region, RegionRegistry};
use crate::error::{PaymentError, Result, StrategyError};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

type StrategyTable = HashMap<Region, StrategyRef>;

/// Routes payment intents to the strategy registered for their region.
///
/// The strategy table is an immutable snapshot behind `Arc`. Registration
/// builds a new snapshot and swaps it in under a short write lock, so a `pay`
/// call never holds a lock while a strategy is doing I/O and never observes a
/// half-updated table.
pub struct PaymentDispatcher {
    registry: RegionRegistry,
    strategies: RwLock<Arc<StrategyTable>>,
    reporter: EventReporterBox,
}

impl PaymentDispatcher {
    /// Creates a dispatcher with an empty strategy table.
    ///
    /// # Arguments
    ///
    /// * `registry` - The regions this dispatcher accepts strategies for.
    /// * `reporter` - Receives a [`FailureEvent`] for every failed payment.
    pub fn new(registry: RegionRegistry, reporter: EventReporterBox) -> Self {
        Self {
            registry,
            strategies: RwLock::new(Arc::new(HashMap::new())),
            reporter,
        }
    }

    /// Associates `strategy` with `region`.
    ///
    /// Fails with [`PaymentError::DuplicateStrategy`] if the region already has
    /// one; the existing strategy stays active. Use [`Self::replace_strategy`]
    /// to overwrite on purpose.
    pub async fn register_strategy(&self, region: Region, strategy: StrategyRef) -> Result<()> {
        self.ensure_enabled(region)?;

        let mut table = self.strategies.write().await;
        if table.contains_key(&region) {
            return Err(PaymentError::DuplicateStrategy(region));
        }
        let mut next = (**table).clone();
        next.insert(region, strategy);
        *table = Arc::new(next);
        Ok(())
    }

    /// Installs `strategy` for `region`, returning the one it replaced.
    pub async fn replace_strategy(
        &self,
        region: Region,
        strategy: StrategyRef,
    ) -> Result<Option<StrategyRef>> {
        self.ensure_enabled(region)?;

        let mut table = self.strategies.write().await;
        let mut next = (**table).clone();
        let previous = next.insert(region, strategy);
        *table = Arc::new(next);
        Ok(previous)
    }

    pub async fn has_strategy(&self, region: Region) -> bool {
        self.snapshot().await.contains_key(&region)
    }

    /// Regions that currently have a strategy, in declaration order.
    pub async fn routed_regions(&self) -> Vec<Region> {
        let table = self.snapshot().await;
        Region::ALL
            .into_iter()
            .filter(|region| table.contains_key(region))
            .collect()
    }

    /// Dispatches `intent` to its region's strategy.
    ///
    /// The strategy's result is returned as-is: no retries, no fallback to
    /// another region's strategy. If `cancel` fires before the strategy
    /// finishes, the attempt is dropped and [`PaymentError::Cancelled`] is
    /// returned. A receipt the strategy has already produced is never
    /// discarded for a late cancellation. Every failure is reported once
    /// before it is returned.
    pub async fn pay(&self, intent: &PaymentIntent, cancel: CancellationToken) -> Result<Receipt> {
        let region = intent.region;
        let mut stage = PaymentStage::Created;

        if let Err(e) = intent.validate() {
            return Err(self.fail(intent, stage, e));
        }

        let currency = self.registry.currency_for(region);
        stage = stage.advance();

        let Some(strategy) = self.snapshot().await.get(&region).cloned() else {
            return Err(self.fail(intent, stage, PaymentError::UnroutablePayment(region)));
        };
        stage = stage.advance();

        // Strategy first: a ready receipt wins over a cancellation on the same poll.
        let outcome = tokio::select! {
            biased;
            result = strategy.execute(intent, currency, cancel.clone()) => result,
            _ = cancel.cancelled() => Err(StrategyError::Cancelled),
        };

        match outcome {
            Ok(receipt) => Ok(receipt),
            Err(StrategyError::Cancelled) => {
                Err(self.fail(intent, stage, PaymentError::Cancelled(region)))
            }
            Err(source) => Err(self.fail(
                intent,
                stage,
                PaymentError::StrategyFailure { region, source },
            )),
        }
    }

    /// Like [`Self::pay`], cancelling the attempt once `deadline` elapses.
    pub async fn pay_within(&self, intent: &PaymentIntent, deadline: Duration) -> Result<Receipt> {
        let cancel = CancellationToken::new();
        let timer = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(deadline).await;
                cancel.cancel();
            })
        };

        let result = self.pay(intent, cancel).await;
        timer.abort();
        result
    }

    async fn snapshot(&self) -> Arc<StrategyTable> {
        Arc::clone(&*self.strategies.read().await)
    }

    fn ensure_enabled(&self, region: Region) -> Result<()> {
        if self.registry.contains(region) {
            Ok(())
        } else {
            Err(PaymentError::UnrecognizedRegion(region.to_string()))
        }
    }

    /// Reports `error` as reached at `stage`, which is never terminal.
    fn fail(
        &self,
        intent: &PaymentIntent,
        stage: PaymentStage,
        error: PaymentError,
    ) -> PaymentError {
        debug_assert!(!stage.is_terminal());
        self.reporter.report(&FailureEvent {
            region: intent.region,
            currency: self.registry.currency_for(intent.region),
            kind: error.kind(),
            stage,
            reference: intent.reference.clone(),
        });
        error
    }
}
