//! Normalization pass over a market's pending records.

use sessionbars_normalize::{Normalizer, Outcome};
use sessionbars_store::{BarStore, MarketConfig, RawRecordStore, StoreError};
use sessionbars_types::{Market, RawRecord, RecordStatus, Session, SessionbarsError};
use tracing::{debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::{DriverError, Result, RunSummary, Selection};

/// Drives the normalizer over pending records.
///
/// Records are processed one at a time. A record's bars are written bucket
/// by bucket, then its terminal status is upserted. If any write fails the
/// record stays pending, is counted as failed, and the pass moves on.
#[derive(Debug)]
pub struct Driver<M, R, B> {
    markets: M,
    records: R,
    bars: B,
    normalizer: Normalizer,
}

/// Why a record could not be written back.
enum WriteFailure {
    Bars(Session, StoreError),
    Transition(SessionbarsError),
    Status(StoreError),
}

impl<M, R, B> Driver<M, R, B>
where
    M: MarketConfig,
    R: RawRecordStore,
    B: BarStore,
{
    /// Creates a driver over the given stores.
    #[must_use]
    pub const fn new(markets: M, records: R, bars: B) -> Self {
        Self {
            markets,
            records,
            bars,
            normalizer: Normalizer::new(),
        }
    }

    /// Returns the raw record store.
    #[must_use]
    pub const fn records(&self) -> &R {
        &self.records
    }

    /// Returns the bar store.
    #[must_use]
    pub const fn bars(&self) -> &B {
        &self.bars
    }

    /// Runs one pass over the selection's pending records.
    ///
    /// # Errors
    ///
    /// Returns an error, without touching any record, if the market is
    /// unknown or if the market or its pending records cannot be read.
    pub fn run(&self, selection: &Selection) -> Result<RunSummary> {
        let run_id = Uuid::new_v4();
        let span = info_span!("normalize_run", %run_id, market = %selection.market);
        let _enter = span.enter();

        let market = self.resolve_market(&selection.market)?;
        let pending = self.records.query_by_status(
            market.id(),
            selection.code(),
            RecordStatus::Pending,
        )?;

        info!(selection = %selection, records = pending.len(), "Starting normalization run");

        let mut summary = RunSummary::new(run_id, market.id());
        summary.selected = pending.len();

        for record in pending {
            self.process_record(record, &market, &mut summary);
        }

        info!(
            processed = summary.processed,
            parse_errors = summary.parse_errors,
            api_errors = summary.api_errors,
            malformed = summary.malformed,
            failed = summary.failed,
            bars = summary.total_bars(),
            dropped = summary.dropped,
            "Normalization run finished"
        );

        Ok(summary)
    }

    fn resolve_market(&self, market_id: &str) -> Result<Market> {
        match self.markets.find(market_id)? {
            Some(market) => Ok(market),
            None => {
                error!(market = %market_id, "Unknown market, aborting run");
                Err(DriverError::UnknownMarket(market_id.to_string()))
            }
        }
    }

    fn process_record(&self, record: RawRecord, market: &Market, summary: &mut RunSummary) {
        let outcome = self.normalizer.process(&record, market);

        if let Err(failure) = self.write_back(&record, &outcome, summary) {
            match failure {
                WriteFailure::Bars(session, e) => error!(
                    record_id = %record.id,
                    code = %record.code,
                    session = %session,
                    error = %e,
                    "Failed to write bars, record left pending"
                ),
                WriteFailure::Transition(e) => error!(
                    record_id = %record.id,
                    code = %record.code,
                    error = %e,
                    "Record refused its terminal status"
                ),
                WriteFailure::Status(e) => error!(
                    record_id = %record.id,
                    code = %record.code,
                    error = %e,
                    "Failed to write record status, record left pending"
                ),
            }
            summary.record_status(RecordStatus::Pending);
            return;
        }

        let status = outcome.status();
        summary.record_status(status);

        match &outcome {
            Outcome::Processed(bars) => {
                summary.dropped += bars.dropped();
                if bars.dropped() > 0 {
                    warn!(
                        record_id = %record.id,
                        code = %record.code,
                        bars = bars.len(),
                        dropped = bars.dropped(),
                        "Samples outside all trading windows were dropped"
                    );
                } else {
                    debug!(
                        record_id = %record.id,
                        code = %record.code,
                        bars = bars.len(),
                        "Record processed"
                    );
                }
            }
            Outcome::Malformed(reason) => warn!(
                record_id = %record.id,
                code = %record.code,
                status = %status,
                reason = %reason,
                "Record failed normalization"
            ),
            Outcome::ParseError { .. } | Outcome::ApiError { .. } => warn!(
                record_id = %record.id,
                code = %record.code,
                status = %status,
                message = %outcome.message().unwrap_or_default(),
                "Record failed normalization"
            ),
        }
    }

    /// Appends bars bucket by bucket, then upserts the terminal status.
    ///
    /// Buckets written before a failure are not rolled back.
    fn write_back(
        &self,
        record: &RawRecord,
        outcome: &Outcome,
        summary: &mut RunSummary,
    ) -> std::result::Result<(), WriteFailure> {
        if let Some(bars) = outcome.bars() {
            for (session, session_bars) in bars.non_empty() {
                self.bars
                    .insert_many(session, session_bars)
                    .map_err(|e| WriteFailure::Bars(session, e))?;
                summary.add_bars(session, session_bars.len());
            }
        }

        let mut updated = record.clone();
        outcome
            .apply_to(&mut updated)
            .map_err(WriteFailure::Transition)?;
        self.records.upsert(&updated).map_err(WriteFailure::Status)
    }
}
