//! Sequential row pipeline: read, build, execute, report.

use tracing::warn;

use crate::client::CmsClient;
use crate::config::Config;
use crate::csv_reader::CsvRowReader;
use crate::error::AppResult;
use crate::reporter;
use crate::request::{build_request, UpdateAction};

/// Counters for one full run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows a request was sent for.
    pub processed: u64,
    pub succeeded: u64,
    pub failed: u64,
    /// Rows no request was sent for (empty UID, or a comment row without
    /// an institution key).
    pub skipped: u64,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Drives one batch: rows are taken in file order and handled strictly one
/// at a time, each row's response awaited before the next row is read.
/// Per-row failures become `Outcome` values and never abort the run; only
/// config and CSV-shape problems do, and those surface before the first
/// request is sent.
pub struct BatchRunner {
    config: Config,
    client: CmsClient,
    action: UpdateAction,
}

impl BatchRunner {
    pub fn new(config: Config, action: UpdateAction) -> Self {
        Self {
            config,
            client: CmsClient::new(),
            action,
        }
    }

    pub async fn run(&self, reader: &CsvRowReader) -> AppResult<RunSummary> {
        let mut summary = RunSummary::default();

        let mut rows = reader.rows()?;

        for result in rows.by_ref() {
            let row = result?;

            let request = match build_request(&self.config, self.action, &row) {
                Some(request) => request,
                None => {
                    warn!("Skipping applicant {}: row has no institution key", row.uid);
                    summary.skipped += 1;
                    continue;
                }
            };

            let outcome = self.client.execute(&request).await;

            summary.processed += 1;
            if outcome.is_success() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }

            reporter::report(&outcome);
        }

        summary.skipped += rows.skipped();

        Ok(summary)
    }
}
