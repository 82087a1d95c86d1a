//! Batch updater for KYC CMS applicant records.
//!
//! Reads applicant rows from a CSV file and issues one HTTP request per
//! row against the CMS backend, either updating occupation/employment
//! fields or posting a fixed note to the applicant's institution. Rows are
//! handled strictly sequentially in file order; a failed row is reported
//! and never stops the rest of the batch.

pub mod client;
pub mod config;
pub mod csv_reader;
pub mod error;
pub mod outcome;
pub mod reporter;
pub mod request;
pub mod runner;

pub use client::CmsClient;
pub use config::Config;
pub use csv_reader::{CsvRowReader, Row, RowIter};
pub use error::{AppError, AppResult, ConfigError, CsvFormatError};
pub use outcome::{Outcome, OutcomeStatus};
pub use request::{build_request, ApiRequest, UpdateAction};
pub use runner::{BatchRunner, RunSummary};
