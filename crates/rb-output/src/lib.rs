//! `rb-output` — result aggregation and export for finished runs.
//!
//! [`CompletionSummary`] folds per-source reports into per-pair statistics
//! (finished cars only; horizon-truncated cars are counted but never
//! averaged), and [`CsvWriter`] exports the raw car records plus the
//! aggregates:
//!
//! | File          | Contents                                 |
//! |---------------|------------------------------------------|
//! | `cars.csv`    | one row per spawned car                  |
//! | `sources.csv` | one aggregate row per direction pair     |

pub mod csv;
pub mod error;
pub mod summary;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use summary::{CompletionSummary, PairStats};
