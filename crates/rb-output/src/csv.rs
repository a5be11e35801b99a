//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `cars.csv` — one row per spawned car
//! - `sources.csv` — one row per direction pair with its aggregates

use std::fs::File;
use std::path::Path;

use csv::Writer;

use rb_core::SimTime;
use rb_sim::SourceReport;

use crate::error::OutputResult;
use crate::summary::CompletionSummary;

/// Writes simulation results to two CSV files.
pub struct CsvWriter {
    cars:     Writer<File>,
    sources:  Writer<File>,
    finished: bool,
}

/// Unresolved times become empty cells rather than a sentinel number.
fn cell(time: Option<SimTime>) -> String {
    match time {
        Some(t) => format!("{:.4}", t.0),
        None => String::new(),
    }
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut cars = Writer::from_path(dir.join("cars.csv"))?;
        cars.write_record([
            "car_id", "source", "ingress", "egress", "hops", "start", "stop", "total",
        ])?;

        let mut sources = Writer::from_path(dir.join("sources.csv"))?;
        sources.write_record([
            "source",
            "ingress",
            "egress",
            "hops",
            "spawned",
            "finished",
            "unresolved",
            "mean_total",
        ])?;

        Ok(Self {
            cars,
            sources,
            finished: false,
        })
    }

    /// Append every car of every report to `cars.csv`.
    pub fn write_cars(&mut self, reports: &[SourceReport]) -> OutputResult<()> {
        for report in reports {
            for car in &report.cars {
                let total = match (car.start, car.stop) {
                    (Some(start), Some(stop)) => Some(SimTime(stop.since(start))),
                    _ => None,
                };
                self.cars.write_record(&[
                    car.id.0.to_string(),
                    report.source.0.to_string(),
                    car.ingress.to_string(),
                    car.egress.to_string(),
                    car.hops.to_string(),
                    cell(car.start),
                    cell(car.stop),
                    cell(total),
                ])?;
            }
        }
        Ok(())
    }

    /// Append one aggregate row per report to `sources.csv`.
    pub fn write_sources(&mut self, reports: &[SourceReport]) -> OutputResult<()> {
        let summary = CompletionSummary::from_reports(reports);
        for (report, stats) in reports.iter().zip(&summary.pairs) {
            self.sources.write_record(&[
                report.source.0.to_string(),
                stats.ingress.to_string(),
                stats.egress.to_string(),
                stats.hops.to_string(),
                stats.spawned.to_string(),
                stats.finished.to_string(),
                stats.unresolved.to_string(),
                stats
                    .mean_total
                    .map(|m| format!("{m:.4}"))
                    .unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    /// Flush both files.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.cars.flush()?;
        self.sources.flush()?;
        Ok(())
    }
}
