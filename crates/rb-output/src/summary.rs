//! Per-pair completion statistics over a finished run.

use std::fmt;

use rb_core::Exit;
use rb_sim::{CarOutcome, SourceReport};

/// Completion statistics for one direction pair.
///
/// The timing aggregates cover finished cars only; cars cut off by the
/// horizon appear in `unresolved` and nowhere else.  All three aggregates
/// are `None` when nothing finished.
#[derive(Clone, Debug)]
pub struct PairStats {
    pub ingress:    Exit,
    pub egress:     Exit,
    pub hops:       u8,
    pub spawned:    usize,
    pub finished:   usize,
    pub unresolved: usize,
    pub mean_total: Option<f64>,
    pub min_total:  Option<f64>,
    pub max_total:  Option<f64>,
}

impl PairStats {
    fn from_report(report: &SourceReport) -> PairStats {
        let totals: Vec<f64> = report
            .cars
            .iter()
            .filter_map(|car| match car.outcome {
                CarOutcome::Finished { total } => Some(total),
                CarOutcome::Unresolved => None,
            })
            .collect();

        let (mean, min, max) = if totals.is_empty() {
            (None, None, None)
        } else {
            let sum: f64 = totals.iter().sum();
            (
                Some(sum / totals.len() as f64),
                totals.iter().copied().reduce(f64::min),
                totals.iter().copied().reduce(f64::max),
            )
        };

        PairStats {
            ingress:    report.ingress,
            egress:     report.egress,
            hops:       report.ingress.hops_to(report.egress),
            spawned:    report.spawned(),
            finished:   report.finished(),
            unresolved: report.unresolved(),
            mean_total: mean,
            min_total:  min,
            max_total:  max,
        }
    }
}

/// The whole run's statistics, one [`PairStats`] per source in source order.
#[derive(Clone, Debug)]
pub struct CompletionSummary {
    pub pairs: Vec<PairStats>,
}

impl CompletionSummary {
    pub fn from_reports(reports: &[SourceReport]) -> CompletionSummary {
        CompletionSummary {
            pairs: reports.iter().map(PairStats::from_report).collect(),
        }
    }

    pub fn spawned(&self) -> usize {
        self.pairs.iter().map(|p| p.spawned).sum()
    }

    pub fn finished(&self) -> usize {
        self.pairs.iter().map(|p| p.finished).sum()
    }

    pub fn unresolved(&self) -> usize {
        self.pairs.iter().map(|p| p.unresolved).sum()
    }
}

impl fmt::Display for CompletionSummary {
    /// A fixed-width table, one row per direction pair plus a totals line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<5} -> {:<5}  {:>4}  {:>7} {:>8} {:>10}  {:>8} {:>8} {:>8}",
            "from", "to", "hops", "spawned", "finished", "unresolved", "mean", "min", "max"
        )?;
        for p in &self.pairs {
            let fmt_opt = |v: Option<f64>| match v {
                Some(v) => format!("{v:.2}"),
                None => "-".to_string(),
            };
            writeln!(
                f,
                "{:<5} -> {:<5}  {:>4}  {:>7} {:>8} {:>10}  {:>8} {:>8} {:>8}",
                p.ingress.to_string(),
                p.egress.to_string(),
                p.hops,
                p.spawned,
                p.finished,
                p.unresolved,
                fmt_opt(p.mean_total),
                fmt_opt(p.min_total),
                fmt_opt(p.max_total),
            )?;
        }
        write!(
            f,
            "total: {} spawned, {} finished, {} unresolved",
            self.spawned(),
            self.finished(),
            self.unresolved()
        )
    }
}
