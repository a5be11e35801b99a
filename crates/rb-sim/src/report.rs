//! Post-run outcome reports, one per car source.

use rb_core::{CarId, Exit, SimTime, SourceId};
use rb_traffic::CarRecord;

/// How one car's traversal ended.
#[derive(Clone, Debug, PartialEq)]
pub enum CarOutcome {
    /// The car left the roundabout; `total` is the seconds it spent inside.
    Finished { total: f64 },
    /// Still in transit when the horizon was reached.  Deliberately not a
    /// number: averaging in a truncated time would bias every statistic.
    Unresolved,
}

impl CarOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, CarOutcome::Finished { .. })
    }
}

/// Everything the simulation knows about one car after the run.
#[derive(Clone, Debug, PartialEq)]
pub struct CarReport {
    pub id: CarId,
    pub ingress: Exit,
    pub egress: Exit,
    pub hops: u8,
    pub start: Option<SimTime>,
    pub stop: Option<SimTime>,
    pub outcome: CarOutcome,
}

impl CarReport {
    pub fn from_record(record: &CarRecord) -> CarReport {
        let outcome = match record.total_time() {
            Some(total) => CarOutcome::Finished { total },
            None => CarOutcome::Unresolved,
        };
        CarReport {
            id: record.id,
            ingress: record.ingress,
            egress: record.egress,
            hops: record.hops,
            start: record.start,
            stop: record.stop,
            outcome,
        }
    }
}

/// All cars one source spawned over the run, in spawn order.
#[derive(Clone, Debug)]
pub struct SourceReport {
    pub source: SourceId,
    pub ingress: Exit,
    pub egress: Exit,
    pub cars: Vec<CarReport>,
}

impl SourceReport {
    pub fn spawned(&self) -> usize {
        self.cars.len()
    }

    pub fn finished(&self) -> usize {
        self.cars.iter().filter(|c| c.outcome.is_finished()).count()
    }

    pub fn unresolved(&self) -> usize {
        self.spawned() - self.finished()
    }
}
