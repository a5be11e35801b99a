//! Path planning: from an (ingress, egress) pair to an ordered slot path.
//!
//! # Routing rule
//!
//! The hop-count `(egress − ingress) mod 4` picks the route:
//!
//! - **1 or 2 hops** — the short way round, outer ring only: from the first
//!   slot of the ingress quarter-arc up to (exclusive) the egress exit's
//!   left boundary.
//! - **3 hops** — the long way round, shortcut through the inner ring: a
//!   compound first step occupying the ingress boundary slot of *both*
//!   rings at once, then the inner ring up to (exclusive) the egress
//!   boundary, then one outer-ring slot to cross back out.
//!
//! The exclusive egress bound sits at the exit's `left` boundary slot on
//! both routes.  The exact off-by-one at these boundaries is a modelling
//! choice, not a law — it is pinned down by the path-shape tests rather
//! than derived from anything deeper.

use rb_core::{Exit, Priority};
use rb_kernel::Slot;
use rb_spatial::{RoundAbout, slice_wrap};

use crate::error::PathError;

/// One step of a car's path: a single slot, or an outer/inner pair that
/// must be acquired together (the junction cell where a car crosses the
/// outer ring into the inner one).
#[derive(Clone)]
pub enum PathStep {
    Single(Slot),
    Compound { outer: Slot, inner: Slot },
}

impl PathStep {
    #[inline]
    pub fn is_compound(&self) -> bool {
        matches!(self, PathStep::Compound { .. })
    }
}

/// Priority class for the step at position `i` of a path: the first step
/// joins the roundabout, every later step is already circulating.
#[inline]
pub fn step_priority(i: usize) -> Priority {
    if i == 0 {
        Priority::Joining
    } else {
        Priority::Circulating
    }
}

/// Plan the whole slot path for one traversal.  Pure: reads only the
/// roundabout's rings and exit tables.
pub fn plan_path(
    roundabout: &RoundAbout,
    ingress: Exit,
    egress: Exit,
) -> Result<Vec<PathStep>, PathError> {
    let hops = ingress.hops_to(egress);
    if hops == 0 {
        return Err(PathError::UTurn(ingress));
    }

    let outer_exits = roundabout.outer_exits();

    if hops <= 2 {
        // Short way round: outer ring only.
        let first = outer_exits.right(ingress) as i64;
        let last = outer_exits.left(egress) as i64;
        let steps = slice_wrap(roundabout.outer(), first, last)
            .into_iter()
            .cloned()
            .map(PathStep::Single)
            .collect();
        return Ok(steps);
    }

    // Long way round: cut through the inner ring.
    let inner_exits = roundabout.inner_exits();
    let first_outer = outer_exits.left(ingress) as i64;
    let first_inner = inner_exits.left(ingress) as i64;
    let last_inner = inner_exits.left(egress) as i64;
    let last_outer = outer_exits.left(egress) as i64;

    let mut steps = Vec::new();
    // Entering both rings at once: the outer boundary slot is occupied only
    // for as long as it takes to slip into the inner ring.
    steps.push(PathStep::Compound {
        outer: roundabout.outer().get(first_outer).clone(),
        inner: roundabout.inner().get(first_inner).clone(),
    });
    steps.extend(
        slice_wrap(roundabout.inner(), first_inner + 1, last_inner)
            .into_iter()
            .cloned()
            .map(PathStep::Single),
    );
    // Cross the outer ring once more on the way out.
    steps.push(PathStep::Single(roundabout.outer().get(last_outer).clone()));
    Ok(steps)
}
