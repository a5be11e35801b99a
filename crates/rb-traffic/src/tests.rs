//! Unit tests for path planning, the car process, and arrival sampling.

use rb_spatial::RoundAbout;

fn reference_roundabout() -> RoundAbout {
    RoundAbout::new(16, 24).unwrap()
}

#[cfg(test)]
mod planning {
    use rb_core::{Exit, Priority, SlotId};

    use super::reference_roundabout;
    use crate::error::PathError;
    use crate::path::{PathStep, plan_path, step_priority};

    #[test]
    fn u_turn_rejected() {
        let ra = reference_roundabout();
        for &e in &Exit::ALL {
            assert!(matches!(plan_path(&ra, e, e), Err(PathError::UTurn(_))));
        }
    }

    #[test]
    fn short_routes_use_outer_ring_only() {
        let ra = reference_roundabout();
        for &ingress in &Exit::ALL {
            for hops in 1..=2u8 {
                let egress = ingress.offset(hops);
                let path = plan_path(&ra, ingress, egress).unwrap();
                assert!(
                    path.iter().all(|s| !s.is_compound()),
                    "{ingress}->{egress} must not touch the inner ring"
                );
            }
        }
    }

    #[test]
    fn outer_path_length_tracks_quarter_arcs() {
        // One quarter-arc per hop, minus the one-slot egress margin.
        let ra = reference_roundabout();
        let quarter = 24 / 4;
        for &ingress in &Exit::ALL {
            for hops in 1..=2u8 {
                let egress = ingress.offset(hops);
                let path = plan_path(&ra, ingress, egress).unwrap();
                assert_eq!(
                    path.len(),
                    quarter * hops as usize - 1,
                    "{ingress}->{egress}"
                );
            }
        }
    }

    #[test]
    fn long_route_shape() {
        // West -> North: compound junction step, inner arc, one outer slot out.
        let ra = reference_roundabout();
        let path = plan_path(&ra, Exit::West, Exit::North).unwrap();

        assert!(path[0].is_compound());
        assert!(path[1..].iter().all(|s| !s.is_compound()));

        let inner_segment = path.len() - 2;
        assert!(inner_segment >= 1);
        // Three quarters of the 16-slot inner ring, minus the boundary slot
        // taken by the compound step.
        assert_eq!(inner_segment, 3 * (16 / 4) - 1);
    }

    #[test]
    fn long_route_boundary_slots() {
        let ra = reference_roundabout();
        let path = plan_path(&ra, Exit::West, Exit::North).unwrap();

        // Junction cell: outer left boundary of West is slot 23; inner left
        // boundary of West is inner slot 15, which carries id 24 + 15 = 39.
        match &path[0] {
            PathStep::Compound { outer, inner } => {
                assert_eq!(outer.id(), SlotId(23));
                assert_eq!(inner.id(), SlotId(39));
            }
            PathStep::Single(_) => panic!("first step must be compound"),
        }

        // Exit crossing: outer left boundary of North is slot 17.
        match path.last().unwrap() {
            PathStep::Single(slot) => assert_eq!(slot.id(), SlotId(17)),
            PathStep::Compound { .. } => panic!("last step must be single"),
        }
    }

    #[test]
    fn same_hop_count_gives_same_length() {
        let ra = reference_roundabout();
        for hops in 1..=3u8 {
            let lengths: Vec<usize> = Exit::ALL
                .iter()
                .map(|&i| plan_path(&ra, i, i.offset(hops)).unwrap().len())
                .collect();
            assert!(
                lengths.windows(2).all(|w| w[0] == w[1]),
                "hop-count {hops}: {lengths:?}"
            );
        }
    }

    #[test]
    fn first_step_joins_rest_circulate() {
        assert_eq!(step_priority(0), Priority::Joining);
        assert_eq!(step_priority(1), Priority::Circulating);
        assert_eq!(step_priority(7), Priority::Circulating);
    }
}

#[cfg(test)]
mod driving {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rb_core::{CarId, Exit, SimTime};
    use rb_kernel::{EventClass, Scheduler};

    use super::reference_roundabout;
    use crate::car::{Car, CarRecord, SharedCarRecord};
    use crate::path::plan_path;
    use crate::trace::{TraceKind, TraceSink};

    fn shared_record(ingress: Exit, egress: Exit) -> SharedCarRecord {
        Rc::new(RefCell::new(CarRecord {
            id: CarId(0),
            ingress,
            egress,
            hops: ingress.hops_to(egress),
            start: None,
            stop: None,
        }))
    }

    #[test]
    fn lone_car_crosses_unimpeded() {
        let ra = reference_roundabout();
        let record = shared_record(Exit::West, Exit::South);
        let path = plan_path(&ra, Exit::West, Exit::South).unwrap();
        let steps = path.len();
        let trace = TraceSink::recording();

        let mut sched = Scheduler::new();
        let task = sched.spawn(Box::new(Car::new(record.clone(), path, 2.0, trace.clone())));
        sched.schedule_after(0.0, EventClass::TIMER, task).unwrap();
        sched.run(SimTime(1_000.0)).unwrap();

        let rec = record.borrow();
        assert_eq!(rec.start, Some(SimTime::ZERO));
        assert_eq!(rec.stop, Some(SimTime(steps as f64 * 2.0)));
        assert_eq!(rec.total_time(), Some(steps as f64 * 2.0));

        // With nobody else on the road every acquire happens right on the
        // slot-passing cadence.
        let acquire_times: Vec<f64> = trace
            .events()
            .iter()
            .filter(|e| matches!(e.kind, TraceKind::Acquired { .. }))
            .map(|e| e.time.0)
            .collect();
        let expected: Vec<f64> = (0..steps).map(|i| i as f64 * 2.0).collect();
        assert_eq!(acquire_times, expected);
    }

    #[test]
    fn unfinished_car_reports_unresolved() {
        let ra = reference_roundabout();
        let record = shared_record(Exit::West, Exit::East);
        let path = plan_path(&ra, Exit::West, Exit::East).unwrap();

        let mut sched = Scheduler::new();
        let task = sched.spawn(Box::new(Car::new(
            record.clone(),
            path,
            2.0,
            TraceSink::disabled(),
        )));
        sched.schedule_after(0.0, EventClass::TIMER, task).unwrap();
        // Horizon cuts the drive off mid-path.
        sched.run(SimTime(5.0)).unwrap();

        let rec = record.borrow();
        assert_eq!(rec.start, Some(SimTime::ZERO));
        assert_eq!(rec.stop, None);
        assert_eq!(rec.total_time(), None);
        assert!(!rec.is_finished());
    }

    #[test]
    fn compound_step_acquires_both_slots_at_once() {
        let ra = reference_roundabout();
        let record = shared_record(Exit::West, Exit::North);
        let path = plan_path(&ra, Exit::West, Exit::North).unwrap();
        let trace = TraceSink::recording();

        let mut sched = Scheduler::new();
        let task = sched.spawn(Box::new(Car::new(record, path, 1.0, trace.clone())));
        sched.schedule_after(0.0, EventClass::TIMER, task).unwrap();
        sched.run(SimTime(1_000.0)).unwrap();

        let events = trace.events();
        let first_acquire = events
            .iter()
            .find(|e| matches!(e.kind, TraceKind::Acquired { .. }))
            .unwrap();
        match &first_acquire.kind {
            TraceKind::Acquired { slots, compound } => {
                assert!(*compound);
                assert_eq!(slots.len(), 2);
            }
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod arrivals {
    use rb_core::{Exit, SourceId, SourceRng};

    use crate::arrivals::{ArrivalDistribution, ArrivalTable};

    #[test]
    fn means() {
        assert_eq!(ArrivalDistribution::Exponential { mean: 5.0 }.mean(), 5.0);
        assert_eq!(
            ArrivalDistribution::Uniform { low: 2.0, high: 8.0 }.mean(),
            5.0
        );
    }

    #[test]
    fn uniform_samples_stay_in_band() {
        let mut rng = SourceRng::new(9, SourceId(0));
        let dist = ArrivalDistribution::Uniform { low: 7.0, high: 83.0 };
        for _ in 0..500 {
            let x = dist.sample(&mut rng);
            assert!((7.0..83.0).contains(&x));
        }
    }

    #[test]
    fn exponential_sample_mean_is_plausible() {
        let mut rng = SourceRng::new(9, SourceId(0));
        let dist = ArrivalDistribution::Exponential { mean: 10.0 };
        let n = 4_000;
        let total: f64 = (0..n).map(|_| dist.sample(&mut rng)).sum();
        let mean = total / n as f64;
        assert!((mean - 10.0).abs() < 1.0, "sample mean {mean}");
    }

    #[test]
    fn table_lookup_by_ingress_and_hops() {
        let table = ArrivalTable::default();
        assert_eq!(
            *table.distribution(Exit::West, 2),
            ArrivalDistribution::Exponential { mean: 8.42 }
        );
        assert_eq!(
            *table.distribution(Exit::North, 1),
            ArrivalDistribution::Uniform { low: 33.0, high: 100.0 }
        );
    }

    #[test]
    #[should_panic]
    fn hop_count_zero_is_out_of_range() {
        ArrivalTable::default().distribution(Exit::West, 0);
    }
}

#[cfg(test)]
mod sources {
    use crate::source::CarIdGen;

    #[test]
    fn car_ids_are_monotone_across_clones() {
        let ids = CarIdGen::new();
        let other = ids.clone();
        assert_eq!(ids.next_id().0, 0);
        assert_eq!(other.next_id().0, 1);
        assert_eq!(ids.next_id().0, 2);
    }
}
