//! Kernel tests: event ordering, protocol violations, and slot fairness.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rb_core::{Priority, SimTime, TaskId};

use crate::{Acquisition, EventClass, KernelError, KernelResult, Process, Scheduler, Slot, Step};

// ── Test processes ────────────────────────────────────────────────────────────

type Log = Rc<RefCell<Vec<(f64, &'static str, &'static str)>>>;

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Records a mark every time it is resumed, then reschedules itself by the
/// next delay in its list.
struct Beeper {
    label: &'static str,
    delays: VecDeque<f64>,
    class: EventClass,
    log: Log,
}

impl Beeper {
    fn boxed(label: &'static str, delays: &[f64], class: EventClass, log: &Log) -> Box<Beeper> {
        Box::new(Beeper {
            label,
            delays: delays.iter().copied().collect(),
            class,
            log: log.clone(),
        })
    }
}

impl Process for Beeper {
    fn resume(&mut self, self_id: TaskId, sched: &mut Scheduler) -> KernelResult<Step> {
        self.log.borrow_mut().push((sched.now().0, self.label, "beep"));
        match self.delays.pop_front() {
            Some(d) => {
                sched.schedule_after(d, self.class, self_id)?;
                Ok(Step::Suspended)
            }
            None => Ok(Step::Done),
        }
    }
}

enum HolderState {
    Idle,
    Waiting(Acquisition),
    Holding(Acquisition),
}

/// Acquires one slot (or a pair), holds it for a fixed time, releases, done.
struct Holder {
    slots: Vec<Slot>,
    priority: Priority,
    hold: f64,
    label: &'static str,
    log: Log,
    state: HolderState,
}

impl Holder {
    fn boxed(
        slots: &[&Slot],
        priority: Priority,
        hold: f64,
        label: &'static str,
        log: &Log,
    ) -> Box<Holder> {
        Box::new(Holder {
            slots: slots.iter().map(|s| (*s).clone()).collect(),
            priority,
            hold,
            label,
            log: log.clone(),
            state: HolderState::Idle,
        })
    }
}

impl Process for Holder {
    fn resume(&mut self, self_id: TaskId, sched: &mut Scheduler) -> KernelResult<Step> {
        loop {
            match std::mem::replace(&mut self.state, HolderState::Idle) {
                HolderState::Idle => {
                    let acq = match self.slots.as_slice() {
                        [a] => Acquisition::single(a, self.priority, self_id, sched),
                        [a, b] => Acquisition::joint(a, b, self.priority, self_id, sched),
                        _ => unreachable!("holders take one or two slots"),
                    };
                    self.state = HolderState::Waiting(acq);
                }
                HolderState::Waiting(acq) => {
                    if !acq.ready() {
                        self.state = HolderState::Waiting(acq);
                        return Ok(Step::Suspended);
                    }
                    self.log
                        .borrow_mut()
                        .push((sched.now().0, self.label, "acquired"));
                    sched.schedule_after(self.hold, EventClass::TIMER, self_id)?;
                    self.state = HolderState::Holding(acq);
                    return Ok(Step::Suspended);
                }
                HolderState::Holding(acq) => {
                    acq.release(sched)?;
                    self.log
                        .borrow_mut()
                        .push((sched.now().0, self.label, "released"));
                    return Ok(Step::Done);
                }
            }
        }
    }
}

/// Spawn `process` and schedule its first resume `delay` seconds from now,
/// under the given event class.
fn start(
    sched: &mut Scheduler,
    process: Box<dyn Process>,
    class: EventClass,
    delay: f64,
) -> TaskId {
    let id = sched.spawn(process);
    sched.schedule_after(delay, class, id).expect("valid start delay");
    id
}

/// `start` for processes whose first resume is an ordinary timed wake.
fn start_timed(sched: &mut Scheduler, process: Box<dyn Process>, delay: f64) -> TaskId {
    start(sched, process, EventClass::TIMER, delay)
}

fn marks(log: &Log) -> Vec<(f64, &'static str, &'static str)> {
    log.borrow().clone()
}

// ── Event ordering ────────────────────────────────────────────────────────────

#[cfg(test)]
mod ordering {
    use super::*;

    #[test]
    fn events_fire_in_time_order() {
        let log = new_log();
        let mut sched = Scheduler::new();
        start_timed(&mut sched, Beeper::boxed("late", &[], EventClass::TIMER, &log), 5.0);
        start_timed(&mut sched, Beeper::boxed("early", &[], EventClass::TIMER, &log), 3.0);
        sched.run(SimTime(100.0)).unwrap();

        assert_eq!(
            marks(&log),
            vec![(3.0, "early", "beep"), (5.0, "late", "beep")]
        );
    }

    #[test]
    fn same_instant_orders_by_class() {
        let log = new_log();
        let mut sched = Scheduler::new();
        // Enqueued joining-class first, but the circulating-class event at
        // the same instant must be delivered before it.
        start(
            &mut sched,
            Beeper::boxed("joining", &[], Priority::Joining.into(), &log),
            Priority::Joining.into(),
            2.0,
        );
        start(
            &mut sched,
            Beeper::boxed("circulating", &[], Priority::Circulating.into(), &log),
            Priority::Circulating.into(),
            2.0,
        );
        sched.run(SimTime(100.0)).unwrap();

        let order: Vec<&str> = marks(&log).iter().map(|m| m.1).collect();
        assert_eq!(order, vec!["circulating", "joining"]);
    }

    #[test]
    fn timer_class_precedes_grant_classes_at_same_instant() {
        let log = new_log();
        let mut sched = Scheduler::new();
        start(
            &mut sched,
            Beeper::boxed("circulating", &[], Priority::Circulating.into(), &log),
            Priority::Circulating.into(),
            2.0,
        );
        start_timed(&mut sched, Beeper::boxed("timer", &[], EventClass::TIMER, &log), 2.0);
        sched.run(SimTime(100.0)).unwrap();

        let order: Vec<&str> = marks(&log).iter().map(|m| m.1).collect();
        assert_eq!(order, vec!["timer", "circulating"]);
    }

    #[test]
    fn fifo_within_same_class() {
        let log = new_log();
        let mut sched = Scheduler::new();
        start_timed(&mut sched, Beeper::boxed("first", &[], EventClass::TIMER, &log), 2.0);
        start_timed(&mut sched, Beeper::boxed("second", &[], EventClass::TIMER, &log), 2.0);
        start_timed(&mut sched, Beeper::boxed("third", &[], EventClass::TIMER, &log), 2.0);
        sched.run(SimTime(100.0)).unwrap();

        let order: Vec<&str> = marks(&log).iter().map(|m| m.1).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn clock_advances_with_reschedules() {
        let log = new_log();
        let mut sched = Scheduler::new();
        start_timed(&mut sched, Beeper::boxed("b", &[2.5, 4.0], EventClass::TIMER, &log), 1.0);
        sched.run(SimTime(100.0)).unwrap();

        let times: Vec<f64> = marks(&log).iter().map(|m| m.0).collect();
        assert_eq!(times, vec![1.0, 3.5, 7.5]);
        assert_eq!(sched.now(), SimTime(7.5));
    }

    #[test]
    fn run_truncates_at_horizon() {
        let log = new_log();
        let mut sched = Scheduler::new();
        start_timed(&mut sched, Beeper::boxed("b", &[10.0], EventClass::TIMER, &log), 1.0);
        sched.run(SimTime(5.0)).unwrap();

        // Only the first beep fired; the reschedule at t=11 is left pending
        // and the clock never moved past the last delivered event.
        assert_eq!(marks(&log).len(), 1);
        assert_eq!(sched.pending_events(), 1);
        assert_eq!(sched.now(), SimTime(1.0));
    }
}

// ── Protocol violations ───────────────────────────────────────────────────────

#[cfg(test)]
mod protocol {
    use super::*;
    use rb_core::SlotId;

    #[test]
    fn invalid_delay_rejected() {
        let log = new_log();
        let mut sched = Scheduler::new();
        let id = start_timed(&mut sched, Beeper::boxed("b", &[], EventClass::TIMER, &log), 0.0);

        assert!(matches!(
            sched.schedule_after(-1.0, EventClass::TIMER, id),
            Err(KernelError::InvalidDelay(_))
        ));
        assert!(matches!(
            sched.schedule_after(f64::NAN, EventClass::TIMER, id),
            Err(KernelError::InvalidDelay(_))
        ));
    }

    #[test]
    fn unknown_task_rejected() {
        let mut sched = Scheduler::new();
        assert!(matches!(
            sched.schedule_after(1.0, EventClass::TIMER, TaskId(99)),
            Err(KernelError::UnknownTask(_))
        ));
    }

    #[test]
    fn time_regression_detected() {
        let log = new_log();
        let mut sched = Scheduler::new();
        let id = start_timed(&mut sched, Beeper::boxed("b", &[5.0, 5.0], EventClass::TIMER, &log), 2.0);
        sched.run(SimTime(8.0)).unwrap();
        assert_eq!(sched.now(), SimTime(7.0));

        // Inject an event timestamped before the clock.
        sched.push_event_at(SimTime(1.0), EventClass::TIMER, id);
        assert!(matches!(
            sched.run(SimTime(100.0)),
            Err(KernelError::TimeRegression { .. })
        ));
    }

    #[test]
    fn release_without_grant_rejected() {
        let mut sched = Scheduler::new();
        let slot = Slot::new(SlotId(0));

        let held = Acquisition::single(&slot, Priority::Circulating, TaskId(0), &mut sched);
        assert!(held.ready());

        // A queued-but-never-granted request must not be releasable.
        let queued = Acquisition::single(&slot, Priority::Circulating, TaskId(1), &mut sched);
        assert!(!queued.ready());
        assert!(matches!(
            queued.release(&mut sched),
            Err(KernelError::ReleaseWithoutGrant(_))
        ));
    }

    #[test]
    fn double_release_rejected() {
        let mut sched = Scheduler::new();
        let slot = Slot::new(SlotId(0));
        let held = Acquisition::single(&slot, Priority::Circulating, TaskId(0), &mut sched);
        held.release(&mut sched).unwrap();
        assert!(matches!(
            held.release(&mut sched),
            Err(KernelError::ReleaseWithoutGrant(_))
        ));
    }
}

// ── Slot fairness and joint acquisition ───────────────────────────────────────

#[cfg(test)]
mod slots {
    use super::*;
    use rb_core::SlotId;

    #[test]
    fn free_slot_grants_synchronously() {
        let mut sched = Scheduler::new();
        let slot = Slot::new(SlotId(3));
        assert!(!slot.is_occupied());

        let acq = Acquisition::single(&slot, Priority::Joining, TaskId(0), &mut sched);
        assert!(acq.ready());
        assert!(slot.is_occupied());
        assert_eq!(acq.slot_ids(), vec![SlotId(3)]);
    }

    #[test]
    fn circulating_served_before_joining() {
        let log = new_log();
        let mut sched = Scheduler::new();
        let slot = Slot::new(SlotId(0));

        start_timed(&mut sched, Holder::boxed(&[&slot], Priority::Circulating, 10.0, "occupant", &log), 0.0);
        // Joining arrives *before* circulating; circulating still wins.
        start_timed(&mut sched, Holder::boxed(&[&slot], Priority::Joining, 1.0, "joiner", &log), 1.0);
        start_timed(&mut sched, Holder::boxed(&[&slot], Priority::Circulating, 1.0, "circler", &log), 2.0);
        sched.run(SimTime(100.0)).unwrap();

        let acquired: Vec<&str> = marks(&log)
            .iter()
            .filter(|m| m.2 == "acquired")
            .map(|m| m.1)
            .collect();
        assert_eq!(acquired, vec!["occupant", "circler", "joiner"]);
    }

    #[test]
    fn fifo_within_priority_class() {
        let log = new_log();
        let mut sched = Scheduler::new();
        let slot = Slot::new(SlotId(0));

        start_timed(&mut sched, Holder::boxed(&[&slot], Priority::Circulating, 10.0, "occupant", &log), 0.0);
        start_timed(&mut sched, Holder::boxed(&[&slot], Priority::Joining, 1.0, "join-a", &log), 1.0);
        start_timed(&mut sched, Holder::boxed(&[&slot], Priority::Joining, 1.0, "join-b", &log), 2.0);

        // Pause mid-contention: the occupant holds until t=10, both joiners
        // are parked in the wait queue.
        sched.run(SimTime(2.0)).unwrap();
        assert!(slot.is_occupied());
        assert_eq!(slot.queue_len(), 2);

        sched.run(SimTime(100.0)).unwrap();
        assert!(!slot.is_occupied());
        assert_eq!(slot.queue_len(), 0);

        let acquired: Vec<&str> = marks(&log)
            .iter()
            .filter(|m| m.2 == "acquired")
            .map(|m| m.1)
            .collect();
        assert_eq!(acquired, vec!["occupant", "join-a", "join-b"]);
    }

    #[test]
    fn joint_acquisition_waits_for_both() {
        let log = new_log();
        let mut sched = Scheduler::new();
        let a = Slot::new(SlotId(0));
        let b = Slot::new(SlotId(1));

        start_timed(&mut sched, Holder::boxed(&[&a], Priority::Circulating, 10.0, "blocker", &log), 0.0);
        start_timed(&mut sched, Holder::boxed(&[&a, &b], Priority::Joining, 2.0, "pair", &log), 1.0);
        sched.run(SimTime(100.0)).unwrap();

        let m = marks(&log);
        let pair_acquired = m.iter().find(|x| x.1 == "pair" && x.2 == "acquired").unwrap();
        // Slot b was free at t=1, but the pair counts as acquired only once
        // the blocker releases slot a.
        assert_eq!(pair_acquired.0, 10.0);
        let pair_released = m.iter().find(|x| x.1 == "pair" && x.2 == "released").unwrap();
        assert_eq!(pair_released.0, 12.0);
    }

    #[test]
    fn joint_holds_second_slot_while_waiting() {
        let log = new_log();
        let mut sched = Scheduler::new();
        let a = Slot::new(SlotId(0));
        let b = Slot::new(SlotId(1));

        start_timed(&mut sched, Holder::boxed(&[&a], Priority::Circulating, 10.0, "blocker", &log), 0.0);
        start_timed(&mut sched, Holder::boxed(&[&a, &b], Priority::Joining, 2.0, "pair", &log), 1.0);
        // Arrives while the pair is parked on slot b waiting for slot a.
        start_timed(&mut sched, Holder::boxed(&[&b], Priority::Circulating, 1.0, "third", &log), 5.0);
        sched.run(SimTime(100.0)).unwrap();

        let m = marks(&log);
        let third = m.iter().find(|x| x.1 == "third" && x.2 == "acquired").unwrap();
        // Slot b opens up only when the pair releases at t=12.
        assert_eq!(third.0, 12.0);
    }

    #[test]
    fn release_wakes_head_waiter_at_same_instant() {
        let log = new_log();
        let mut sched = Scheduler::new();
        let slot = Slot::new(SlotId(0));

        start_timed(&mut sched, Holder::boxed(&[&slot], Priority::Circulating, 4.0, "first", &log), 0.0);
        start_timed(&mut sched, Holder::boxed(&[&slot], Priority::Circulating, 4.0, "second", &log), 1.0);
        sched.run(SimTime(100.0)).unwrap();

        let m = marks(&log);
        let released = m.iter().find(|x| x.1 == "first" && x.2 == "released").unwrap();
        let acquired = m.iter().find(|x| x.1 == "second" && x.2 == "acquired").unwrap();
        assert_eq!(released.0, acquired.0);
    }
}
