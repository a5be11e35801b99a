//! Priority mutual-exclusion slots and atomic multi-slot acquisition.
//!
//! A [`Slot`] is a single-capacity resource: one occupant, plus a wait queue
//! ordered by `(priority rank, arrival sequence)` — circulating requests are
//! served before joining ones, FIFO within each class.  Slots never time out
//! and never age waiters; starvation of the joining class under sustained
//! circulating contention is a modeled property of the right-of-way rule,
//! not something the kernel works around.
//!
//! # Grants and wakeups
//!
//! A request against a free, uncontended slot is granted synchronously — the
//! requester is the currently-running process and checks its handle without
//! suspending.  All other grants happen inside [`SlotRequest::release`]:
//! the occupant leaves and the head waiter becomes the occupant within the
//! same scheduler step, so no process can ever observe the slot as
//! simultaneously free and contended.
//!
//! Wakeups are funnelled through a shared [`WakeTarget`] counting outstanding
//! grants.  A single request arms the counter at 1; a joint acquisition arms
//! it at 2 and is woken exactly once, when the *last* of its slots is
//! granted.  This is what makes joint acquisition all-or-nothing from the
//! acquiring process's point of view, and it also means a process never
//! receives two wakeups for one acquisition.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rb_core::{Priority, SlotId, TaskId};

use crate::error::{KernelError, KernelResult};
use crate::event::EventClass;
use crate::scheduler::Scheduler;

// ── WakeTarget ────────────────────────────────────────────────────────────────

/// Counts the grants one acquisition is still waiting for.
///
/// Shared (`Rc`) between the acquiring process's handle and every wait-queue
/// entry the acquisition planted.
pub struct WakeTarget {
    task: TaskId,
    pending: Cell<u32>,
}

impl WakeTarget {
    pub fn new(task: TaskId, parts: u32) -> Rc<WakeTarget> {
        Rc::new(WakeTarget {
            task,
            pending: Cell::new(parts),
        })
    }

    /// All requested slots have been granted.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.pending.get() == 0
    }

    /// Record a grant delivered synchronously at request time.  The
    /// requester is the running process, so no wakeup is scheduled.
    fn grant_sync(&self) {
        self.pending.set(self.pending.get() - 1);
    }

    /// Record a grant delivered from a release.  Returns `true` when this
    /// grant completed the acquisition and a wakeup must be scheduled.
    fn grant_async(&self) -> bool {
        let left = self.pending.get() - 1;
        self.pending.set(left);
        left == 0
    }
}

// ── Slot ──────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RequestState {
    Pending,
    Granted,
    Released,
}

struct Waiter {
    rank: u8,
    state: Rc<Cell<RequestState>>,
    target: Rc<WakeTarget>,
}

struct SlotInner {
    occupied: bool,
    /// Sorted by `(rank, insertion order)`: new waiters are inserted after
    /// every waiter of the same or lower rank, so the Vec order *is* the
    /// service order and the head is always the next grantee.
    waiters: Vec<Waiter>,
}

/// A single-capacity unit of road, lockable by at most one occupant.
///
/// Cloning a `Slot` clones a handle to the same shared resource; the rings
/// and every car path step hold such handles.
#[derive(Clone)]
pub struct Slot {
    id: SlotId,
    inner: Rc<RefCell<SlotInner>>,
}

impl Slot {
    pub fn new(id: SlotId) -> Slot {
        Slot {
            id,
            inner: Rc::new(RefCell::new(SlotInner {
                occupied: false,
                waiters: Vec::new(),
            })),
        }
    }

    #[inline]
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// `true` while an occupant holds the slot.
    pub fn is_occupied(&self) -> bool {
        self.inner.borrow().occupied
    }

    /// Number of requests currently queued behind the occupant.
    pub fn queue_len(&self) -> usize {
        self.inner.borrow().waiters.len()
    }

    /// Request occupancy on behalf of `target`'s task.
    ///
    /// Free and uncontended → granted synchronously.  Otherwise the request
    /// joins the wait queue at the back of its priority class and resolves
    /// when a release reaches it.
    pub fn request(
        &self,
        priority: Priority,
        target: &Rc<WakeTarget>,
        sched: &mut Scheduler,
    ) -> SlotRequest {
        let state = Rc::new(Cell::new(RequestState::Pending));
        let mut inner = self.inner.borrow_mut();
        if !inner.occupied && inner.waiters.is_empty() {
            inner.occupied = true;
            state.set(RequestState::Granted);
            target.grant_sync();
            log::trace!("{} slot {} granted immediately", sched.now(), self.id);
        } else {
            let rank = priority.rank();
            let pos = inner
                .waiters
                .iter()
                .position(|w| w.rank > rank)
                .unwrap_or(inner.waiters.len());
            inner.waiters.insert(
                pos,
                Waiter {
                    rank,
                    state: state.clone(),
                    target: target.clone(),
                },
            );
            log::trace!(
                "{} slot {} queued {} request at position {pos}",
                sched.now(),
                self.id,
                priority
            );
        }
        SlotRequest {
            slot: self.clone(),
            state,
        }
    }

    /// Vacate the slot and, in the same step, grant the head waiter if any.
    fn release_request(&self, request: &SlotRequest, sched: &mut Scheduler) -> KernelResult<()> {
        if request.state.get() != RequestState::Granted {
            return Err(KernelError::ReleaseWithoutGrant(self.id));
        }
        request.state.set(RequestState::Released);

        let next = {
            let mut inner = self.inner.borrow_mut();
            inner.occupied = false;
            if inner.waiters.is_empty() {
                None
            } else {
                let waiter = inner.waiters.remove(0);
                inner.occupied = true;
                waiter.state.set(RequestState::Granted);
                Some(waiter)
            }
        };

        if let Some(waiter) = next {
            if waiter.target.grant_async() {
                sched.schedule_after(0.0, EventClass(waiter.rank), waiter.target.task)?;
            }
        }
        Ok(())
    }
}

// ── SlotRequest ───────────────────────────────────────────────────────────────

/// A pending or granted acquisition handle for one slot.
pub struct SlotRequest {
    slot: Slot,
    state: Rc<Cell<RequestState>>,
}

impl SlotRequest {
    #[inline]
    pub fn is_granted(&self) -> bool {
        self.state.get() == RequestState::Granted
    }

    #[inline]
    pub fn slot_id(&self) -> SlotId {
        self.slot.id
    }

    /// Give the slot up.  Fails with
    /// [`KernelError::ReleaseWithoutGrant`] if the request was never granted
    /// — that is a protocol bug in the caller, not a recoverable state.
    pub fn release(&self, sched: &mut Scheduler) -> KernelResult<()> {
        self.slot.release_request(self, sched)
    }
}

// ── Acquisition ───────────────────────────────────────────────────────────────

/// One path step's worth of held slots: either a single slot or an
/// inner/outer pair acquired jointly.
///
/// The joint form issues both requests before control returns, suspends the
/// owner until *both* are granted (in whichever order releases happen to
/// arrive), and releases both in the same instant.
pub struct Acquisition {
    target: Rc<WakeTarget>,
    requests: Vec<SlotRequest>,
}

impl Acquisition {
    /// Request a single slot.
    pub fn single(
        slot: &Slot,
        priority: Priority,
        task: TaskId,
        sched: &mut Scheduler,
    ) -> Acquisition {
        let target = WakeTarget::new(task, 1);
        let request = slot.request(priority, &target, sched);
        Acquisition {
            target,
            requests: vec![request],
        }
    }

    /// Request two slots atomically — the owner resumes only when both are
    /// granted.
    pub fn joint(
        a: &Slot,
        b: &Slot,
        priority: Priority,
        task: TaskId,
        sched: &mut Scheduler,
    ) -> Acquisition {
        let target = WakeTarget::new(task, 2);
        let requests = vec![
            a.request(priority, &target, sched),
            b.request(priority, &target, sched),
        ];
        Acquisition { target, requests }
    }

    /// `true` once every requested slot has been granted.
    #[inline]
    pub fn ready(&self) -> bool {
        self.target.is_ready()
    }

    /// `true` for a compound (two-slot) acquisition.
    #[inline]
    pub fn is_joint(&self) -> bool {
        self.requests.len() == 2
    }

    /// IDs of the slots this acquisition covers, in request order.
    pub fn slot_ids(&self) -> Vec<SlotId> {
        self.requests.iter().map(SlotRequest::slot_id).collect()
    }

    /// Release every held slot within the same scheduler step.
    pub fn release(&self, sched: &mut Scheduler) -> KernelResult<()> {
        for request in &self.requests {
            request.release(sched)?;
        }
        Ok(())
    }
}
