use std::any::{Any, TypeId};
use std::cell::Cell;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::{Clock, ComponentId, Error};

/// Entry type stored in the scheduler, including the event value, component ID, and the time when
/// it is supposed to occur.
///
/// Entries are ordered so that the one popped first from a max-heap is the earliest in time, and
/// among simultaneous entries, the one scheduled first.
#[derive(Debug)]
pub struct EventEntry {
    time: Reverse<OrderedFloat<f64>>,
    sequence: Reverse<u64>,
    component: usize,
    inner: Box<dyn Any>,
    event_type: TypeId,
}

impl EventEntry {
    /// Tries to downcast the event entry to one holding an event of type `E`.
    /// If fails, returns `None`.
    #[must_use]
    pub fn downcast<E: fmt::Debug + 'static>(&self) -> Option<EventEntryTyped<'_, E>> {
        if self.event_type == TypeId::of::<E>() {
            self.inner
                .downcast_ref::<E>()
                .map(|event| EventEntryTyped {
                    time: self.time(),
                    component_id: ComponentId::new(self.component),
                    event,
                })
        } else {
            None
        }
    }

    /// The time at which the event occurs.
    #[must_use]
    pub fn time(&self) -> f64 {
        (self.time.0).0
    }

    /// Index of the component the event is addressed to.
    #[must_use]
    pub fn component_idx(&self) -> usize {
        self.component
    }
}

impl PartialEq for EventEntry {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence == other.sequence
    }
}

impl Eq for EventEntry {}

impl PartialOrd for EventEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Event entry downcast to its concrete event type.
#[derive(Debug)]
pub struct EventEntryTyped<'e, E: fmt::Debug> {
    /// Time of the event.
    pub time: f64,
    /// Component the event is addressed to.
    pub component_id: ComponentId<E>,
    /// Event value.
    pub event: &'e E,
}

/// This struct has only immutable access to the simulation clock exposed.
#[derive(Debug, Clone)]
pub struct ClockRef {
    clock: Clock,
}

impl From<Clock> for ClockRef {
    fn from(clock: Clock) -> Self {
        Self { clock }
    }
}

impl ClockRef {
    /// Return the current simulation time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.clock.get()
    }
}

/// Scheduler is used to keep the current time and information about the upcoming events.
pub struct Scheduler {
    events: BinaryHeap<EventEntry>,
    clock: Clock,
    next_sequence: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            events: BinaryHeap::new(),
            clock: Rc::new(Cell::new(0.0)),
            next_sequence: 0,
        }
    }
}

impl Scheduler {
    /// Schedules `event` to be executed for `component` at `self.time() + delay`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDelay`] if `delay` is negative or NaN.
    pub fn schedule<E: 'static>(
        &mut self,
        delay: f64,
        component: ComponentId<E>,
        event: E,
    ) -> Result<(), Error> {
        if delay.is_nan() || delay < 0.0 || delay.is_infinite() {
            return Err(Error::InvalidDelay { delay });
        }
        let time = self.time() + delay;
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.events.push(EventEntry {
            time: Reverse(OrderedFloat(time)),
            sequence: Reverse(sequence),
            component: component.id(),
            inner: Box::new(event),
            event_type: TypeId::of::<E>(),
        });
        Ok(())
    }

    /// Schedules `event` to be executed for `component` at `self.time()`.
    /// It will run after all events already scheduled for the current time.
    ///
    /// # Errors
    ///
    /// This never fails in practice, the result is kept for uniformity with [`Self::schedule`].
    pub fn schedule_immediately<E: 'static>(
        &mut self,
        component: ComponentId<E>,
        event: E,
    ) -> Result<(), Error> {
        self.schedule(0.0, component, event)
    }

    /// Schedules `event` after a sampled `duration`, which must be strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveTimeout`] if `duration` is not a positive finite number.
    pub fn schedule_timeout<E: 'static>(
        &mut self,
        duration: f64,
        component: ComponentId<E>,
        event: E,
    ) -> Result<(), Error> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(Error::NonPositiveTimeout { duration });
        }
        self.schedule(duration, component, event)
    }

    /// Returns the current simulation time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.clock.get()
    }

    /// Returns a structure with immutable access to the simulation time.
    #[must_use]
    pub fn clock(&self) -> ClockRef {
        ClockRef {
            clock: Rc::clone(&self.clock),
        }
    }

    /// Moves the clock forward to `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockBackward`] if `time` is earlier than the current time.
    pub fn advance_to(&mut self, time: f64) -> Result<(), Error> {
        let now = self.time();
        if time < now || time.is_nan() {
            return Err(Error::ClockBackward { now, target: time });
        }
        self.clock.set(time);
        Ok(())
    }

    /// Returns the time of the next scheduled event, if any.
    #[must_use]
    pub fn peek_time(&self) -> Option<f64> {
        self.events.peek().map(EventEntry::time)
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Checks if no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes and returns the next scheduled event or `None` if none are left.
    /// The clock is moved to the time of the returned event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockBackward`] if the next event lies in the past.
    pub fn pop(&mut self) -> Result<Option<EventEntry>, Error> {
        match self.peek_time() {
            Some(time) => {
                self.advance_to(time)?;
                Ok(self.events.pop())
            }
            None => Ok(None),
        }
    }
}
