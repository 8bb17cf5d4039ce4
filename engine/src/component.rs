use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::{Error, EventEntry, Scheduler, State};

/// Identifies a simulation component.
///
/// The ID is generic over the type of events the component handles, so an event of the wrong
/// type cannot be scheduled for it.
pub struct ComponentId<E> {
    id: usize,
    _marker: PhantomData<E>,
}

impl<E> ComponentId<E> {
    pub(crate) fn new(id: usize) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Numerical index of the component.
    #[must_use]
    pub fn id(self) -> usize {
        self.id
    }
}

impl<E> Clone for ComponentId<E> {
    fn clone(&self) -> Self {
        Self::new(self.id)
    }
}
impl<E> Copy for ComponentId<E> {}

impl<E> PartialEq for ComponentId<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl<E> Eq for ComponentId<E> {}

impl<E> Hash for ComponentId<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<E> fmt::Debug for ComponentId<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentId").field(&self.id).finish()
    }
}

/// Implemented by anything that reacts to events in the simulation.
///
/// A component is called only by the simulation loop, one event at a time, and it suspends
/// simply by returning after scheduling its own future events.
pub trait Component {
    /// Type of events handled by this component.
    type Event;

    /// Processes a single event addressed to this component.
    ///
    /// # Errors
    ///
    /// Any error aborts the simulation run.
    fn process_event(
        &mut self,
        self_id: ComponentId<Self::Event>,
        event: &Self::Event,
        scheduler: &mut Scheduler,
        state: &mut State,
    ) -> eyre::Result<()>;
}

/// Object-safe bridge between type-erased entries and typed components.
trait ProcessEventEntry {
    fn process_event_entry(
        &mut self,
        entry: &EventEntry,
        scheduler: &mut Scheduler,
        state: &mut State,
    ) -> eyre::Result<()>;
}

impl<E, C> ProcessEventEntry for C
where
    E: fmt::Debug + 'static,
    C: Component<Event = E>,
{
    fn process_event_entry(
        &mut self,
        entry: &EventEntry,
        scheduler: &mut Scheduler,
        state: &mut State,
    ) -> eyre::Result<()> {
        let typed = entry
            .downcast::<E>()
            .ok_or_else(|| Error::EventTypeMismatch(entry.component_idx()))?;
        self.process_event(typed.component_id, typed.event, scheduler, state)
    }
}

/// Container holding all registered components.
#[derive(Default)]
pub struct Components {
    components: Vec<Box<dyn ProcessEventEntry>>,
}

impl Components {
    /// Registers a new component and returns its ID.
    #[must_use]
    pub fn add_component<E, C>(&mut self, component: C) -> ComponentId<E>
    where
        E: fmt::Debug + 'static,
        C: Component<Event = E> + 'static,
    {
        let id = self.components.len();
        self.components.push(Box::new(component));
        ComponentId::new(id)
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Checks if no components are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Delivers `entry` to the component it is addressed to.
    ///
    /// # Errors
    ///
    /// Fails if the component does not exist, handles a different type of events, or returns an
    /// error itself.
    pub fn process_event_entry(
        &mut self,
        entry: &EventEntry,
        scheduler: &mut Scheduler,
        state: &mut State,
    ) -> eyre::Result<()> {
        let idx = entry.component_idx();
        self.components
            .get_mut(idx)
            .ok_or(Error::UnknownComponent(idx))?
            .process_event_entry(entry, scheduler, state)
    }
}
