use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;

use rand::RngCore;

/// A type-safe key used to fetch values from the value store.
///
/// # Construction
///
/// A key can be constructed only by calling [`State::insert`]. The state assigns a new numerical
/// ID to the inserted value.
/// Additionally, the key holds a unique hash for the state object.
/// This prevents from using the key with a different instance of [`State`] object.
/// Such operation will panic:
///
/// ```should_panic
/// # use sim_engine::{Key, State};
/// let mut state_1 = State::default();
/// let mut state_2 = State::default();
/// let id = state_1.insert(1);
/// let _ = state_2.remove(id);
/// ```
///
/// # Type Safety
///
/// These keys are type-safe in a sense that a key used to insert a value of type `T` cannot be
/// used to access a value of another type `U`. An attempt to do so will result in a compile error.
///
/// ```compile_fail
/// # use sim_engine::{Key, State};
/// let mut state = State::default();
/// let id = state.insert(String::from("1"));
/// let _: Option<i32> = state.remove(id);  // Error!
/// ```
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Key<V> {
    id: usize,
    state_hash: u64,
    _marker: PhantomData<V>,
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            state_hash: self.state_hash,
            _marker: PhantomData,
        }
    }
}
impl<T> Copy for Key<T> {}

/// State of a simulation holding values shared between components.
pub struct State {
    store: HashMap<TypeId, HashMap<usize, Box<dyn Any>>>,
    next_id: usize,
    state_hash: u64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            store: HashMap::new(),
            next_id: 0,
            state_hash: rand::thread_rng().next_u64(),
        }
    }
}

impl State {
    fn assert_hash<V: 'static>(&self, key: Key<V>) {
        assert_eq!(
            key.state_hash, self.state_hash,
            "State hash of the key does not match the hash of the state"
        );
    }

    /// Inserts an arbitrary value to the value store. Learn more in the documentation for [`Key`].
    #[must_use = "Discarding key results in leaking inserted value"]
    pub fn insert<V: 'static>(&mut self, value: V) -> Key<V> {
        let id = self.next_id;
        self.next_id += 1;
        self.store
            .entry(TypeId::of::<V>())
            .or_default()
            .insert(id, Box::new(value));
        Key {
            id,
            state_hash: self.state_hash,
            _marker: PhantomData,
        }
    }

    /// Removes a value of type `V` from the value store.
    /// Learn more in the documentation for [`Key`].
    pub fn remove<V: 'static>(&mut self, key: Key<V>) -> Option<V> {
        self.assert_hash(key);
        self.store
            .get_mut(&TypeId::of::<V>())
            .and_then(|m| m.remove(&key.id))
            .and_then(|v| v.downcast::<V>().ok())
            .map(|v| *v)
    }

    /// Gets a immutable reference to a value of a type `V` from the value store.
    /// Learn more in the documentation for [`Key`].
    #[must_use]
    pub fn get<V: 'static>(&self, key: Key<V>) -> Option<&V> {
        self.assert_hash(key);
        self.store
            .get(&TypeId::of::<V>())
            .and_then(|m| m.get(&key.id))
            .and_then(|v| v.downcast_ref::<V>())
    }

    /// Gets a mutable reference to a value of a type `V` from the value store.
    /// Learn more in the documentation for [`Key`].
    #[must_use]
    pub fn get_mut<V: 'static>(&mut self, key: Key<V>) -> Option<&mut V> {
        self.assert_hash(key);
        self.store
            .get_mut(&TypeId::of::<V>())
            .and_then(|m| m.get_mut(&key.id))
            .and_then(|v| v.downcast_mut::<V>())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_add_remove_key_values() {
        let mut state = State::default();

        let id = state.insert(1);
        assert_eq!(state.remove(id), Some(1));
        assert_eq!(state.remove(id), None);

        let id = state.insert("string_slice");
        assert_eq!(state.get(id), Some(&"string_slice"));
        assert_eq!(state.remove(id), Some("string_slice"));
        assert_eq!(state.remove(id), None);

        let id = state.insert(vec![String::from("S")]);
        state.get_mut(id).unwrap().push(String::from("T"));
        assert_eq!(
            state.remove(id),
            Some(vec![String::from("S"), String::from("T")])
        );
        assert_eq!(state.get(id), None);
    }

    #[test]
    fn test_same_type_values_are_kept_apart() {
        let mut state = State::default();
        let first = state.insert(1_u32);
        let second = state.insert(2_u32);
        *state.get_mut(second).unwrap() += 40;
        assert_eq!(state.get(first), Some(&1));
        assert_eq!(state.get(second), Some(&42));
    }

    #[test]
    #[should_panic(expected = "State hash of the key does not match")]
    fn test_key_from_other_state() {
        let mut state_1 = State::default();
        let state_2 = State::default();
        let id = state_1.insert(1);
        let _ = state_2.get(id);
    }
}
