// Observable - value cell with synchronous change notification
//
// The model layer exposes observable values (palette codes, zoom) so that the
// presentation layer can react to changes without polling. Observers are plain
// closures invoked in registration order before `set()` returns.

use std::fmt;

/// Handle returned by [`Observable::observe`], used to unregister an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback<T> = Box<dyn FnMut(&T, &T)>;

/// A value that notifies registered observers when it is set
///
/// Observers receive `(new, previous)`. By default notification only happens
/// when the value actually changes; cells created with
/// [`Observable::always_notify`] notify on every `set()`, which lets callers
/// force a refresh by writing a value back to itself.
pub struct Observable<T> {
    value: T,
    notify_unchanged: bool,
    observers: Vec<(ObserverId, Callback<T>)>,
    next_id: u64,
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Create a cell that notifies only on change
    pub fn new(value: T) -> Self {
        Self {
            value,
            notify_unchanged: false,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    /// Create a cell that notifies on every write
    pub fn always_notify(value: T) -> Self {
        Self {
            notify_unchanged: true,
            ..Self::new(value)
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Set the value and notify observers
    pub fn set(&mut self, value: T) {
        let previous = std::mem::replace(&mut self.value, value);
        if self.notify_unchanged || previous != self.value {
            for (_, callback) in self.observers.iter_mut() {
                callback(&self.value, &previous);
            }
        }
    }

    /// Set the value without notifying anyone
    pub fn silent_set(&mut self, value: T) {
        self.value = value;
    }

    /// Register an observer
    pub fn observe<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&T, &T) + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Remove an observer; returns false if the id was not registered
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<T: Copy + PartialEq> Observable<T> {
    /// Copy of the current value
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Clone + PartialEq + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("notify_unchanged", &self.notify_unchanged)
            .field("observers", &self.observers.len())
            .finish()
    }
}
