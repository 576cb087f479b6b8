/// What happened during a memoized call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    /// A cached result was returned.
    Hit,
    /// The combining function was invoked and its result stored.
    Miss,
}

/// Receives an [`Event`] for every memoized call.
///
/// Any `Fn(Event)` closure is an observer.
pub trait Observer {
    /// Called after the lookup, and on a miss after the result was stored.
    fn observe(&self, event: Event);
}

impl<F: Fn(Event)> Observer for F {
    fn observe(&self, event: Event) {
        self(event)
    }
}

/// An observer that logs every hit and miss through `tracing`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Trace {
    name: &'static str,
}

impl Trace {
    /// Log under the given selector name.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Observer for Trace {
    fn observe(&self, event: Event) {
        match event {
            Event::Hit => tracing::debug!(selector = self.name, "cache hit"),
            Event::Miss => tracing::debug!(selector = self.name, "recomputed"),
        }
    }
}
