//! Inspection of memoized calls, for tests.

use std::cell::Cell;

use crate::observe::Event;

thread_local! {
    /// The outcome of the most recent memoized call on this thread.
    static LAST: Cell<Option<Event>> = const { Cell::new(None) };
}

/// The outcome of the most recent memoized call on this thread, if any.
pub fn last_event() -> Option<Event> {
    LAST.with(Cell::get)
}

/// Whether the most recent memoized call on this thread was a hit.
pub fn last_was_hit() -> bool {
    last_event() == Some(Event::Hit)
}

/// Forget the recorded outcome.
pub fn reset() {
    LAST.with(|last| last.set(None));
}

pub(crate) fn register(event: Event) {
    LAST.with(|last| last.set(Some(event)));
}
