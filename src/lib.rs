//! Memoized selectors.
//!
//! A [`Selector`] derives a value from a larger state. It runs a set of input
//! selectors on the state, collects their outputs into a parameter bundle and
//! hands the bundle to a combining function. A memoization strategy decides
//! whether the combining function needs to run at all:
//!
//! - [`DefaultMemoize`] remembers only the immediately preceding call and
//!   compares bundles position by position with equality checks.
//! - [`MapMemoize`] derives a string key from each bundle and remembers every
//!   result it has ever computed.
//!
//! A [`SelectorCreator`] fixes one strategy for many selectors.
//!
//! Selectors are meant for single-threaded use. The cache is held in a
//! `RefCell`, so a selector is neither `Sync` nor meant to be shared across
//! threads.

mod error;
mod input;
mod key;
mod map;
mod memoize;
mod observe;
mod selector;
mod single;

#[cfg(feature = "testing")]
pub mod testing;

pub use crate::error::{Error, Result};
pub use crate::input::{Bundle, DynInput, Inputs};
pub use crate::key::{debug_key, hash_key, to_key, KeyBuilder, KeyEncoding};
pub use crate::map::{DynKey, KeyFunctions, MapMemoize};
pub use crate::memoize::{Memoize, Memoized, Probe, Stats};
pub use crate::observe::{Event, Observer, Trace};
pub use crate::selector::{
    create_selector, create_selector_creator, Selector, SelectorCreator,
};
pub use crate::single::{equal, ptr_eq, DefaultMemoize, DynEq, EqualityChecks};
