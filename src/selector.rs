use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::input::Inputs;
use crate::memoize::{Memoize, Memoized, Stats};
use crate::observe::Observer;

/// Derives a value from a state and caches it.
///
/// A selector runs its input selectors on every call and hands the resulting
/// bundle to its memoized combining function. Every selector owns its cache,
/// even when built from identical parts.
///
/// ```
/// use reselect::{MapMemoize, Selector, to_key};
///
/// struct State {
///     id: u32,
///     factor: u32,
/// }
///
/// let product = Selector::new(
///     (|s: &State| s.id, |s: &State| s.factor),
///     |&(id, factor): &(u32, u32)| id * factor,
///     MapMemoize::new((to_key::<u32>, to_key::<u32>)),
/// )?;
///
/// assert_eq!(product.select(&State { id: 2, factor: 4 }), 8);
/// assert_eq!(product.select(&State { id: 2, factor: 4 }), 8);
/// assert_eq!(product.stats().hits, 1);
/// # Ok::<(), reselect::Error>(())
/// ```
pub struct Selector<S, I, M, F, T>
where
    S: ?Sized,
    I: Inputs<S>,
    T: Clone,
    M: Memoize<I::Args, T>,
{
    inputs: I,
    memoized: Memoized<I::Args, T, M, F>,
    marker: PhantomData<fn(&S)>,
}

impl<S, I, M, F, T> Selector<S, I, M, F, T>
where
    S: ?Sized,
    I: Inputs<S>,
    T: Clone,
    M: Memoize<I::Args, T>,
    F: Fn(&I::Args) -> T,
{
    /// Combine input selectors, a combining function and a strategy.
    ///
    /// Fails if the strategy is configured for a different number of
    /// positions than there are input selectors.
    pub fn new(inputs: I, func: F, strategy: M) -> Result<Self> {
        let expected = strategy.arity();
        let found = inputs.arity();
        if found != expected {
            tracing::warn!(strategy = M::NAME, expected, found, "arity mismatch");
            return Err(Error::ArityMismatch { strategy: M::NAME, expected, found });
        }

        Ok(Self {
            inputs,
            memoized: strategy.memoize(func),
            marker: PhantomData,
        })
    }

    /// Report every hit and miss to the given observer.
    pub fn with_observer(mut self, observer: impl Observer + 'static) -> Self {
        self.memoized = self.memoized.with_observer(observer);
        self
    }

    /// Derive the value for the given state.
    pub fn select(&self, state: &S) -> T {
        let args = self.inputs.bind(state);
        self.memoized.call_unchecked(args)
    }
}

impl<S, I, M, F, T> Selector<S, I, M, F, T>
where
    S: ?Sized,
    I: Inputs<S>,
    T: Clone,
    M: Memoize<I::Args, T>,
{
    /// The number of cached results.
    pub fn len(&self) -> usize {
        self.memoized.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.memoized.is_empty()
    }

    /// Hit and miss counts since construction.
    pub fn stats(&self) -> Stats {
        self.memoized.stats()
    }

    /// Drop all cached results.
    pub fn clear(&self) {
        self.memoized.clear();
    }
}

impl<S, I, M, F, T> Debug for Selector<S, I, M, F, T>
where
    S: ?Sized,
    I: Inputs<S>,
    T: Clone,
    M: Memoize<I::Args, T>,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Selector")
            .field("inputs", &self.inputs.arity())
            .field("memoized", &self.memoized)
            .finish()
    }
}

/// Builds selectors that all use the same memoization strategy.
///
/// Every created selector gets a clone of the strategy and a cache of its own.
#[derive(Debug, Default, Clone)]
pub struct SelectorCreator<M> {
    strategy: M,
}

impl<M: Clone> SelectorCreator<M> {
    /// Standardize on the given strategy.
    pub fn new(strategy: M) -> Self {
        Self { strategy }
    }

    /// Build a selector with the creator's strategy.
    pub fn create<S, I, F, T>(&self, inputs: I, func: F) -> Result<Selector<S, I, M, F, T>>
    where
        S: ?Sized,
        I: Inputs<S>,
        T: Clone,
        M: Memoize<I::Args, T>,
        F: Fn(&I::Args) -> T,
    {
        Selector::new(inputs, func, self.strategy.clone())
    }
}

/// Combine input selectors, a combining function and a strategy.
///
/// Shorthand for [`Selector::new`].
pub fn create_selector<S, I, M, F, T>(
    inputs: I,
    func: F,
    strategy: M,
) -> Result<Selector<S, I, M, F, T>>
where
    S: ?Sized,
    I: Inputs<S>,
    T: Clone,
    M: Memoize<I::Args, T>,
    F: Fn(&I::Args) -> T,
{
    Selector::new(inputs, func, strategy)
}

/// Standardize on one strategy for many selectors.
///
/// Shorthand for [`SelectorCreator::new`].
pub fn create_selector_creator<M: Clone>(strategy: M) -> SelectorCreator<M> {
    SelectorCreator::new(strategy)
}
