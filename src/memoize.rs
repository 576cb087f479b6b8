use std::cell::{Cell, RefCell};
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::input::Bundle;
use crate::observe::{Event, Observer};

/// A caching policy for a memoized function.
///
/// A strategy is plain configuration. The cache it operates on is created and
/// owned by the [`Memoized`] function it is attached to, so two functions built
/// from clones of the same strategy never share results.
pub trait Memoize<A: Bundle, T: Clone> {
    /// The storage for memoized results.
    type Cache: Default;

    /// What a miss needs to remember to store the computed result.
    type Key;

    /// The strategy's name, used in error messages.
    const NAME: &'static str;

    /// The number of bundle positions this strategy is configured for.
    fn arity(&self) -> usize;

    /// Look for a result computed from an equivalent bundle.
    ///
    /// The bundle's arity has already been checked against
    /// [`arity`](Self::arity).
    fn lookup(&self, cache: &Self::Cache, args: &A) -> Probe<T, Self::Key>;

    /// Store the result computed after a miss.
    fn insert(&self, cache: &mut Self::Cache, key: Self::Key, args: A, output: T);

    /// The number of results currently held by the cache.
    fn len(cache: &Self::Cache) -> usize;

    /// Attach this strategy to a combining function.
    fn memoize<F>(self, func: F) -> Memoized<A, T, Self, F>
    where
        Self: Sized,
        F: Fn(&A) -> T,
    {
        Memoized::new(self, func)
    }
}

/// The outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T, K> {
    /// A result for an equivalent bundle was found.
    Hit(T),
    /// Nothing was found. Carries the strategy's key for the later insert.
    Miss(K),
}

/// Hit and miss counts of a memoized function.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Stats {
    /// How many calls returned a cached result.
    pub hits: usize,
    /// How many calls invoked the combining function.
    pub misses: usize,
}

/// A combining function together with a strategy and the cache it fills.
pub struct Memoized<A, T, M, F>
where
    A: Bundle,
    T: Clone,
    M: Memoize<A, T>,
{
    strategy: M,
    func: F,
    cache: RefCell<M::Cache>,
    stats: Cell<Stats>,
    observer: Option<Box<dyn Observer>>,
    marker: PhantomData<fn(A) -> T>,
}

impl<A, T, M, F> Memoized<A, T, M, F>
where
    A: Bundle,
    T: Clone,
    M: Memoize<A, T>,
    F: Fn(&A) -> T,
{
    /// Wrap a combining function with an empty cache.
    pub fn new(strategy: M, func: F) -> Self {
        Self {
            strategy,
            func,
            cache: RefCell::new(M::Cache::default()),
            stats: Cell::new(Stats::default()),
            observer: None,
            marker: PhantomData,
        }
    }

    /// Report every hit and miss to the given observer.
    pub fn with_observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Execute the combining function, trying to use a cached result for it.
    ///
    /// Fails if the bundle's arity does not match the strategy's
    /// configuration. Such a call never touches the cache.
    pub fn call(&self, args: A) -> Result<T> {
        let expected = self.strategy.arity();
        let found = args.arity();
        if found != expected {
            tracing::warn!(strategy = M::NAME, expected, found, "arity mismatch");
            return Err(Error::ArityMismatch { strategy: M::NAME, expected, found });
        }

        Ok(self.call_unchecked(args))
    }

    /// Like [`call`](Self::call), but the caller guarantees matching arity.
    pub(crate) fn call_unchecked(&self, args: A) -> T {
        // Check if there is a cached output.
        let probe = self.strategy.lookup(&self.cache.borrow(), &args);
        let key = match probe {
            Probe::Hit(output) => {
                self.record(Event::Hit);
                return output;
            }
            Probe::Miss(key) => key,
        };

        // The cache is not borrowed while the combining function runs. If it
        // panics, the previous entries stay untouched.
        let output = (self.func)(&args);

        self.strategy
            .insert(&mut self.cache.borrow_mut(), key, args, output.clone());
        self.record(Event::Miss);

        output
    }

    /// The strategy's configured arity.
    pub fn arity(&self) -> usize {
        self.strategy.arity()
    }
}

impl<A, T, M, F> Memoized<A, T, M, F>
where
    A: Bundle,
    T: Clone,
    M: Memoize<A, T>,
{
    /// The number of cached results.
    pub fn len(&self) -> usize {
        M::len(&self.cache.borrow())
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit and miss counts since construction.
    pub fn stats(&self) -> Stats {
        self.stats.get()
    }

    /// Drop all cached results. Statistics are kept.
    pub fn clear(&self) {
        *self.cache.borrow_mut() = M::Cache::default();
    }

    fn record(&self, event: Event) {
        let mut stats = self.stats.get();
        match event {
            Event::Hit => stats.hits += 1,
            Event::Miss => stats.misses += 1,
        }
        self.stats.set(stats);

        #[cfg(feature = "testing")]
        crate::testing::register(event);

        if let Some(observer) = &self.observer {
            observer.observe(event);
        }
    }
}

impl<A, T, M, F> Debug for Memoized<A, T, M, F>
where
    A: Bundle,
    T: Clone,
    M: Memoize<A, T>,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("strategy", &M::NAME)
            .field("len", &self.len())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
