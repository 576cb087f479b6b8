use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::input::Bundle;
use crate::key::{KeyBuilder, KeyEncoding};
use crate::memoize::{Memoize, Probe};

/// A key function behind a shared pointer, for `Vec` bundles.
pub type DynKey<A> = Rc<dyn Fn(&A) -> String>;

/// One key function per bundle position.
///
/// This is implemented for tuples of `Fn(&A) -> String` up to length twelve
/// and for `Vec<DynKey<A>>`.
pub trait KeyFunctions<A> {
    /// The number of key functions.
    fn arity(&self) -> usize;

    /// Push one key part per position, in position order.
    fn write_key(&self, args: &A, key: &mut KeyBuilder);
}

impl<A> KeyFunctions<Vec<A>> for Vec<DynKey<A>> {
    fn arity(&self) -> usize {
        self.len()
    }

    fn write_key(&self, args: &Vec<A>, key: &mut KeyBuilder) {
        for (derive, arg) in self.iter().zip(args) {
            key.push(&derive(arg));
        }
    }
}

macro_rules! tuple_keys {
    ($($arg:ident $derive:ident $idx:tt),*) => {
        #[allow(unused_variables)]
        impl<$($arg, $derive: Fn(&$arg) -> String),*>
            KeyFunctions<($($arg,)*)> for ($($derive,)*)
        {
            fn arity(&self) -> usize {
                <[usize]>::len(&[$($idx),*])
            }

            fn write_key(&self, args: &($($arg,)*), key: &mut KeyBuilder) {
                $(key.push(&(self.$idx)(&args.$idx));)*
            }
        }
    };
}

tuple_keys! {}
tuple_keys! { A0 K0 0 }
tuple_keys! { A0 K0 0, A1 K1 1 }
tuple_keys! { A0 K0 0, A1 K1 1, A2 K2 2 }
tuple_keys! { A0 K0 0, A1 K1 1, A2 K2 2, A3 K3 3 }
tuple_keys! { A0 K0 0, A1 K1 1, A2 K2 2, A3 K3 3, A4 K4 4 }
tuple_keys! { A0 K0 0, A1 K1 1, A2 K2 2, A3 K3 3, A4 K4 4, A5 K5 5 }
tuple_keys! { A0 K0 0, A1 K1 1, A2 K2 2, A3 K3 3, A4 K4 4, A5 K5 5, A6 K6 6 }
tuple_keys! { A0 K0 0, A1 K1 1, A2 K2 2, A3 K3 3, A4 K4 4, A5 K5 5, A6 K6 6, A7 K7 7 }
tuple_keys! { A0 K0 0, A1 K1 1, A2 K2 2, A3 K3 3, A4 K4 4, A5 K5 5, A6 K6 6, A7 K7 7, A8 K8 8 }
tuple_keys! {
    A0 K0 0, A1 K1 1, A2 K2 2, A3 K3 3, A4 K4 4, A5 K5 5, A6 K6 6, A7 K7 7, A8 K8 8,
    A9 K9 9
}
tuple_keys! {
    A0 K0 0, A1 K1 1, A2 K2 2, A3 K3 3, A4 K4 4, A5 K5 5, A6 K6 6, A7 K7 7, A8 K8 8,
    A9 K9 9, A10 K10 10
}
tuple_keys! {
    A0 K0 0, A1 K1 1, A2 K2 2, A3 K3 3, A4 K4 4, A5 K5 5, A6 K6 6, A7 K7 7, A8 K8 8,
    A9 K9 9, A10 K10 10, A11 K11 11
}

/// Remembers the result of every distinct bundle it has seen.
///
/// Each bundle is reduced to a string key, one part per position. Results are
/// never evicted, only dropped wholesale by clearing the cache.
#[derive(Debug, Default, Copy, Clone)]
pub struct MapMemoize<K> {
    keys: K,
    encoding: KeyEncoding,
}

impl<K> MapMemoize<K> {
    /// Create the strategy from one key function per position.
    pub fn new(keys: K) -> Self {
        Self { keys, encoding: KeyEncoding::default() }
    }

    /// Change how key parts are joined.
    pub fn with_encoding(mut self, encoding: KeyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The key encoding in use.
    pub fn encoding(&self) -> KeyEncoding {
        self.encoding
    }
}

impl<A, T, K> Memoize<A, T> for MapMemoize<K>
where
    A: Bundle,
    T: Clone,
    K: KeyFunctions<A>,
{
    type Cache = FxHashMap<String, T>;
    type Key = String;

    const NAME: &'static str = "map";

    fn arity(&self) -> usize {
        self.keys.arity()
    }

    fn lookup(&self, cache: &Self::Cache, args: &A) -> Probe<T, String> {
        let mut key = KeyBuilder::new(self.encoding);
        self.keys.write_key(args, &mut key);
        let key = key.finish();
        match cache.get(&key) {
            Some(output) => Probe::Hit(output.clone()),
            None => Probe::Miss(key),
        }
    }

    fn insert(&self, cache: &mut Self::Cache, key: String, _: A, output: T) {
        cache.insert(key, output);
    }

    fn len(cache: &Self::Cache) -> usize {
        cache.len()
    }
}
