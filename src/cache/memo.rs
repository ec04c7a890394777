//! Memoization Module
//!
//! Wraps a function with an unbounded, process-lifetime result cache.

use std::collections::HashMap;

use serde::Serialize;

// == Memoized ==
/// A function wrapped with a per-function result cache.
///
/// On each call the argument is turned into a cache key; a cached result is
/// returned without invoking the inner function, otherwise the function runs
/// and its result is stored. Unlike [`MemoryCache`](crate::cache::MemoryCache)
/// this cache is unbounded and entries never expire — memoized results live
/// for the lifetime of the wrapper.
///
/// Each `Memoized` owns its own cache; wrapped functions never share storage.
/// Functions taking several arguments memoize over a tuple.
pub struct Memoized<A, R, F>
where
    F: FnMut(&A) -> R,
{
    /// The wrapped function
    func: F,
    /// Derives the cache key from the argument
    key_fn: Box<dyn Fn(&A) -> String>,
    /// Cached results by key
    results: HashMap<String, R>,
}

impl<A, R, F> Memoized<A, R, F>
where
    A: Serialize + 'static,
    R: Clone,
    F: FnMut(&A) -> R,
{
    // == Constructor ==
    /// Wraps `func` with the default key function: JSON stringification of
    /// the argument.
    ///
    /// Arguments that cannot be stringified all map to the same key; passing
    /// such arguments is a caller contract violation, not a runtime error.
    pub fn new(func: F) -> Self {
        Self::with_key_fn(func, |arg: &A| {
            serde_json::to_string(arg).unwrap_or_default()
        })
    }
}

impl<A, R, F> Memoized<A, R, F>
where
    A: 'static,
    R: Clone,
    F: FnMut(&A) -> R,
{
    // == Constructor With Key Function ==
    /// Wraps `func` with an explicit key function.
    pub fn with_key_fn(func: F, key_fn: impl Fn(&A) -> String + 'static) -> Self {
        Self {
            func,
            key_fn: Box::new(key_fn),
            results: HashMap::new(),
        }
    }

    // == Call ==
    /// Invokes the wrapped function, returning a cached result when one
    /// exists for the argument's key.
    pub fn call(&mut self, arg: &A) -> R {
        let key = (self.key_fn)(arg);
        if let Some(cached) = self.results.get(&key) {
            return cached.clone();
        }

        let result = (self.func)(arg);
        self.results.insert(key, result.clone());
        result
    }

    // == Cached Count ==
    /// Returns the number of memoized results.
    pub fn cached_len(&self) -> usize {
        self.results.len()
    }
}
