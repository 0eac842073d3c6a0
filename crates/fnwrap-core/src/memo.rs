use crate::meta::{Callable, FnMeta};
use crate::sink::{self, Sink};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One cached invocation. Immutable once stored.
#[derive(Debug, Clone, Serialize)]
pub struct CallRecord<A, R> {
    pub args: A,
    pub result: R,
}

/// Observable cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub(crate) struct CacheState<A, R> {
    records: RefCell<Vec<CallRecord<A, R>>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<A, R> Default for CacheState<A, R> {
    fn default() -> Self {
        Self {
            records: RefCell::new(Vec::new()),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }
}

/// Shared view of one memoized function's cache counters.
pub struct CacheHandle<A, R> {
    state: Rc<CacheState<A, R>>,
}

impl<A, R> Clone for CacheHandle<A, R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<A, R> CacheHandle<A, R> {
    pub(crate) fn new(state: Rc<CacheState<A, R>>) -> Self {
        Self { state }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.state.hits.get(),
            misses: self.state.misses.get(),
            entries: self.state.records.borrow().len(),
        }
    }
}

/// Caches results keyed by exact call arguments.
///
/// Lookup is a linear scan for the first record whose arguments equal the
/// call's by value; insertion happens only on a miss, so no two records
/// share the same arguments. Nothing is ever evicted. Each instance caches
/// exactly one function, so two wrapped functions never collide however
/// they are named.
///
/// Arguments that compare equal are the same key. A caller holding interior
/// mutability in its argument type can therefore observe a hit for a value
/// that has since been mutated; equality at call time is the contract.
pub struct Memoized<C: Callable> {
    meta: FnMeta,
    state: Rc<CacheState<C::Args, C::Output>>,
    sink: Rc<dyn Sink>,
    inner: C,
}

impl<C> Memoized<C>
where
    C: Callable,
    C::Args: Clone + PartialEq,
    C::Output: Clone,
{
    pub fn wrap(inner: C) -> Self {
        Self::with_sink(inner, sink::stdout())
    }

    pub fn with_sink(inner: C, sink: Rc<dyn Sink>) -> Self {
        Self::with_state(inner, Rc::new(CacheState::default()), sink)
    }

    pub(crate) fn with_state(
        inner: C,
        state: Rc<CacheState<C::Args, C::Output>>,
        sink: Rc<dyn Sink>,
    ) -> Self {
        Self {
            meta: inner.meta().clone(),
            state,
            sink,
            inner,
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.handle().stats()
    }

    /// Shared handle onto the same cache counters.
    pub fn handle(&self) -> CacheHandle<C::Args, C::Output> {
        CacheHandle::new(self.state.clone())
    }

    /// Snapshot of the cached records, in insertion order.
    pub fn records(&self) -> Vec<CallRecord<C::Args, C::Output>> {
        self.state.records.borrow().clone()
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn lookup(&self, args: &C::Args) -> Option<C::Output> {
        self.state
            .records
            .borrow()
            .iter()
            .find(|record| record.args == *args)
            .map(|record| record.result.clone())
    }
}

impl<C> Callable for Memoized<C>
where
    C: Callable,
    C::Args: Clone + PartialEq,
    C::Output: Clone,
{
    type Args = C::Args;
    type Output = C::Output;

    fn call(&self, args: C::Args) -> C::Output {
        if let Some(result) = self.lookup(&args) {
            self.state.hits.set(self.state.hits.get() + 1);
            self.sink.line(&format!("{}: cache hit", self.meta.name));
            return result;
        }

        self.state.misses.set(self.state.misses.get() + 1);
        self.sink.line(&format!("{}: cache miss", self.meta.name));
        let result = self.inner.call(args.clone());
        self.state.records.borrow_mut().push(CallRecord {
            args,
            result: result.clone(),
        });
        result
    }

    fn meta(&self) -> &FnMeta {
        &self.meta
    }
}
