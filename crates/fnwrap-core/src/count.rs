use crate::meta::{Callable, FnMeta};
use crate::sink::{self, Sink};
use std::cell::Cell;
use std::rc::Rc;

/// Shared view of one counted function's running total.
///
/// The total is monotonically non-decreasing and is never reset.
#[derive(Debug, Clone, Default)]
pub struct CallCount(Rc<Cell<u64>>);

impl CallCount {
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    fn bump(&self) -> u64 {
        let n = self.0.get() + 1;
        self.0.set(n);
        n
    }
}

/// Counts every invocation that reaches this layer, then delegates.
///
/// The increment is unconditional, so where this layer sits in a stack
/// decides what the total means: outside a memoizer it counts logical
/// calls, inside one it counts executed bodies.
pub struct Counted<C> {
    meta: FnMeta,
    count: CallCount,
    sink: Rc<dyn Sink>,
    inner: C,
}

impl<C: Callable> Counted<C> {
    pub fn wrap(inner: C) -> Self {
        Self::with_sink(inner, sink::stdout())
    }

    pub fn with_sink(inner: C, sink: Rc<dyn Sink>) -> Self {
        Self::with_counter(inner, CallCount::default(), sink)
    }

    pub(crate) fn with_counter(inner: C, count: CallCount, sink: Rc<dyn Sink>) -> Self {
        Self {
            meta: inner.meta().clone(),
            count,
            sink,
            inner,
        }
    }

    /// Number of calls seen so far.
    pub fn calls(&self) -> u64 {
        self.count.get()
    }

    /// Shared handle onto the same counter.
    pub fn counter(&self) -> CallCount {
        self.count.clone()
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Callable> Callable for Counted<C> {
    type Args = C::Args;
    type Output = C::Output;

    fn call(&self, args: C::Args) -> C::Output {
        let n = self.count.bump();
        self.sink.line(&format!("{}: {} calls", self.meta.name, n));
        self.inner.call(args)
    }

    fn meta(&self) -> &FnMeta {
        &self.meta
    }
}
