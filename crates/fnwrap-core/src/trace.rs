use crate::meta::{Callable, FnMeta};
use crate::sink::{self, Sink};
use std::cell::Cell;
use std::fmt::Display;
use std::rc::Rc;

/// Renders an argument bundle as the comma-joined display forms of its
/// positional arguments.
pub trait Render {
    fn render(&self) -> String;
}

impl<T: Display> Render for (T,) {
    fn render(&self) -> String {
        self.0.to_string()
    }
}

impl<T1: Display, T2: Display> Render for (T1, T2) {
    fn render(&self) -> String {
        format!("{}, {}", self.0, self.1)
    }
}

impl<T1: Display, T2: Display, T3: Display> Render for (T1, T2, T3) {
    fn render(&self) -> String {
        format!("{}, {}, {}", self.0, self.1, self.2)
    }
}

impl<T1: Display, T2: Display, T3: Display, T4: Display> Render for (T1, T2, T3, T4) {
    fn render(&self) -> String {
        format!("{}, {}, {}, {}", self.0, self.1, self.2, self.3)
    }
}

impl<T: Display> Render for Vec<T> {
    fn render(&self) -> String {
        self.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Stage one of the tracer: the indentation unit and sink to trace with.
pub struct Tracer {
    unit: String,
    sink: Rc<dyn Sink>,
}

impl Tracer {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            sink: sink::stdout(),
        }
    }

    pub fn with_sink(mut self, sink: Rc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }

    /// Stage two: wrap a target with this tracer's unit.
    pub fn wrap<C: Callable>(self, inner: C) -> Traced<C> {
        Traced {
            meta: inner.meta().clone(),
            unit: self.unit,
            sink: self.sink,
            depth: Cell::new(0),
            inner,
        }
    }
}

/// Prints an entry line before and an exit line after every call, indented
/// by the current recursion depth:
///
/// ```text
///  --> fib(3)
/// ____ --> fib(2)
/// ________ --> fib(1)
/// ________ <-- fib(1) == 1
/// ________ --> fib(0)
/// ________ <-- fib(0) == 1
/// ____ <-- fib(2) == 2
/// ____ --> fib(1)
/// ____ <-- fib(1) == 1
///  <-- fib(3) == 3
/// ```
///
/// Depth is owned by this wrapper instance: recursive calls re-enter
/// through the same instance, so every nesting level passes through here,
/// and a fresh top-level call always starts at depth zero. Independently
/// traced functions nest independently.
pub struct Traced<C> {
    meta: FnMeta,
    unit: String,
    sink: Rc<dyn Sink>,
    depth: Cell<usize>,
    inner: C,
}

impl<C> Traced<C> {
    /// Current nesting depth; zero whenever no call is in flight.
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C> Callable for Traced<C>
where
    C: Callable,
    C::Args: Render,
    C::Output: Display,
{
    type Args = C::Args;
    type Output = C::Output;

    fn call(&self, args: C::Args) -> C::Output {
        let depth = self.depth.get();
        let prefix = self.unit.repeat(depth);
        let rendered = args.render();

        self.sink
            .line(&format!("{} --> {}({})", prefix, self.meta.name, rendered));

        // Depth unwinds with the call, panics included.
        self.depth.set(depth + 1);
        let guard = DepthGuard {
            depth: &self.depth,
            restore: depth,
        };
        let result = self.inner.call(args);
        drop(guard);

        self.sink.line(&format!(
            "{} <-- {}({}) == {}",
            prefix, self.meta.name, rendered, result
        ));
        result
    }

    fn meta(&self) -> &FnMeta {
        &self.meta
    }
}

struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
    restore: usize,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.restore);
    }
}
