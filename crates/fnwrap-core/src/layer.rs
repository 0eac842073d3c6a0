use crate::count::{CallCount, Counted};
use crate::memo::{CacheHandle, CacheState, Memoized};
use crate::meta::Chain;
use crate::sink::Sink;
use crate::trace::{Render, Tracer};
use std::fmt::Display;
use std::rc::Rc;

/// A wrapper constructor with its concrete type erased.
///
/// Layers let call sites choose instrumentation at runtime and let
/// [`disable`] substitute for any wrapper without touching the call site.
pub type Layer<A, R> = Box<dyn Fn(Chain<A, R>) -> Chain<A, R>>;

/// Counting layer plus a handle onto its running total.
///
/// Every chain this layer is applied to shares the same counter.
pub fn counted_layer<A: 'static, R: 'static>(sink: Rc<dyn Sink>) -> (Layer<A, R>, CallCount) {
    let count = CallCount::default();
    let handle = count.clone();
    let layer: Layer<A, R> = Box::new(move |inner| {
        Rc::new(Counted::with_counter(inner, count.clone(), sink.clone()))
    });
    (layer, handle)
}

/// Memoizing layer plus a handle onto its cache counters.
///
/// Every chain this layer is applied to shares the same cache.
pub fn memo_layer<A, R>(sink: Rc<dyn Sink>) -> (Layer<A, R>, CacheHandle<A, R>)
where
    A: Clone + PartialEq + 'static,
    R: Clone + 'static,
{
    let state = Rc::new(CacheState::default());
    let handle = CacheHandle::new(state.clone());
    let layer: Layer<A, R> = Box::new(move |inner| {
        Rc::new(Memoized::with_state(inner, state.clone(), sink.clone()))
    });
    (layer, handle)
}

/// Tracing layer with the given indentation unit.
pub fn trace_layer<A, R>(unit: &str, sink: Rc<dyn Sink>) -> Layer<A, R>
where
    A: Render + 'static,
    R: Display + 'static,
{
    let unit = unit.to_string();
    Box::new(move |inner| {
        Rc::new(
            Tracer::new(unit.clone())
                .with_sink(sink.clone())
                .wrap(inner),
        )
    })
}

/// The no-op placeholder: bind it in place of any other layer to strip
/// that behavior without touching call sites.
pub fn disable<A, R>() -> Layer<A, R> {
    Box::new(|inner| inner)
}

/// Apply layers to a target, first layer innermost.
pub fn compose<A, R>(
    target: Chain<A, R>,
    layers: impl IntoIterator<Item = Layer<A, R>>,
) -> Chain<A, R> {
    layers.into_iter().fold(target, |chain, layer| layer(chain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::Callable;
    use crate::target::Target;

    fn quiet() -> Rc<dyn Sink> {
        struct Quiet;
        impl Sink for Quiet {
            fn line(&self, _text: &str) {}
        }
        Rc::new(Quiet)
    }

    fn add_target() -> Chain<(i64, i64), i64> {
        Rc::new(Target::new(
            "add",
            "Adds two numbers.",
            |(a, b): (i64, i64)| a + b,
        ))
    }

    #[test]
    fn test_compose_applies_first_layer_innermost() {
        let (memo, cache) = memo_layer(quiet());
        let (counted, count) = counted_layer(quiet());

        // Counter outside the memoizer: every call is counted.
        let add = compose(add_target(), [memo, counted]);
        add.call((4, 3));
        add.call((4, 3));

        assert_eq!(count.get(), 2);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_disable_substitutes_for_any_layer() {
        let (counted, count) = counted_layer(quiet());

        // The memoizing layer is switched off; the stack shape is unchanged.
        let add = compose(add_target(), [disable(), counted]);
        assert_eq!(add.call((4, 3)), 7);
        assert_eq!(add.call((4, 3)), 7);

        assert_eq!(count.get(), 2);
        assert_eq!(add.meta().name, "add");
    }
}
