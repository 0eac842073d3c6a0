use fnwrap_core::{Hook, Target};
use std::cell::Cell;
use std::rc::Rc;

/// Counts how many times a target's body actually executed, independent of
/// any wrapper-layer accounting. Lets tests distinguish a cache hit from a
/// recomputation.
#[derive(Clone, Default)]
pub struct Probe(Rc<Cell<u64>>);

impl Probe {
    pub fn executions(&self) -> u64 {
        self.0.get()
    }

    fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }
}

/// A target whose raw body executions are observable through a [`Probe`].
pub fn probed<A: 'static, R: 'static>(
    name: &str,
    doc: &str,
    f: impl Fn(A) -> R + 'static,
) -> (Target<A, R>, Probe) {
    let probe = Probe::default();
    let seen = probe.clone();
    let target = Target::new(name, doc, move |args| {
        seen.bump();
        f(args)
    });
    (target, probe)
}

/// Recursive variant of [`probed`]: the body receives the recursion hook.
pub fn probed_recursive<A: 'static, R: 'static>(
    name: &str,
    doc: &str,
    f: impl Fn(&Hook<A, R>, A) -> R + 'static,
) -> (Target<A, R>, Hook<A, R>, Probe) {
    let probe = Probe::default();
    let seen = probe.clone();
    let (target, hook) = Target::recursive(name, doc, move |rec, args| {
        seen.bump();
        f(rec, args)
    });
    (target, hook, probe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnwrap_core::{Callable, Chain};

    #[test]
    fn test_probe_counts_body_executions() {
        let (add, probe) = probed("add", "", |(a, b): (i64, i64)| a + b);

        assert_eq!(probe.executions(), 0);
        assert_eq!(add.call((4, 3)), 7);
        assert_eq!(add.call((4, 3)), 7);
        assert_eq!(probe.executions(), 2);
    }

    #[test]
    fn test_recursive_probe_counts_every_nesting_level() {
        let (fact, hook, probe) = probed_recursive("fact", "", |rec, (n,): (u64,)| {
            if n == 0 { 1 } else { n * rec.call((n - 1,)) }
        });
        let chain: Chain<(u64,), u64> = Rc::new(fact);
        hook.tie(chain.clone());

        assert_eq!(chain.call((4,)), 24);
        assert_eq!(probe.executions(), 5);
    }
}
