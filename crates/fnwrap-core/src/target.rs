use crate::meta::{Callable, Chain, FnMeta};
use std::cell::RefCell;
use std::rc::Rc;

/// The innermost end of a wrapper chain: a closure plus its identity.
pub struct Target<A, R> {
    meta: FnMeta,
    body: Box<dyn Fn(A) -> R>,
}

impl<A: 'static, R: 'static> Target<A, R> {
    /// Build a target from a plain closure.
    pub fn new(
        name: impl Into<String>,
        doc: impl Into<String>,
        f: impl Fn(A) -> R + 'static,
    ) -> Self {
        Self {
            meta: FnMeta::of(name, doc),
            body: Box::new(f),
        }
    }

    /// Build a self-referential target.
    ///
    /// `body` receives a [`Hook`] for its recursive calls. The hook starts
    /// untied; once the wrapper stack around this target is assembled, tie
    /// it to the outermost layer so nested calls re-enter the full stack:
    ///
    /// ```
    /// use fnwrap_core::{Callable, Chain, Memoized, Target};
    /// use std::rc::Rc;
    ///
    /// let (fib, hook) = Target::recursive("fib", "Some doc", |rec, (n,): (u64,)| {
    ///     if n <= 1 { 1 } else { rec.call((n - 1,)) + rec.call((n - 2,)) }
    /// });
    /// let fib: Chain<(u64,), u64> = Rc::new(Memoized::wrap(fib));
    /// hook.tie(fib.clone());
    ///
    /// assert_eq!(fib.call((10,)), 89);
    /// ```
    pub fn recursive(
        name: impl Into<String>,
        doc: impl Into<String>,
        body: impl Fn(&Hook<A, R>, A) -> R + 'static,
    ) -> (Self, Hook<A, R>) {
        let hook = Hook::untied();
        let inner = hook.clone();
        let target = Self {
            meta: FnMeta::of(name, doc),
            body: Box::new(move |args| body(&inner, args)),
        };
        (target, hook)
    }
}

impl<A, R> Callable for Target<A, R> {
    type Args = A;
    type Output = R;

    fn call(&self, args: A) -> R {
        (self.body)(args)
    }

    fn meta(&self) -> &FnMeta {
        &self.meta
    }
}

/// Open-recursion handle: the slot a recursive target calls back through.
///
/// Recursive invocations must pass through the wrapper stack, not bypass it,
/// so the target's body never calls itself directly. It calls the hook, and
/// the hook delegates to whatever chain it was tied to.
pub struct Hook<A, R> {
    slot: Rc<RefCell<Option<Chain<A, R>>>>,
}

impl<A, R> Clone for Hook<A, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<A, R> Hook<A, R> {
    fn untied() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// Point the hook at the assembled chain. Ties exactly once.
    pub fn tie(&self, chain: Chain<A, R>) {
        let mut slot = self.slot.borrow_mut();
        assert!(slot.is_none(), "recursion hook tied twice");
        *slot = Some(chain);
    }

    /// Re-enter the chain this hook is tied to.
    pub fn call(&self, args: A) -> R {
        let chain = self.slot.borrow().clone();
        let Some(chain) = chain else {
            panic!("recursion hook called before tie()");
        };
        chain.call(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_target() {
        let double = Target::new("double", "Doubles a number.", |(n,): (i64,)| n * 2);
        assert_eq!(double.call((21,)), 42);
        assert_eq!(double.meta().name, "double");
        assert_eq!(double.meta().doc, "Doubles a number.");
    }

    #[test]
    fn test_recursive_target_reenters_through_hook() {
        let (fact, hook) = Target::recursive("fact", "", |rec, (n,): (u64,)| {
            if n == 0 { 1 } else { n * rec.call((n - 1,)) }
        });
        let chain: Chain<(u64,), u64> = Rc::new(fact);
        hook.tie(chain.clone());

        assert_eq!(chain.call((5,)), 120);
    }

    #[test]
    #[should_panic(expected = "recursion hook called before tie()")]
    fn test_untied_hook_fails_fast() {
        let (fact, _hook) = Target::recursive("fact", "", |rec, (n,): (u64,)| {
            if n == 0 { 1 } else { n * rec.call((n - 1,)) }
        });
        fact.call((3,));
    }

    #[test]
    #[should_panic(expected = "recursion hook tied twice")]
    fn test_double_tie_fails_fast() {
        let (fact, hook) = Target::recursive("fact", "", |rec, (n,): (u64,)| {
            if n == 0 { 1 } else { n * rec.call((n - 1,)) }
        });
        let chain: Chain<(u64,), u64> = Rc::new(fact);
        hook.tie(chain.clone());
        hook.tie(chain);
    }
}
