use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Identity of a wrapped function: the name and documentation the innermost
/// target declared.
///
/// Every wrapper copies the identity of the callable it wraps at
/// construction, so the outermost layer of any stack answers introspection
/// as the original function, whatever the nesting depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FnMeta {
    pub name: String,
    pub doc: String,
}

impl FnMeta {
    pub fn of(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
        }
    }
}

/// A callable unit in a wrapper chain.
///
/// Arguments travel as one statically typed bundle: a tuple for fixed-arity
/// targets, a `Vec` for spread wrappers. Wrappers implement this trait by
/// delegating to the callable they own, forming a singly-linked chain with
/// a [`Target`](crate::Target) at the tail.
pub trait Callable {
    type Args;
    type Output;

    fn call(&self, args: Self::Args) -> Self::Output;

    /// Identity of the innermost target in this chain.
    fn meta(&self) -> &FnMeta;
}

/// Shared handle to an assembled wrapper chain.
///
/// Used where the concrete wrapper type must be erased: recursion hooks and
/// the [`layer`](crate::layer) API.
pub type Chain<A, R> = Rc<dyn Callable<Args = A, Output = R>>;

impl<A, R> Callable for Chain<A, R> {
    type Args = A;
    type Output = R;

    fn call(&self, args: A) -> R {
        (**self).call(args)
    }

    fn meta(&self) -> &FnMeta {
        (**self).meta()
    }
}
