//! fnwrap-core: composable function instrumentation.
//!
//! Four independent wrappers layer onto a [`Target`] by nesting, each adding
//! one cross-cutting behavior while reporting the innermost function's
//! identity:
//!
//! - [`Memoized`] caches results keyed by exact call arguments
//! - [`Counted`] counts invocations that reach its layer
//! - [`Spread`] adapts a binary function to a variable-length argument list
//! - [`Traced`] prints depth-indented call and return lines
//!
//! ```
//! use fnwrap_core::{Callable, Counted, Memoized, Target};
//!
//! let sub = Target::new("sub", "Subtracts b from a.", |(a, b): (i64, i64)| a - b);
//! let sub = Counted::wrap(Memoized::wrap(sub));
//!
//! assert_eq!(sub.call((7, 3)), 4);
//! assert_eq!(sub.call((7, 3)), 4); // served from cache
//! assert_eq!(sub.calls(), 2);
//! assert_eq!(sub.meta().name, "sub");
//! ```
//!
//! Composition order is part of the contract: the stack above counts every
//! logical call, while `Memoized::wrap(Counted::wrap(sub))` would count only
//! the calls that miss the cache and execute the body.
//!
//! Recursive targets are built with [`Target::recursive`] and re-enter their
//! own wrapper stack through a [`Hook`], so memoization and tracing observe
//! every nesting level.
//!
//! All wrapper state lives in `Cell`/`RefCell`/`Rc`; the types are neither
//! `Send` nor `Sync`, so single-threaded use is a precondition the compiler
//! enforces rather than a convention callers must remember.

pub mod count;
pub mod layer;
pub mod memo;
pub mod meta;
pub mod nary;
pub mod sink;
pub mod target;
pub mod trace;

pub use count::{CallCount, Counted};
pub use memo::{CacheHandle, CacheStats, CallRecord, Memoized};
pub use meta::{Callable, Chain, FnMeta};
pub use nary::Spread;
pub use sink::{Sink, Stdout, Writer};
pub use target::{Hook, Target};
pub use trace::{Render, Traced, Tracer};
