use crate::meta::{Callable, FnMeta};

/// Adapts a binary function to a variable-length argument list.
///
/// One argument is returned unchanged without invoking the target; two are
/// a direct application; more reduce right-to-left, so
/// `spread([a, b, c]) == f(a, f(b, c))`. The target's arity is fixed by its
/// argument type at wrap time, and only positional arguments participate.
pub struct Spread<C> {
    meta: FnMeta,
    inner: C,
}

impl<T, C> Spread<C>
where
    C: Callable<Args = (T, T), Output = T>,
{
    pub fn wrap(inner: C) -> Self {
        Self {
            meta: inner.meta().clone(),
            inner,
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<T, C> Callable for Spread<C>
where
    C: Callable<Args = (T, T), Output = T>,
{
    type Args = Vec<T>;
    type Output = T;

    fn call(&self, args: Vec<T>) -> T {
        let mut rest = args.into_iter().rev();
        let Some(mut acc) = rest.next() else {
            panic!("{}: spread call requires at least one argument", self.meta.name);
        };
        for arg in rest {
            acc = self.inner.call((arg, acc));
        }
        acc
    }

    fn meta(&self) -> &FnMeta {
        &self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Target;
    use std::cell::Cell;
    use std::rc::Rc;

    fn probed_mul() -> (Spread<Target<(i64, i64), i64>>, Rc<Cell<u64>>) {
        let executed = Rc::new(Cell::new(0u64));
        let seen = executed.clone();
        let mul = Target::new("mul", "Multiplies two numbers.", move |(a, b): (i64, i64)| {
            seen.set(seen.get() + 1);
            a * b
        });
        (Spread::wrap(mul), executed)
    }

    #[test]
    fn test_single_argument_skips_the_target() {
        let (mul, executed) = probed_mul();

        assert_eq!(mul.call(vec![5]), 5);
        assert_eq!(executed.get(), 0);
    }

    #[test]
    fn test_two_arguments_apply_directly() {
        let (mul, executed) = probed_mul();

        assert_eq!(mul.call(vec![4, 3]), 12);
        assert_eq!(executed.get(), 1);
    }

    #[test]
    fn test_more_arguments_fold_right() {
        let (mul, executed) = probed_mul();

        assert_eq!(mul.call(vec![5, 4, 3, 2]), 120);
        assert_eq!(executed.get(), 3);
    }

    #[test]
    fn test_fold_is_right_associative() {
        let sub = Target::new("sub", "", |(a, b): (i64, i64)| a - b);
        let sub = Spread::wrap(sub);

        // sub(10, sub(4, 3)) = 10 - 1
        assert_eq!(sub.call(vec![10, 4, 3]), 9);
    }

    #[test]
    #[should_panic(expected = "spread call requires at least one argument")]
    fn test_empty_call_fails_fast() {
        let (mul, _executed) = probed_mul();
        mul.call(Vec::new());
    }

    #[test]
    fn test_identity_preserved() {
        let (mul, _executed) = probed_mul();
        assert_eq!(mul.meta().name, "mul");
        assert_eq!(mul.meta().doc, "Multiplies two numbers.");
    }
}
