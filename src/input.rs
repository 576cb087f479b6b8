use std::rc::Rc;

/// An input selector behind a shared pointer.
///
/// Used for bundles whose arity is only known at runtime. All positions then
/// share one value type `A`, typically an enum over the kinds of values the
/// application derives from its state.
pub type DynInput<S, A> = Rc<dyn Fn(&S) -> A>;

/// An ordered, fixed-arity parameter bundle.
///
/// This is implemented for tuples up to length twelve and for `Vec<A>`.
pub trait Bundle {
    /// The number of positions in the bundle.
    fn arity(&self) -> usize;
}

impl<A> Bundle for Vec<A> {
    fn arity(&self) -> usize {
        self.len()
    }
}

/// A set of input selectors that derive a parameter bundle from a state.
///
/// This is implemented for tuples of `Fn(&S) -> A` up to length twelve and
/// for `Vec<DynInput<S, A>>`.
pub trait Inputs<S: ?Sized> {
    /// The bundle produced by [`bind`](Self::bind).
    type Args: Bundle;

    /// The number of input selectors.
    fn arity(&self) -> usize;

    /// Run every selector once, in position order, and collect the results.
    fn bind(&self, state: &S) -> Self::Args;
}

impl<S: ?Sized, A> Inputs<S> for Vec<DynInput<S, A>> {
    type Args = Vec<A>;

    fn arity(&self) -> usize {
        self.len()
    }

    fn bind(&self, state: &S) -> Vec<A> {
        self.iter().map(|select| select(state)).collect()
    }
}

macro_rules! tuple_inputs {
    ($($arg:ident $sel:ident $idx:tt),*) => {
        impl<$($arg,)*> Bundle for ($($arg,)*) {
            fn arity(&self) -> usize {
                <[usize]>::len(&[$($idx),*])
            }
        }

        #[allow(unused_variables, clippy::unused_unit)]
        impl<S: ?Sized, $($arg, $sel: Fn(&S) -> $arg),*> Inputs<S> for ($($sel,)*) {
            type Args = ($($arg,)*);

            fn arity(&self) -> usize {
                <[usize]>::len(&[$($idx),*])
            }

            fn bind(&self, state: &S) -> Self::Args {
                ($((self.$idx)(state),)*)
            }
        }
    };
}

tuple_inputs! {}
tuple_inputs! { A0 F0 0 }
tuple_inputs! { A0 F0 0, A1 F1 1 }
tuple_inputs! { A0 F0 0, A1 F1 1, A2 F2 2 }
tuple_inputs! { A0 F0 0, A1 F1 1, A2 F2 2, A3 F3 3 }
tuple_inputs! { A0 F0 0, A1 F1 1, A2 F2 2, A3 F3 3, A4 F4 4 }
tuple_inputs! { A0 F0 0, A1 F1 1, A2 F2 2, A3 F3 3, A4 F4 4, A5 F5 5 }
tuple_inputs! { A0 F0 0, A1 F1 1, A2 F2 2, A3 F3 3, A4 F4 4, A5 F5 5, A6 F6 6 }
tuple_inputs! { A0 F0 0, A1 F1 1, A2 F2 2, A3 F3 3, A4 F4 4, A5 F5 5, A6 F6 6, A7 F7 7 }
tuple_inputs! { A0 F0 0, A1 F1 1, A2 F2 2, A3 F3 3, A4 F4 4, A5 F5 5, A6 F6 6, A7 F7 7, A8 F8 8 }
tuple_inputs! {
    A0 F0 0, A1 F1 1, A2 F2 2, A3 F3 3, A4 F4 4, A5 F5 5, A6 F6 6, A7 F7 7, A8 F8 8,
    A9 F9 9
}
tuple_inputs! {
    A0 F0 0, A1 F1 1, A2 F2 2, A3 F3 3, A4 F4 4, A5 F5 5, A6 F6 6, A7 F7 7, A8 F8 8,
    A9 F9 9, A10 F10 10
}
tuple_inputs! {
    A0 F0 0, A1 F1 1, A2 F2 2, A3 F3 3, A4 F4 4, A5 F5 5, A6 F6 6, A7 F7 7, A8 F8 8,
    A9 F9 9, A10 F10 10, A11 F11 11
}
