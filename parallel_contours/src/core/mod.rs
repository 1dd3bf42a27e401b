//! Shared math, numeric traits and control flow types.

use self::traits::ControlFlow;
pub mod math;
pub mod traits;

/// Control flow value a visitor can return to stop a traversal and carry a value out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control<B = ()> {
    /// Keep visiting.
    Continue,
    /// Stop visiting and return `B`.
    Break(B),
}

impl<B> Default for Control<B> {
    #[inline]
    fn default() -> Self {
        Control::Continue
    }
}

impl<B> ControlFlow for Control<B> {
    #[inline]
    fn continuing() -> Self {
        Control::Continue
    }

    #[inline]
    fn should_break(&self) -> bool {
        matches!(*self, Control::Break(_))
    }
}

/// Returns early from the enclosing function if the control flow value should break.
macro_rules! try_cf {
    ($e:expr) => {
        match $e {
            x => {
                if x.should_break() {
                    return x;
                }
            }
        }
    };
}
