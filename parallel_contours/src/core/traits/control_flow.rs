/// Control flow returned by visitor callbacks (spatial index queries, intersect visiting, etc.).
///
/// Implemented for `()` (never breaks), `bool` (`false` breaks) and
/// [Control](crate::core::Control) so plain closures can be used as visitors.
///
/// # Examples
///
/// ```
/// # use parallel_contours::core::*;
/// # use parallel_contours::pline_closed;
/// # use parallel_contours::polyline::*;
/// let pline = pline_closed![(0.0, 0.0, 0.0), (2.0, 2.0, 0.0), (2.0, 0.0, 0.0), (0.0, 2.0, 0.0)];
///
/// let mut visited_intersects = 0;
/// pline.visit_self_intersects(&mut |_intersect| {
///     visited_intersects += 1;
///     Control::Break(())
/// });
///
/// assert_eq!(visited_intersects, 1);
/// ```
pub trait ControlFlow {
    /// Constructs state indicating to continue iteration/visiting.
    fn continuing() -> Self;

    /// Returns `true` if control flow should break/stop iteration.
    fn should_break(&self) -> bool;
}

impl ControlFlow for () {
    #[inline]
    fn continuing() -> Self {}

    #[inline]
    fn should_break(&self) -> bool {
        false
    }
}

impl ControlFlow for bool {
    #[inline]
    fn continuing() -> Self {
        true
    }

    #[inline]
    fn should_break(&self) -> bool {
        !*self
    }
}
