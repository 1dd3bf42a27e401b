/// Assert two values are fuzzy equal, optionally with an explicit epsilon.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Replaces a token tree with an expression, used to count macro repetitions.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Open [Polyline](crate::polyline::Polyline) from `(x, y, bulge)` tuples.
///
/// # Examples
///
/// ```
/// # use parallel_contours::pline_open;
/// # use parallel_contours::polyline::*;
/// let polyline = pline_open![(0.0, 0.0, 0.0), (3.0, 0.0, 0.5)];
/// assert!(!polyline.is_closed());
/// assert_eq!(polyline.segment_count(), 1);
/// assert_eq!(polyline[1], PlineVertex::new(3.0, 0.0, 0.5));
/// ```
#[macro_export]
macro_rules! pline_open {
    ($( $x:expr ),* $(,)?) => {
        {
            use $crate::polyline::*;
            let count = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut pl = Polyline::with_capacity(count, false);
            $(
                pl.add($x.0, $x.1, $x.2);
            )*
            pl
        }
    };
}

/// Closed [Polyline](crate::polyline::Polyline) from `(x, y, bulge)` tuples.
///
/// # Examples
///
/// ```
/// # use parallel_contours::pline_closed;
/// # use parallel_contours::polyline::*;
/// let polyline = pline_closed![(0.0, 0.0, 1.0), (2.0, 0.0, 1.0)];
/// assert_eq!(polyline.segment_count(), 2);
/// assert!(polyline.is_closed());
/// assert_eq!(polyline[0], PlineVertex::new(0.0, 0.0, 1.0));
/// ```
#[macro_export]
macro_rules! pline_closed {
    ($( $x:expr ),* $(,)?) => {
        {
            use $crate::polyline::*;
            let count = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut pl = Polyline::with_capacity(count, true);
            $(
                pl.add($x.0, $x.1, $x.2);
            )*
            pl
        }
    };
}
