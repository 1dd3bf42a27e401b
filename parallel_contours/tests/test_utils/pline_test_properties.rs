use parallel_contours::{
    core::traits::FuzzyEq,
    polyline::Polyline,
    spatial_index::AABB,
};

pub fn aabb_fuzzy_eq_eps(a: &AABB<f64>, b: &AABB<f64>, eps: f64) -> bool {
    a.min_x.fuzzy_eq_eps(b.min_x, eps)
        && a.min_y.fuzzy_eq_eps(b.min_y, eps)
        && a.max_x.fuzzy_eq_eps(b.max_x, eps)
        && a.max_y.fuzzy_eq_eps(b.max_y, eps)
}

/// Summary of a polyline compared in place of exact vertexes so results produced from a
/// modified input (inverted, different start vertex) still match.
#[derive(Debug, Copy, Clone)]
pub struct PlineProperties {
    pub vertex_count: usize,
    pub area: f64,
    pub path_length: f64,
    pub extents: AABB<f64>,
}

impl PlineProperties {
    pub const POS_EQ_EPS: f64 = 1e-5;
    pub const PROP_CMP_EPS: f64 = 1e-4;

    pub fn new(
        vertex_count: usize,
        area: f64,
        path_length: f64,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        Self {
            vertex_count,
            area,
            path_length,
            extents: AABB::new(min_x, min_y, max_x, max_y),
        }
    }

    /// Properties of `pline`, area negated when `invert_area` (input direction was inverted).
    pub fn from_pline(pline: &Polyline<f64>, invert_area: bool) -> Self {
        let area = if invert_area {
            -pline.area()
        } else {
            pline.area()
        };

        Self {
            vertex_count: pline.len(),
            area,
            path_length: pline.path_length(),
            extents: pline.extents().expect("polyline has at least one segment"),
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.vertex_count == other.vertex_count
            && self.area.fuzzy_eq_eps(other.area, eps)
            && self.path_length.fuzzy_eq_eps(other.path_length, eps)
            && aabb_fuzzy_eq_eps(&self.extents, &other.extents, eps)
    }
}

pub fn create_property_set<'a, I>(polylines: I, invert_area: bool) -> Vec<PlineProperties>
where
    I: IntoIterator<Item = &'a Polyline>,
{
    polylines
        .into_iter()
        .map(|pl| PlineProperties::from_pline(pl, invert_area))
        .collect()
}

/// True if every expected property matches exactly one result property.
pub fn property_sets_match(
    result_set: &[PlineProperties],
    expected_set: &[PlineProperties],
) -> bool {
    result_set.len() == expected_set.len()
        && expected_set.iter().all(|expected| {
            result_set
                .iter()
                .filter(|r| expected.fuzzy_eq_eps(r, PlineProperties::PROP_CMP_EPS))
                .count()
                == 1
        })
}

/// Largest gap between `expected_dist` and the distance from any vertex or segment midpoint of
/// `result` to `input`.
pub fn max_offset_dist_error(input: &Polyline<f64>, result: &Polyline<f64>, expected_dist: f64) -> f64 {
    let dist_to_input = |p| {
        input
            .closest_point(p)
            .expect("input is not empty")
            .distance
    };

    let mut max_err: f64 = 0.0;
    for (v1, v2) in result.iter_segments() {
        for p in [v1.pos(), parallel_contours::polyline::seg_midpoint(v1, v2)] {
            max_err = max_err.max((dist_to_input(p) - expected_dist).abs());
        }
    }
    max_err
}
