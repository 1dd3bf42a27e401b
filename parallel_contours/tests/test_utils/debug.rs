use parallel_contours::polyline::Polyline;

/// Polyline as a json string (same shape as the serde representation), used in assert messages.
pub fn to_debug_json_str(pline: &Polyline) -> String {
    let vertexes = pline
        .iter()
        .map(|v| format!("[{}, {}, {}]", v.x, v.y, v.bulge))
        .collect::<Vec<_>>()
        .join(",\n        ");
    format!(
        "{{\n    \"isClosed\": {},\n    \"vertexes\": [\n        {}\n    ]\n}}",
        pline.is_closed(),
        vertexes
    )
}

pub fn plines_debug_str(plines: &[Polyline]) -> String {
    plines
        .iter()
        .map(to_debug_json_str)
        .collect::<Vec<_>>()
        .join("\n")
}
