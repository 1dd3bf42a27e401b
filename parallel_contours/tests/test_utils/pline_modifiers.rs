use parallel_contours::polyline::Polyline;

/// Rotate the vertex order of a closed polyline so vertex `n` becomes vertex 0.
pub fn cycle_start_index_forward(input: &Polyline<f64>, n: usize) -> Polyline<f64> {
    assert!(input.is_closed(), "only closed polylines have no fixed start");
    assert!(n > 0 && n < input.len(), "cycle count out of range");
    let len = input.len();
    Polyline::from_vertexes((0..len).map(|i| input[(i + n) % len]), input.is_closed())
}

/// How a test input was modified from its original form.
#[derive(Debug, Clone, Copy)]
pub struct ModifiedPlineState {
    pub inverted_direction: bool,
    pub cycle_position: usize,
}

/// Runs a test case against its input and equivalent inputs: direction inverted and (closed
/// polylines only) every start vertex rotation.
#[derive(Debug, Clone)]
pub struct ModifiedPlineSet<'a> {
    pub input: &'a Polyline<f64>,
    pub invert_direction: bool,
    pub cycle_index_positions: bool,
}

impl<'a> ModifiedPlineSet<'a> {
    pub fn new(
        input: &'a Polyline<f64>,
        invert_direction: bool,
        cycle_index_positions: bool,
    ) -> Self {
        Self {
            input,
            invert_direction,
            cycle_index_positions,
        }
    }

    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(Polyline<f64>, ModifiedPlineState),
    {
        let directions: &[bool] = if self.invert_direction {
            &[false, true]
        } else {
            &[false]
        };

        for &inverted in directions {
            let base = if inverted {
                self.input.invert_direction()
            } else {
                self.input.clone()
            };

            let cycle_count = if self.cycle_index_positions && base.is_closed() {
                base.len()
            } else {
                1
            };

            for i in 0..cycle_count {
                let pline = if i == 0 {
                    base.clone()
                } else {
                    cycle_start_index_forward(&base, i)
                };
                visitor(
                    pline,
                    ModifiedPlineState {
                        inverted_direction: inverted,
                        cycle_position: i,
                    },
                );
            }
        }
    }
}
