//! Order-stable accumulation for energy reductions.
//!
//! Sums are taken pairwise over a fixed tree with Neumaier compensation, so
//! the result only depends on the input order and not on how the caller
//! chunked the data. Non-finite values are propagated, never masked.

#[derive(Clone, Copy, Debug)]
struct AccumNode {
    sum: f64,
    compensation: f64,
}

impl AccumNode {
    fn from_value(value: f64) -> Self {
        Self {
            sum: value,
            compensation: 0.0,
        }
    }

    fn combine(self, other: Self) -> Self {
        let a = self.sum;
        let b = other.sum;
        let t = a + b;
        let carry = if a.abs() >= b.abs() {
            (a - t) + b
        } else {
            (b - t) + a
        };
        let compensation = if t.is_finite() {
            self.compensation + other.compensation + carry
        } else {
            0.0
        };

        Self {
            sum: t,
            compensation,
        }
    }

    fn finalize(self) -> f64 {
        self.sum + self.compensation
    }
}

fn reduce_nodes(mut nodes: Vec<AccumNode>) -> AccumNode {
    debug_assert!(!nodes.is_empty());
    while nodes.len() > 1 {
        let mut next = Vec::with_capacity((nodes.len() + 1) / 2);
        for pair in nodes.chunks(2) {
            match pair {
                [lhs, rhs] => next.push(lhs.combine(*rhs)),
                [single] => next.push(*single),
                _ => unreachable!("chunks(2) yields one or two nodes"),
            }
        }
        nodes = next;
    }
    nodes[0]
}

/// Pairwise compensated sum.
pub fn compensated_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let nodes: Vec<AccumNode> = values.into_iter().map(AccumNode::from_value).collect();
    if nodes.is_empty() {
        return 0.0;
    }
    reduce_nodes(nodes).finalize()
}

/// Compensated sum of squares, the energy of a flattened array.
pub fn sum_of_squares<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
{
    compensated_sum(values.into_iter().map(|&v| v * v))
}

/// Compensated squared distance `Σ (a_i − b_i)^2` between two equally long sequences.
pub fn squared_difference<'a, A, B>(lhs: A, rhs: B) -> f64
where
    A: IntoIterator<Item = &'a f64>,
    B: IntoIterator<Item = &'a f64>,
{
    compensated_sum(lhs.into_iter().zip(rhs).map(|(&a, &b)| {
        let diff = a - b;
        diff * diff
    }))
}
