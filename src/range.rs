//! Uniform sampling of an interval.

/// Return an iterator yielding `n` uniformly spaced points between
/// `a` and `b`, both bounds included.  It is not required that
/// `a <= b`.  With `n == 1` the only point is `a`.
///
/// ```
/// let v: Vec<f64> = cmaputil::linspace(0., 1., 5).collect();
/// assert_eq!(v, [0., 0.25, 0.5, 0.75, 1.]);
/// ```
pub fn linspace(a: f64, b: f64, n: usize) -> Linspace {
    if n == 0 {
        Linspace { a, b, flast: 0., last: 0, i: 1, j: 0 } // Empty iterator
    } else {
        Linspace { a, b, flast: (n - 1) as f64, last: n - 1, i: 0, j: n - 1 }
    }
}

/// An iterator yielding `f64` in a given range.  Created by
/// [`linspace`].
#[derive(Debug, Clone)]
pub struct Linspace {
    a: f64,
    b: f64,
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed (i ≤ j)
    j: usize, // last position to be consumed
}

impl Linspace {
    /// Return the point at position `k` (assuming `k <= self.last`).
    /// The bounds are returned exactly.
    fn at(&self, k: usize) -> f64 {
        if k == 0 {
            self.a
        } else if k == self.last {
            self.b
        } else {
            // Same rounding as `numpy.linspace`: `k * step + a`.
            let step = (self.b - self.a) / self.flast;
            k as f64 * step + self.a
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.i <= self.j {
            let x = self.at(self.i);
            self.i += 1;
            Some(x)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = (self.j + 1).saturating_sub(self.i);
        (len, Some(len))
    }
}

impl ExactSizeIterator for Linspace {}

impl DoubleEndedIterator for Linspace {
    fn next_back(&mut self) -> Option<f64> {
        if self.i <= self.j {
            let x = self.at(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(x)
        } else {
            None
        }
    }
}
