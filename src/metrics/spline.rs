//! Natural cubic spline interpolation.

/// Natural cubic spline through a set of knots.
///
/// Second derivatives are zero at both ends. Knot x values must be strictly
/// increasing.
#[derive(Debug, Clone)]
pub struct NaturalSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot
    m: Vec<f64>,
}

impl NaturalSpline {
    /// Fit a spline through `(xs[i], ys[i])`.
    ///
    /// Fewer than three knots degrade gracefully: none gives an empty spline,
    /// one a constant and two a straight line.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        debug_assert_eq!(xs.len(), ys.len());
        let n = xs.len().min(ys.len());
        let m = if n < 3 {
            vec![0.0; n]
        } else {
            solve_second_derivatives(&xs[..n], &ys[..n])
        };
        Self { xs, ys, m }
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.m.len()
    }

    /// Check if the spline has no knots.
    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }

    /// Evaluate at `x`. Values outside the knot range clamp to the end knots;
    /// NaN yields NaN.
    pub fn value(&self, x: f64) -> f64 {
        let n = self.len();
        if n == 0 {
            return 0.0;
        }
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }

        // Last knot with xs[k] <= x
        let k = self.xs.partition_point(|&kx| kx <= x) - 1;
        self.segment_value(k, x)
    }

    /// Evaluate at every integer in `0..=last`.
    ///
    /// Walks the knots once rather than searching per point.
    pub fn sample_seconds(&self, last: usize) -> Vec<f64> {
        let n = self.len();
        if n == 0 {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(last + 1);
        let mut k = 0;
        for second in 0..=last {
            let x = second as f64;
            if x <= self.xs[0] {
                out.push(self.ys[0]);
                continue;
            }
            if x >= self.xs[n - 1] {
                out.push(self.ys[n - 1]);
                continue;
            }
            while k + 1 < n && self.xs[k + 1] <= x {
                k += 1;
            }
            out.push(self.segment_value(k, x));
        }
        out
    }

    fn segment_value(&self, k: usize, x: f64) -> f64 {
        let h = self.xs[k + 1] - self.xs[k];
        let t = x - self.xs[k];
        let (m0, m1) = (self.m[k], self.m[k + 1]);
        let slope = (self.ys[k + 1] - self.ys[k]) / h - h * (2.0 * m0 + m1) / 6.0;

        self.ys[k] + slope * t + m0 / 2.0 * t * t + (m1 - m0) / (6.0 * h) * t * t * t
    }
}

/// Solve the tridiagonal system for interior second derivatives (Thomas).
fn solve_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();

    let interior = n - 2;
    let mut c_prime = vec![0.0; interior];
    let mut d_prime = vec![0.0; interior];

    for row in 0..interior {
        let i = row + 1;
        let lower = h[i - 1];
        let diag = 2.0 * (h[i - 1] + h[i]);
        let upper = h[i];
        let rhs = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);

        if row == 0 {
            c_prime[row] = upper / diag;
            d_prime[row] = rhs / diag;
        } else {
            let denom = diag - lower * c_prime[row - 1];
            c_prime[row] = upper / denom;
            d_prime[row] = (rhs - lower * d_prime[row - 1]) / denom;
        }
    }

    let mut m = vec![0.0; n];
    for row in (0..interior).rev() {
        let next = m[row + 2];
        m[row + 1] = d_prime[row] - c_prime[row] * next;
    }
    m
}
