//! Scalar helpers, interpolation, bezier sampling and spline smoothing.

use crate::canvas::Coord;

pub fn clip(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// `1.0` for zero and positive values, `-1.0` otherwise.
pub fn sign(value: f32) -> f32 {
    if value >= 0.0 { 1.0 } else { -1.0 }
}

/// Linear interpolation; with `limit` the factor is clamped to `[0, 1]`.
pub fn interp_1d(a: f32, b: f32, factor: f32, limit: bool) -> f32 {
    let factor = if limit { factor.clamp(0.0, 1.0) } else { factor };
    a + factor * (b - a)
}

pub fn interp_2d(p0: Coord, p1: Coord, factor: f32) -> Coord {
    (
        interp_1d(p0.0, p1.0, factor, false),
        interp_1d(p0.1, p1.1, factor, false),
    )
}

/// Map `value` from the range `[src_a, src_b]` onto `[tar_a, tar_b]`, unclamped.
pub fn mapper_1d(value: f32, src_a: f32, src_b: f32, tar_a: f32, tar_b: f32) -> f32 {
    let factor = (value - src_a) / (src_b - src_a);
    tar_a + factor * (tar_b - tar_a)
}

/// `n_segments + 1` points along a quadratic bezier.
pub fn quadratic_bezier(p0: Coord, p1: Coord, p2: Coord, n_segments: usize) -> Vec<Coord> {
    let n = n_segments.max(1);
    (0..=n)
        .map(|i| {
            let t = i as f32 / n as f32;
            interp_2d(interp_2d(p0, p1, t), interp_2d(p1, p2, t), t)
        })
        .collect()
}

/// `n_segments + 1` points along a cubic bezier.
pub fn cubic_bezier(p0: Coord, p1: Coord, p2: Coord, p3: Coord, n_segments: usize) -> Vec<Coord> {
    let n = n_segments.max(1);
    (0..=n)
        .map(|i| {
            let t = i as f32 / n as f32;
            let l0 = interp_2d(p0, p1, t);
            let l1 = interp_2d(p1, p2, t);
            let l2 = interp_2d(p2, p3, t);
            interp_2d(interp_2d(l0, l1, t), interp_2d(l1, l2, t), t)
        })
        .collect()
}

fn linspace(start: f64, end: f64, num: usize) -> impl Iterator<Item = f64> {
    let step = if num > 1 {
        (end - start) / (num - 1) as f64
    } else {
        0.0
    };
    (0..num).map(move |i| start + step * i as f64)
}

/// Second derivatives of the natural cubic spline through `ys` at x = 0, 1, 2, ...
fn natural_spline_moments(ys: &[f64]) -> Vec<f64> {
    let n = ys.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }
    // Thomas algorithm on M[i-1] + 4 M[i] + M[i+1] = 6 (y[i+1] - 2 y[i] + y[i-1])
    let inner = n - 2;
    let mut c = vec![0.0; inner];
    let mut d = vec![0.0; inner];
    for k in 0..inner {
        let i = k + 1;
        let rhs = 6.0 * (ys[i + 1] - 2.0 * ys[i] + ys[i - 1]);
        if k == 0 {
            c[k] = 1.0 / 4.0;
            d[k] = rhs / 4.0;
        } else {
            let denom = 4.0 - c[k - 1];
            c[k] = 1.0 / denom;
            d[k] = (rhs - d[k - 1]) / denom;
        }
    }
    for k in (0..inner).rev() {
        let next = if k + 1 < inner { m[k + 2] } else { 0.0 };
        m[k + 1] = d[k] - c[k] * next;
    }
    m
}

fn eval_spline(ys: &[f64], m: &[f64], x: f64) -> f64 {
    let last = ys.len() - 1;
    let i = (x.floor().max(0.0) as usize).min(last - 1);
    let u = x - i as f64;
    let v = 1.0 - u;
    v * ys[i] + u * ys[i + 1] + ((v * v * v - v) * m[i] + (u * u * u - u) * m[i + 1]) / 6.0
}

/// Resample `points` (taken at unit spacing) to `len * factor` values along a
/// natural cubic spline. The first and last values are preserved.
pub fn smoothen_1d(points: &[f32], factor: f32) -> Vec<f32> {
    let count = (points.len() as f32 * factor).max(0.0) as usize;
    if points.len() < 2 {
        return points.iter().copied().cycle().take(count).collect();
    }
    let ys: Vec<f64> = points.iter().map(|&p| f64::from(p)).collect();
    let m = natural_spline_moments(&ys);
    let end = (ys.len() - 1) as f64;
    linspace(0.0, end, count)
        .map(|x| eval_spline(&ys, &m, x) as f32)
        .collect()
}

/// [`smoothen_1d`] applied to both coordinates.
pub fn smoothen_tuples(points: &[Coord], factor: f32) -> Vec<Coord> {
    let xs: Vec<f32> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f32> = points.iter().map(|p| p.1).collect();
    smoothen_1d(&xs, factor)
        .into_iter()
        .zip(smoothen_1d(&ys, factor))
        .collect()
}
