//! Fixed-step 4th-order Runge-Kutta integration.
//!
//! Solves dy/dt = f(y, t) for concentration vectors. Concentrations are
//! physical quantities, so every intermediate stage state and the final
//! combination are clamped to max(0, .). The clamp guards against
//! transient negative excursions; it is not a substitute for correct
//! kinetics. There is no adaptive stepping and no stiffness detection;
//! stiff regimes are avoided by parameter choice.
//!
//! Reference: Press et al., Numerical Recipes, 3rd ed., Cambridge
//! University Press 2007

/// Replace non-finite derivative components with 0.
///
/// A NaN or Inf in one component would otherwise poison the whole state
/// vector on the next combination; neutralizing it keeps the run alive
/// while the anomaly is logged.
fn sanitize(dydt: &mut [f64]) {
    for (i, d) in dydt.iter_mut().enumerate() {
        if !d.is_finite() {
            log::warn!("non-finite derivative at component {}, replaced with 0", i);
            *d = 0.0;
        }
    }
}

/// Advance one RK4 step from `y` at time `t` by `dt`.
///
/// Implements the classic combination
/// `y' = y + (dt/6)(k1 + 2 k2 + 2 k3 + k4)`.
/// Returns a fresh vector; `y` is never mutated. Each stage state and the
/// final result are clamped component-wise to max(0, .).
pub fn rk4_step<F>(y: &[f64], t: f64, dt: f64, f: &F) -> Vec<f64>
where
    F: Fn(&[f64], f64, &mut [f64]),
{
    let n = y.len();
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut stage = vec![0.0; n];

    f(y, t, &mut k1);
    sanitize(&mut k1);

    for i in 0..n {
        stage[i] = (y[i] + 0.5 * dt * k1[i]).max(0.0);
    }
    f(&stage, t + 0.5 * dt, &mut k2);
    sanitize(&mut k2);

    for i in 0..n {
        stage[i] = (y[i] + 0.5 * dt * k2[i]).max(0.0);
    }
    f(&stage, t + 0.5 * dt, &mut k3);
    sanitize(&mut k3);

    for i in 0..n {
        stage[i] = (y[i] + dt * k3[i]).max(0.0);
    }
    f(&stage, t + dt, &mut k4);
    sanitize(&mut k4);

    let dt_6 = dt / 6.0;
    (0..n)
        .map(|i| (y[i] + dt_6 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i])).max(0.0))
        .collect()
}

/// Integrate from `t_start` to `t_end` with fixed step `dt`, sampling the
/// trajectory.
///
/// Records `y0` at `t_start`, then a sample whenever at least
/// `output_interval` seconds have elapsed since the last recorded sample,
/// and finally the terminal state. `output_interval` should be >= `dt`;
/// smaller values degrade to per-step sampling.
pub fn integrate<F>(
    y0: &[f64],
    t_start: f64,
    t_end: f64,
    dt: f64,
    f: &F,
    output_interval: f64,
) -> Vec<(f64, Vec<f64>)>
where
    F: Fn(&[f64], f64, &mut [f64]),
{
    let mut samples = vec![(t_start, y0.to_vec())];
    let mut y = y0.to_vec();
    let mut t = t_start;
    let mut last_output = t_start;

    while t < t_end {
        y = rk4_step(&y, t, dt, f);
        t += dt;

        if t - last_output >= output_interval || t >= t_end {
            samples.push((t, y.clone()));
            last_output = t;
        }
    }

    samples
}
