// numerics.rs - Log-gamma, incomplete gamma/beta and normal tail primitives
//
// These back the binomial/normal significance tests in core::stats. All
// functions are pure f64 computations; domain errors yield a NaN sentinel
// (callers treat NaN p-values as non-significant) and non-convergence past
// the iteration cap returns the best value found so far.

/// Tolerance for the incomplete-gamma series and continued fraction.
const GAMMA_EPS: f64 = 1.0e-6;

/// Tolerance for the incomplete-beta continued fraction.
const BETA_EPS: f64 = 3.0e-7;

/// Smallest representable pivot in the beta continued fraction.
const FPMIN: f64 = 1.0e-30;

/// Iteration cap shared by all continued-fraction/series loops.
const MAX_ITER: usize = 500;

const LN2: f64 = 0.693_147_180_559_945_3;

/// Natural logarithm of the gamma function, valid for `x > 0`.
///
/// Coefficient series for `x > 1`; for `0 < x <= 1` recurses once through
/// `gamma(x) = gamma(x + 1) / x` where the series is less accurate.
/// Returns NaN for `x <= 0`.
pub fn ln_gamma(x: f64) -> f64 {
    const COEF: [f64; 6] = [
        76.18009173,
        -86.50532033,
        24.01409822,
        -1.231739516,
        0.120858003e-2,
        -0.536382e-5,
    ];

    if x > 1.0 {
        let tmp = x + 4.5;
        let ln_factor = (x - 0.5) * tmp.ln() - tmp;

        let mut series = 1.0;
        let mut a = x;
        for c in COEF {
            series += c / a;
            a += 1.0;
        }
        ln_factor + (2.50662827465 * series).ln()
    } else if x > 0.0 {
        ln_gamma(x + 1.0) - x.ln()
    } else {
        eprintln!("⚠️  ln_gamma: argument {} is out of domain (must be > 0)", x);
        f64::NAN
    }
}

/// Log of the upper incomplete gamma tail via continued fraction.
/// Accurate in the large-argument regime `x >= alpha + 1`.
fn gamma_tail_cf_ln(alpha: f64, x: f64) -> f64 {
    let mut frac_old = 0.0;

    let mut a0 = 0.0;
    let mut a1 = 1.0;
    let mut b0 = 1.0;
    let mut b1 = x;

    for i in 1..=MAX_ITER {
        let i = i as f64;

        // first half-cycle of the recurrence
        let i_alpha = i - alpha;
        a0 = a1 + i_alpha * a0;
        b0 = b1 + i_alpha * b0;

        // second half-cycle
        a1 = x * a0 + i * a1;
        b1 = x * b0 + i * b1;

        if b1 != 0.0 {
            a0 /= b1;
            b0 /= b1;
            a1 /= b1;
            b1 = 1.0;
            if ((a1 - frac_old) / a1).abs() < GAMMA_EPS {
                return -x + alpha * x.ln() + a1.ln() - ln_gamma(alpha);
            }
            frac_old = a1;
        }
    }

    eprintln!("⚠️  gamma tail continued fraction did not converge after {} iterations", MAX_ITER);
    -x + alpha * x.ln() + frac_old.ln() - ln_gamma(alpha)
}

/// Lower incomplete gamma via series expansion.
/// Accurate in the small-argument regime `x < alpha + 1`.
fn gamma_series(alpha: f64, x: f64) -> f64 {
    let mut alpha_n = alpha + 1.0;
    let mut term = 1.0 / alpha;
    let mut sum = term;

    for _ in 0..MAX_ITER {
        term *= x / alpha_n;
        sum += term;
        alpha_n += 1.0;
        if term < sum * GAMMA_EPS {
            return (-x + alpha * x.ln() + sum.ln() - ln_gamma(alpha)).exp();
        }
    }

    eprintln!("⚠️  gamma series did not converge after {} iterations", MAX_ITER);
    (-x + alpha * x.ln() + sum.ln() - ln_gamma(alpha)).exp()
}

/// Natural logarithm of the regularized upper gamma tail `Q(alpha, x)`,
/// integrated from `x` to infinity with unit scale.
///
/// `x` below `-GAMMA_EPS` or negative `alpha` is a data/invariant violation
/// and yields NaN; `x <= 0` or `alpha == 0` gives the full tail (log 1 = 0).
pub fn gamma_tail_ln(alpha: f64, x: f64) -> f64 {
    if x < -GAMMA_EPS || alpha < 0.0 {
        eprintln!("⚠️  gamma_tail_ln: out of domain (alpha={}, x={})", alpha, x);
        f64::NAN
    } else if x <= 0.0 || alpha == 0.0 {
        0.0
    } else if x >= alpha + 1.0 {
        gamma_tail_cf_ln(alpha, x)
    } else {
        (1.0 - gamma_series(alpha, x)).ln()
    }
}

/// Natural logarithm of the standard normal upper tail beyond `z >= 0`,
/// `ln P(Z > z) = -ln 2 + ln Q(1/2, z^2/2)`.
pub fn normal_tail_ln(z: f64) -> f64 {
    -LN2 + gamma_tail_ln(0.5, z * z / 2.0)
}

/// Continued-fraction workhorse for the regularized incomplete beta.
fn betacf(a: f64, b: f64, x: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;

        if (del - 1.0).abs() < BETA_EPS {
            return h;
        }
    }

    eprintln!("⚠️  betacf did not converge after {} iterations (a={}, b={})", MAX_ITER, a, b);
    h
}

/// Regularized incomplete beta function `I_x(a, b)`.
///
/// Uses the standard symmetry swap `I_x(a,b) = 1 - I_{1-x}(b,a)` when
/// `x > (a+1)/(a+b+2)` so the continued fraction converges fast. `b == 0`
/// is degenerate (arises when every cross pair is counted); the limit is 0
/// for `x < 1` and 1 at `x = 1`. Non-positive `a` or `x` outside `[0, 1]`
/// yields NaN.
pub fn betai(a: f64, b: f64, x: f64) -> f64 {
    if !(0.0..=1.0).contains(&x) || a <= 0.0 || b < 0.0 {
        eprintln!("⚠️  betai: out of domain (a={}, b={}, x={})", a, b, x);
        return f64::NAN;
    }
    if b == 0.0 {
        return if x < 1.0 { 0.0 } else { 1.0 };
    }

    let bt = if x == 0.0 || x == 1.0 {
        0.0
    } else {
        (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln()).exp()
    };

    if x < (a + 1.0) / (a + b + 2.0) {
        bt * betacf(a, b, x) / a
    } else {
        1.0 - bt * betacf(b, a, 1.0 - x) / b
    }
}
