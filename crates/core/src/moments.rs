//! Distribution moment library -- native parameters to (mean, std_dev).
//!
//! Pure functions, one per distribution kind, used by the bound generation
//! pass to synthesize missing bounds and initial values. Deterministic and
//! side-effect-free; no allocation beyond the return value.
//!
//! Conventions: `alpha`/`beta` are the usual shape/scale pairs; the gumbel
//! CDF is `exp(-exp(-alpha (x - beta)))`; frechet needs `alpha > 2` and
//! weibull `alpha > 0` for the gamma-function moment formulas to be finite.

use libm::tgamma;

/// Euler-Mascheroni constant, used in the gumbel mean.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Standard normal 95th percentile; relates a lognormal error factor to zeta
/// via `error_factor = exp(Z95 * zeta)`.
const Z95: f64 = 1.644_853_626_951_472_2;

/// First two moments of a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
}

/// The full, mutually-consistent lognormal parameter set. Any one of the
/// three accepted input pairs determines the other two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LognormalParams {
    pub lambda: f64,
    pub zeta: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub error_factor: f64,
}

pub fn normal(mean: f64, std_dev: f64) -> Moments {
    Moments { mean, std_dev }
}

pub fn lognormal_from_lambda_zeta(lambda: f64, zeta: f64) -> LognormalParams {
    let mean = (lambda + zeta * zeta / 2.0).exp();
    let std_dev = mean * ((zeta * zeta).exp() - 1.0).sqrt();
    LognormalParams {
        lambda,
        zeta,
        mean,
        std_dev,
        error_factor: (Z95 * zeta).exp(),
    }
}

pub fn lognormal_from_mean_std_dev(mean: f64, std_dev: f64) -> LognormalParams {
    let cv = std_dev / mean;
    let zeta = (1.0 + cv * cv).ln().sqrt();
    let lambda = mean.ln() - zeta * zeta / 2.0;
    LognormalParams {
        lambda,
        zeta,
        mean,
        std_dev,
        error_factor: (Z95 * zeta).exp(),
    }
}

pub fn lognormal_from_mean_error_factor(mean: f64, error_factor: f64) -> LognormalParams {
    let zeta = error_factor.ln() / Z95;
    let lambda = mean.ln() - zeta * zeta / 2.0;
    let std_dev = mean * ((zeta * zeta).exp() - 1.0).sqrt();
    LognormalParams {
        lambda,
        zeta,
        mean,
        std_dev,
        error_factor,
    }
}

pub fn uniform(lower: f64, upper: f64) -> Moments {
    Moments {
        mean: (lower + upper) / 2.0,
        std_dev: (upper - lower) / 12.0f64.sqrt(),
    }
}

/// Requires `0 < lower < upper`.
pub fn loguniform(lower: f64, upper: f64) -> Moments {
    let span = upper.ln() - lower.ln();
    let mean = (upper - lower) / span;
    let second = (upper * upper - lower * lower) / (2.0 * span);
    Moments {
        mean,
        std_dev: (second - mean * mean).sqrt(),
    }
}

/// Requires `lower <= mode <= upper`.
pub fn triangular(lower: f64, mode: f64, upper: f64) -> Moments {
    let mean = (lower + mode + upper) / 3.0;
    let var = (lower * lower + mode * mode + upper * upper
        - lower * mode
        - lower * upper
        - mode * upper)
        / 18.0;
    Moments {
        mean,
        std_dev: var.sqrt(),
    }
}

pub fn exponential(beta: f64) -> Moments {
    Moments {
        mean: beta,
        std_dev: beta,
    }
}

/// Standard beta with shapes `alpha`, `beta`, scaled onto `[lower, upper]`.
pub fn beta(alpha: f64, beta: f64, lower: f64, upper: f64) -> Moments {
    let range = upper - lower;
    let sum = alpha + beta;
    let mean = lower + range * alpha / sum;
    let std_dev = range * (alpha * beta / (sum * sum * (sum + 1.0))).sqrt();
    Moments { mean, std_dev }
}

pub fn gamma(alpha: f64, beta: f64) -> Moments {
    Moments {
        mean: alpha * beta,
        std_dev: alpha.sqrt() * beta,
    }
}

pub fn gumbel(alpha: f64, beta: f64) -> Moments {
    Moments {
        mean: beta + EULER_GAMMA / alpha,
        std_dev: std::f64::consts::PI / (alpha * 6.0f64.sqrt()),
    }
}

/// Requires `alpha > 2` for a finite standard deviation.
pub fn frechet(alpha: f64, beta: f64) -> Moments {
    let g1 = tgamma(1.0 - 1.0 / alpha);
    let g2 = tgamma(1.0 - 2.0 / alpha);
    Moments {
        mean: beta * g1,
        std_dev: beta * (g2 - g1 * g1).sqrt(),
    }
}

pub fn weibull(alpha: f64, beta: f64) -> Moments {
    let g1 = tgamma(1.0 + 1.0 / alpha);
    let g2 = tgamma(1.0 + 2.0 / alpha);
    Moments {
        mean: beta * g1,
        std_dev: beta * (g2 - g1 * g1).sqrt(),
    }
}

pub fn poisson(lambda: f64) -> Moments {
    Moments {
        mean: lambda,
        std_dev: lambda.sqrt(),
    }
}

pub fn binomial(prob: f64, num_trials: i64) -> Moments {
    let n = num_trials as f64;
    Moments {
        mean: n * prob,
        std_dev: (n * prob * (1.0 - prob)).sqrt(),
    }
}

/// Number of failures observed before the `num_trials`-th success.
pub fn neg_binomial(prob: f64, num_trials: i64) -> Moments {
    let n = num_trials as f64;
    Moments {
        mean: n * (1.0 - prob) / prob,
        std_dev: (n * (1.0 - prob)).sqrt() / prob,
    }
}

/// Number of failures observed before the first success.
pub fn geometric(prob: f64) -> Moments {
    Moments {
        mean: (1.0 - prob) / prob,
        std_dev: (1.0 - prob).sqrt() / prob,
    }
}

pub fn hypergeometric(total: i64, selected: i64, drawn: i64) -> Moments {
    let big_n = total as f64;
    let m = selected as f64;
    let n = drawn as f64;
    let frac = m / big_n;
    let var = n * frac * (1.0 - frac) * (big_n - n) / (big_n - 1.0);
    Moments {
        mean: n * frac,
        std_dev: var.sqrt(),
    }
}
