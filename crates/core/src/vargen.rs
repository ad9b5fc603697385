//! Variable defaulting, bound-generation pass.
//!
//! Runs once per variables record, after parsing. For every distribution
//! kind with a nonzero count, in fixed kind order: length-check the native
//! parameter vectors against the declared count, synthesize missing bounds
//! and initial values from the distribution moments, and write the results
//! into the kind's slice of the aggregated category vectors at the
//! accumulated offset. A kind whose parameters fail the length check squawks
//! and contributes nothing; its slice keeps the zero fill.
//!
//! Re-running the pass on an already-bounded record is a no-op: bounds and
//! initial values are only synthesized into empty vectors, and the derived
//! quantities (lognormal parameter completion, histogram normalization) are
//! fixed points of their own output.

use crate::diag::DiagSink;
use crate::moments::{self, Moments};
use crate::records::{IntAggregate, LognormalParam, RealAggregate, VariablesSpec};

/// One distribution kind's entry in the generation table. Offsets into the
/// aggregated category vectors accumulate in table order.
struct DistKind {
    count: fn(&VariablesSpec) -> usize,
    generate: fn(&mut VariablesSpec, usize, &mut DiagSink),
}

const CONTINUOUS_ALEATORY: &[DistKind] = &[
    DistKind {
        count: |v| v.normal.count,
        generate: gen_normal,
    },
    DistKind {
        count: |v| v.lognormal.count,
        generate: gen_lognormal,
    },
    DistKind {
        count: |v| v.uniform.count,
        generate: gen_uniform,
    },
    DistKind {
        count: |v| v.loguniform.count,
        generate: gen_loguniform,
    },
    DistKind {
        count: |v| v.triangular.count,
        generate: gen_triangular,
    },
    DistKind {
        count: |v| v.exponential.count,
        generate: gen_exponential,
    },
    DistKind {
        count: |v| v.beta.count,
        generate: gen_beta,
    },
    DistKind {
        count: |v| v.gamma.count,
        generate: gen_gamma,
    },
    DistKind {
        count: |v| v.gumbel.count,
        generate: gen_gumbel,
    },
    DistKind {
        count: |v| v.frechet.count,
        generate: gen_frechet,
    },
    DistKind {
        count: |v| v.weibull.count,
        generate: gen_weibull,
    },
    DistKind {
        count: |v| v.histogram_bin.count,
        generate: gen_histogram_bin,
    },
];

const CONTINUOUS_EPISTEMIC: &[DistKind] = &[DistKind {
    count: |v| v.interval.count,
    generate: gen_interval,
}];

const DISCRETE_ALEATORY_INT: &[DistKind] = &[
    DistKind {
        count: |v| v.poisson.count,
        generate: gen_poisson,
    },
    DistKind {
        count: |v| v.binomial.count,
        generate: gen_binomial,
    },
    DistKind {
        count: |v| v.neg_binomial.count,
        generate: gen_neg_binomial,
    },
    DistKind {
        count: |v| v.geometric.count,
        generate: gen_geometric,
    },
    DistKind {
        count: |v| v.hypergeometric.count,
        generate: gen_hypergeometric,
    },
];

const DISCRETE_ALEATORY_REAL: &[DistKind] = &[DistKind {
    count: |v| v.histogram_point.count,
    generate: gen_histogram_point,
}];

/// Pass A entry point: run every kind table over `v`.
pub fn generate(v: &mut VariablesSpec, diags: &mut DiagSink) {
    let continuous_aleatory_count = v.continuous_aleatory_count();
    let continuous_epistemic_count = v.continuous_epistemic_count();
    let discrete_aleatory_int_count = v.discrete_aleatory_int_count();
    let discrete_aleatory_real_count = v.discrete_aleatory_real_count();
    resize_real(
        &mut v.aggregates.continuous_aleatory,
        continuous_aleatory_count,
    );
    resize_real(
        &mut v.aggregates.continuous_epistemic,
        continuous_epistemic_count,
    );
    resize_int(
        &mut v.aggregates.discrete_aleatory_int,
        discrete_aleatory_int_count,
    );
    resize_real(
        &mut v.aggregates.discrete_aleatory_real,
        discrete_aleatory_real_count,
    );

    for table in [
        CONTINUOUS_ALEATORY,
        CONTINUOUS_EPISTEMIC,
        DISCRETE_ALEATORY_INT,
        DISCRETE_ALEATORY_REAL,
    ] {
        let mut offset = 0;
        for kind in table {
            let n = (kind.count)(v);
            if n == 0 {
                continue;
            }
            (kind.generate)(v, offset, diags);
            offset += n;
        }
    }
}

fn resize_real(agg: &mut RealAggregate, n: usize) {
    agg.lower = vec![0.0; n];
    agg.upper = vec![0.0; n];
    agg.initial = vec![0.0; n];
}

fn resize_int(agg: &mut IntAggregate, n: usize) {
    agg.lower = vec![0; n];
    agg.upper = vec![0; n];
    agg.initial = vec![0; n];
}

/// Length check against the declared count; squawks on mismatch.
fn expect_len(diags: &mut DiagSink, keyword: &str, got: usize, want: usize) -> bool {
    if got == want {
        true
    } else {
        diags.squawk(format!(
            "{}: expected {} values, found {}",
            keyword, want, got
        ));
        false
    }
}

/// Bound synthesis policy for the moment-based kinds.
enum BoundPolicy {
    /// mean - 3 sigma .. mean + 3 sigma
    ThreeSigma,
    /// 0 .. mean + 3 sigma, for distributions with non-negative support
    ZeroUp,
}

/// Fill empty bound vectors from moments, or length-check explicit ones.
fn default_real_bounds(
    diags: &mut DiagSink,
    kw_lower: &str,
    kw_upper: &str,
    lower: &mut Vec<f64>,
    upper: &mut Vec<f64>,
    ms: &[Moments],
    policy: BoundPolicy,
) -> bool {
    let n = ms.len();
    if lower.is_empty() {
        *lower = match policy {
            BoundPolicy::ThreeSigma => ms.iter().map(|m| m.mean - 3.0 * m.std_dev).collect(),
            BoundPolicy::ZeroUp => vec![0.0; n],
        };
    } else if !expect_len(diags, kw_lower, lower.len(), n) {
        return false;
    }
    if upper.is_empty() {
        *upper = ms.iter().map(|m| m.mean + 3.0 * m.std_dev).collect();
    } else if !expect_len(diags, kw_upper, upper.len(), n) {
        return false;
    }
    true
}

/// Default the initial point to the distribution mean.
fn default_initial(
    diags: &mut DiagSink,
    keyword: &str,
    initial: &mut Vec<f64>,
    ms: &[Moments],
) -> bool {
    if initial.is_empty() {
        *initial = ms.iter().map(|m| m.mean).collect();
        true
    } else {
        expect_len(diags, keyword, initial.len(), ms.len())
    }
}

fn store_real(agg: &mut RealAggregate, off: usize, lower: &[f64], upper: &[f64], initial: &[f64]) {
    let n = lower.len();
    agg.lower[off..off + n].copy_from_slice(lower);
    agg.upper[off..off + n].copy_from_slice(upper);
    agg.initial[off..off + n].copy_from_slice(initial);
}

fn store_int(agg: &mut IntAggregate, off: usize, lower: &[i64], upper: &[i64], initial: &[i64]) {
    let n = lower.len();
    agg.lower[off..off + n].copy_from_slice(lower);
    agg.upper[off..off + n].copy_from_slice(upper);
    agg.initial[off..off + n].copy_from_slice(initial);
}

// ──────────────────────────────────────────────
// Continuous aleatory kinds
// ──────────────────────────────────────────────

fn gen_normal(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.normal.count;
    if !expect_len(diags, "nuv_means", v.normal.means.len(), n)
        || !expect_len(diags, "nuv_std_deviations", v.normal.std_devs.len(), n)
    {
        return;
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| moments::normal(v.normal.means[i], v.normal.std_devs[i]))
        .collect();
    if !default_real_bounds(
        diags,
        "nuv_lower_bounds",
        "nuv_upper_bounds",
        &mut v.normal.lower,
        &mut v.normal.upper,
        &ms,
        BoundPolicy::ThreeSigma,
    ) || !default_initial(diags, "nuv_initial_point", &mut v.normal.initial, &ms)
    {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.normal.lower,
        &v.normal.upper,
        &v.normal.initial,
    );
}

fn gen_lognormal(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.lognormal.count;
    let params: Vec<moments::LognormalParams> = match v.lognormal.param {
        LognormalParam::Unset => {
            diags.squawk(
                "lognormal_uncertain: no complete parameterization; give lambdas/zetas, \
                 means/std_deviations, or means/error_factors",
            );
            return;
        }
        LognormalParam::LambdaZeta => {
            if !expect_len(diags, "lnuv_lambdas", v.lognormal.lambdas.len(), n)
                || !expect_len(diags, "lnuv_zetas", v.lognormal.zetas.len(), n)
            {
                return;
            }
            (0..n)
                .map(|i| {
                    moments::lognormal_from_lambda_zeta(v.lognormal.lambdas[i], v.lognormal.zetas[i])
                })
                .collect()
        }
        LognormalParam::MeanStdDev => {
            if !expect_len(diags, "lnuv_means", v.lognormal.means.len(), n)
                || !expect_len(diags, "lnuv_std_deviations", v.lognormal.std_devs.len(), n)
            {
                return;
            }
            (0..n)
                .map(|i| {
                    moments::lognormal_from_mean_std_dev(
                        v.lognormal.means[i],
                        v.lognormal.std_devs[i],
                    )
                })
                .collect()
        }
        LognormalParam::MeanErrorFactor => {
            if !expect_len(diags, "lnuv_means", v.lognormal.means.len(), n)
                || !expect_len(
                    diags,
                    "lnuv_error_factors",
                    v.lognormal.error_factors.len(),
                    n,
                )
            {
                return;
            }
            (0..n)
                .map(|i| {
                    moments::lognormal_from_mean_error_factor(
                        v.lognormal.means[i],
                        v.lognormal.error_factors[i],
                    )
                })
                .collect()
        }
    };

    // Complete the other two parameterizations consistently.
    v.lognormal.lambdas = params.iter().map(|p| p.lambda).collect();
    v.lognormal.zetas = params.iter().map(|p| p.zeta).collect();
    v.lognormal.means = params.iter().map(|p| p.mean).collect();
    v.lognormal.std_devs = params.iter().map(|p| p.std_dev).collect();
    v.lognormal.error_factors = params.iter().map(|p| p.error_factor).collect();

    let ms: Vec<Moments> = params
        .iter()
        .map(|p| Moments {
            mean: p.mean,
            std_dev: p.std_dev,
        })
        .collect();
    if !default_real_bounds(
        diags,
        "lnuv_lower_bounds",
        "lnuv_upper_bounds",
        &mut v.lognormal.lower,
        &mut v.lognormal.upper,
        &ms,
        BoundPolicy::ZeroUp,
    ) || !default_initial(diags, "lnuv_initial_point", &mut v.lognormal.initial, &ms)
    {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.lognormal.lower,
        &v.lognormal.upper,
        &v.lognormal.initial,
    );
}

fn gen_uniform(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.uniform.count;
    // The bounds are the native parameters; nothing is synthesized.
    if !expect_len(diags, "uuv_lower_bounds", v.uniform.lower.len(), n)
        || !expect_len(diags, "uuv_upper_bounds", v.uniform.upper.len(), n)
    {
        return;
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| moments::uniform(v.uniform.lower[i], v.uniform.upper[i]))
        .collect();
    if !default_initial(diags, "uuv_initial_point", &mut v.uniform.initial, &ms) {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.uniform.lower,
        &v.uniform.upper,
        &v.uniform.initial,
    );
}

fn gen_loguniform(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.loguniform.count;
    if !expect_len(diags, "luuv_lower_bounds", v.loguniform.lower.len(), n)
        || !expect_len(diags, "luuv_upper_bounds", v.loguniform.upper.len(), n)
    {
        return;
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| moments::loguniform(v.loguniform.lower[i], v.loguniform.upper[i]))
        .collect();
    if !default_initial(diags, "luuv_initial_point", &mut v.loguniform.initial, &ms) {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.loguniform.lower,
        &v.loguniform.upper,
        &v.loguniform.initial,
    );
}

fn gen_triangular(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.triangular.count;
    if !expect_len(diags, "tuv_modes", v.triangular.modes.len(), n)
        || !expect_len(diags, "tuv_lower_bounds", v.triangular.lower.len(), n)
        || !expect_len(diags, "tuv_upper_bounds", v.triangular.upper.len(), n)
    {
        return;
    }
    for i in 0..n {
        let (lo, mode, hi) = (
            v.triangular.lower[i],
            v.triangular.modes[i],
            v.triangular.upper[i],
        );
        if !(lo <= mode && mode <= hi) {
            diags.squawk(format!(
                "triangular_uncertain {}: mode {} outside [{}, {}]",
                i + 1,
                mode,
                lo,
                hi
            ));
            return;
        }
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| {
            moments::triangular(
                v.triangular.lower[i],
                v.triangular.modes[i],
                v.triangular.upper[i],
            )
        })
        .collect();
    if !default_initial(diags, "tuv_initial_point", &mut v.triangular.initial, &ms) {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.triangular.lower,
        &v.triangular.upper,
        &v.triangular.initial,
    );
}

fn gen_exponential(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.exponential.count;
    if !expect_len(diags, "euv_betas", v.exponential.betas.len(), n) {
        return;
    }
    let ms: Vec<Moments> = v
        .exponential
        .betas
        .iter()
        .map(|&b| moments::exponential(b))
        .collect();
    if !default_real_bounds(
        diags,
        "euv_lower_bounds",
        "euv_upper_bounds",
        &mut v.exponential.lower,
        &mut v.exponential.upper,
        &ms,
        BoundPolicy::ZeroUp,
    ) || !default_initial(diags, "euv_initial_point", &mut v.exponential.initial, &ms)
    {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.exponential.lower,
        &v.exponential.upper,
        &v.exponential.initial,
    );
}

fn gen_beta(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.beta.count;
    // Like uniform, the bounds are native parameters.
    if !expect_len(diags, "buv_alphas", v.beta.alphas.len(), n)
        || !expect_len(diags, "buv_betas", v.beta.betas.len(), n)
        || !expect_len(diags, "buv_lower_bounds", v.beta.lower.len(), n)
        || !expect_len(diags, "buv_upper_bounds", v.beta.upper.len(), n)
    {
        return;
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| {
            moments::beta(
                v.beta.alphas[i],
                v.beta.betas[i],
                v.beta.lower[i],
                v.beta.upper[i],
            )
        })
        .collect();
    if !default_initial(diags, "buv_initial_point", &mut v.beta.initial, &ms) {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.beta.lower,
        &v.beta.upper,
        &v.beta.initial,
    );
}

fn gen_gamma(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.gamma.count;
    if !expect_len(diags, "gauv_alphas", v.gamma.alphas.len(), n)
        || !expect_len(diags, "gauv_betas", v.gamma.betas.len(), n)
    {
        return;
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| moments::gamma(v.gamma.alphas[i], v.gamma.betas[i]))
        .collect();
    if !default_real_bounds(
        diags,
        "gauv_lower_bounds",
        "gauv_upper_bounds",
        &mut v.gamma.lower,
        &mut v.gamma.upper,
        &ms,
        BoundPolicy::ZeroUp,
    ) || !default_initial(diags, "gauv_initial_point", &mut v.gamma.initial, &ms)
    {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.gamma.lower,
        &v.gamma.upper,
        &v.gamma.initial,
    );
}

fn gen_gumbel(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.gumbel.count;
    if !expect_len(diags, "guuv_alphas", v.gumbel.alphas.len(), n)
        || !expect_len(diags, "guuv_betas", v.gumbel.betas.len(), n)
    {
        return;
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| moments::gumbel(v.gumbel.alphas[i], v.gumbel.betas[i]))
        .collect();
    if !default_real_bounds(
        diags,
        "guuv_lower_bounds",
        "guuv_upper_bounds",
        &mut v.gumbel.lower,
        &mut v.gumbel.upper,
        &ms,
        BoundPolicy::ThreeSigma,
    ) || !default_initial(diags, "guuv_initial_point", &mut v.gumbel.initial, &ms)
    {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.gumbel.lower,
        &v.gumbel.upper,
        &v.gumbel.initial,
    );
}

fn gen_frechet(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.frechet.count;
    if !expect_len(diags, "fuv_alphas", v.frechet.alphas.len(), n)
        || !expect_len(diags, "fuv_betas", v.frechet.betas.len(), n)
    {
        return;
    }
    for (i, &a) in v.frechet.alphas.iter().enumerate() {
        // Finite variance needs alpha > 2.
        if a <= 2.0 {
            diags.squawk(format!(
                "frechet_uncertain {}: alpha {} must exceed 2",
                i + 1,
                a
            ));
            return;
        }
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| moments::frechet(v.frechet.alphas[i], v.frechet.betas[i]))
        .collect();
    if !default_real_bounds(
        diags,
        "fuv_lower_bounds",
        "fuv_upper_bounds",
        &mut v.frechet.lower,
        &mut v.frechet.upper,
        &ms,
        BoundPolicy::ZeroUp,
    ) || !default_initial(diags, "fuv_initial_point", &mut v.frechet.initial, &ms)
    {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.frechet.lower,
        &v.frechet.upper,
        &v.frechet.initial,
    );
}

fn gen_weibull(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.weibull.count;
    if !expect_len(diags, "wuv_alphas", v.weibull.alphas.len(), n)
        || !expect_len(diags, "wuv_betas", v.weibull.betas.len(), n)
    {
        return;
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| moments::weibull(v.weibull.alphas[i], v.weibull.betas[i]))
        .collect();
    if !default_real_bounds(
        diags,
        "wuv_lower_bounds",
        "wuv_upper_bounds",
        &mut v.weibull.lower,
        &mut v.weibull.upper,
        &ms,
        BoundPolicy::ZeroUp,
    ) || !default_initial(diags, "wuv_initial_point", &mut v.weibull.initial, &ms)
    {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.weibull.lower,
        &v.weibull.upper,
        &v.weibull.initial,
    );
}

fn gen_histogram_bin(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.histogram_bin.count;
    if !expect_len(
        diags,
        "hbuv_num_pairs",
        v.histogram_bin.pairs_per_variable.len(),
        n,
    ) {
        return;
    }
    let total: usize = v
        .histogram_bin
        .pairs_per_variable
        .iter()
        .map(|&p| p as usize)
        .sum();
    let have_ordinates = !v.histogram_bin.ordinates.is_empty();
    let have_counts = !v.histogram_bin.counts.is_empty();
    if have_ordinates == have_counts {
        diags.squawk("histogram_bin_uncertain: give exactly one of hbuv_ordinates or hbuv_counts");
        return;
    }
    if !expect_len(diags, "hbuv_abscissas", v.histogram_bin.abscissas.len(), total) {
        return;
    }
    let source_kw = if have_ordinates {
        "hbuv_ordinates"
    } else {
        "hbuv_counts"
    };
    let source_len = if have_ordinates {
        v.histogram_bin.ordinates.len()
    } else {
        v.histogram_bin.counts.len()
    };
    if !expect_len(diags, source_kw, source_len, total) {
        return;
    }

    let mut counts = vec![0.0; total];
    let mut lower = vec![0.0; n];
    let mut upper = vec![0.0; n];
    let mut means = vec![0.0; n];
    let mut start = 0usize;
    for j in 0..n {
        let np = v.histogram_bin.pairs_per_variable[j] as usize;
        if np < 2 {
            diags.squawk(format!(
                "histogram_bin_uncertain {}: needs at least 2 (abscissa, ordinate) pairs",
                j + 1
            ));
            return;
        }
        let xs = &v.histogram_bin.abscissas[start..start + np];
        if !strictly_increasing(xs) {
            diags.squawk(format!(
                "histogram_bin_uncertain {}: abscissas must be strictly increasing",
                j + 1
            ));
            return;
        }
        let ys: &[f64] = if have_ordinates {
            &v.histogram_bin.ordinates[start..start + np]
        } else {
            &v.histogram_bin.counts[start..start + np]
        };
        if ys[np - 1] != 0.0 {
            diags.squawk(format!(
                "histogram_bin_uncertain {}: final {} must be 0",
                j + 1,
                if have_ordinates { "ordinate" } else { "count" }
            ));
            return;
        }
        if ys[..np - 1].iter().any(|&y| y <= 0.0) {
            diags.squawk(format!(
                "histogram_bin_uncertain {}: intermediate {}s must be positive",
                j + 1,
                if have_ordinates { "ordinate" } else { "count" }
            ));
            return;
        }

        // Per-bin counts: ordinates scale by bin width, counts are direct.
        let mut c: Vec<f64> = (0..np - 1)
            .map(|k| {
                if have_ordinates {
                    ys[k] * (xs[k + 1] - xs[k])
                } else {
                    ys[k]
                }
            })
            .collect();
        let sum: f64 = c.iter().sum();
        for ck in &mut c {
            *ck /= sum;
        }
        counts[start..start + np - 1].copy_from_slice(&c);
        counts[start + np - 1] = 0.0;

        lower[j] = xs[0];
        upper[j] = xs[np - 1];
        means[j] = c
            .iter()
            .zip(xs.windows(2))
            .map(|(ck, w)| ck * (w[0] + w[1]) / 2.0)
            .sum();
        start += np;
    }

    v.histogram_bin.counts = counts;
    v.histogram_bin.lower = lower;
    v.histogram_bin.upper = upper;
    if v.histogram_bin.initial.is_empty() {
        v.histogram_bin.initial = means;
    } else if !expect_len(
        diags,
        "hbuv_initial_point",
        v.histogram_bin.initial.len(),
        n,
    ) {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_aleatory,
        off,
        &v.histogram_bin.lower,
        &v.histogram_bin.upper,
        &v.histogram_bin.initial,
    );
}

// ──────────────────────────────────────────────
// Continuous epistemic kinds
// ──────────────────────────────────────────────

fn gen_interval(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.interval.count;
    if !expect_len(
        diags,
        "iuv_num_intervals",
        v.interval.intervals_per_variable.len(),
        n,
    ) {
        return;
    }
    let total: usize = v
        .interval
        .intervals_per_variable
        .iter()
        .map(|&p| p as usize)
        .sum();
    if !expect_len(diags, "iuv_interval_probs", v.interval.probabilities.len(), total)
        || !expect_len(diags, "iuv_interval_lower", v.interval.interval_lower.len(), total)
        || !expect_len(diags, "iuv_interval_upper", v.interval.interval_upper.len(), total)
    {
        return;
    }

    let mut lower = vec![0.0; n];
    let mut upper = vec![0.0; n];
    let mut start = 0usize;
    for j in 0..n {
        let ni = v.interval.intervals_per_variable[j] as usize;
        let los = &v.interval.interval_lower[start..start + ni];
        let his = &v.interval.interval_upper[start..start + ni];
        for k in 0..ni {
            if los[k] > his[k] {
                diags.squawk(format!(
                    "interval_uncertain {}: sub-interval {} has lower {} > upper {}",
                    j + 1,
                    k + 1,
                    los[k],
                    his[k]
                ));
                return;
            }
        }
        // Merged outer bound; per-component lower <= upper holds by the
        // sub-interval check above.
        lower[j] = los.iter().cloned().fold(f64::INFINITY, f64::min);
        upper[j] = his.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let sum: f64 = v.interval.probabilities[start..start + ni].iter().sum();
        if (sum - 1.0).abs() > 1.0e-10 {
            for p in &mut v.interval.probabilities[start..start + ni] {
                *p /= sum;
            }
            diags.warn(format!(
                "interval_uncertain {}: basic probabilities summed to {}; normalized to 1",
                j + 1,
                sum
            ));
        }
        start += ni;
    }

    v.interval.lower = lower;
    v.interval.upper = upper;
    if v.interval.initial.is_empty() {
        // No defined mean; 0 clamped into the outer bounds.
        v.interval.initial = v
            .interval
            .lower
            .iter()
            .zip(&v.interval.upper)
            .map(|(&lo, &hi)| 0.0f64.clamp(lo, hi))
            .collect();
    } else if !expect_len(diags, "iuv_initial_point", v.interval.initial.len(), n) {
        return;
    }
    store_real(
        &mut v.aggregates.continuous_epistemic,
        off,
        &v.interval.lower,
        &v.interval.upper,
        &v.interval.initial,
    );
}

// ──────────────────────────────────────────────
// Discrete aleatory kinds
// ──────────────────────────────────────────────

fn int_upper(m: &Moments) -> i64 {
    (m.mean + 3.0 * m.std_dev).ceil() as i64
}

fn default_int_range(
    diags: &mut DiagSink,
    kw_initial: &str,
    lower: &mut Vec<i64>,
    upper: &mut Vec<i64>,
    initial: &mut Vec<i64>,
    ms: &[Moments],
    uppers: Option<Vec<i64>>,
) -> bool {
    let n = ms.len();
    if lower.is_empty() {
        *lower = vec![0; n];
    }
    if upper.is_empty() {
        *upper = match uppers {
            Some(u) => u,
            None => ms.iter().map(int_upper).collect(),
        };
    }
    if initial.is_empty() {
        *initial = ms.iter().map(|m| m.mean.round() as i64).collect();
        true
    } else {
        expect_len(diags, kw_initial, initial.len(), n)
    }
}

fn gen_poisson(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.poisson.count;
    if !expect_len(diags, "puv_lambdas", v.poisson.lambdas.len(), n) {
        return;
    }
    let ms: Vec<Moments> = v.poisson.lambdas.iter().map(|&l| moments::poisson(l)).collect();
    if !default_int_range(
        diags,
        "puv_initial_point",
        &mut v.poisson.lower,
        &mut v.poisson.upper,
        &mut v.poisson.initial,
        &ms,
        None,
    ) {
        return;
    }
    store_int(
        &mut v.aggregates.discrete_aleatory_int,
        off,
        &v.poisson.lower,
        &v.poisson.upper,
        &v.poisson.initial,
    );
}

fn gen_binomial(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.binomial.count;
    if !expect_len(
        diags,
        "biuv_prob_per_trial",
        v.binomial.probabilities.len(),
        n,
    ) || !expect_len(diags, "biuv_num_trials", v.binomial.num_trials.len(), n)
    {
        return;
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| moments::binomial(v.binomial.probabilities[i], v.binomial.num_trials[i]))
        .collect();
    // The support is bounded by the trial count, not a moment heuristic.
    let uppers = v.binomial.num_trials.clone();
    if !default_int_range(
        diags,
        "biuv_initial_point",
        &mut v.binomial.lower,
        &mut v.binomial.upper,
        &mut v.binomial.initial,
        &ms,
        Some(uppers),
    ) {
        return;
    }
    store_int(
        &mut v.aggregates.discrete_aleatory_int,
        off,
        &v.binomial.lower,
        &v.binomial.upper,
        &v.binomial.initial,
    );
}

fn gen_neg_binomial(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.neg_binomial.count;
    if !expect_len(
        diags,
        "nbuv_prob_per_trial",
        v.neg_binomial.probabilities.len(),
        n,
    ) || !expect_len(diags, "nbuv_num_trials", v.neg_binomial.num_trials.len(), n)
    {
        return;
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| {
            moments::neg_binomial(v.neg_binomial.probabilities[i], v.neg_binomial.num_trials[i])
        })
        .collect();
    if !default_int_range(
        diags,
        "nbuv_initial_point",
        &mut v.neg_binomial.lower,
        &mut v.neg_binomial.upper,
        &mut v.neg_binomial.initial,
        &ms,
        None,
    ) {
        return;
    }
    store_int(
        &mut v.aggregates.discrete_aleatory_int,
        off,
        &v.neg_binomial.lower,
        &v.neg_binomial.upper,
        &v.neg_binomial.initial,
    );
}

fn gen_geometric(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.geometric.count;
    if !expect_len(
        diags,
        "geuv_prob_per_trial",
        v.geometric.probabilities.len(),
        n,
    ) {
        return;
    }
    let ms: Vec<Moments> = v
        .geometric
        .probabilities
        .iter()
        .map(|&p| moments::geometric(p))
        .collect();
    if !default_int_range(
        diags,
        "geuv_initial_point",
        &mut v.geometric.lower,
        &mut v.geometric.upper,
        &mut v.geometric.initial,
        &ms,
        None,
    ) {
        return;
    }
    store_int(
        &mut v.aggregates.discrete_aleatory_int,
        off,
        &v.geometric.lower,
        &v.geometric.upper,
        &v.geometric.initial,
    );
}

fn gen_hypergeometric(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.hypergeometric.count;
    if !expect_len(
        diags,
        "hguv_total_population",
        v.hypergeometric.total_population.len(),
        n,
    ) || !expect_len(
        diags,
        "hguv_selected_population",
        v.hypergeometric.selected_population.len(),
        n,
    ) || !expect_len(diags, "hguv_num_drawn", v.hypergeometric.num_drawn.len(), n)
    {
        return;
    }
    for i in 0..n {
        let (total, sel, drawn) = (
            v.hypergeometric.total_population[i],
            v.hypergeometric.selected_population[i],
            v.hypergeometric.num_drawn[i],
        );
        if sel > total || drawn > total {
            diags.squawk(format!(
                "hypergeometric_uncertain {}: selected ({}) and drawn ({}) must not exceed \
                 the total population ({})",
                i + 1,
                sel,
                drawn,
                total
            ));
            return;
        }
    }
    let ms: Vec<Moments> = (0..n)
        .map(|i| {
            moments::hypergeometric(
                v.hypergeometric.total_population[i],
                v.hypergeometric.selected_population[i],
                v.hypergeometric.num_drawn[i],
            )
        })
        .collect();
    // Support is 0 ..= min(selected, drawn).
    let uppers: Vec<i64> = (0..n)
        .map(|i| {
            v.hypergeometric.selected_population[i].min(v.hypergeometric.num_drawn[i])
        })
        .collect();
    if !default_int_range(
        diags,
        "hguv_initial_point",
        &mut v.hypergeometric.lower,
        &mut v.hypergeometric.upper,
        &mut v.hypergeometric.initial,
        &ms,
        Some(uppers),
    ) {
        return;
    }
    store_int(
        &mut v.aggregates.discrete_aleatory_int,
        off,
        &v.hypergeometric.lower,
        &v.hypergeometric.upper,
        &v.hypergeometric.initial,
    );
}

fn gen_histogram_point(v: &mut VariablesSpec, off: usize, diags: &mut DiagSink) {
    let n = v.histogram_point.count;
    if !expect_len(
        diags,
        "hpuv_num_pairs",
        v.histogram_point.pairs_per_variable.len(),
        n,
    ) {
        return;
    }
    let total: usize = v
        .histogram_point
        .pairs_per_variable
        .iter()
        .map(|&p| p as usize)
        .sum();
    if !expect_len(diags, "hpuv_abscissas", v.histogram_point.abscissas.len(), total)
        || !expect_len(diags, "hpuv_counts", v.histogram_point.counts.len(), total)
    {
        return;
    }

    let mut lower = vec![0.0; n];
    let mut upper = vec![0.0; n];
    let mut means = vec![0.0; n];
    let mut start = 0usize;
    for j in 0..n {
        let np = v.histogram_point.pairs_per_variable[j] as usize;
        let xs = &v.histogram_point.abscissas[start..start + np];
        if !strictly_increasing(xs) {
            diags.squawk(format!(
                "histogram_point_uncertain {}: abscissas must be strictly increasing",
                j + 1
            ));
            return;
        }
        if v.histogram_point.counts[start..start + np]
            .iter()
            .any(|&c| c <= 0.0)
        {
            diags.squawk(format!(
                "histogram_point_uncertain {}: counts must be positive",
                j + 1
            ));
            return;
        }
        let sum: f64 = v.histogram_point.counts[start..start + np].iter().sum();
        for c in &mut v.histogram_point.counts[start..start + np] {
            *c /= sum;
        }
        lower[j] = xs[0];
        upper[j] = xs[np - 1];
        means[j] = v.histogram_point.counts[start..start + np]
            .iter()
            .zip(xs)
            .map(|(c, x)| c * x)
            .sum();
        start += np;
    }

    v.histogram_point.lower = lower;
    v.histogram_point.upper = upper;
    if v.histogram_point.initial.is_empty() {
        v.histogram_point.initial = means;
    } else if !expect_len(
        diags,
        "hpuv_initial_point",
        v.histogram_point.initial.len(),
        n,
    ) {
        return;
    }
    store_real(
        &mut v.aggregates.discrete_aleatory_real,
        off,
        &v.histogram_point.lower,
        &v.histogram_point.upper,
        &v.histogram_point.initial,
    );
}

fn strictly_increasing(xs: &[f64]) -> bool {
    xs.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Verdict;

    fn sink() -> DiagSink {
        DiagSink::new()
    }

    #[test]
    fn normal_bounds_default_to_three_sigma() {
        let mut v = VariablesSpec::default();
        v.normal.count = 2;
        v.normal.means = vec![0.0, 10.0];
        v.normal.std_devs = vec![1.0, 2.0];
        let mut diags = sink();
        generate(&mut v, &mut diags);

        assert_eq!(diags.verdict(), Verdict::Accepted);
        assert_eq!(v.normal.lower, vec![-3.0, 4.0]);
        assert_eq!(v.normal.upper, vec![3.0, 16.0]);
        assert_eq!(v.normal.initial, vec![0.0, 10.0]);
        assert_eq!(v.aggregates.continuous_aleatory.lower, vec![-3.0, 4.0]);
    }

    #[test]
    fn lognormal_mean_std_goes_through_the_moment_branch() {
        // Declared via mean/std_deviation; the bounds must come from the
        // lognormal formulas, not from misreading std_dev as zeta.
        let mut v = VariablesSpec::default();
        v.lognormal.count = 1;
        v.lognormal.means = vec![10.0];
        v.lognormal.std_devs = vec![2.0];
        v.lognormal.param = LognormalParam::MeanStdDev;
        let mut diags = sink();
        generate(&mut v, &mut diags);

        assert_eq!(diags.verdict(), Verdict::Accepted);
        assert_eq!(v.lognormal.lower, vec![0.0]);
        assert!((v.lognormal.upper[0] - 16.0).abs() < 1e-12);
        // Derived parameterizations are completed consistently.
        let p = moments::lognormal_from_mean_std_dev(10.0, 2.0);
        assert!((v.lognormal.lambdas[0] - p.lambda).abs() < 1e-12);
        assert!((v.lognormal.zetas[0] - p.zeta).abs() < 1e-12);
        assert!((v.lognormal.error_factors[0] - p.error_factor).abs() < 1e-12);
    }

    #[test]
    fn bound_generation_is_idempotent() {
        let mut v = VariablesSpec::default();
        v.normal.count = 1;
        v.normal.means = vec![5.0];
        v.normal.std_devs = vec![1.0];
        v.weibull.count = 1;
        v.weibull.alphas = vec![2.0];
        v.weibull.betas = vec![3.0];
        let mut diags = sink();
        generate(&mut v, &mut diags);
        let first = v.clone();
        generate(&mut v, &mut diags);

        assert_eq!(diags.verdict(), Verdict::Accepted);
        assert_eq!(v.normal.lower, first.normal.lower);
        assert_eq!(v.weibull.upper, first.weibull.upper);
        assert_eq!(
            v.aggregates.continuous_aleatory.initial,
            first.aggregates.continuous_aleatory.initial
        );
    }

    #[test]
    fn aggregate_offsets_follow_kind_order() {
        let mut v = VariablesSpec::default();
        v.normal.count = 1;
        v.normal.means = vec![0.0];
        v.normal.std_devs = vec![1.0];
        v.uniform.count = 2;
        v.uniform.lower = vec![1.0, 2.0];
        v.uniform.upper = vec![3.0, 4.0];
        let mut diags = sink();
        generate(&mut v, &mut diags);

        // normal occupies slot 0, uniform slots 1-2
        assert_eq!(v.aggregates.continuous_aleatory.lower, vec![-3.0, 1.0, 2.0]);
        assert_eq!(v.aggregates.continuous_aleatory.upper, vec![3.0, 3.0, 4.0]);
    }

    #[test]
    fn histogram_bin_counts_normalize_to_one() {
        let mut v = VariablesSpec::default();
        v.histogram_bin.count = 1;
        v.histogram_bin.pairs_per_variable = vec![3];
        v.histogram_bin.abscissas = vec![0.0, 1.0, 2.0];
        v.histogram_bin.ordinates = vec![4.0, 6.0, 0.0];
        let mut diags = sink();
        generate(&mut v, &mut diags);

        assert_eq!(diags.verdict(), Verdict::Accepted);
        let sum: f64 = v.histogram_bin.counts.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(v.histogram_bin.lower, vec![0.0]);
        assert_eq!(v.histogram_bin.upper, vec![2.0]);
    }

    #[test]
    fn histogram_bin_rejects_unsorted_abscissas() {
        let mut v = VariablesSpec::default();
        v.histogram_bin.count = 1;
        v.histogram_bin.pairs_per_variable = vec![3];
        v.histogram_bin.abscissas = vec![0.0, 2.0, 1.0];
        v.histogram_bin.ordinates = vec![1.0, 1.0, 0.0];
        let mut diags = sink();
        generate(&mut v, &mut diags);
        assert!(matches!(diags.verdict(), Verdict::Rejected { squawks: 1 }));
    }

    #[test]
    fn binomial_upper_bound_is_trial_count() {
        let mut v = VariablesSpec::default();
        v.binomial.count = 1;
        v.binomial.probabilities = vec![0.25];
        v.binomial.num_trials = vec![20];
        let mut diags = sink();
        generate(&mut v, &mut diags);

        assert_eq!(v.binomial.lower, vec![0]);
        assert_eq!(v.binomial.upper, vec![20]);
        assert_eq!(v.binomial.initial, vec![5]);
        assert_eq!(v.aggregates.discrete_aleatory_int.upper, vec![20]);
    }

    #[test]
    fn interval_merges_outer_bounds_and_normalizes() {
        let mut v = VariablesSpec::default();
        v.interval.count = 1;
        v.interval.intervals_per_variable = vec![2];
        v.interval.probabilities = vec![0.3, 0.3];
        v.interval.interval_lower = vec![1.0, 2.0];
        v.interval.interval_upper = vec![3.0, 5.0];
        let mut diags = sink();
        generate(&mut v, &mut diags);

        assert_eq!(v.interval.lower, vec![1.0]);
        assert_eq!(v.interval.upper, vec![5.0]);
        // probabilities normalized with an advisory, still accepted
        assert_eq!(diags.verdict(), Verdict::Accepted);
        assert_eq!(diags.diagnostics().len(), 1);
        let sum: f64 = v.interval.probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        // initial: 0 clamped into [1, 5]
        assert_eq!(v.interval.initial, vec![1.0]);
    }

    #[test]
    fn length_mismatch_squawks_and_skips_kind() {
        let mut v = VariablesSpec::default();
        v.normal.count = 2;
        v.normal.means = vec![1.0]; // wrong length
        v.normal.std_devs = vec![1.0, 1.0];
        let mut diags = sink();
        generate(&mut v, &mut diags);

        assert!(matches!(diags.verdict(), Verdict::Rejected { squawks: 1 }));
        // the kind contributed nothing; its slice keeps the zero fill
        assert_eq!(v.aggregates.continuous_aleatory.lower, vec![0.0, 0.0]);
    }

    #[test]
    fn incomplete_lognormal_parameterization_squawks() {
        let mut v = VariablesSpec::default();
        v.lognormal.count = 1;
        v.lognormal.means = vec![10.0]; // no std_devs/error_factors/lambdas
        let mut diags = sink();
        generate(&mut v, &mut diags);
        assert!(matches!(diags.verdict(), Verdict::Rejected { .. }));
    }
}
