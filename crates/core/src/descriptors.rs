//! Field descriptor tables -- keyword to typed-field routing.
//!
//! One static table per record kind. Each entry pairs a keyword with a typed
//! store action (a plain fn pointer into the kind-specific struct), an
//! optional inline numeric guard, and -- for mutually exclusive
//! parameterizations -- a stamp of the discriminant recording which keyword
//! supplied the numbers. Tables are built once at compile time and never
//! mutated.

use crate::diag::FatalError;
use crate::records::{
    GradientMode, HessianMode, InterfaceSpec, LognormalParam, MethodSpec, ModelSpec, OutputLevel,
    ResponsesSpec, StrategySpec, VariablesSpec,
};
use crate::value::Value;

// ──────────────────────────────────────────────
// Guards
// ──────────────────────────────────────────────

/// Inline validity predicate applied to a scalar, or to every element of a
/// vector, before it is stored. Violations are structural (the downstream
/// algorithms cannot recover), so they are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Positive,
    NonNegative,
    /// Closed unit interval, for probabilities.
    UnitInterval,
}

impl Guard {
    fn admits(self, x: f64) -> bool {
        match self {
            Guard::Positive => x > 0.0,
            Guard::NonNegative => x >= 0.0,
            Guard::UnitInterval => (0.0..=1.0).contains(&x),
        }
    }

    fn requirement(self) -> &'static str {
        match self {
            Guard::Positive => "positive",
            Guard::NonNegative => "non-negative",
            Guard::UnitInterval => "in [0, 1]",
        }
    }

    fn check(self, keyword: &str, x: f64) -> Result<(), FatalError> {
        if self.admits(x) {
            Ok(())
        } else {
            Err(FatalError::GuardViolation {
                keyword: keyword.to_owned(),
                value: x,
                requirement: self.requirement(),
            })
        }
    }

    fn check_all(self, keyword: &str, xs: &[f64]) -> Result<(), FatalError> {
        for &x in xs {
            self.check(keyword, x)?;
        }
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Descriptor type
// ──────────────────────────────────────────────

/// Typed store action for one keyword.
pub enum Apply<T: 'static> {
    /// Declared-count field; the stored value governs vector lengths.
    Count(fn(&mut T, usize)),
    Int(fn(&mut T, i64)),
    Real(fn(&mut T, f64)),
    Str(fn(&mut T, &str)),
    /// Bare keyword; typically toggles a bool or stamps a fixed literal.
    Flag(fn(&mut T)),
    /// String keyword restricted to a closed literal set; the action returns
    /// false for an unrecognized literal.
    Enum(fn(&mut T, &str) -> bool),
    IntList(fn(&mut T, Vec<i64>)),
    RealList(fn(&mut T, Vec<f64>)),
    StrList(fn(&mut T, Vec<String>)),
}

/// One keyword's routing entry.
pub struct FieldDesc<T: 'static> {
    pub keyword: &'static str,
    pub apply: Apply<T>,
    pub guard: Option<Guard>,
}

const fn desc<T>(keyword: &'static str, apply: Apply<T>) -> FieldDesc<T> {
    FieldDesc {
        keyword,
        apply,
        guard: None,
    }
}

const fn guarded<T>(keyword: &'static str, apply: Apply<T>, guard: Guard) -> FieldDesc<T> {
    FieldDesc {
        keyword,
        apply,
        guard: Some(guard),
    }
}

impl<T> FieldDesc<T> {
    /// Apply this entry to `target`, checking payload shape and guard.
    pub fn dispatch(&self, target: &mut T, value: &Value) -> Result<(), FatalError> {
        let keyword = self.keyword;
        match self.apply {
            Apply::Count(f) => {
                let n = value.as_int(keyword)?;
                if n < 0 {
                    return Err(FatalError::GuardViolation {
                        keyword: keyword.to_owned(),
                        value: n as f64,
                        requirement: "non-negative",
                    });
                }
                f(target, n as usize);
            }
            Apply::Int(f) => {
                let n = value.as_int(keyword)?;
                if let Some(g) = self.guard {
                    g.check(keyword, n as f64)?;
                }
                f(target, n);
            }
            Apply::Real(f) => {
                let x = value.as_real(keyword)?;
                if let Some(g) = self.guard {
                    g.check(keyword, x)?;
                }
                f(target, x);
            }
            Apply::Str(f) => f(target, value.as_str(keyword)?),
            Apply::Flag(f) => match value {
                Value::Flag => f(target),
                other => {
                    return Err(FatalError::TypeMismatch {
                        keyword: keyword.to_owned(),
                        expected: "flag",
                        got: other.shape(),
                    })
                }
            },
            Apply::Enum(f) => {
                let literal = value.as_str(keyword)?;
                if !f(target, literal) {
                    return Err(FatalError::UnknownLiteral {
                        keyword: keyword.to_owned(),
                        literal: literal.to_owned(),
                    });
                }
            }
            Apply::IntList(f) => {
                let v = value.as_int_list(keyword)?;
                if let Some(g) = self.guard {
                    for &n in &v {
                        g.check(keyword, n as f64)?;
                    }
                }
                f(target, v);
            }
            Apply::RealList(f) => {
                let v = value.as_real_list(keyword)?;
                if let Some(g) = self.guard {
                    g.check_all(keyword, &v)?;
                }
                f(target, v);
            }
            Apply::StrList(f) => f(target, value.as_str_list(keyword)?),
        }
        Ok(())
    }
}

/// Locate the entry for `keyword`, if the table declares it.
pub fn find<'a, T>(table: &'a [FieldDesc<T>], keyword: &str) -> Option<&'a FieldDesc<T>> {
    table.iter().find(|d| d.keyword == keyword)
}

// ──────────────────────────────────────────────
// Variables table
// ──────────────────────────────────────────────

pub static VARIABLES: &[FieldDesc<VariablesSpec>] = &[
    desc("id_variables", Apply::Str(|v, s| v.id = s.to_owned())),
    // continuous design
    desc(
        "continuous_design",
        Apply::Count(|v, n| v.continuous_design.count = n),
    ),
    desc(
        "cdv_initial_point",
        Apply::RealList(|v, xs| v.continuous_design.initial = xs),
    ),
    desc(
        "cdv_lower_bounds",
        Apply::RealList(|v, xs| v.continuous_design.lower = xs),
    ),
    desc(
        "cdv_upper_bounds",
        Apply::RealList(|v, xs| v.continuous_design.upper = xs),
    ),
    desc(
        "cdv_scale_types",
        Apply::StrList(|v, xs| v.continuous_design.scale_types = xs),
    ),
    guarded(
        "cdv_scales",
        Apply::RealList(|v, xs| v.continuous_design.scales = xs),
        Guard::Positive,
    ),
    desc(
        "cdv_descriptors",
        Apply::StrList(|v, xs| v.continuous_design.labels = xs),
    ),
    // discrete design range
    desc(
        "discrete_design_range",
        Apply::Count(|v, n| v.discrete_design_range.count = n),
    ),
    desc(
        "ddriv_initial_point",
        Apply::IntList(|v, xs| v.discrete_design_range.initial = xs),
    ),
    desc(
        "ddriv_lower_bounds",
        Apply::IntList(|v, xs| v.discrete_design_range.lower = xs),
    ),
    desc(
        "ddriv_upper_bounds",
        Apply::IntList(|v, xs| v.discrete_design_range.upper = xs),
    ),
    desc(
        "ddriv_descriptors",
        Apply::StrList(|v, xs| v.discrete_design_range.labels = xs),
    ),
    // discrete design sets
    desc(
        "discrete_design_set_int",
        Apply::Count(|v, n| v.discrete_design_set_int.count = n),
    ),
    desc(
        "ddsiv_initial_point",
        Apply::IntList(|v, xs| v.discrete_design_set_int.initial = xs),
    ),
    guarded(
        "ddsiv_num_set_values",
        Apply::IntList(|v, xs| v.discrete_design_set_int.values_per_variable = xs),
        Guard::Positive,
    ),
    desc(
        "ddsiv_set_values",
        Apply::IntList(|v, xs| v.discrete_design_set_int.values = xs),
    ),
    desc(
        "ddsiv_descriptors",
        Apply::StrList(|v, xs| v.discrete_design_set_int.labels = xs),
    ),
    desc(
        "discrete_design_set_real",
        Apply::Count(|v, n| v.discrete_design_set_real.count = n),
    ),
    desc(
        "ddsrv_initial_point",
        Apply::RealList(|v, xs| v.discrete_design_set_real.initial = xs),
    ),
    guarded(
        "ddsrv_num_set_values",
        Apply::IntList(|v, xs| v.discrete_design_set_real.values_per_variable = xs),
        Guard::Positive,
    ),
    desc(
        "ddsrv_set_values",
        Apply::RealList(|v, xs| v.discrete_design_set_real.values = xs),
    ),
    desc(
        "ddsrv_descriptors",
        Apply::StrList(|v, xs| v.discrete_design_set_real.labels = xs),
    ),
    // normal uncertain
    desc("normal_uncertain", Apply::Count(|v, n| v.normal.count = n)),
    desc("nuv_means", Apply::RealList(|v, xs| v.normal.means = xs)),
    guarded(
        "nuv_std_deviations",
        Apply::RealList(|v, xs| v.normal.std_devs = xs),
        Guard::Positive,
    ),
    desc(
        "nuv_lower_bounds",
        Apply::RealList(|v, xs| v.normal.lower = xs),
    ),
    desc(
        "nuv_upper_bounds",
        Apply::RealList(|v, xs| v.normal.upper = xs),
    ),
    desc(
        "nuv_initial_point",
        Apply::RealList(|v, xs| v.normal.initial = xs),
    ),
    desc(
        "nuv_descriptors",
        Apply::StrList(|v, xs| v.normal.labels = xs),
    ),
    // lognormal uncertain: three alternative parameterizations; the keyword
    // that disambiguates stamps the discriminant.
    desc(
        "lognormal_uncertain",
        Apply::Count(|v, n| v.lognormal.count = n),
    ),
    desc(
        "lnuv_lambdas",
        Apply::RealList(|v, xs| {
            v.lognormal.lambdas = xs;
            v.lognormal.param = LognormalParam::LambdaZeta;
        }),
    ),
    guarded(
        "lnuv_zetas",
        Apply::RealList(|v, xs| {
            v.lognormal.zetas = xs;
            v.lognormal.param = LognormalParam::LambdaZeta;
        }),
        Guard::Positive,
    ),
    guarded(
        "lnuv_means",
        Apply::RealList(|v, xs| v.lognormal.means = xs),
        Guard::Positive,
    ),
    guarded(
        "lnuv_std_deviations",
        Apply::RealList(|v, xs| {
            v.lognormal.std_devs = xs;
            v.lognormal.param = LognormalParam::MeanStdDev;
        }),
        Guard::Positive,
    ),
    guarded(
        "lnuv_error_factors",
        Apply::RealList(|v, xs| {
            v.lognormal.error_factors = xs;
            v.lognormal.param = LognormalParam::MeanErrorFactor;
        }),
        Guard::Positive,
    ),
    guarded(
        "lnuv_lower_bounds",
        Apply::RealList(|v, xs| v.lognormal.lower = xs),
        Guard::NonNegative,
    ),
    desc(
        "lnuv_upper_bounds",
        Apply::RealList(|v, xs| v.lognormal.upper = xs),
    ),
    desc(
        "lnuv_initial_point",
        Apply::RealList(|v, xs| v.lognormal.initial = xs),
    ),
    desc(
        "lnuv_descriptors",
        Apply::StrList(|v, xs| v.lognormal.labels = xs),
    ),
    // uniform uncertain
    desc("uniform_uncertain", Apply::Count(|v, n| v.uniform.count = n)),
    desc(
        "uuv_lower_bounds",
        Apply::RealList(|v, xs| v.uniform.lower = xs),
    ),
    desc(
        "uuv_upper_bounds",
        Apply::RealList(|v, xs| v.uniform.upper = xs),
    ),
    desc(
        "uuv_initial_point",
        Apply::RealList(|v, xs| v.uniform.initial = xs),
    ),
    desc(
        "uuv_descriptors",
        Apply::StrList(|v, xs| v.uniform.labels = xs),
    ),
    // loguniform uncertain
    desc(
        "loguniform_uncertain",
        Apply::Count(|v, n| v.loguniform.count = n),
    ),
    guarded(
        "luuv_lower_bounds",
        Apply::RealList(|v, xs| v.loguniform.lower = xs),
        Guard::Positive,
    ),
    guarded(
        "luuv_upper_bounds",
        Apply::RealList(|v, xs| v.loguniform.upper = xs),
        Guard::Positive,
    ),
    desc(
        "luuv_initial_point",
        Apply::RealList(|v, xs| v.loguniform.initial = xs),
    ),
    desc(
        "luuv_descriptors",
        Apply::StrList(|v, xs| v.loguniform.labels = xs),
    ),
    // triangular uncertain
    desc(
        "triangular_uncertain",
        Apply::Count(|v, n| v.triangular.count = n),
    ),
    desc(
        "tuv_modes",
        Apply::RealList(|v, xs| v.triangular.modes = xs),
    ),
    desc(
        "tuv_lower_bounds",
        Apply::RealList(|v, xs| v.triangular.lower = xs),
    ),
    desc(
        "tuv_upper_bounds",
        Apply::RealList(|v, xs| v.triangular.upper = xs),
    ),
    desc(
        "tuv_initial_point",
        Apply::RealList(|v, xs| v.triangular.initial = xs),
    ),
    desc(
        "tuv_descriptors",
        Apply::StrList(|v, xs| v.triangular.labels = xs),
    ),
    // exponential uncertain
    desc(
        "exponential_uncertain",
        Apply::Count(|v, n| v.exponential.count = n),
    ),
    guarded(
        "euv_betas",
        Apply::RealList(|v, xs| v.exponential.betas = xs),
        Guard::Positive,
    ),
    desc(
        "euv_lower_bounds",
        Apply::RealList(|v, xs| v.exponential.lower = xs),
    ),
    desc(
        "euv_upper_bounds",
        Apply::RealList(|v, xs| v.exponential.upper = xs),
    ),
    desc(
        "euv_initial_point",
        Apply::RealList(|v, xs| v.exponential.initial = xs),
    ),
    desc(
        "euv_descriptors",
        Apply::StrList(|v, xs| v.exponential.labels = xs),
    ),
    // beta uncertain
    desc("beta_uncertain", Apply::Count(|v, n| v.beta.count = n)),
    guarded(
        "buv_alphas",
        Apply::RealList(|v, xs| v.beta.alphas = xs),
        Guard::Positive,
    ),
    guarded(
        "buv_betas",
        Apply::RealList(|v, xs| v.beta.betas = xs),
        Guard::Positive,
    ),
    desc(
        "buv_lower_bounds",
        Apply::RealList(|v, xs| v.beta.lower = xs),
    ),
    desc(
        "buv_upper_bounds",
        Apply::RealList(|v, xs| v.beta.upper = xs),
    ),
    desc(
        "buv_initial_point",
        Apply::RealList(|v, xs| v.beta.initial = xs),
    ),
    desc("buv_descriptors", Apply::StrList(|v, xs| v.beta.labels = xs)),
    // gamma uncertain
    desc("gamma_uncertain", Apply::Count(|v, n| v.gamma.count = n)),
    guarded(
        "gauv_alphas",
        Apply::RealList(|v, xs| v.gamma.alphas = xs),
        Guard::Positive,
    ),
    guarded(
        "gauv_betas",
        Apply::RealList(|v, xs| v.gamma.betas = xs),
        Guard::Positive,
    ),
    desc(
        "gauv_lower_bounds",
        Apply::RealList(|v, xs| v.gamma.lower = xs),
    ),
    desc(
        "gauv_upper_bounds",
        Apply::RealList(|v, xs| v.gamma.upper = xs),
    ),
    desc(
        "gauv_initial_point",
        Apply::RealList(|v, xs| v.gamma.initial = xs),
    ),
    desc(
        "gauv_descriptors",
        Apply::StrList(|v, xs| v.gamma.labels = xs),
    ),
    // gumbel uncertain
    desc("gumbel_uncertain", Apply::Count(|v, n| v.gumbel.count = n)),
    guarded(
        "guuv_alphas",
        Apply::RealList(|v, xs| v.gumbel.alphas = xs),
        Guard::Positive,
    ),
    desc("guuv_betas", Apply::RealList(|v, xs| v.gumbel.betas = xs)),
    desc(
        "guuv_lower_bounds",
        Apply::RealList(|v, xs| v.gumbel.lower = xs),
    ),
    desc(
        "guuv_upper_bounds",
        Apply::RealList(|v, xs| v.gumbel.upper = xs),
    ),
    desc(
        "guuv_initial_point",
        Apply::RealList(|v, xs| v.gumbel.initial = xs),
    ),
    desc(
        "guuv_descriptors",
        Apply::StrList(|v, xs| v.gumbel.labels = xs),
    ),
    // frechet uncertain
    desc("frechet_uncertain", Apply::Count(|v, n| v.frechet.count = n)),
    guarded(
        "fuv_alphas",
        Apply::RealList(|v, xs| v.frechet.alphas = xs),
        Guard::Positive,
    ),
    guarded(
        "fuv_betas",
        Apply::RealList(|v, xs| v.frechet.betas = xs),
        Guard::Positive,
    ),
    desc(
        "fuv_lower_bounds",
        Apply::RealList(|v, xs| v.frechet.lower = xs),
    ),
    desc(
        "fuv_upper_bounds",
        Apply::RealList(|v, xs| v.frechet.upper = xs),
    ),
    desc(
        "fuv_initial_point",
        Apply::RealList(|v, xs| v.frechet.initial = xs),
    ),
    desc(
        "fuv_descriptors",
        Apply::StrList(|v, xs| v.frechet.labels = xs),
    ),
    // weibull uncertain
    desc("weibull_uncertain", Apply::Count(|v, n| v.weibull.count = n)),
    guarded(
        "wuv_alphas",
        Apply::RealList(|v, xs| v.weibull.alphas = xs),
        Guard::Positive,
    ),
    guarded(
        "wuv_betas",
        Apply::RealList(|v, xs| v.weibull.betas = xs),
        Guard::Positive,
    ),
    desc(
        "wuv_lower_bounds",
        Apply::RealList(|v, xs| v.weibull.lower = xs),
    ),
    desc(
        "wuv_upper_bounds",
        Apply::RealList(|v, xs| v.weibull.upper = xs),
    ),
    desc(
        "wuv_initial_point",
        Apply::RealList(|v, xs| v.weibull.initial = xs),
    ),
    desc(
        "wuv_descriptors",
        Apply::StrList(|v, xs| v.weibull.labels = xs),
    ),
    // histogram bin uncertain
    desc(
        "histogram_bin_uncertain",
        Apply::Count(|v, n| v.histogram_bin.count = n),
    ),
    guarded(
        "hbuv_num_pairs",
        Apply::IntList(|v, xs| v.histogram_bin.pairs_per_variable = xs),
        Guard::Positive,
    ),
    desc(
        "hbuv_abscissas",
        Apply::RealList(|v, xs| v.histogram_bin.abscissas = xs),
    ),
    guarded(
        "hbuv_ordinates",
        Apply::RealList(|v, xs| v.histogram_bin.ordinates = xs),
        Guard::NonNegative,
    ),
    guarded(
        "hbuv_counts",
        Apply::RealList(|v, xs| v.histogram_bin.counts = xs),
        Guard::NonNegative,
    ),
    desc(
        "hbuv_initial_point",
        Apply::RealList(|v, xs| v.histogram_bin.initial = xs),
    ),
    desc(
        "hbuv_descriptors",
        Apply::StrList(|v, xs| v.histogram_bin.labels = xs),
    ),
    // interval uncertain
    desc(
        "interval_uncertain",
        Apply::Count(|v, n| v.interval.count = n),
    ),
    guarded(
        "iuv_num_intervals",
        Apply::IntList(|v, xs| v.interval.intervals_per_variable = xs),
        Guard::Positive,
    ),
    guarded(
        "iuv_interval_probs",
        Apply::RealList(|v, xs| v.interval.probabilities = xs),
        Guard::UnitInterval,
    ),
    desc(
        "iuv_interval_lower",
        Apply::RealList(|v, xs| v.interval.interval_lower = xs),
    ),
    desc(
        "iuv_interval_upper",
        Apply::RealList(|v, xs| v.interval.interval_upper = xs),
    ),
    desc(
        "iuv_initial_point",
        Apply::RealList(|v, xs| v.interval.initial = xs),
    ),
    desc(
        "iuv_descriptors",
        Apply::StrList(|v, xs| v.interval.labels = xs),
    ),
    // poisson uncertain
    desc("poisson_uncertain", Apply::Count(|v, n| v.poisson.count = n)),
    guarded(
        "puv_lambdas",
        Apply::RealList(|v, xs| v.poisson.lambdas = xs),
        Guard::Positive,
    ),
    desc(
        "puv_initial_point",
        Apply::IntList(|v, xs| v.poisson.initial = xs),
    ),
    desc(
        "puv_descriptors",
        Apply::StrList(|v, xs| v.poisson.labels = xs),
    ),
    // binomial uncertain
    desc(
        "binomial_uncertain",
        Apply::Count(|v, n| v.binomial.count = n),
    ),
    guarded(
        "biuv_prob_per_trial",
        Apply::RealList(|v, xs| v.binomial.probabilities = xs),
        Guard::UnitInterval,
    ),
    guarded(
        "biuv_num_trials",
        Apply::IntList(|v, xs| v.binomial.num_trials = xs),
        Guard::Positive,
    ),
    desc(
        "biuv_initial_point",
        Apply::IntList(|v, xs| v.binomial.initial = xs),
    ),
    desc(
        "biuv_descriptors",
        Apply::StrList(|v, xs| v.binomial.labels = xs),
    ),
    // negative binomial uncertain
    desc(
        "negative_binomial_uncertain",
        Apply::Count(|v, n| v.neg_binomial.count = n),
    ),
    guarded(
        "nbuv_prob_per_trial",
        Apply::RealList(|v, xs| v.neg_binomial.probabilities = xs),
        Guard::UnitInterval,
    ),
    guarded(
        "nbuv_num_trials",
        Apply::IntList(|v, xs| v.neg_binomial.num_trials = xs),
        Guard::Positive,
    ),
    desc(
        "nbuv_initial_point",
        Apply::IntList(|v, xs| v.neg_binomial.initial = xs),
    ),
    desc(
        "nbuv_descriptors",
        Apply::StrList(|v, xs| v.neg_binomial.labels = xs),
    ),
    // geometric uncertain
    desc(
        "geometric_uncertain",
        Apply::Count(|v, n| v.geometric.count = n),
    ),
    guarded(
        "geuv_prob_per_trial",
        Apply::RealList(|v, xs| v.geometric.probabilities = xs),
        Guard::UnitInterval,
    ),
    desc(
        "geuv_initial_point",
        Apply::IntList(|v, xs| v.geometric.initial = xs),
    ),
    desc(
        "geuv_descriptors",
        Apply::StrList(|v, xs| v.geometric.labels = xs),
    ),
    // hypergeometric uncertain
    desc(
        "hypergeometric_uncertain",
        Apply::Count(|v, n| v.hypergeometric.count = n),
    ),
    guarded(
        "hguv_total_population",
        Apply::IntList(|v, xs| v.hypergeometric.total_population = xs),
        Guard::Positive,
    ),
    guarded(
        "hguv_selected_population",
        Apply::IntList(|v, xs| v.hypergeometric.selected_population = xs),
        Guard::NonNegative,
    ),
    guarded(
        "hguv_num_drawn",
        Apply::IntList(|v, xs| v.hypergeometric.num_drawn = xs),
        Guard::NonNegative,
    ),
    desc(
        "hguv_initial_point",
        Apply::IntList(|v, xs| v.hypergeometric.initial = xs),
    ),
    desc(
        "hguv_descriptors",
        Apply::StrList(|v, xs| v.hypergeometric.labels = xs),
    ),
    // histogram point uncertain
    desc(
        "histogram_point_uncertain",
        Apply::Count(|v, n| v.histogram_point.count = n),
    ),
    guarded(
        "hpuv_num_pairs",
        Apply::IntList(|v, xs| v.histogram_point.pairs_per_variable = xs),
        Guard::Positive,
    ),
    desc(
        "hpuv_abscissas",
        Apply::RealList(|v, xs| v.histogram_point.abscissas = xs),
    ),
    guarded(
        "hpuv_counts",
        Apply::RealList(|v, xs| v.histogram_point.counts = xs),
        Guard::NonNegative,
    ),
    desc(
        "hpuv_initial_point",
        Apply::RealList(|v, xs| v.histogram_point.initial = xs),
    ),
    desc(
        "hpuv_descriptors",
        Apply::StrList(|v, xs| v.histogram_point.labels = xs),
    ),
    // continuous state
    desc(
        "continuous_state",
        Apply::Count(|v, n| v.continuous_state.count = n),
    ),
    desc(
        "csv_initial_state",
        Apply::RealList(|v, xs| v.continuous_state.initial = xs),
    ),
    desc(
        "csv_lower_bounds",
        Apply::RealList(|v, xs| v.continuous_state.lower = xs),
    ),
    desc(
        "csv_upper_bounds",
        Apply::RealList(|v, xs| v.continuous_state.upper = xs),
    ),
    desc(
        "csv_descriptors",
        Apply::StrList(|v, xs| v.continuous_state.labels = xs),
    ),
    // discrete state range
    desc(
        "discrete_state_range",
        Apply::Count(|v, n| v.discrete_state_range.count = n),
    ),
    desc(
        "dsriv_initial_state",
        Apply::IntList(|v, xs| v.discrete_state_range.initial = xs),
    ),
    desc(
        "dsriv_lower_bounds",
        Apply::IntList(|v, xs| v.discrete_state_range.lower = xs),
    ),
    desc(
        "dsriv_upper_bounds",
        Apply::IntList(|v, xs| v.discrete_state_range.upper = xs),
    ),
    desc(
        "dsriv_descriptors",
        Apply::StrList(|v, xs| v.discrete_state_range.labels = xs),
    ),
    // discrete state sets
    desc(
        "discrete_state_set_int",
        Apply::Count(|v, n| v.discrete_state_set_int.count = n),
    ),
    desc(
        "dssiv_initial_state",
        Apply::IntList(|v, xs| v.discrete_state_set_int.initial = xs),
    ),
    guarded(
        "dssiv_num_set_values",
        Apply::IntList(|v, xs| v.discrete_state_set_int.values_per_variable = xs),
        Guard::Positive,
    ),
    desc(
        "dssiv_set_values",
        Apply::IntList(|v, xs| v.discrete_state_set_int.values = xs),
    ),
    desc(
        "dssiv_descriptors",
        Apply::StrList(|v, xs| v.discrete_state_set_int.labels = xs),
    ),
    desc(
        "discrete_state_set_real",
        Apply::Count(|v, n| v.discrete_state_set_real.count = n),
    ),
    desc(
        "dssrv_initial_state",
        Apply::RealList(|v, xs| v.discrete_state_set_real.initial = xs),
    ),
    guarded(
        "dssrv_num_set_values",
        Apply::IntList(|v, xs| v.discrete_state_set_real.values_per_variable = xs),
        Guard::Positive,
    ),
    desc(
        "dssrv_set_values",
        Apply::RealList(|v, xs| v.discrete_state_set_real.values = xs),
    ),
    desc(
        "dssrv_descriptors",
        Apply::StrList(|v, xs| v.discrete_state_set_real.labels = xs),
    ),
];

// ──────────────────────────────────────────────
// Responses table
// ──────────────────────────────────────────────

pub static RESPONSES: &[FieldDesc<ResponsesSpec>] = &[
    desc("id_responses", Apply::Str(|r, s| r.id = s.to_owned())),
    desc(
        "response_descriptors",
        Apply::StrList(|r, xs| r.labels = xs),
    ),
    desc(
        "num_objective_functions",
        Apply::Count(|r, n| r.num_objectives = n),
    ),
    guarded(
        "multi_objective_weights",
        Apply::RealList(|r, xs| r.multi_objective_weights = xs),
        Guard::NonNegative,
    ),
    desc(
        "num_least_squares_terms",
        Apply::Count(|r, n| r.num_least_squares_terms = n),
    ),
    guarded(
        "least_squares_weights",
        Apply::RealList(|r, xs| r.least_squares_weights = xs),
        Guard::NonNegative,
    ),
    desc(
        "num_nonlinear_inequality_constraints",
        Apply::Count(|r, n| r.num_nonlinear_inequality = n),
    ),
    desc(
        "nonlinear_inequality_lower_bounds",
        Apply::RealList(|r, xs| r.nonlinear_inequality_lower = xs),
    ),
    desc(
        "nonlinear_inequality_upper_bounds",
        Apply::RealList(|r, xs| r.nonlinear_inequality_upper = xs),
    ),
    desc(
        "num_nonlinear_equality_constraints",
        Apply::Count(|r, n| r.num_nonlinear_equality = n),
    ),
    desc(
        "nonlinear_equality_targets",
        Apply::RealList(|r, xs| r.nonlinear_equality_targets = xs),
    ),
    desc(
        "num_response_functions",
        Apply::Count(|r, n| r.num_response_functions = n),
    ),
    desc(
        "objective_function_scale_types",
        Apply::StrList(|r, xs| r.objective_scale_types = xs),
    ),
    guarded(
        "objective_function_scales",
        Apply::RealList(|r, xs| r.objective_scales = xs),
        Guard::Positive,
    ),
    // gradient specification: the mode keywords stamp the fixed literal
    desc(
        "no_gradients",
        Apply::Flag(|r| r.gradient_mode = GradientMode::None),
    ),
    desc(
        "numerical_gradients",
        Apply::Flag(|r| r.gradient_mode = GradientMode::Numerical),
    ),
    desc(
        "analytic_gradients",
        Apply::Flag(|r| r.gradient_mode = GradientMode::Analytic),
    ),
    desc(
        "mixed_gradients",
        Apply::Flag(|r| r.gradient_mode = GradientMode::Mixed),
    ),
    desc(
        "method_source",
        Apply::Enum(|r, s| match s {
            "internal" | "vendor" => {
                r.gradient_source = s.to_owned();
                true
            }
            _ => false,
        }),
    ),
    desc(
        "interval_type",
        Apply::Enum(|r, s| match s {
            "forward" | "central" => {
                r.gradient_interval = s.to_owned();
                true
            }
            _ => false,
        }),
    ),
    guarded(
        "fd_gradient_step_size",
        Apply::RealList(|r, xs| r.fd_gradient_step = xs),
        Guard::Positive,
    ),
    guarded(
        "id_numerical_gradients",
        Apply::IntList(|r, xs| r.id_numerical_gradients = xs),
        Guard::Positive,
    ),
    guarded(
        "id_analytic_gradients",
        Apply::IntList(|r, xs| r.id_analytic_gradients = xs),
        Guard::Positive,
    ),
    // hessian specification
    desc(
        "no_hessians",
        Apply::Flag(|r| r.hessian_mode = HessianMode::None),
    ),
    desc(
        "numerical_hessians",
        Apply::Flag(|r| r.hessian_mode = HessianMode::Numerical),
    ),
    desc(
        "quasi_hessians",
        Apply::Flag(|r| r.hessian_mode = HessianMode::Quasi),
    ),
    desc(
        "analytic_hessians",
        Apply::Flag(|r| r.hessian_mode = HessianMode::Analytic),
    ),
    desc(
        "mixed_hessians",
        Apply::Flag(|r| r.hessian_mode = HessianMode::Mixed),
    ),
    guarded(
        "fd_hessian_step_size",
        Apply::RealList(|r, xs| r.fd_hessian_step = xs),
        Guard::Positive,
    ),
    guarded(
        "id_numerical_hessians",
        Apply::IntList(|r, xs| r.id_numerical_hessians = xs),
        Guard::Positive,
    ),
    guarded(
        "id_analytic_hessians",
        Apply::IntList(|r, xs| r.id_analytic_hessians = xs),
        Guard::Positive,
    ),
];

// ──────────────────────────────────────────────
// Method table
// ──────────────────────────────────────────────

pub static METHOD: &[FieldDesc<MethodSpec>] = &[
    desc("id_method", Apply::Str(|m, s| m.id = s.to_owned())),
    desc(
        "model_pointer",
        Apply::Str(|m, s| m.model_pointer = s.to_owned()),
    ),
    // method selection keywords stamp the fixed literal
    desc(
        "quasi_newton",
        Apply::Flag(|m| m.method_name = "quasi_newton".to_owned()),
    ),
    desc(
        "conjugate_gradient",
        Apply::Flag(|m| m.method_name = "conjugate_gradient".to_owned()),
    ),
    desc(
        "pattern_search",
        Apply::Flag(|m| m.method_name = "pattern_search".to_owned()),
    ),
    desc(
        "genetic_algorithm",
        Apply::Flag(|m| m.method_name = "genetic_algorithm".to_owned()),
    ),
    desc(
        "random_sampling",
        Apply::Flag(|m| m.method_name = "random_sampling".to_owned()),
    ),
    desc(
        "output",
        Apply::Enum(|m, s| {
            m.output = match s {
                "silent" => OutputLevel::Silent,
                "quiet" => OutputLevel::Quiet,
                "normal" => OutputLevel::Normal,
                "verbose" => OutputLevel::Verbose,
                "debug" => OutputLevel::Debug,
                _ => return false,
            };
            true
        }),
    ),
    guarded(
        "max_iterations",
        Apply::Int(|m, n| m.max_iterations = n),
        Guard::NonNegative,
    ),
    guarded(
        "max_function_evaluations",
        Apply::Int(|m, n| m.max_function_evaluations = n),
        Guard::NonNegative,
    ),
    guarded(
        "convergence_tolerance",
        Apply::Real(|m, x| m.convergence_tolerance = x),
        Guard::Positive,
    ),
    guarded(
        "constraint_tolerance",
        Apply::Real(|m, x| m.constraint_tolerance = x),
        Guard::Positive,
    ),
    desc("speculative", Apply::Flag(|m| m.speculative = true)),
    desc("scaling", Apply::Flag(|m| m.scaling = true)),
    guarded("seed", Apply::Int(|m, n| m.seed = n), Guard::Positive),
    guarded(
        "samples",
        Apply::Int(|m, n| m.samples = n),
        Guard::NonNegative,
    ),
    desc(
        "sample_type",
        Apply::Enum(|m, s| match s {
            "random" | "lhs" => {
                m.sample_type = s.to_owned();
                true
            }
            _ => false,
        }),
    ),
    desc(
        "linear_inequality_constraint_matrix",
        Apply::RealList(|m, xs| m.linear_inequality_matrix = xs),
    ),
    desc(
        "linear_inequality_lower_bounds",
        Apply::RealList(|m, xs| m.linear_inequality_lower = xs),
    ),
    desc(
        "linear_inequality_upper_bounds",
        Apply::RealList(|m, xs| m.linear_inequality_upper = xs),
    ),
    desc(
        "linear_equality_constraint_matrix",
        Apply::RealList(|m, xs| m.linear_equality_matrix = xs),
    ),
    desc(
        "linear_equality_targets",
        Apply::RealList(|m, xs| m.linear_equality_targets = xs),
    ),
];

// ──────────────────────────────────────────────
// Interface table
// ──────────────────────────────────────────────

pub static INTERFACE: &[FieldDesc<InterfaceSpec>] = &[
    desc("id_interface", Apply::Str(|i, s| i.id = s.to_owned())),
    desc(
        "analysis_drivers",
        Apply::StrList(|i, xs| i.analysis_drivers = xs),
    ),
    desc(
        "analysis_components",
        Apply::StrList(|i, xs| i.analysis_components = xs),
    ),
    desc(
        "input_filter",
        Apply::Str(|i, s| i.input_filter = s.to_owned()),
    ),
    desc(
        "output_filter",
        Apply::Str(|i, s| i.output_filter = s.to_owned()),
    ),
    desc(
        "parameters_file",
        Apply::Str(|i, s| i.parameters_file = s.to_owned()),
    ),
    desc(
        "results_file",
        Apply::Str(|i, s| i.results_file = s.to_owned()),
    ),
    desc(
        "work_directory",
        Apply::Str(|i, s| i.work_directory = s.to_owned()),
    ),
    desc("file_tag", Apply::Flag(|i| i.file_tag = true)),
    desc("file_save", Apply::Flag(|i| i.file_save = true)),
    desc("asynchronous", Apply::Flag(|i| i.asynchronous = true)),
    guarded(
        "evaluation_concurrency",
        Apply::Int(|i, n| i.evaluation_concurrency = n),
        Guard::Positive,
    ),
    guarded(
        "analysis_concurrency",
        Apply::Int(|i, n| i.analysis_concurrency = n),
        Guard::Positive,
    ),
    desc(
        "failure_capture",
        Apply::Enum(|i, s| match s {
            "abort" | "retry" | "recover" | "continuation" => {
                i.failure_capture = s.to_owned();
                true
            }
            _ => false,
        }),
    ),
    guarded(
        "failure_retry_limit",
        Apply::Int(|i, n| i.failure_retry_limit = n),
        Guard::Positive,
    ),
];

// ──────────────────────────────────────────────
// Model table
// ──────────────────────────────────────────────

pub static MODEL: &[FieldDesc<ModelSpec>] = &[
    desc("id_model", Apply::Str(|m, s| m.id = s.to_owned())),
    desc(
        "single",
        Apply::Flag(|m| m.model_type = "single".to_owned()),
    ),
    desc(
        "surrogate",
        Apply::Flag(|m| m.model_type = "surrogate".to_owned()),
    ),
    desc(
        "nested",
        Apply::Flag(|m| m.model_type = "nested".to_owned()),
    ),
    desc(
        "variables_pointer",
        Apply::Str(|m, s| m.variables_pointer = s.to_owned()),
    ),
    desc(
        "interface_pointer",
        Apply::Str(|m, s| m.interface_pointer = s.to_owned()),
    ),
    desc(
        "responses_pointer",
        Apply::Str(|m, s| m.responses_pointer = s.to_owned()),
    ),
    desc(
        "surrogate_type",
        Apply::Enum(|m, s| match s {
            "polynomial" | "kriging" | "neural_network" | "spline" => {
                m.surrogate_type = s.to_owned();
                true
            }
            _ => false,
        }),
    ),
    desc(
        "truth_model_pointer",
        Apply::Str(|m, s| m.truth_model_pointer = s.to_owned()),
    ),
];

// ──────────────────────────────────────────────
// Strategy table
// ──────────────────────────────────────────────

pub static STRATEGY: &[FieldDesc<StrategySpec>] = &[
    desc(
        "single_method",
        Apply::Flag(|s| s.strategy_type = "single_method".to_owned()),
    ),
    desc(
        "multi_start",
        Apply::Flag(|s| s.strategy_type = "multi_start".to_owned()),
    ),
    desc(
        "pareto_set",
        Apply::Flag(|s| s.strategy_type = "pareto_set".to_owned()),
    ),
    desc(
        "hybrid",
        Apply::Flag(|s| s.strategy_type = "hybrid".to_owned()),
    ),
    desc(
        "method_pointer",
        Apply::Str(|s, v| s.method_pointer = v.to_owned()),
    ),
    desc("graphics", Apply::Flag(|s| s.graphics = true)),
    desc("tabular_data", Apply::Flag(|s| s.tabular_data = true)),
    desc(
        "tabular_data_file",
        Apply::Str(|s, v| s.tabular_data_file = v.to_owned()),
    ),
    guarded(
        "iterator_servers",
        Apply::Int(|s, n| s.iterator_servers = n),
        Guard::Positive,
    ),
    guarded(
        "random_starts",
        Apply::Int(|s, n| s.random_starts = n),
        Guard::NonNegative,
    ),
    desc(
        "starting_points",
        Apply::RealList(|s, xs| s.starting_points = xs),
    ),
    guarded(
        "multi_objective_weight_sets",
        Apply::RealList(|s, xs| s.multi_objective_weight_sets = xs),
        Guard::NonNegative,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_store_with_guard() {
        let entry = find(METHOD, "seed").unwrap();
        let mut m = MethodSpec::default();
        entry.dispatch(&mut m, &Value::Int(17)).unwrap();
        assert_eq!(m.seed, 17);

        let err = entry.dispatch(&mut m, &Value::Int(0)).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn vector_store_replaces_contents() {
        let entry = find(VARIABLES, "nuv_means").unwrap();
        let mut v = VariablesSpec::default();
        entry
            .dispatch(&mut v, &Value::RealList(vec![1.0, 2.0]))
            .unwrap();
        entry
            .dispatch(&mut v, &Value::RealList(vec![3.0]))
            .unwrap();
        assert_eq!(v.normal.means, vec![3.0]);
    }

    #[test]
    fn lognormal_keywords_stamp_the_parameterization() {
        let mut v = VariablesSpec::default();
        find(VARIABLES, "lnuv_means")
            .unwrap()
            .dispatch(&mut v, &Value::RealList(vec![10.0]))
            .unwrap();
        // Means alone leave the discriminant unset
        assert_eq!(v.lognormal.param, LognormalParam::Unset);

        find(VARIABLES, "lnuv_std_deviations")
            .unwrap()
            .dispatch(&mut v, &Value::RealList(vec![2.0]))
            .unwrap();
        assert_eq!(v.lognormal.param, LognormalParam::MeanStdDev);

        find(VARIABLES, "lnuv_error_factors")
            .unwrap()
            .dispatch(&mut v, &Value::RealList(vec![1.2]))
            .unwrap();
        assert_eq!(v.lognormal.param, LognormalParam::MeanErrorFactor);
    }

    #[test]
    fn enum_keyword_rejects_unknown_literal() {
        let entry = find(METHOD, "output").unwrap();
        let mut m = MethodSpec::default();
        entry
            .dispatch(&mut m, &Value::Str("verbose".into()))
            .unwrap();
        assert_eq!(m.output, OutputLevel::Verbose);

        let err = entry
            .dispatch(&mut m, &Value::Str("chatty".into()))
            .unwrap_err();
        assert!(matches!(err, FatalError::UnknownLiteral { .. }));
    }

    #[test]
    fn flag_keyword_requires_flag_payload() {
        let entry = find(INTERFACE, "asynchronous").unwrap();
        let mut i = InterfaceSpec::default();
        entry.dispatch(&mut i, &Value::Flag).unwrap();
        assert!(i.asynchronous);
        assert!(entry.dispatch(&mut i, &Value::Int(1)).is_err());
    }

    #[test]
    fn probability_guard_checks_every_element() {
        let entry = find(VARIABLES, "biuv_prob_per_trial").unwrap();
        let mut v = VariablesSpec::default();
        let err = entry
            .dispatch(&mut v, &Value::RealList(vec![0.5, 1.5]))
            .unwrap_err();
        assert!(err.to_string().contains("[0, 1]"));
    }

    #[test]
    fn tables_have_no_duplicate_keywords() {
        fn check<T>(table: &[FieldDesc<T>], name: &str) {
            let mut seen = std::collections::HashSet::new();
            for d in table {
                assert!(seen.insert(d.keyword), "{}: duplicate '{}'", name, d.keyword);
            }
        }
        check(VARIABLES, "variables");
        check(RESPONSES, "responses");
        check(METHOD, "method");
        check(INTERFACE, "interface");
        check(MODEL, "model");
        check(STRATEGY, "strategy");
    }
}
