//! Record structs for the six configuration kinds.
//!
//! These are produced by the deck builder and consumed throughout the
//! defaulting passes and by downstream iterator/model wrappers. Every struct
//! is zero-initialized (`Default`) at group start; the descriptor tables in
//! `descriptors` store parsed keyword payloads into the named fields.

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Record kinds
// ──────────────────────────────────────────────

/// The closed set of top-level keyword groups a deck may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Variables,
    Responses,
    Method,
    Interface,
    Model,
    Strategy,
}

impl RecordKind {
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Variables => "variables",
            RecordKind::Responses => "responses",
            RecordKind::Method => "method",
            RecordKind::Interface => "interface",
            RecordKind::Model => "model",
            RecordKind::Strategy => "strategy",
        }
    }
}

/// One finalized (or in-progress) configuration record.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Variables(VariablesSpec),
    Responses(ResponsesSpec),
    Method(MethodSpec),
    Interface(InterfaceSpec),
    Model(ModelSpec),
    Strategy(StrategySpec),
}

impl Record {
    /// Zero-initialized record of the requested kind.
    pub(crate) fn empty(kind: RecordKind) -> Record {
        match kind {
            RecordKind::Variables => Record::Variables(VariablesSpec::default()),
            RecordKind::Responses => Record::Responses(ResponsesSpec::default()),
            RecordKind::Method => Record::Method(MethodSpec::default()),
            RecordKind::Interface => Record::Interface(InterfaceSpec::default()),
            RecordKind::Model => Record::Model(ModelSpec::default()),
            RecordKind::Strategy => Record::Strategy(StrategySpec::default()),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Variables(_) => RecordKind::Variables,
            Record::Responses(_) => RecordKind::Responses,
            Record::Method(_) => RecordKind::Method,
            Record::Interface(_) => RecordKind::Interface,
            Record::Model(_) => RecordKind::Model,
            Record::Strategy(_) => RecordKind::Strategy,
        }
    }
}

// ──────────────────────────────────────────────
// Variables: design and state groups
// ──────────────────────────────────────────────

/// Continuous design variables (label stub `cdv_`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContinuousDesignVars {
    pub count: usize,
    pub initial: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub scale_types: Vec<String>,
    pub scales: Vec<f64>,
    pub labels: Vec<String>,
}

/// Discrete variables over an integer range. Used for both the design
/// (`ddriv_`) and state (`dsriv_`) categories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscreteRangeVars {
    pub count: usize,
    pub initial: Vec<i64>,
    pub lower: Vec<i64>,
    pub upper: Vec<i64>,
    pub labels: Vec<String>,
}

/// Discrete variables restricted to an admissible integer set.
///
/// `values` is the flattened concatenation of each variable's set;
/// `values_per_variable` gives the partition. An empty partition with a
/// divisible total is split evenly across the declared count.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscreteSetIntVars {
    pub count: usize,
    pub initial: Vec<i64>,
    pub values_per_variable: Vec<i64>,
    pub values: Vec<i64>,
    pub labels: Vec<String>,
}

/// Discrete variables restricted to an admissible real set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscreteSetRealVars {
    pub count: usize,
    pub initial: Vec<f64>,
    pub values_per_variable: Vec<i64>,
    pub values: Vec<f64>,
    pub labels: Vec<String>,
}

/// Continuous state variables (label stub `csv_`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContinuousStateVars {
    pub count: usize,
    pub initial: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub labels: Vec<String>,
}

// ──────────────────────────────────────────────
// Variables: continuous aleatory uncertain groups
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalUncertain {
    pub count: usize,
    pub means: Vec<f64>,
    pub std_devs: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

/// Which of the three alternative lognormal parameterizations the deck used.
/// Stamped by the descriptor entry that stored the numbers; never inferred
/// from vector lengths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LognormalParam {
    #[default]
    Unset,
    LambdaZeta,
    MeanStdDev,
    MeanErrorFactor,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LognormalUncertain {
    pub count: usize,
    pub param: LognormalParam,
    pub lambdas: Vec<f64>,
    pub zetas: Vec<f64>,
    pub means: Vec<f64>,
    pub std_devs: Vec<f64>,
    pub error_factors: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

/// Uniform on [lower, upper]; the bounds are the native parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UniformUncertain {
    pub count: usize,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoguniformUncertain {
    pub count: usize,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TriangularUncertain {
    pub count: usize,
    pub modes: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

/// Exponential with density `exp(-x/beta)/beta`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExponentialUncertain {
    pub count: usize,
    pub betas: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

/// Standard two-shape beta scaled onto [lower, upper]; bounds are required
/// native parameters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BetaUncertain {
    pub count: usize,
    pub alphas: Vec<f64>,
    pub betas: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GammaUncertain {
    pub count: usize,
    pub alphas: Vec<f64>,
    pub betas: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GumbelUncertain {
    pub count: usize,
    pub alphas: Vec<f64>,
    pub betas: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FrechetUncertain {
    pub count: usize,
    pub alphas: Vec<f64>,
    pub betas: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WeibullUncertain {
    pub count: usize,
    pub alphas: Vec<f64>,
    pub betas: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

/// Empirical histogram over bins. `abscissas`/`ordinates` (or directly
/// `counts`) are flattened across variables; `pairs_per_variable` gives the
/// partition. A bin spec of n pairs describes n-1 bins with a trailing zero
/// ordinate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistogramBinUncertain {
    pub count: usize,
    pub pairs_per_variable: Vec<i64>,
    pub abscissas: Vec<f64>,
    pub ordinates: Vec<f64>,
    pub counts: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

// ──────────────────────────────────────────────
// Variables: continuous epistemic uncertain groups
// ──────────────────────────────────────────────

/// Interval-uncertain variables: per variable, a list of sub-intervals each
/// carrying a basic probability. The merged min-lower/max-upper forms the
/// outer bound pair.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntervalUncertain {
    pub count: usize,
    pub intervals_per_variable: Vec<i64>,
    pub probabilities: Vec<f64>,
    pub interval_lower: Vec<f64>,
    pub interval_upper: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

// ──────────────────────────────────────────────
// Variables: discrete aleatory uncertain groups
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct PoissonUncertain {
    pub count: usize,
    pub lambdas: Vec<f64>,
    pub lower: Vec<i64>,
    pub upper: Vec<i64>,
    pub initial: Vec<i64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BinomialUncertain {
    pub count: usize,
    pub probabilities: Vec<f64>,
    pub num_trials: Vec<i64>,
    pub lower: Vec<i64>,
    pub upper: Vec<i64>,
    pub initial: Vec<i64>,
    pub labels: Vec<String>,
}

/// Negative binomial: number of failures before the n-th success.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NegBinomialUncertain {
    pub count: usize,
    pub probabilities: Vec<f64>,
    pub num_trials: Vec<i64>,
    pub lower: Vec<i64>,
    pub upper: Vec<i64>,
    pub initial: Vec<i64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GeometricUncertain {
    pub count: usize,
    pub probabilities: Vec<f64>,
    pub lower: Vec<i64>,
    pub upper: Vec<i64>,
    pub initial: Vec<i64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HypergeometricUncertain {
    pub count: usize,
    pub total_population: Vec<i64>,
    pub selected_population: Vec<i64>,
    pub num_drawn: Vec<i64>,
    pub lower: Vec<i64>,
    pub upper: Vec<i64>,
    pub initial: Vec<i64>,
    pub labels: Vec<String>,
}

/// Empirical histogram over discrete real points.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistogramPointUncertain {
    pub count: usize,
    pub pairs_per_variable: Vec<i64>,
    pub abscissas: Vec<f64>,
    pub counts: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

// ──────────────────────────────────────────────
// Variables: aggregated category vectors
// ──────────────────────────────────────────────

/// One aggregated per-category vector set over reals, assembled by
/// concatenating each distribution kind's contribution in fixed kind order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RealAggregate {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub initial: Vec<f64>,
    pub labels: Vec<String>,
}

/// Integer counterpart of [`RealAggregate`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntAggregate {
    pub lower: Vec<i64>,
    pub upper: Vec<i64>,
    pub initial: Vec<i64>,
    pub labels: Vec<String>,
}

/// The four aggregated uncertain categories, populated by the bound
/// generation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VariableAggregates {
    pub continuous_aleatory: RealAggregate,
    pub continuous_epistemic: RealAggregate,
    pub discrete_aleatory_int: IntAggregate,
    pub discrete_aleatory_real: RealAggregate,
}

// ──────────────────────────────────────────────
// Variables record
// ──────────────────────────────────────────────

/// One `variables` keyword group: every declared category plus the
/// aggregated uncertain vectors derived from them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VariablesSpec {
    pub id: String,

    pub continuous_design: ContinuousDesignVars,
    pub discrete_design_range: DiscreteRangeVars,
    pub discrete_design_set_int: DiscreteSetIntVars,
    pub discrete_design_set_real: DiscreteSetRealVars,

    pub normal: NormalUncertain,
    pub lognormal: LognormalUncertain,
    pub uniform: UniformUncertain,
    pub loguniform: LoguniformUncertain,
    pub triangular: TriangularUncertain,
    pub exponential: ExponentialUncertain,
    pub beta: BetaUncertain,
    pub gamma: GammaUncertain,
    pub gumbel: GumbelUncertain,
    pub frechet: FrechetUncertain,
    pub weibull: WeibullUncertain,
    pub histogram_bin: HistogramBinUncertain,

    pub interval: IntervalUncertain,

    pub poisson: PoissonUncertain,
    pub binomial: BinomialUncertain,
    pub neg_binomial: NegBinomialUncertain,
    pub geometric: GeometricUncertain,
    pub hypergeometric: HypergeometricUncertain,
    pub histogram_point: HistogramPointUncertain,

    pub continuous_state: ContinuousStateVars,
    pub discrete_state_range: DiscreteRangeVars,
    pub discrete_state_set_int: DiscreteSetIntVars,
    pub discrete_state_set_real: DiscreteSetRealVars,

    pub aggregates: VariableAggregates,
}

impl VariablesSpec {
    /// Total continuous aleatory uncertain count, in fixed kind order.
    pub fn continuous_aleatory_count(&self) -> usize {
        self.normal.count
            + self.lognormal.count
            + self.uniform.count
            + self.loguniform.count
            + self.triangular.count
            + self.exponential.count
            + self.beta.count
            + self.gamma.count
            + self.gumbel.count
            + self.frechet.count
            + self.weibull.count
            + self.histogram_bin.count
    }

    pub fn continuous_epistemic_count(&self) -> usize {
        self.interval.count
    }

    pub fn discrete_aleatory_int_count(&self) -> usize {
        self.poisson.count
            + self.binomial.count
            + self.neg_binomial.count
            + self.geometric.count
            + self.hypergeometric.count
    }

    pub fn discrete_aleatory_real_count(&self) -> usize {
        self.histogram_point.count
    }

    /// Grand total over every declared category.
    pub fn total_count(&self) -> usize {
        self.continuous_design.count
            + self.discrete_design_range.count
            + self.discrete_design_set_int.count
            + self.discrete_design_set_real.count
            + self.continuous_aleatory_count()
            + self.continuous_epistemic_count()
            + self.discrete_aleatory_int_count()
            + self.discrete_aleatory_real_count()
            + self.continuous_state.count
            + self.discrete_state_range.count
            + self.discrete_state_set_int.count
            + self.discrete_state_set_real.count
    }
}

// ──────────────────────────────────────────────
// Responses record
// ──────────────────────────────────────────────

/// How gradients are provided to the iterator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientMode {
    #[default]
    None,
    Numerical,
    Analytic,
    Mixed,
}

/// How Hessians are provided to the iterator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HessianMode {
    #[default]
    None,
    Numerical,
    Quasi,
    Analytic,
    Mixed,
}

/// Per-function derivative source, derived from mixed id lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivSource {
    Numerical,
    Analytic,
}

/// One `responses` keyword group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponsesSpec {
    pub id: String,
    pub labels: Vec<String>,

    pub num_objectives: usize,
    pub multi_objective_weights: Vec<f64>,
    pub num_least_squares_terms: usize,
    pub least_squares_weights: Vec<f64>,
    pub num_nonlinear_inequality: usize,
    pub nonlinear_inequality_lower: Vec<f64>,
    pub nonlinear_inequality_upper: Vec<f64>,
    pub num_nonlinear_equality: usize,
    pub nonlinear_equality_targets: Vec<f64>,
    pub num_response_functions: usize,

    pub objective_scale_types: Vec<String>,
    pub objective_scales: Vec<f64>,

    pub gradient_mode: GradientMode,
    pub gradient_source: String,
    pub gradient_interval: String,
    pub fd_gradient_step: Vec<f64>,
    pub id_numerical_gradients: Vec<i64>,
    pub id_analytic_gradients: Vec<i64>,
    /// Derived by the response defaulting pass from the mixed id lists;
    /// `None` marks an unassigned function (a recoverable defect).
    pub gradient_sources: Vec<Option<DerivSource>>,

    pub hessian_mode: HessianMode,
    pub fd_hessian_step: Vec<f64>,
    pub id_numerical_hessians: Vec<i64>,
    pub id_analytic_hessians: Vec<i64>,
    pub hessian_sources: Vec<Option<DerivSource>>,
}

impl ResponsesSpec {
    /// Total number of response functions implied by the count fields:
    /// a generic response-function count wins outright, otherwise
    /// objectives-or-least-squares-terms plus the constraint counts.
    pub fn total_functions(&self) -> usize {
        if self.num_response_functions > 0 {
            self.num_response_functions
        } else {
            let primary = if self.num_least_squares_terms > 0 {
                self.num_least_squares_terms
            } else {
                self.num_objectives
            };
            primary + self.num_nonlinear_inequality + self.num_nonlinear_equality
        }
    }
}

// ──────────────────────────────────────────────
// Method record
// ──────────────────────────────────────────────

/// Iterator output verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputLevel {
    Silent,
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

/// One `method` keyword group: algorithm selection and its controls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MethodSpec {
    pub id: String,
    pub method_name: String,
    pub model_pointer: String,
    pub output: OutputLevel,
    pub max_iterations: i64,
    pub max_function_evaluations: i64,
    pub convergence_tolerance: f64,
    pub constraint_tolerance: f64,
    pub speculative: bool,
    pub scaling: bool,
    pub seed: i64,
    pub samples: i64,
    pub sample_type: String,
    pub linear_inequality_matrix: Vec<f64>,
    pub linear_inequality_lower: Vec<f64>,
    pub linear_inequality_upper: Vec<f64>,
    pub linear_equality_matrix: Vec<f64>,
    pub linear_equality_targets: Vec<f64>,
}

// ──────────────────────────────────────────────
// Interface record
// ──────────────────────────────────────────────

/// One `interface` keyword group: how analysis drivers are invoked.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InterfaceSpec {
    pub id: String,
    pub analysis_drivers: Vec<String>,
    pub analysis_components: Vec<String>,
    pub input_filter: String,
    pub output_filter: String,
    pub parameters_file: String,
    pub results_file: String,
    pub work_directory: String,
    pub file_tag: bool,
    pub file_save: bool,
    pub asynchronous: bool,
    pub evaluation_concurrency: i64,
    pub analysis_concurrency: i64,
    pub failure_capture: String,
    pub failure_retry_limit: i64,
}

// ──────────────────────────────────────────────
// Model record
// ──────────────────────────────────────────────

/// One `model` keyword group binding variables, interface, and responses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelSpec {
    pub id: String,
    pub model_type: String,
    pub variables_pointer: String,
    pub interface_pointer: String,
    pub responses_pointer: String,
    pub surrogate_type: String,
    pub truth_model_pointer: String,
}

// ──────────────────────────────────────────────
// Strategy record
// ──────────────────────────────────────────────

/// One `strategy` keyword group: top-level iteration coordination.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StrategySpec {
    pub strategy_type: String,
    pub method_pointer: String,
    pub graphics: bool,
    pub tabular_data: bool,
    pub tabular_data_file: String,
    pub iterator_servers: i64,
    pub random_starts: i64,
    pub starting_points: Vec<f64>,
    pub multi_objective_weight_sets: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_matches_kind() {
        for kind in [
            RecordKind::Variables,
            RecordKind::Responses,
            RecordKind::Method,
            RecordKind::Interface,
            RecordKind::Model,
            RecordKind::Strategy,
        ] {
            assert_eq!(Record::empty(kind).kind(), kind);
        }
    }

    #[test]
    fn aggregate_counts_sum_by_category() {
        let mut v = VariablesSpec::default();
        v.normal.count = 2;
        v.weibull.count = 1;
        v.interval.count = 3;
        v.poisson.count = 1;
        v.histogram_point.count = 2;
        v.continuous_design.count = 4;

        assert_eq!(v.continuous_aleatory_count(), 3);
        assert_eq!(v.continuous_epistemic_count(), 3);
        assert_eq!(v.discrete_aleatory_int_count(), 1);
        assert_eq!(v.discrete_aleatory_real_count(), 2);
        assert_eq!(v.total_count(), 13);
    }

    #[test]
    fn total_functions_prefers_generic_count() {
        let mut r = ResponsesSpec::default();
        r.num_objectives = 1;
        r.num_nonlinear_inequality = 2;
        r.num_nonlinear_equality = 1;
        assert_eq!(r.total_functions(), 4);

        r.num_least_squares_terms = 5;
        assert_eq!(r.total_functions(), 8);

        r.num_response_functions = 3;
        assert_eq!(r.total_functions(), 3);
    }
}
