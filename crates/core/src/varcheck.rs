//! Variable defaulting, validation and label-synthesis pass.
//!
//! Runs after bound generation, over every declared category: design and
//! state variables (whose bounds default here rather than from moments),
//! every uncertain kind, and the discrete set categories. Verifies
//! lower <= upper per component, clamps out-of-range initial values to the
//! nearest bound with an advisory, checks set membership and duplicates, and
//! synthesizes missing descriptor labels as `<stub><ordinal>` scoped to the
//! variable's position within its category.

use crate::diag::DiagSink;
use crate::records::VariablesSpec;
use std::fmt::Display;

/// Recognized scale-type literals; `value` additionally requires a paired
/// numeric scale vector.
const SCALE_TYPES: &[&str] = &["none", "value", "auto", "log"];

pub fn validate(v: &mut VariablesSpec, diags: &mut DiagSink) {
    // Design categories: bounds default to the widest representable range.
    check_real_group(
        diags,
        "continuous_design",
        "cdv_",
        v.continuous_design.count,
        &mut v.continuous_design.lower,
        &mut v.continuous_design.upper,
        &mut v.continuous_design.initial,
        &mut v.continuous_design.labels,
        Some((-f64::MAX, f64::MAX)),
    );
    check_scale_types(
        diags,
        "cdv_scale_types",
        "cdv_scales",
        &v.continuous_design.scale_types,
        &v.continuous_design.scales,
        v.continuous_design.count,
    );
    check_int_group(
        diags,
        "discrete_design_range",
        "ddriv_",
        v.discrete_design_range.count,
        &mut v.discrete_design_range.lower,
        &mut v.discrete_design_range.upper,
        &mut v.discrete_design_range.initial,
        &mut v.discrete_design_range.labels,
        Some((i64::MIN, i64::MAX)),
    );
    check_int_set(
        diags,
        "discrete_design_set_int",
        "ddsiv_",
        v.discrete_design_set_int.count,
        &mut v.discrete_design_set_int.values_per_variable,
        &v.discrete_design_set_int.values,
        &mut v.discrete_design_set_int.initial,
        &mut v.discrete_design_set_int.labels,
    );
    check_real_set(
        diags,
        "discrete_design_set_real",
        "ddsrv_",
        v.discrete_design_set_real.count,
        &mut v.discrete_design_set_real.values_per_variable,
        &v.discrete_design_set_real.values,
        &mut v.discrete_design_set_real.initial,
        &mut v.discrete_design_set_real.labels,
    );

    // Uncertain kinds: bounds exist from the generation pass (or the cause
    // was already squawked there), so no default range applies.
    check_real_group(
        diags,
        "normal_uncertain",
        "nuv_",
        v.normal.count,
        &mut v.normal.lower,
        &mut v.normal.upper,
        &mut v.normal.initial,
        &mut v.normal.labels,
        None,
    );
    check_real_group(
        diags,
        "lognormal_uncertain",
        "lnuv_",
        v.lognormal.count,
        &mut v.lognormal.lower,
        &mut v.lognormal.upper,
        &mut v.lognormal.initial,
        &mut v.lognormal.labels,
        None,
    );
    check_real_group(
        diags,
        "uniform_uncertain",
        "uuv_",
        v.uniform.count,
        &mut v.uniform.lower,
        &mut v.uniform.upper,
        &mut v.uniform.initial,
        &mut v.uniform.labels,
        None,
    );
    check_real_group(
        diags,
        "loguniform_uncertain",
        "luuv_",
        v.loguniform.count,
        &mut v.loguniform.lower,
        &mut v.loguniform.upper,
        &mut v.loguniform.initial,
        &mut v.loguniform.labels,
        None,
    );
    check_real_group(
        diags,
        "triangular_uncertain",
        "tuv_",
        v.triangular.count,
        &mut v.triangular.lower,
        &mut v.triangular.upper,
        &mut v.triangular.initial,
        &mut v.triangular.labels,
        None,
    );
    check_real_group(
        diags,
        "exponential_uncertain",
        "euv_",
        v.exponential.count,
        &mut v.exponential.lower,
        &mut v.exponential.upper,
        &mut v.exponential.initial,
        &mut v.exponential.labels,
        None,
    );
    check_real_group(
        diags,
        "beta_uncertain",
        "buv_",
        v.beta.count,
        &mut v.beta.lower,
        &mut v.beta.upper,
        &mut v.beta.initial,
        &mut v.beta.labels,
        None,
    );
    check_real_group(
        diags,
        "gamma_uncertain",
        "gauv_",
        v.gamma.count,
        &mut v.gamma.lower,
        &mut v.gamma.upper,
        &mut v.gamma.initial,
        &mut v.gamma.labels,
        None,
    );
    check_real_group(
        diags,
        "gumbel_uncertain",
        "guuv_",
        v.gumbel.count,
        &mut v.gumbel.lower,
        &mut v.gumbel.upper,
        &mut v.gumbel.initial,
        &mut v.gumbel.labels,
        None,
    );
    check_real_group(
        diags,
        "frechet_uncertain",
        "fuv_",
        v.frechet.count,
        &mut v.frechet.lower,
        &mut v.frechet.upper,
        &mut v.frechet.initial,
        &mut v.frechet.labels,
        None,
    );
    check_real_group(
        diags,
        "weibull_uncertain",
        "wuv_",
        v.weibull.count,
        &mut v.weibull.lower,
        &mut v.weibull.upper,
        &mut v.weibull.initial,
        &mut v.weibull.labels,
        None,
    );
    check_real_group(
        diags,
        "histogram_bin_uncertain",
        "hbuv_",
        v.histogram_bin.count,
        &mut v.histogram_bin.lower,
        &mut v.histogram_bin.upper,
        &mut v.histogram_bin.initial,
        &mut v.histogram_bin.labels,
        None,
    );
    check_real_group(
        diags,
        "interval_uncertain",
        "iuv_",
        v.interval.count,
        &mut v.interval.lower,
        &mut v.interval.upper,
        &mut v.interval.initial,
        &mut v.interval.labels,
        None,
    );
    check_int_group(
        diags,
        "poisson_uncertain",
        "puv_",
        v.poisson.count,
        &mut v.poisson.lower,
        &mut v.poisson.upper,
        &mut v.poisson.initial,
        &mut v.poisson.labels,
        None,
    );
    check_int_group(
        diags,
        "binomial_uncertain",
        "biuv_",
        v.binomial.count,
        &mut v.binomial.lower,
        &mut v.binomial.upper,
        &mut v.binomial.initial,
        &mut v.binomial.labels,
        None,
    );
    check_int_group(
        diags,
        "negative_binomial_uncertain",
        "nbuv_",
        v.neg_binomial.count,
        &mut v.neg_binomial.lower,
        &mut v.neg_binomial.upper,
        &mut v.neg_binomial.initial,
        &mut v.neg_binomial.labels,
        None,
    );
    check_int_group(
        diags,
        "geometric_uncertain",
        "geuv_",
        v.geometric.count,
        &mut v.geometric.lower,
        &mut v.geometric.upper,
        &mut v.geometric.initial,
        &mut v.geometric.labels,
        None,
    );
    check_int_group(
        diags,
        "hypergeometric_uncertain",
        "hguv_",
        v.hypergeometric.count,
        &mut v.hypergeometric.lower,
        &mut v.hypergeometric.upper,
        &mut v.hypergeometric.initial,
        &mut v.hypergeometric.labels,
        None,
    );
    check_real_group(
        diags,
        "histogram_point_uncertain",
        "hpuv_",
        v.histogram_point.count,
        &mut v.histogram_point.lower,
        &mut v.histogram_point.upper,
        &mut v.histogram_point.initial,
        &mut v.histogram_point.labels,
        None,
    );

    // State categories.
    check_real_group(
        diags,
        "continuous_state",
        "csv_",
        v.continuous_state.count,
        &mut v.continuous_state.lower,
        &mut v.continuous_state.upper,
        &mut v.continuous_state.initial,
        &mut v.continuous_state.labels,
        Some((-f64::MAX, f64::MAX)),
    );
    check_int_group(
        diags,
        "discrete_state_range",
        "dsriv_",
        v.discrete_state_range.count,
        &mut v.discrete_state_range.lower,
        &mut v.discrete_state_range.upper,
        &mut v.discrete_state_range.initial,
        &mut v.discrete_state_range.labels,
        Some((i64::MIN, i64::MAX)),
    );
    check_int_set(
        diags,
        "discrete_state_set_int",
        "dssiv_",
        v.discrete_state_set_int.count,
        &mut v.discrete_state_set_int.values_per_variable,
        &v.discrete_state_set_int.values,
        &mut v.discrete_state_set_int.initial,
        &mut v.discrete_state_set_int.labels,
    );
    check_real_set(
        diags,
        "discrete_state_set_real",
        "dssrv_",
        v.discrete_state_set_real.count,
        &mut v.discrete_state_set_real.values_per_variable,
        &v.discrete_state_set_real.values,
        &mut v.discrete_state_set_real.initial,
        &mut v.discrete_state_set_real.labels,
    );

    assemble_aggregate_labels(v);
}

/// Concatenate the per-kind labels into the aggregated category vectors, in
/// the same fixed kind order the generation pass used for offsets.
fn assemble_aggregate_labels(v: &mut VariablesSpec) {
    let cau = &mut v.aggregates.continuous_aleatory;
    cau.labels = v
        .normal
        .labels
        .iter()
        .chain(&v.lognormal.labels)
        .chain(&v.uniform.labels)
        .chain(&v.loguniform.labels)
        .chain(&v.triangular.labels)
        .chain(&v.exponential.labels)
        .chain(&v.beta.labels)
        .chain(&v.gamma.labels)
        .chain(&v.gumbel.labels)
        .chain(&v.frechet.labels)
        .chain(&v.weibull.labels)
        .chain(&v.histogram_bin.labels)
        .cloned()
        .collect();
    v.aggregates.continuous_epistemic.labels = v.interval.labels.clone();
    let daui = &mut v.aggregates.discrete_aleatory_int;
    daui.labels = v
        .poisson
        .labels
        .iter()
        .chain(&v.binomial.labels)
        .chain(&v.neg_binomial.labels)
        .chain(&v.geometric.labels)
        .chain(&v.hypergeometric.labels)
        .cloned()
        .collect();
    v.aggregates.discrete_aleatory_real.labels = v.histogram_point.labels.clone();
}

/// Synthesize `<stub><1..=count>` labels, or length-check explicit ones.
fn synthesize_labels(
    diags: &mut DiagSink,
    name: &str,
    stub: &str,
    labels: &mut Vec<String>,
    count: usize,
) {
    if labels.is_empty() {
        *labels = (1..=count).map(|i| format!("{}{}", stub, i)).collect();
    } else if labels.len() != count {
        diags.squawk(format!(
            "{} descriptors: expected {} labels, found {}",
            name,
            count,
            labels.len()
        ));
        *labels = (1..=count).map(|i| format!("{}{}", stub, i)).collect();
    }
}

#[allow(clippy::too_many_arguments)]
fn check_real_group(
    diags: &mut DiagSink,
    name: &str,
    stub: &str,
    count: usize,
    lower: &mut Vec<f64>,
    upper: &mut Vec<f64>,
    initial: &mut Vec<f64>,
    labels: &mut Vec<String>,
    default_range: Option<(f64, f64)>,
) {
    if count == 0 {
        return;
    }
    synthesize_labels(diags, name, stub, labels, count);

    match default_range {
        Some((lo, hi)) => {
            if lower.is_empty() {
                *lower = vec![lo; count];
            }
            if upper.is_empty() {
                *upper = vec![hi; count];
            }
        }
        // The generation pass owns these bounds; if it bailed out the cause
        // is already on record.
        None => {
            if lower.is_empty() || upper.is_empty() {
                return;
            }
        }
    }
    if lower.len() != count || upper.len() != count {
        diags.squawk(format!(
            "{}: bound vectors must have {} values",
            name, count
        ));
        return;
    }

    for i in 0..count {
        if lower[i] > upper[i] {
            diags.squawk(format!(
                "{}: lower bound {} exceeds upper bound {}",
                labels[i], lower[i], upper[i]
            ));
        }
    }

    if initial.is_empty() {
        *initial = lower
            .iter()
            .zip(upper.iter())
            .map(|(&lo, &hi)| 0.0f64.clamp(lo.min(hi), hi.max(lo)))
            .collect();
        return;
    }
    if initial.len() != count {
        diags.squawk(format!(
            "{} initial values: expected {} values, found {}",
            name,
            count,
            initial.len()
        ));
        return;
    }
    for i in 0..count {
        if lower[i] > upper[i] {
            continue;
        }
        if initial[i] < lower[i] {
            diags.warn(format!(
                "{}: initial value {} clamped to lower bound {}",
                labels[i], initial[i], lower[i]
            ));
            initial[i] = lower[i];
        } else if initial[i] > upper[i] {
            diags.warn(format!(
                "{}: initial value {} clamped to upper bound {}",
                labels[i], initial[i], upper[i]
            ));
            initial[i] = upper[i];
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn check_int_group(
    diags: &mut DiagSink,
    name: &str,
    stub: &str,
    count: usize,
    lower: &mut Vec<i64>,
    upper: &mut Vec<i64>,
    initial: &mut Vec<i64>,
    labels: &mut Vec<String>,
    default_range: Option<(i64, i64)>,
) {
    if count == 0 {
        return;
    }
    synthesize_labels(diags, name, stub, labels, count);

    match default_range {
        Some((lo, hi)) => {
            if lower.is_empty() {
                *lower = vec![lo; count];
            }
            if upper.is_empty() {
                *upper = vec![hi; count];
            }
        }
        None => {
            if lower.is_empty() || upper.is_empty() {
                return;
            }
        }
    }
    if lower.len() != count || upper.len() != count {
        diags.squawk(format!(
            "{}: bound vectors must have {} values",
            name, count
        ));
        return;
    }

    for i in 0..count {
        if lower[i] > upper[i] {
            diags.squawk(format!(
                "{}: lower bound {} exceeds upper bound {}",
                labels[i], lower[i], upper[i]
            ));
        }
    }

    if initial.is_empty() {
        *initial = lower
            .iter()
            .zip(upper.iter())
            .map(|(&lo, &hi)| 0i64.clamp(lo.min(hi), hi.max(lo)))
            .collect();
        return;
    }
    if initial.len() != count {
        diags.squawk(format!(
            "{} initial values: expected {} values, found {}",
            name,
            count,
            initial.len()
        ));
        return;
    }
    for i in 0..count {
        if lower[i] > upper[i] {
            continue;
        }
        if initial[i] < lower[i] {
            diags.warn(format!(
                "{}: initial value {} clamped to lower bound {}",
                labels[i], initial[i], lower[i]
            ));
            initial[i] = lower[i];
        } else if initial[i] > upper[i] {
            diags.warn(format!(
                "{}: initial value {} clamped to upper bound {}",
                labels[i], initial[i], upper[i]
            ));
            initial[i] = upper[i];
        }
    }
}

/// Resolve the set partition: an explicit per-variable split, or an even
/// division of the flattened values.
fn resolve_partition(
    diags: &mut DiagSink,
    name: &str,
    count: usize,
    per_variable: &mut Vec<i64>,
    total_values: usize,
) -> bool {
    if total_values == 0 {
        diags.squawk(format!("{}: no set values given", name));
        return false;
    }
    if per_variable.is_empty() {
        if total_values % count != 0 {
            diags.squawk(format!(
                "{}: {} set values cannot be divided evenly across {} variables",
                name, total_values, count
            ));
            return false;
        }
        *per_variable = vec![(total_values / count) as i64; count];
        return true;
    }
    if per_variable.len() != count {
        diags.squawk(format!(
            "{} num_set_values: expected {} values, found {}",
            name,
            count,
            per_variable.len()
        ));
        return false;
    }
    let sum: usize = per_variable.iter().map(|&p| p as usize).sum();
    if sum != total_values {
        diags.squawk(format!(
            "{}: num_set_values sums to {} but {} set values were given",
            name, sum, total_values
        ));
        return false;
    }
    true
}

/// Report duplicate set values: at most the first two literally, then one
/// suppressed-count note. One message shape for every set kind.
fn report_duplicates<T: PartialEq + Display>(diags: &mut DiagSink, label: &str, set: &[T]) {
    let mut shown = 0usize;
    let mut suppressed = 0usize;
    for (i, val) in set.iter().enumerate() {
        if set[..i].contains(val) {
            if shown < 2 {
                diags.squawk(format!("{}: duplicate set value '{}'", label, val));
                shown += 1;
            } else {
                suppressed += 1;
            }
        }
    }
    if suppressed > 0 {
        diags.squawk(format!(
            "{}: {} additional duplicate values not shown",
            label, suppressed
        ));
    }
}

#[allow(clippy::too_many_arguments)]
fn check_int_set(
    diags: &mut DiagSink,
    name: &str,
    stub: &str,
    count: usize,
    per_variable: &mut Vec<i64>,
    values: &[i64],
    initial: &mut Vec<i64>,
    labels: &mut Vec<String>,
) {
    if count == 0 {
        return;
    }
    synthesize_labels(diags, name, stub, labels, count);
    if !resolve_partition(diags, name, count, per_variable, values.len()) {
        return;
    }

    let explicit_initial = !initial.is_empty();
    if explicit_initial && initial.len() != count {
        diags.squawk(format!(
            "{} initial values: expected {} values, found {}",
            name,
            count,
            initial.len()
        ));
        return;
    }

    let mut start = 0usize;
    for j in 0..count {
        let nv = per_variable[j] as usize;
        let set = &values[start..start + nv];
        report_duplicates(diags, &labels[j], set);
        if explicit_initial {
            if !set.contains(&initial[j]) {
                diags.squawk(format!(
                    "{}: initial value {} is not a member of the declared set",
                    labels[j], initial[j]
                ));
            }
        } else {
            initial.push(set[0]);
        }
        start += nv;
    }
}

#[allow(clippy::too_many_arguments)]
fn check_real_set(
    diags: &mut DiagSink,
    name: &str,
    stub: &str,
    count: usize,
    per_variable: &mut Vec<i64>,
    values: &[f64],
    initial: &mut Vec<f64>,
    labels: &mut Vec<String>,
) {
    if count == 0 {
        return;
    }
    synthesize_labels(diags, name, stub, labels, count);
    if !resolve_partition(diags, name, count, per_variable, values.len()) {
        return;
    }

    let explicit_initial = !initial.is_empty();
    if explicit_initial && initial.len() != count {
        diags.squawk(format!(
            "{} initial values: expected {} values, found {}",
            name,
            count,
            initial.len()
        ));
        return;
    }

    let mut start = 0usize;
    for j in 0..count {
        let nv = per_variable[j] as usize;
        let set = &values[start..start + nv];
        report_duplicates(diags, &labels[j], set);
        if explicit_initial {
            if !set.contains(&initial[j]) {
                diags.squawk(format!(
                    "{}: initial value {} is not a member of the declared set",
                    labels[j], initial[j]
                ));
            }
        } else {
            initial.push(set[0]);
        }
        start += nv;
    }
}

/// Scale-type vocabulary check, shared shape with the response pass.
fn check_scale_types(
    diags: &mut DiagSink,
    types_kw: &str,
    scales_kw: &str,
    scale_types: &[String],
    scales: &[f64],
    count: usize,
) {
    if scale_types.is_empty() {
        return;
    }
    if scale_types.len() != count && scale_types.len() != 1 {
        diags.squawk(format!(
            "{}: expected 1 or {} values, found {}",
            types_kw,
            count,
            scale_types.len()
        ));
        return;
    }
    for t in scale_types {
        if !SCALE_TYPES.contains(&t.as_str()) {
            diags.squawk(format!("{}: unrecognized scale type '{}'", types_kw, t));
        }
    }
    if scale_types.iter().any(|t| t == "value") && scales.is_empty() {
        diags.squawk(format!(
            "{}: scale type 'value' requires {}",
            types_kw, scales_kw
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::{Severity, Verdict};

    fn sink() -> DiagSink {
        DiagSink::new()
    }

    #[test]
    fn labels_synthesized_in_declaration_order() {
        let mut v = VariablesSpec::default();
        v.continuous_design.count = 3;
        let mut diags = sink();
        validate(&mut v, &mut diags);

        assert_eq!(
            v.continuous_design.labels,
            vec!["cdv_1", "cdv_2", "cdv_3"]
        );
        assert_eq!(diags.verdict(), Verdict::Accepted);
    }

    #[test]
    fn explicit_labels_are_kept() {
        let mut v = VariablesSpec::default();
        v.continuous_design.count = 2;
        v.continuous_design.labels = vec!["thickness".into(), "radius".into()];
        let mut diags = sink();
        validate(&mut v, &mut diags);
        assert_eq!(
            v.continuous_design.labels,
            vec!["thickness", "radius"]
        );
    }

    #[test]
    fn inverted_bounds_squawk_exactly_once() {
        let mut v = VariablesSpec::default();
        v.continuous_design.count = 1;
        v.continuous_design.lower = vec![5.0];
        v.continuous_design.upper = vec![2.0];
        let mut diags = sink();
        validate(&mut v, &mut diags);
        assert_eq!(diags.verdict(), Verdict::Rejected { squawks: 1 });
        assert!(diags.diagnostics()[0]
            .message
            .contains("lower bound 5 exceeds upper bound 2"));
    }

    #[test]
    fn out_of_range_initial_clamps_with_one_advisory() {
        let mut v = VariablesSpec::default();
        v.continuous_design.count = 1;
        v.continuous_design.lower = vec![0.0];
        v.continuous_design.upper = vec![10.0];
        v.continuous_design.initial = vec![-5.0];
        let mut diags = sink();
        validate(&mut v, &mut diags);

        assert_eq!(v.continuous_design.initial, vec![0.0]);
        assert_eq!(diags.verdict(), Verdict::Accepted);
        let advisories: Vec<_> = diags
            .diagnostics()
            .iter()
            .filter(|d| d.severity == Severity::Advisory)
            .collect();
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].message.contains("clamped to lower bound 0"));
    }

    #[test]
    fn missing_initial_defaults_to_zero_clamped() {
        let mut v = VariablesSpec::default();
        v.continuous_design.count = 2;
        v.continuous_design.lower = vec![2.0, -4.0];
        v.continuous_design.upper = vec![8.0, -1.0];
        let mut diags = sink();
        validate(&mut v, &mut diags);

        assert_eq!(v.continuous_design.initial, vec![2.0, -1.0]);
        // Synthesized defaults are silent.
        assert!(diags.diagnostics().is_empty());
    }

    #[test]
    fn duplicate_set_values_show_two_then_summarize() {
        let mut v = VariablesSpec::default();
        v.discrete_design_set_int.count = 1;
        v.discrete_design_set_int.values = vec![1, 2, 2, 3, 3, 3];
        let mut diags = sink();
        validate(&mut v, &mut diags);

        let messages: Vec<&str> = diags
            .diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        let literal: Vec<&&str> = messages
            .iter()
            .filter(|m| m.contains("duplicate set value"))
            .collect();
        assert_eq!(literal.len(), 2);
        assert!(messages
            .iter()
            .any(|m| m.contains("1 additional duplicate values not shown")));
    }

    #[test]
    fn set_membership_of_initial_value() {
        let mut v = VariablesSpec::default();
        v.discrete_design_set_int.count = 1;
        v.discrete_design_set_int.values = vec![2, 4, 6];
        v.discrete_design_set_int.initial = vec![5];
        let mut diags = sink();
        validate(&mut v, &mut diags);

        assert_eq!(diags.verdict(), Verdict::Rejected { squawks: 1 });
        assert!(diags.diagnostics()[0]
            .message
            .contains("not a member of the declared set"));
    }

    #[test]
    fn set_values_split_evenly_without_partition() {
        let mut v = VariablesSpec::default();
        v.discrete_design_set_real.count = 2;
        v.discrete_design_set_real.values = vec![0.5, 1.5, 2.5, 3.5];
        let mut diags = sink();
        validate(&mut v, &mut diags);

        assert_eq!(v.discrete_design_set_real.values_per_variable, vec![2, 2]);
        // missing initial defaults to the first member of each set
        assert_eq!(v.discrete_design_set_real.initial, vec![0.5, 2.5]);
        assert_eq!(diags.verdict(), Verdict::Accepted);
    }

    #[test]
    fn uneven_set_partition_squawks() {
        let mut v = VariablesSpec::default();
        v.discrete_state_set_int.count = 2;
        v.discrete_state_set_int.values = vec![1, 2, 3];
        let mut diags = sink();
        validate(&mut v, &mut diags);
        assert!(matches!(diags.verdict(), Verdict::Rejected { squawks: 1 }));
    }

    #[test]
    fn scale_type_value_requires_scales() {
        let mut v = VariablesSpec::default();
        v.continuous_design.count = 1;
        v.continuous_design.scale_types = vec!["value".into()];
        let mut diags = sink();
        validate(&mut v, &mut diags);
        assert!(matches!(diags.verdict(), Verdict::Rejected { squawks: 1 }));
    }

    #[test]
    fn aggregate_labels_concatenate_kind_labels() {
        let mut v = VariablesSpec::default();
        v.normal.count = 1;
        v.normal.means = vec![0.0];
        v.normal.std_devs = vec![1.0];
        v.uniform.count = 2;
        v.uniform.lower = vec![0.0, 0.0];
        v.uniform.upper = vec![1.0, 1.0];
        let mut diags = sink();
        crate::vargen::generate(&mut v, &mut diags);
        validate(&mut v, &mut diags);

        assert_eq!(
            v.aggregates.continuous_aleatory.labels,
            vec!["nuv_1", "uuv_1", "uuv_2"]
        );
    }

    #[test]
    fn state_labels_use_state_stubs() {
        let mut v = VariablesSpec::default();
        v.continuous_state.count = 1;
        v.discrete_state_range.count = 2;
        let mut diags = sink();
        validate(&mut v, &mut diags);
        assert_eq!(v.continuous_state.labels, vec!["csv_1"]);
        assert_eq!(v.discrete_state_range.labels, vec!["dsriv_1", "dsriv_2"]);
    }
}
