//! Response defaulting -- descriptor synthesis, scale-type vocabulary, and
//! mixed gradient/Hessian id-list partitioning.
//!
//! Single pass per responses record. Descriptors synthesize in a fixed
//! ordering: objectives (or least-squares terms), then nonlinear inequality
//! constraints, then nonlinear equality constraints; a generic
//! response-function count uses the generic stub instead. Mixed derivative
//! id lists partition into per-function sources; unassigned and
//! doubly-assigned functions are value-level defects.

use crate::diag::DiagSink;
use crate::records::{DerivSource, GradientMode, HessianMode, ResponsesSpec};

const SCALE_TYPES: &[&str] = &["none", "value", "auto", "log"];

/// Default relative step for finite-difference derivative estimates.
const DEFAULT_FD_STEP: f64 = 1.0e-3;

pub fn validate(r: &mut ResponsesSpec, diags: &mut DiagSink) {
    let total = r.total_functions();
    if total == 0 {
        // Already squawked when the group closed.
        return;
    }

    if r.labels.is_empty() {
        r.labels = synthesize_labels(r);
    } else if r.labels.len() != total {
        diags.squawk(format!(
            "response_descriptors: expected {} labels, found {}",
            total,
            r.labels.len()
        ));
        r.labels = synthesize_labels(r);
    }

    check_weights(
        diags,
        "multi_objective_weights",
        r.multi_objective_weights.len(),
        r.num_objectives,
    );
    check_weights(
        diags,
        "least_squares_weights",
        r.least_squares_weights.len(),
        r.num_least_squares_terms,
    );

    // Inequality constraints default to one-sided: (-inf, 0].
    let n_ineq = r.num_nonlinear_inequality;
    if n_ineq > 0 {
        if r.nonlinear_inequality_lower.is_empty() {
            r.nonlinear_inequality_lower = vec![-f64::MAX; n_ineq];
        }
        if r.nonlinear_inequality_upper.is_empty() {
            r.nonlinear_inequality_upper = vec![0.0; n_ineq];
        }
        if r.nonlinear_inequality_lower.len() != n_ineq
            || r.nonlinear_inequality_upper.len() != n_ineq
        {
            diags.squawk(format!(
                "nonlinear inequality bounds must have {} values",
                n_ineq
            ));
        } else {
            for i in 0..n_ineq {
                if r.nonlinear_inequality_lower[i] > r.nonlinear_inequality_upper[i] {
                    diags.squawk(format!(
                        "nonlinear inequality constraint {}: lower bound {} exceeds upper bound {}",
                        i + 1,
                        r.nonlinear_inequality_lower[i],
                        r.nonlinear_inequality_upper[i]
                    ));
                }
            }
        }
    }
    let n_eq = r.num_nonlinear_equality;
    if n_eq > 0 {
        if r.nonlinear_equality_targets.is_empty() {
            r.nonlinear_equality_targets = vec![0.0; n_eq];
        } else if r.nonlinear_equality_targets.len() != n_eq {
            diags.squawk(format!(
                "nonlinear_equality_targets: expected {} values, found {}",
                n_eq,
                r.nonlinear_equality_targets.len()
            ));
        }
    }

    check_scale_types(diags, r);

    // Gradient specification.
    match r.gradient_mode {
        GradientMode::Mixed => {
            r.gradient_sources = partition_ids(
                diags,
                "gradient",
                total,
                &r.id_numerical_gradients,
                &r.id_analytic_gradients,
            );
        }
        _ => {
            if !r.id_numerical_gradients.is_empty() || !r.id_analytic_gradients.is_empty() {
                diags.squawk(
                    "gradient id lists are only meaningful with mixed_gradients",
                );
            }
        }
    }
    if matches!(r.gradient_mode, GradientMode::Numerical | GradientMode::Mixed) {
        if r.gradient_source.is_empty() {
            r.gradient_source = "internal".to_owned();
        }
        if r.gradient_interval.is_empty() {
            r.gradient_interval = "forward".to_owned();
        }
        if r.fd_gradient_step.is_empty() {
            r.fd_gradient_step = vec![DEFAULT_FD_STEP];
        }
    }

    // Hessian specification.
    match r.hessian_mode {
        HessianMode::Mixed => {
            r.hessian_sources = partition_ids(
                diags,
                "Hessian",
                total,
                &r.id_numerical_hessians,
                &r.id_analytic_hessians,
            );
        }
        _ => {
            if !r.id_numerical_hessians.is_empty() || !r.id_analytic_hessians.is_empty() {
                diags.squawk("Hessian id lists are only meaningful with mixed_hessians");
            }
        }
    }
    if matches!(r.hessian_mode, HessianMode::Numerical | HessianMode::Mixed)
        && r.fd_hessian_step.is_empty()
    {
        r.fd_hessian_step = vec![DEFAULT_FD_STEP];
    }
}

/// Labels in the fixed ordering: primary functions, then inequality
/// constraints, then equality constraints.
fn synthesize_labels(r: &ResponsesSpec) -> Vec<String> {
    let mut labels = Vec::with_capacity(r.total_functions());
    if r.num_response_functions > 0 {
        for i in 1..=r.num_response_functions {
            labels.push(format!("response_fn_{}", i));
        }
        return labels;
    }
    if r.num_least_squares_terms > 0 {
        for i in 1..=r.num_least_squares_terms {
            labels.push(format!("least_sq_term_{}", i));
        }
    } else {
        for i in 1..=r.num_objectives {
            labels.push(format!("obj_fn_{}", i));
        }
    }
    for i in 1..=r.num_nonlinear_inequality {
        labels.push(format!("nln_ineq_con_{}", i));
    }
    for i in 1..=r.num_nonlinear_equality {
        labels.push(format!("nln_eq_con_{}", i));
    }
    labels
}

fn check_weights(diags: &mut DiagSink, keyword: &str, got: usize, want: usize) {
    if got != 0 && got != want {
        diags.squawk(format!(
            "{}: expected {} values, found {}",
            keyword, want, got
        ));
    }
}

fn check_scale_types(diags: &mut DiagSink, r: &ResponsesSpec) {
    if r.objective_scale_types.is_empty() {
        return;
    }
    let n = r.num_objectives;
    if r.objective_scale_types.len() != n && r.objective_scale_types.len() != 1 {
        diags.squawk(format!(
            "objective_function_scale_types: expected 1 or {} values, found {}",
            n,
            r.objective_scale_types.len()
        ));
        return;
    }
    for t in &r.objective_scale_types {
        if !SCALE_TYPES.contains(&t.as_str()) {
            diags.squawk(format!(
                "objective_function_scale_types: unrecognized scale type '{}'",
                t
            ));
        }
    }
    if r.objective_scale_types.iter().any(|t| t == "value") && r.objective_scales.is_empty() {
        diags.squawk(
            "objective_function_scale_types: scale type 'value' requires \
             objective_function_scales",
        );
    }
}

/// Partition 1-based mixed id lists into per-function derivative sources.
fn partition_ids(
    diags: &mut DiagSink,
    what: &str,
    total: usize,
    numerical: &[i64],
    analytic: &[i64],
) -> Vec<Option<DerivSource>> {
    let mut sources: Vec<Option<DerivSource>> = vec![None; total];
    for (ids, source) in [
        (numerical, DerivSource::Numerical),
        (analytic, DerivSource::Analytic),
    ] {
        for &id in ids {
            if id < 1 || id as usize > total {
                diags.squawk(format!(
                    "mixed {} id lists: function id {} out of range 1..={}",
                    what, id, total
                ));
                continue;
            }
            let slot = &mut sources[(id - 1) as usize];
            if slot.is_some() {
                diags.squawk(format!(
                    "mixed {} id lists: function {} is assigned more than once",
                    what, id
                ));
            } else {
                *slot = Some(source);
            }
        }
    }
    for (i, slot) in sources.iter().enumerate() {
        if slot.is_none() {
            diags.squawk(format!(
                "mixed {} id lists: function {} is unassigned",
                what,
                i + 1
            ));
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Verdict;

    fn sink() -> DiagSink {
        DiagSink::new()
    }

    #[test]
    fn labels_synthesize_in_fixed_order() {
        let mut r = ResponsesSpec::default();
        r.num_objectives = 2;
        r.num_nonlinear_inequality = 2;
        r.num_nonlinear_equality = 1;
        let mut diags = sink();
        validate(&mut r, &mut diags);

        assert_eq!(
            r.labels,
            vec![
                "obj_fn_1",
                "obj_fn_2",
                "nln_ineq_con_1",
                "nln_ineq_con_2",
                "nln_eq_con_1"
            ]
        );
        assert_eq!(diags.verdict(), Verdict::Accepted);
    }

    #[test]
    fn least_squares_terms_replace_objectives_in_labels() {
        let mut r = ResponsesSpec::default();
        r.num_least_squares_terms = 2;
        r.num_nonlinear_equality = 1;
        let mut diags = sink();
        validate(&mut r, &mut diags);
        assert_eq!(
            r.labels,
            vec!["least_sq_term_1", "least_sq_term_2", "nln_eq_con_1"]
        );
    }

    #[test]
    fn generic_count_uses_generic_stub() {
        let mut r = ResponsesSpec::default();
        r.num_response_functions = 3;
        let mut diags = sink();
        validate(&mut r, &mut diags);
        assert_eq!(
            r.labels,
            vec!["response_fn_1", "response_fn_2", "response_fn_3"]
        );
    }

    #[test]
    fn explicit_label_count_must_match_inferred_total() {
        let mut r = ResponsesSpec::default();
        r.num_objectives = 1;
        r.num_nonlinear_inequality = 1;
        r.labels = vec!["only_one".into()];
        let mut diags = sink();
        validate(&mut r, &mut diags);
        assert!(matches!(diags.verdict(), Verdict::Rejected { squawks: 1 }));
        // replaced with a consistent synthesized set
        assert_eq!(r.labels.len(), 2);
    }

    #[test]
    fn inequality_bounds_default_one_sided() {
        let mut r = ResponsesSpec::default();
        r.num_objectives = 1;
        r.num_nonlinear_inequality = 2;
        let mut diags = sink();
        validate(&mut r, &mut diags);
        assert_eq!(r.nonlinear_inequality_lower, vec![-f64::MAX, -f64::MAX]);
        assert_eq!(r.nonlinear_inequality_upper, vec![0.0, 0.0]);
    }

    #[test]
    fn mixed_gradients_partition_id_lists() {
        let mut r = ResponsesSpec::default();
        r.num_objectives = 1;
        r.num_nonlinear_inequality = 2;
        r.gradient_mode = GradientMode::Mixed;
        r.id_numerical_gradients = vec![1, 3];
        r.id_analytic_gradients = vec![2];
        let mut diags = sink();
        validate(&mut r, &mut diags);

        assert_eq!(diags.verdict(), Verdict::Accepted);
        assert_eq!(
            r.gradient_sources,
            vec![
                Some(DerivSource::Numerical),
                Some(DerivSource::Analytic),
                Some(DerivSource::Numerical)
            ]
        );
    }

    #[test]
    fn unassigned_and_double_assigned_functions_squawk() {
        let mut r = ResponsesSpec::default();
        r.num_objectives = 3;
        r.gradient_mode = GradientMode::Mixed;
        r.id_numerical_gradients = vec![1];
        r.id_analytic_gradients = vec![1]; // doubly assigned; 2 and 3 unassigned
        let mut diags = sink();
        validate(&mut r, &mut diags);

        assert_eq!(diags.verdict(), Verdict::Rejected { squawks: 3 });
        let messages: Vec<&str> = diags
            .diagnostics()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert!(messages
            .iter()
            .any(|m| m.contains("function 1 is assigned more than once")));
        assert!(messages.iter().any(|m| m.contains("function 2 is unassigned")));
        assert!(messages.iter().any(|m| m.contains("function 3 is unassigned")));
    }

    #[test]
    fn id_lists_without_mixed_mode_squawk() {
        let mut r = ResponsesSpec::default();
        r.num_objectives = 1;
        r.gradient_mode = GradientMode::Analytic;
        r.id_analytic_gradients = vec![1];
        let mut diags = sink();
        validate(&mut r, &mut diags);
        assert!(matches!(diags.verdict(), Verdict::Rejected { squawks: 1 }));
    }

    #[test]
    fn numerical_gradients_fill_finite_difference_defaults() {
        let mut r = ResponsesSpec::default();
        r.num_objectives = 1;
        r.gradient_mode = GradientMode::Numerical;
        let mut diags = sink();
        validate(&mut r, &mut diags);
        assert_eq!(r.gradient_source, "internal");
        assert_eq!(r.gradient_interval, "forward");
        assert_eq!(r.fd_gradient_step, vec![DEFAULT_FD_STEP]);
    }

    #[test]
    fn scale_type_value_requires_scale_vector() {
        let mut r = ResponsesSpec::default();
        r.num_objectives = 1;
        r.objective_scale_types = vec!["value".into()];
        let mut diags = sink();
        validate(&mut r, &mut diags);
        assert!(matches!(diags.verdict(), Verdict::Rejected { squawks: 1 }));

        let mut r2 = ResponsesSpec::default();
        r2.num_objectives = 1;
        r2.objective_scale_types = vec!["log".into()];
        let mut diags2 = sink();
        validate(&mut r2, &mut diags2);
        assert_eq!(diags2.verdict(), Verdict::Accepted);
    }
}
