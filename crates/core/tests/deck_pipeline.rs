//! Whole-deck pipeline tests: event stream in, frozen configuration out.

use optdeck_core::records::Record;
use optdeck_core::{process_events, DeckEvent, RecordKind, Severity, Value, Verdict};

fn begin(kind: RecordKind) -> DeckEvent {
    DeckEvent::BeginGroup { kind }
}

fn end(kind: RecordKind) -> DeckEvent {
    DeckEvent::EndGroup { kind }
}

fn set(kind: RecordKind, keyword: &str, value: Value) -> DeckEvent {
    DeckEvent::SetField {
        kind,
        keyword: keyword.to_owned(),
        value,
    }
}

/// A representative optimization-under-uncertainty deck.
fn full_deck() -> Vec<DeckEvent> {
    use RecordKind::*;
    vec![
        begin(Strategy),
        set(Strategy, "single_method", Value::Flag),
        set(Strategy, "tabular_data", Value::Flag),
        end(Strategy),
        begin(Method),
        set(Method, "quasi_newton", Value::Flag),
        set(Method, "max_iterations", Value::Int(50)),
        set(Method, "convergence_tolerance", Value::Real(1.0e-6)),
        end(Method),
        begin(Variables),
        set(Variables, "continuous_design", Value::Int(2)),
        set(Variables, "cdv_initial_point", Value::RealList(vec![1.0, 2.0])),
        set(Variables, "cdv_lower_bounds", Value::RealList(vec![0.0, 0.0])),
        set(Variables, "cdv_upper_bounds", Value::RealList(vec![10.0, 10.0])),
        set(Variables, "normal_uncertain", Value::Int(1)),
        set(Variables, "nuv_means", Value::RealList(vec![100.0])),
        set(Variables, "nuv_std_deviations", Value::RealList(vec![10.0])),
        set(Variables, "lognormal_uncertain", Value::Int(1)),
        set(Variables, "lnuv_means", Value::RealList(vec![10.0])),
        set(Variables, "lnuv_std_deviations", Value::RealList(vec![2.0])),
        set(Variables, "discrete_design_set_int", Value::Int(1)),
        set(Variables, "ddsiv_set_values", Value::IntList(vec![2, 4, 8])),
        set(Variables, "ddsiv_initial_point", Value::IntList(vec![4])),
        end(Variables),
        begin(Interface),
        set(
            Interface,
            "analysis_drivers",
            Value::StrList(vec!["simulator".into()]),
        ),
        set(Interface, "asynchronous", Value::Flag),
        set(Interface, "evaluation_concurrency", Value::Int(4)),
        end(Interface),
        begin(Responses),
        set(Responses, "num_objective_functions", Value::Int(1)),
        set(
            Responses,
            "num_nonlinear_inequality_constraints",
            Value::Int(2),
        ),
        set(Responses, "numerical_gradients", Value::Flag),
        set(Responses, "no_hessians", Value::Flag),
        end(Responses),
        begin(Model),
        set(Model, "single", Value::Flag),
        end(Model),
    ]
}

#[test]
fn full_deck_is_accepted_and_defaulted() {
    let config = process_events(&full_deck()).unwrap();
    assert!(config.is_accepted(), "diags: {:?}", config.diagnostics());

    let vars = config.store().variables().next().unwrap();
    // normal then lognormal, in fixed kind order
    assert_eq!(vars.aggregates.continuous_aleatory.lower.len(), 2);
    assert_eq!(vars.aggregates.continuous_aleatory.lower[0], 70.0);
    assert_eq!(vars.aggregates.continuous_aleatory.upper[0], 130.0);
    assert_eq!(vars.aggregates.continuous_aleatory.lower[1], 0.0);
    assert!((vars.aggregates.continuous_aleatory.upper[1] - 16.0).abs() < 1e-12);
    assert_eq!(
        vars.aggregates.continuous_aleatory.labels,
        vec!["nuv_1", "lnuv_1"]
    );
    assert_eq!(vars.continuous_design.labels, vec!["cdv_1", "cdv_2"]);
    assert_eq!(vars.discrete_design_set_int.initial, vec![4]);

    let resp = config.store().responses().next().unwrap();
    assert_eq!(
        resp.labels,
        vec!["obj_fn_1", "nln_ineq_con_1", "nln_ineq_con_2"]
    );
    assert_eq!(resp.gradient_interval, "forward");

    let method = config.store().methods().next().unwrap();
    assert_eq!(method.method_name, "quasi_newton");

    let model = config.store().models().next().unwrap();
    assert_eq!(model.model_type, "single");
}

#[test]
fn problems_accumulate_across_records() {
    use RecordKind::*;
    let events = vec![
        begin(Variables),
        set(Variables, "continuous_design", Value::Int(1)),
        set(Variables, "cdv_lower_bounds", Value::RealList(vec![5.0])),
        set(Variables, "cdv_upper_bounds", Value::RealList(vec![2.0])),
        end(Variables),
        begin(Responses),
        set(Responses, "num_objective_functions", Value::Int(2)),
        set(
            Responses,
            "response_descriptors",
            Value::StrList(vec!["only_one".into()]),
        ),
        end(Responses),
    ];
    let config = process_events(&events).unwrap();

    // One squawk from the variables record, one from the responses record;
    // both surface in a single run.
    assert_eq!(config.verdict(), Verdict::Rejected { squawks: 2 });
    let recoverable: Vec<_> = config
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Recoverable)
        .collect();
    assert_eq!(recoverable.len(), 2);
}

#[test]
fn clamped_initial_point_is_advisory_only() {
    use RecordKind::*;
    let events = vec![
        begin(Variables),
        set(Variables, "continuous_design", Value::Int(1)),
        set(Variables, "cdv_initial_point", Value::RealList(vec![-5.0])),
        set(Variables, "cdv_lower_bounds", Value::RealList(vec![0.0])),
        set(Variables, "cdv_upper_bounds", Value::RealList(vec![10.0])),
        end(Variables),
    ];
    let config = process_events(&events).unwrap();

    assert!(config.is_accepted());
    let vars = config.store().variables().next().unwrap();
    assert_eq!(vars.continuous_design.initial, vec![0.0]);
    assert_eq!(config.diagnostics().len(), 1);
    assert_eq!(config.diagnostics()[0].severity, Severity::Advisory);
}

#[test]
fn unknown_keyword_aborts_without_a_configuration() {
    use RecordKind::*;
    let events = vec![
        begin(Method),
        set(Method, "warp_factor", Value::Int(9)),
    ];
    let err = process_events(&events).unwrap_err();
    assert!(err.to_string().contains("warp_factor"));
}

#[test]
fn guard_violation_aborts_immediately() {
    use RecordKind::*;
    let events = vec![
        begin(Method),
        set(Method, "quasi_newton", Value::Flag),
        set(Method, "convergence_tolerance", Value::Real(-1.0)),
    ];
    let err = process_events(&events).unwrap_err();
    assert!(err.to_string().contains("must be positive"));
}

#[test]
fn event_stream_round_trips_through_json() {
    let events = full_deck();
    let json = serde_json::to_string_pretty(&events).unwrap();
    let parsed: Vec<DeckEvent> = serde_json::from_str(&json).unwrap();
    let config = process_events(&parsed).unwrap();
    assert!(config.is_accepted());

    // The frozen configuration serializes for downstream consumers.
    let dumped = config.to_json_value();
    assert!(dumped["records"].is_array());
    assert_eq!(dumped["verdict"]["verdict"], "accepted");
}

#[test]
fn sibling_groups_interleave() {
    use RecordKind::*;
    let events = vec![
        begin(Variables),
        begin(Responses),
        set(Variables, "continuous_design", Value::Int(1)),
        set(Responses, "num_objective_functions", Value::Int(1)),
        end(Variables),
        end(Responses),
    ];
    let config = process_events(&events).unwrap();
    assert!(config.is_accepted());
    // completion order is preserved in the store
    let kinds: Vec<RecordKind> = config.store().records().iter().map(Record::kind).collect();
    assert_eq!(kinds, vec![RecordKind::Variables, RecordKind::Responses]);
}

#[test]
fn two_variables_records_default_independently() {
    use RecordKind::*;
    let events = vec![
        begin(Variables),
        set(Variables, "id_variables", Value::Str("v1".into())),
        set(Variables, "uniform_uncertain", Value::Int(1)),
        set(Variables, "uuv_lower_bounds", Value::RealList(vec![0.0])),
        set(Variables, "uuv_upper_bounds", Value::RealList(vec![4.0])),
        end(Variables),
        begin(Variables),
        set(Variables, "id_variables", Value::Str("v2".into())),
        set(Variables, "weibull_uncertain", Value::Int(1)),
        set(Variables, "wuv_alphas", Value::RealList(vec![2.0])),
        set(Variables, "wuv_betas", Value::RealList(vec![1.0])),
        end(Variables),
    ];
    let config = process_events(&events).unwrap();
    assert!(config.is_accepted());

    let all: Vec<_> = config.store().variables().collect();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, "v1");
    assert_eq!(all[0].uniform.initial, vec![2.0]);
    assert_eq!(all[1].id, "v2");
    assert_eq!(all[1].aggregates.continuous_aleatory.labels, vec!["wuv_1"]);
}
