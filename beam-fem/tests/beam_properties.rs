use approx::{assert_abs_diff_eq, assert_relative_eq};
use beam_fem::loads::normalize_loads;
use beam_fem::prelude::*;

fn beam(length: f64) -> beam_fem::analysis::BeamInputBuilder {
    BeamInput::builder(length, CrossSection::new(170.0)).material(Material::new(29e6, 0.3))
}

#[test]
fn reactions_balance_applied_forces() {
    let input = beam(200.0)
        .support(Support::pinned(0.0))
        .support(Support::pinned(150.0))
        .concentrated_load(ConcentratedLoad::new(40.0, -5_000.0, 1_000.0))
        .concentrated_load(ConcentratedLoad::force(200.0, -2_000.0))
        .distributed_load(DistributedLoad::new(20.0, 120.0, -30.0, -80.0))
        .distributed_load(DistributedLoad::triangular(150.0, 200.0, -40.0))
        .build();
    let results = analyze(&input, &AnalysisOptions::default()).unwrap();

    let applied = -5_000.0 - 2_000.0 - 55.0 * 100.0 - 20.0 * 50.0;
    assert_relative_eq!(results.total_load(), applied, max_relative = 1e-9);
    assert_relative_eq!(results.total_reaction(), -applied, max_relative = 1e-6);
    assert!(results.report.consolidated);
}

#[test]
fn deflection_is_continuous_between_nodes() {
    let input = beam(120.0)
        .support(Support::fixed(0.0))
        .support(Support::pinned(90.0))
        .concentrated_load(ConcentratedLoad::force(45.0, -10_000.0))
        .concentrated_load(ConcentratedLoad::force(120.0, -3_000.0))
        .build();
    let ctx = RunContext::run(input, AnalysisOptions::default()).unwrap();

    for x in [10.0, 45.0, 67.3, 90.0, 104.2] {
        let left = ctx.deflection_at(x - 1e-7).unwrap();
        let right = ctx.deflection_at(x + 1e-7).unwrap();
        let at = ctx.deflection_at(x).unwrap();
        assert_abs_diff_eq!(left, right, epsilon = 1e-8);
        assert_abs_diff_eq!(left, at, epsilon = 1e-8);
    }
}

#[test]
fn shear_jumps_by_the_load_at_a_load_node() {
    let input = beam(120.0)
        .support(Support::pinned(0.0))
        .support(Support::pinned(120.0))
        .concentrated_load(ConcentratedLoad::force(30.0, -12_000.0))
        .build();
    let ctx = RunContext::run(input, AnalysisOptions::default()).unwrap();

    let v = ctx.shear_at(30.0).unwrap();
    assert!(v.is_node);
    assert_relative_eq!(v.difference, 12_000.0, max_relative = 1e-9);

    // Away from nodes there is a single value
    let v = ctx.shear_at(50.0).unwrap();
    assert!(!v.is_node);
    assert_eq!(v.left, v.right);

    let results = ctx.results().unwrap();
    let left = results.shear.value_at(30.0 - NODE_OFFSET, 5).unwrap();
    let right = results.shear.value_at(30.0 + NODE_OFFSET, 5).unwrap();
    assert_relative_eq!((right - left).abs(), 12_000.0, max_relative = 1e-9);
    assert!(results.shear.value_at(30.0, 5).is_none());
}

#[test]
fn normalizing_normalized_loads_changes_nothing() {
    let options = AnalysisOptions::default();
    let input = beam(120.0)
        .support(Support::pinned(0.0))
        .support(Support::pinned(60.0))
        .support(Support::pinned(120.0))
        .concentrated_load(ConcentratedLoad::force(0.0, -100.0))
        .concentrated_load(ConcentratedLoad::force(60.0, -500.0))
        .concentrated_load(ConcentratedLoad::force(80.0, -300.0))
        .concentrated_load(ConcentratedLoad::force(80.005, -300.0))
        .distributed_load(DistributedLoad::uniform(10.0, 50.0, -20.0))
        .build();
    let first = normalize_loads(&input, &options);

    let mut again = input.clone();
    again.concentrated_loads = first.loads.clone();
    again.distributed_loads.clear();
    let second = normalize_loads(&again, &options.with_combine_distance(0.0));

    assert_eq!(first.loads.len(), second.loads.len());
    for (a, b) in first.loads.iter().zip(&second.loads) {
        assert_relative_eq!(a.position, b.position, max_relative = 1e-12);
        assert_relative_eq!(a.force, b.force, max_relative = 1e-12);
        assert_eq!(a.moment, b.moment);
    }
    assert!(!second.report.offset_on_support);
    assert!(!second.report.merged_same_position);
    assert!(!second.report.merged_close_together);
}

#[test]
fn load_on_interior_support_shows_one_jump() {
    let input = beam(120.0)
        .support(Support::pinned(0.0))
        .support(Support::pinned(60.0))
        .support(Support::pinned(120.0))
        .concentrated_load(ConcentratedLoad::force(60.0, -1_000.0))
        .concentrated_load(ConcentratedLoad::force(30.0, -500.0))
        .build();
    let results = analyze(&input, &AnalysisOptions::default()).unwrap();

    // Split in two halves beside the support
    assert!(results.report.offset_on_support);
    let positions: Vec<f64> = results.loads_used.iter().map(|l| l.position).collect();
    assert_eq!(positions.len(), 3);
    assert_relative_eq!(positions[1], 60.0 - SUPPORT_OFFSET, epsilon = 1e-12);
    assert_relative_eq!(positions[2], 60.0 + SUPPORT_OFFSET, epsilon = 1e-12);

    // The halves go straight into the support
    let middle = results.reaction_at(60.0, 5).unwrap();
    // Elements only 2·SUPPORT_OFFSET long cost some precision in the reactions
    assert_relative_eq!(middle.force, 1_000.0 + 0.6875 * 500.0, max_relative = 1e-3);
    assert_relative_eq!(results.reactions[0].force, 0.40625 * 500.0, max_relative = 1e-3);
    assert_relative_eq!(results.reactions[2].force, -0.09375 * 500.0, max_relative = 1e-3);

    // Only the two points beside the support remain around it
    let near: Vec<PlotPoint> = results
        .shear
        .iter()
        .copied()
        .filter(|p| (p.position - 60.0).abs() < 0.5)
        .collect();
    assert_eq!(near.len(), 2);
    assert_relative_eq!(near[0].position, 60.0 - NODE_OFFSET, epsilon = 1e-9);
    assert_relative_eq!(near[1].position, 60.0 + NODE_OFFSET, epsilon = 1e-9);
    assert_relative_eq!(near[0].value, 296.875, max_relative = 1e-3);
    assert_relative_eq!(near[1].value, -46.875, max_relative = 1e-3);

    // Deflection keeps the support point only
    let near: Vec<PlotPoint> = results
        .deflection
        .iter()
        .copied()
        .filter(|p| (p.position - 60.0).abs() < 0.5)
        .collect();
    assert_eq!(near.len(), 1);
    assert_eq!(near[0].position, 60.0);
}

#[test]
fn load_on_end_support_moves_inward() {
    let input = beam(120.0)
        .support(Support::pinned(0.0))
        .support(Support::pinned(120.0))
        .concentrated_load(ConcentratedLoad::force(0.0, -1_000.0))
        .concentrated_load(ConcentratedLoad::force(60.0, -2_000.0))
        .build();
    let results = analyze(&input, &AnalysisOptions::default()).unwrap();

    assert_relative_eq!(results.loads_used[0].position, SUPPORT_OFFSET, epsilon = 1e-15);
    assert_relative_eq!(results.total_reaction(), 3_000.0, max_relative = 1e-3);
    assert_relative_eq!(
        results.reaction_at(0.0, 5).unwrap().force,
        1_000.0 + 1_000.0,
        max_relative = 1e-3
    );
}

fn assert_loads_clear_of_supports(results: &AnalysisResults, supports: &[f64]) {
    for load in &results.loads_used {
        for &s in supports {
            assert!(
                (load.position - s).abs() > NODE_OFFSET,
                "load at {} sits on support at {}",
                load.position,
                s
            );
        }
    }
}

#[test]
fn close_loads_merged_onto_interior_support_are_split_again() {
    let supports = [0.0, 5.0, 10.0];
    let input = beam(10.0)
        .support(Support::pinned(0.0))
        .support(Support::pinned(5.0))
        .support(Support::pinned(10.0))
        .concentrated_load(ConcentratedLoad::force(4.995, -10.0))
        .concentrated_load(ConcentratedLoad::force(5.005, -10.0))
        .build();
    let results = analyze(&input, &AnalysisOptions::default()).unwrap();

    assert!(results.report.merged_close_together);
    assert!(results.report.offset_on_support);
    assert_loads_clear_of_supports(&results, &supports);
    assert_relative_eq!(results.total_load(), -20.0, max_relative = 1e-12);
    assert_relative_eq!(results.total_reaction(), 20.0, max_relative = 1e-3);
    assert_relative_eq!(results.reaction_at(5.0, 5).unwrap().force, 20.0, max_relative = 1e-3);
}

#[test]
fn close_loads_merged_onto_end_support_move_inward() {
    let supports = [0.0, 10.0];
    // Opposite forces beside the left end have their centroid exactly at x = 0
    let input = beam(10.0)
        .support(Support::pinned(0.0))
        .support(Support::pinned(10.0))
        .concentrated_load(ConcentratedLoad::force(0.004, 10.0))
        .concentrated_load(ConcentratedLoad::force(0.008, -5.0))
        .concentrated_load(ConcentratedLoad::force(6.0, -20.0))
        .build();
    let results = analyze(&input, &AnalysisOptions::default()).unwrap();

    assert!(results.report.offset_on_support);
    assert_loads_clear_of_supports(&results, &supports);
    assert_eq!(results.loads_used.len(), 2);
    assert_relative_eq!(results.loads_used[0].position, SUPPORT_OFFSET, epsilon = 1e-15);
    assert_relative_eq!(results.total_load(), -15.0, max_relative = 1e-12);
    assert_relative_eq!(results.total_reaction(), 15.0, max_relative = 1e-3);
    assert_relative_eq!(results.reaction_at(10.0, 5).unwrap().force, 12.0, max_relative = 1e-3);
}

#[test]
fn unstable_beams_are_rejected() {
    let options = AnalysisOptions::default();

    let no_supports = beam(10.0)
        .concentrated_load(ConcentratedLoad::force(5.0, -1.0))
        .build();
    assert!(matches!(analyze(&no_supports, &options), Err(BeamError::Unstable(_))));

    let single_pin = beam(10.0)
        .support(Support::pinned(0.0))
        .concentrated_load(ConcentratedLoad::force(5.0, -1.0))
        .build();
    assert!(matches!(analyze(&single_pin, &options), Err(BeamError::Unstable(_))));

    // Two guides leave the vertical translation free
    let guided = beam(10.0)
        .support(Support::guided(0.0))
        .support(Support::guided(10.0))
        .concentrated_load(ConcentratedLoad::force(5.0, -1.0))
        .build();
    let err = analyze(&guided, &options).unwrap_err();
    assert!(err.is_instability());
}

#[test]
fn invalid_input_is_rejected() {
    let options = AnalysisOptions::default();
    let off_beam = beam(10.0)
        .support(Support::fixed(0.0))
        .concentrated_load(ConcentratedLoad::force(12.0, -1.0))
        .build();
    assert!(matches!(analyze(&off_beam, &options), Err(BeamError::InvalidInput(_))));

    let coarse = beam(10.0).support(Support::fixed(0.0)).build();
    let options = options.with_segment_length(20.0);
    assert!(matches!(analyze(&coarse, &options), Err(BeamError::InvalidInput(_))));
}

#[test]
fn results_serialize_as_plain_tables() {
    let input = beam(10.0)
        .support(Support::fixed(0.0))
        .concentrated_load(ConcentratedLoad::force(10.0, -100.0))
        .build();
    let results = analyze(&input, &AnalysisOptions::default()).unwrap();
    let json = serde_json::to_value(&results).unwrap();

    let shear = json["shear"].as_array().unwrap();
    assert_eq!(shear.len(), results.shear.len());
    assert_eq!(shear[0]["position"], 0.0);
    assert_eq!(json["reactions"][0]["force"], 100.0);

    let back: AnalysisResults = serde_json::from_value(json).unwrap();
    assert_eq!(back.reactions, results.reactions);
}
