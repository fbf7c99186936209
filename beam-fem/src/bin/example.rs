//! Beam FEM Example - Reference beams
//!
//! A W-shape steel beam (E = 29e6 psi, I = 170 in⁴, L = 120 in) on two pins,
//! loaded three ways, and a solid timber cantilever.

use anyhow::Result;

use beam_fem::prelude::*;

fn reference_beam() -> beam_fem::analysis::BeamInputBuilder {
    BeamInput::builder(120.0, CrossSection::new(170.0).with_name("W-shape"))
        .material(Material::steel_psi())
        .support(Support::pinned(0.0))
        .support(Support::pinned(120.0))
}

fn print_results(title: &str, results: &AnalysisResults) {
    println!("=== {} ===\n", title);

    println!("Support Reactions:");
    for r in &results.reactions {
        println!(
            "  x={:>7.2}: F={:>14.3} lb, M={:>14.3} lb·in",
            r.position, r.force, r.moment
        );
    }

    let summary = &results.summary;
    println!("\nSummary:");
    if let Some(v) = summary.max_shear {
        println!("  Max shear:      {:>14.3} lb at {:.4} in", v.value, v.position);
    }
    if let Some(m) = summary.max_moment {
        println!("  Max moment:     {:>14.3} lb·in at {:.4} in", m.value, m.position);
    }
    if let Some(d) = summary.max_deflection {
        println!("  Max deflection: {:>14.6} in at {:.4} in", d.value, d.position);
    }
    println!(
        "  {} nodes, {} elements, {} DOFs\n",
        summary.node_count, summary.element_count, summary.dof_count
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let options = AnalysisOptions::default();

    let point = reference_beam()
        .concentrated_load(ConcentratedLoad::force(60.0, -80_000.0))
        .build();
    print_results("Central point load", &analyze(&point, &options)?);

    let moment = reference_beam()
        .concentrated_load(ConcentratedLoad::moment(60.0, -25_000_000.0))
        .build();
    print_results("Central moment", &analyze(&moment, &options)?);

    let uniform = reference_beam()
        .distributed_load(DistributedLoad::uniform(0.0, 120.0, -1000.0))
        .build();
    print_results("Full uniform load", &analyze(&uniform, &options)?);

    // 4x12 Douglas fir, 8 ft cantilever with a tip load
    let timber = BeamInput::builder(96.0, CrossSection::rectangular(3.5, 11.25))
        .material(Material::new(1.6e6, 0.3).with_name("Douglas fir"))
        .support(Support::fixed(0.0))
        .concentrated_load(ConcentratedLoad::force(96.0, -1_500.0))
        .build();
    print_results("Timber cantilever", &analyze(&timber, &options)?);

    Ok(())
}
