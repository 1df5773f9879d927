//! Output formatting module

use calc_core::calculations::footing::{
    CalculatorInputs, CalculatorResults, FootingOutcome, FootingVolumeInputs, FootingVolumeResult,
};
use calc_core::errors::{CalcError, CalcResult};
use calc_core::project::Project;
use calc_core::report::QuantityReport;
use calc_core::tables::LookupTables;
use serde::Serialize;

use crate::cli::OutputFormat;

fn print_json<T: Serialize + ?Sized>(value: &T) -> CalcResult<()> {
    let content = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;
    println!("{}", content);
    Ok(())
}

fn status_icon(ok: bool) -> &'static str {
    if ok {
        "[OK]"
    } else {
        "[INVALID]"
    }
}

fn results_table(inputs: &CalculatorInputs, results: &CalculatorResults) {
    println!("Building:          {} ({} floors, {:.1} m²)", inputs.building_type, inputs.floors, inputs.slab_area_m2);
    println!("Soil:              {}", inputs.soil_type);
    println!();
    println!("Blinding volume:   {:.3} m³", results.blinding_volume_m3);
    println!(
        "Loads:             D={:.2} + L={:.2} = {:.2} kN/m²",
        results.dead_load_kpa, results.live_load_kpa, results.total_loads_kpa
    );
    println!("Soil capacity:     {:.1} kN/m²", results.soil_capacity_kpa);
    println!("Load on footing:   {:.1} kN", results.total_load_on_footing_kn);
    println!("Footing area:      {:.4} m²", results.footing_area_m2);
    println!(
        "Footing ({}): {:.4} m x {:.4} m {}",
        inputs.footing_shape,
        results.calculated_footing_length_m,
        results.calculated_footing_width_m,
        status_icon(results.is_valid())
    );
}

fn volumes_table(volumes: &FootingVolumeResult) {
    if let Some(individual) = &volumes.individual_volumes_m3 {
        for (i, volume) in individual.iter().enumerate() {
            println!("  Footing {:>3}:     {:.3} m³", i + 1, volume);
        }
    }
    println!("Total volume:      {:.3} m³", volumes.total_volume_m3);
}

fn report_table(report: &QuantityReport) {
    println!("{:<26} {:>10} {:>10} {:>10} {:>12}", "Item", "Net m³", "Order m³", "Order yd³", "Cost");
    for line in &report.lines {
        let cost = line
            .cost
            .map(|c| format!("{:.2}", c))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<26} {:>10.3} {:>10.3} {:>10.3} {:>12}",
            line.description,
            line.net_m3.value(),
            line.order_m3.value(),
            line.order_yd3.value(),
            cost
        );
    }
    let total_cost = report
        .total_cost
        .map(|c| format!("{:.2} {}", c, report.currency))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:<26} {:>10.3} {:>10.3} {:>10} {:>12}",
        "Total",
        report.total_net_m3.value(),
        report.total_order_m3.value(),
        "",
        total_cost
    );
}

pub fn print_results(format: OutputFormat, inputs: &CalculatorInputs, results: &CalculatorResults) -> CalcResult<()> {
    match format {
        OutputFormat::Json => print_json(results),
        OutputFormat::Table => {
            println!("\nFooting Sizing");
            println!("==============");
            results_table(inputs, results);
            Ok(())
        }
    }
}

pub fn print_volumes(format: OutputFormat, volume: &FootingVolumeInputs, volumes: &FootingVolumeResult) -> CalcResult<()> {
    match format {
        OutputFormat::Json => print_json(volumes),
        OutputFormat::Table => {
            let (length, width) = volume.footing_plan();
            println!("\nFooting Volumes");
            println!("===============");
            println!("Footings:          {}", volume.number_of_footings);
            println!("Footing plan:      {:.2} m x {:.2} m", length.value(), width.value());
            volumes_table(volumes);
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct OutcomeJson<'a> {
    outcome: &'a FootingOutcome,
    report: &'a QuantityReport,
}

fn outcome_table(outcome: &FootingOutcome, report: &QuantityReport) {
    let r = &outcome.results;
    println!("\n{}", outcome.label);
    println!("{}", "=".repeat(outcome.label.chars().count().max(1)));
    println!("Load on footing:   {:.1} kN", r.total_load_on_footing_kn);
    println!("Footing area:      {:.4} m²", r.footing_area_m2);
    println!(
        "Footing size:      {:.4} m x {:.4} m {}",
        r.calculated_footing_length_m,
        r.calculated_footing_width_m,
        status_icon(r.is_valid())
    );
    println!("Footings:          {}", outcome.footing_count);
    volumes_table(&outcome.volumes);
    println!();
    report_table(report);
}

pub fn print_outcome(format: OutputFormat, outcome: &FootingOutcome, report: &QuantityReport) -> CalcResult<()> {
    match format {
        OutputFormat::Json => print_json(&OutcomeJson { outcome, report }),
        OutputFormat::Table => {
            outcome_table(outcome, report);
            Ok(())
        }
    }
}

pub fn print_project(
    format: OutputFormat,
    project: &Project,
    reports: &[(FootingOutcome, QuantityReport)],
) -> CalcResult<()> {
    match format {
        OutputFormat::Json => {
            let items: Vec<_> = reports
                .iter()
                .map(|(outcome, report)| OutcomeJson { outcome, report })
                .collect();
            print_json(&items)
        }
        OutputFormat::Table => {
            let meta = &project.meta;
            println!("Job {} - {} (engineer: {})", meta.job_id, meta.client, meta.engineer);
            println!("Modified: {}", meta.modified.format("%Y-%m-%d %H:%M UTC"));
            if reports.is_empty() {
                println!("\nNo calculations.");
            }
            for (outcome, report) in reports {
                outcome_table(outcome, report);
            }
            Ok(())
        }
    }
}

pub fn print_tables(format: OutputFormat, tables: &LookupTables) -> CalcResult<()> {
    match format {
        OutputFormat::Json => print_json(tables),
        OutputFormat::Table => {
            println!("\nBuilding Loads (kN/m²)");
            println!("======================");
            println!("{:<16} {:>8} {:>8} {:>8}", "Type", "Dead", "Live", "Total");
            for (key, loads) in tables.building.iter() {
                println!("{:<16} {:>8.2} {:>8.2} {:>8.2}", key, loads.dead, loads.live, loads.total());
            }

            println!("\nSoil Bearing Capacity (kN/m²)");
            println!("=============================");
            for (key, capacity) in tables.soil.iter() {
                println!("{:<16} {:>8.1}", key, capacity.value());
            }
            Ok(())
        }
    }
}
