use crate::cli::ProximityArgs;
use crate::commands::run_pipeline;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use chrono::Utc;
use geosalud_analysis::analyze_proximity;
use geosalud_core::config::LayeredConfig;
use geosalud_core::models::ProximityResult;
use geosalud_geo::BufferRadius;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CenterPayload {
    center_id: usize,
    name: String,
    code: String,
    latitude: f64,
    longitude: f64,
    hospitals_in_buffer: u32,
}

impl From<&ProximityResult> for CenterPayload {
    fn from(result: &ProximityResult) -> Self {
        Self {
            center_id: result.center_id,
            name: result.name.clone(),
            code: result.code.clone(),
            latitude: result.point.y(),
            longitude: result.point.x(),
            hospitals_in_buffer: result.hospitals_in_buffer,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProximityPayload {
    generated_at: String,
    department: String,
    buffer_km: f64,
    hospitals_in_department: usize,
    most_isolated: CenterPayload,
    most_concentrated: CenterPayload,
}

pub fn execute(args: ProximityArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let department = args
        .department
        .unwrap_or_else(|| config.department.value.clone());
    let radius = BufferRadius::from_km(args.buffer_km.unwrap_or(config.buffer_km.value));

    let run = run_pipeline(config, output)?;
    let analysis = analyze_proximity(&run.filtered.points, &run.centers, &department, radius)
        .with_context(|| format!("proximity analysis for '{}' failed", department))?;

    let Some(analysis) = analysis else {
        output.warning(format!(
            "No hospitals or population centers found for {}",
            department
        ));
        return Ok(());
    };

    if output.is_json() {
        return output.result(ProximityPayload {
            generated_at: Utc::now().to_rfc3339(),
            department,
            buffer_km: radius.km(),
            hospitals_in_department: analysis.hospitals.len(),
            most_isolated: CenterPayload::from(&analysis.most_isolated),
            most_concentrated: CenterPayload::from(&analysis.most_concentrated),
        });
    }

    output.section(format!(
        "Proximity analysis: {} ({} km buffer)",
        department,
        radius.km()
    ));
    output.kv("Hospitals in department", analysis.hospitals.len());

    output.section("Most isolated center");
    print_center(output, &analysis.most_isolated);

    output.section("Most concentrated center");
    print_center(output, &analysis.most_concentrated);

    output.success("proximity analysis complete");
    Ok(())
}

fn print_center(output: &OutputWriter, result: &ProximityResult) {
    output.kv("Name", &result.name);
    output.kv("Code", &result.code);
    output.kv("Hospitals in buffer", result.hospitals_in_buffer);
    output.kv(
        "Location",
        format!("({:.4}, {:.4})", result.point.y(), result.point.x()),
    );
}
