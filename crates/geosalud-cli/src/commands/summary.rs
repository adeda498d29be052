use crate::commands::run_pipeline;
use crate::output::OutputWriter;
use anyhow::Result;
use chrono::Utc;
use geosalud_analysis::summarize;
use geosalud_core::config::LayeredConfig;
use geosalud_core::models::SummaryStatistics;
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Serialize)]
struct SummaryPayload<'a> {
    generated_at: String,
    stats: &'a SummaryStatistics,
}

#[derive(Tabled)]
struct DepartmentRow {
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Hospitals")]
    hospitals: u32,
}

#[derive(Tabled)]
struct InstitutionRow {
    #[tabled(rename = "Institution")]
    institution: String,
    #[tabled(rename = "Hospitals")]
    hospitals: u32,
}

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let run = run_pipeline(config, output)?;
    let stats = summarize(&run.filtered.hospitals, &run.districts);

    if output.is_json() {
        return output.result(SummaryPayload {
            generated_at: Utc::now().to_rfc3339(),
            stats: &stats,
        });
    }

    output.section("Coverage");
    output.kv("Total hospitals", stats.total_hospitals);
    output.kv("Departments covered", stats.departments_covered);
    output.kv("Districts", stats.total_districts);
    output.kv("Districts with hospitals", stats.districts_with_hospitals);
    output.kv("Districts without hospitals", stats.districts_without_hospitals);
    output.kv(
        "Mean hospitals per district",
        format!("{:.2}", stats.avg_hospitals_per_district),
    );
    output.kv("Max hospitals in a district", stats.max_hospitals_district);

    output.section("Top departments");
    output.table(
        stats
            .top_departments
            .iter()
            .map(|d| DepartmentRow {
                department: d.department.clone(),
                hospitals: d.hospitals,
            })
            .collect(),
    );

    output.section("Institutions");
    output.table(
        stats
            .institutions
            .iter()
            .map(|i| InstitutionRow {
                institution: i.institution.to_string(),
                hospitals: i.hospitals,
            })
            .collect(),
    );

    output.success("summary complete");
    Ok(())
}
