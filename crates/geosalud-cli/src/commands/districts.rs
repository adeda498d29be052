use crate::cli::DistrictsArgs;
use crate::commands::run_pipeline;
use crate::output::OutputWriter;
use anyhow::Result;
use chrono::Utc;
use geosalud_core::config::LayeredConfig;
use geosalud_core::models::DistrictWithCount;
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Tabled)]
struct DistrictRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Province")]
    province: String,
    #[tabled(rename = "District")]
    district: String,
    #[tabled(rename = "Hospitals")]
    hospitals: u32,
}

#[derive(Debug, Serialize)]
struct DistrictsPayload {
    generated_at: String,
    districts: Vec<DistrictRow>,
}

pub fn execute(args: DistrictsArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let run = run_pipeline(config, output)?;

    let mut rows = ranked_rows(&run.districts);
    if !args.all {
        rows.truncate(args.top);
    }

    if output.is_json() {
        return output.result(DistrictsPayload {
            generated_at: Utc::now().to_rfc3339(),
            districts: rows,
        });
    }

    output.section("Hospitals per district");
    output.table(rows);
    Ok(())
}

/// Rows sorted by hospital count descending, code ascending on ties.
fn ranked_rows(districts: &[DistrictWithCount]) -> Vec<DistrictRow> {
    let mut rows: Vec<DistrictRow> = districts
        .iter()
        .map(|d| DistrictRow {
            code: d.district.code.clone(),
            department: d.district.department.clone(),
            province: d.district.province.clone(),
            district: d.district.district.clone(),
            hospitals: d.hospital_count,
        })
        .collect();
    rows.sort_by(|a, b| b.hospitals.cmp(&a.hospitals).then_with(|| a.code.cmp(&b.code)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::MultiPolygon;
    use geosalud_core::models::DistrictPolygon;

    fn counted(code: &str, count: u32) -> DistrictWithCount {
        DistrictWithCount {
            district: DistrictPolygon {
                department: String::new(),
                province: String::new(),
                district: String::new(),
                code: code.to_string(),
                geometry: MultiPolygon(vec![]),
            },
            hospital_count: count,
        }
    }

    #[test]
    fn test_ranked_rows_order() {
        let rows = ranked_rows(&[counted("150101", 1), counted("080101", 4), counted("040101", 1)]);
        assert_eq!(rows[0].code, "080101");
        // Ties resolve by code
        assert_eq!(rows[1].code, "040101");
        assert_eq!(rows[2].code, "150101");
    }
}
