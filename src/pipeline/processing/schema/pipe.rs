use serde::Serialize;

use super::keywords::{DN, NOMINAL, NPS, OUTSIDE_DIAMETER, WEIGHT};
use super::{DimensionRecord, DimensionSchema};
use crate::constants::{DEFAULT_CATEGORY, PIPE_SOURCE_FILE_NAME, PIPE_STANDARD_NAME};
use crate::pipeline::processing::dedupe::FloatKey;
use crate::pipeline::processing::normalize::{Nps, RowView};
use crate::pipeline::processing::resolve::{HeaderRule, Matcher, KILOGRAM, MILLIMETRE};
use crate::types::TableKind;

/// Canonical pipe columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipeField {
    Nps,
    Dn,
    OdIn,
    OdMm,
    WallIn,
    WallMm,
    WeightLbFt,
    WeightKgM,
    Schedule,
}

const WALL: Matcher = Matcher::Any(&[Matcher::Contains("wall"), Matcher::Contains("thick")]);

/// Millimetre and kilogram rules come first; an unqualified quantity falls to
/// the imperial column.
static RULES: &[HeaderRule<PipeField>] = &[
    HeaderRule::new(PipeField::OdMm, Matcher::All(&[OUTSIDE_DIAMETER, MILLIMETRE])),
    HeaderRule::new(PipeField::OdIn, OUTSIDE_DIAMETER),
    HeaderRule::new(PipeField::WallMm, Matcher::All(&[WALL, MILLIMETRE])),
    HeaderRule::new(PipeField::WallIn, WALL),
    HeaderRule::new(PipeField::WeightKgM, Matcher::All(&[WEIGHT, KILOGRAM])),
    HeaderRule::new(PipeField::WeightLbFt, WEIGHT),
    HeaderRule::new(
        PipeField::Schedule,
        Matcher::Any(&[Matcher::Contains("sched"), Matcher::Word("sch")]),
    ),
    HeaderRule::new(PipeField::Nps, NPS),
    HeaderRule::new(PipeField::Dn, DN),
    HeaderRule::new(PipeField::Nps, NOMINAL),
];

/// Coarse wall tier from a schedule designation, case and space insensitive
pub fn pressure_series_from_schedule(schedule: &str) -> &'static str {
    let sch: String = schedule
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    match sch.as_str() {
        "STD" | "40" | "40S" => "STD",
        "XS" | "80" | "80S" => "XS",
        "XXS" => "XXS",
        _ => "",
    }
}

/// One row of `pipes_dimensions.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeRecord {
    pub standard: String,
    pub nps_inch: Option<f64>,
    pub dn_mm: Option<i64>,
    pub od_inch: Option<f64>,
    pub od_mm: Option<f64>,
    pub schedule: String,
    pub wall_thickness_inch: Option<f64>,
    pub wall_thickness_mm: Option<f64>,
    pub weight_lb_per_ft: Option<f64>,
    pub weight_kg_per_m: Option<f64>,
    pub pipe_category: String,
    pub pressure_series: String,
    pub nps_display: String,
    #[serde(rename = "b3610_table")]
    pub table: String,
    #[serde(rename = "b3610_page")]
    pub page: Option<u32>,
    pub source_file: String,
    pub is_active: bool,
}

impl DimensionRecord for PipeRecord {
    type Key = (Option<FloatKey>, String, Option<FloatKey>);

    fn natural_key(&self) -> Self::Key {
        (
            FloatKey::from_option(self.nps_inch),
            self.schedule.clone(),
            FloatKey::from_option(self.wall_thickness_inch),
        )
    }

    fn set_provenance(&mut self, table_label: String) {
        self.table = table_label;
        self.page = None;
    }
}

/// ASME B36.10M pipe dimension tables
#[derive(Debug, Clone)]
pub struct PipeSchema {
    pub standard: String,
    pub source_file: String,
    pub category: String,
}

impl PipeSchema {
    pub fn new(standard: String, source_file: String, category: String) -> Self {
        Self {
            standard,
            source_file,
            category,
        }
    }
}

impl Default for PipeSchema {
    fn default() -> Self {
        Self::new(
            PIPE_STANDARD_NAME.to_string(),
            PIPE_SOURCE_FILE_NAME.to_string(),
            DEFAULT_CATEGORY.to_string(),
        )
    }
}

impl DimensionSchema for PipeSchema {
    type Field = PipeField;
    type Record = PipeRecord;

    fn kind(&self) -> TableKind {
        TableKind::Pipe
    }

    fn rules(&self) -> &'static [HeaderRule<PipeField>] {
        RULES
    }

    fn anchor(&self) -> PipeField {
        PipeField::Nps
    }

    fn build(&self, row: &RowView<'_, PipeField>, nps: Nps) -> PipeRecord {
        let schedule = row.text(PipeField::Schedule).unwrap_or_default();
        let pressure_series = pressure_series_from_schedule(&schedule).to_string();

        PipeRecord {
            standard: self.standard.clone(),
            nps_inch: nps.inch,
            dn_mm: row.int(PipeField::Dn),
            od_inch: row.float(PipeField::OdIn),
            od_mm: row.float(PipeField::OdMm),
            schedule,
            wall_thickness_inch: row.float(PipeField::WallIn),
            wall_thickness_mm: row.float(PipeField::WallMm),
            weight_lb_per_ft: row.float(PipeField::WeightLbFt),
            weight_kg_per_m: row.float(PipeField::WeightKgM),
            pipe_category: self.category.clone(),
            pressure_series,
            nps_display: nps.display,
            table: String::new(),
            page: None,
            source_file: self.source_file.clone(),
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::processing::normalize::normalize_row;
    use crate::pipeline::processing::resolve::resolve_columns;
    use crate::types::Cell;

    fn cells(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::from(*v)).collect()
    }

    #[test]
    fn test_pressure_series_lookup() {
        assert_eq!(pressure_series_from_schedule("40S"), "STD");
        assert_eq!(pressure_series_from_schedule("std"), "STD");
        assert_eq!(pressure_series_from_schedule(" xs "), "XS");
        assert_eq!(pressure_series_from_schedule("8 0"), "XS");
        assert_eq!(pressure_series_from_schedule("XXS"), "XXS");
        assert_eq!(pressure_series_from_schedule("150"), "");
        assert_eq!(pressure_series_from_schedule(""), "");
    }

    #[test]
    fn test_inch_and_mm_variants_resolve_to_distinct_fields() {
        let header = cells(&[
            "NPS",
            "DN",
            "Outside Diameter (in)",
            "Outside Diameter (mm)",
            "Wall Thickness (in)",
            "Wall Thickness (mm)",
            "Weight (lb/ft)",
            "Weight (kg/m)",
            "Schedule",
        ]);
        let map = resolve_columns(&header, RULES);

        assert_eq!(map.get(PipeField::Nps), Some(0));
        assert_eq!(map.get(PipeField::Dn), Some(1));
        assert_eq!(map.get(PipeField::OdIn), Some(2));
        assert_eq!(map.get(PipeField::OdMm), Some(3));
        assert_eq!(map.get(PipeField::WallIn), Some(4));
        assert_eq!(map.get(PipeField::WallMm), Some(5));
        assert_eq!(map.get(PipeField::WeightLbFt), Some(6));
        assert_eq!(map.get(PipeField::WeightKgM), Some(7));
        assert_eq!(map.get(PipeField::Schedule), Some(8));
    }

    #[test]
    fn test_mm_column_first_does_not_steal_inch_slot() {
        let header = cells(&["NPS", "OD (mm)", "OD (in)", "Wall (mm)", "Wall (in)"]);
        let map = resolve_columns(&header, RULES);
        assert_eq!(map.get(PipeField::OdMm), Some(1));
        assert_eq!(map.get(PipeField::OdIn), Some(2));
        assert_eq!(map.get(PipeField::WallMm), Some(3));
        assert_eq!(map.get(PipeField::WallIn), Some(4));
    }

    #[test]
    fn test_merged_nps_dn_cell_keeps_nps() {
        let header = cells(&["NPS DN", "Outside Diameter (in)", "Wall (in)", "Schedule"]);
        let map = resolve_columns(&header, RULES);
        assert_eq!(map.get(PipeField::Nps), Some(0));
        assert_eq!(map.get(PipeField::Dn), None);

        let header = cells(&["Nominal Pipe Size (DN)", "DN", "Outside Diameter", "Wall"]);
        let map = resolve_columns(&header, RULES);
        assert_eq!(map.get(PipeField::Nps), Some(0));
        assert_eq!(map.get(PipeField::Dn), Some(1));
    }

    #[test]
    fn test_weight_class_column_is_not_a_weight() {
        let schema = PipeSchema::default();
        let header = cells(&["NPS", "OD (in)", "Wall (in)", "Weight Class", "Weight (lb/ft)"]);
        let map = resolve_columns(&header, schema.rules());
        assert_eq!(map.get(PipeField::WeightLbFt), Some(4));

        let record =
            normalize_row(&schema, &cells(&["4", "4.500", "0.237", "STD", "10.79"]), &map).unwrap();
        assert_eq!(record.weight_lb_per_ft, Some(10.79));
    }

    #[test]
    fn test_nominal_wall_is_not_nps() {
        let header = cells(&["Nominal Pipe Size", "Outside Diameter", "Nominal Wall Thickness", "Sch."]);
        let map = resolve_columns(&header, RULES);
        assert_eq!(map.get(PipeField::Nps), Some(0));
        assert_eq!(map.get(PipeField::WallIn), Some(2));
        assert_eq!(map.get(PipeField::Schedule), Some(3));
    }

    #[test]
    fn test_missing_schedule_gives_empty_series() {
        let schema = PipeSchema::default();
        let header = cells(&["NPS", "OD", "Wall", "Weight"]);
        let map = resolve_columns(&header, schema.rules());

        let record = normalize_row(&schema, &cells(&["6", "6.625", "0.280", "18.97"]), &map).unwrap();
        assert_eq!(record.schedule, "");
        assert_eq!(record.pressure_series, "");
        assert_eq!(record.weight_lb_per_ft, Some(18.97));
        assert_eq!(record.weight_kg_per_m, None);
        assert_eq!(record.wall_thickness_inch, Some(0.28));
    }

    #[test]
    fn test_row_without_nps_is_dropped() {
        let schema = PipeSchema::default();
        let header = cells(&["NPS", "OD", "Wall", "Schedule"]);
        let map = resolve_columns(&header, schema.rules());

        assert!(normalize_row(&schema, &cells(&["", "6.625", "0.280", "40"]), &map).is_none());
        assert!(normalize_row(&schema, &[], &map).is_none());
    }
}
