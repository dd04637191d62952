use serde::{Deserialize, Serialize};

use super::keywords::{DN, NOMINAL, NPS, OUTSIDE_DIAMETER, WEIGHT};
use super::{DimensionRecord, DimensionSchema};
use crate::constants::{
    DEFAULT_CATEGORY, DEFAULT_FLANGE_FACING, DEFAULT_FLANGE_TYPE, FLANGE_SOURCE_FILE_NAME,
    FLANGE_STANDARD_NAME,
};
use crate::pipeline::processing::dedupe::FloatKey;
use crate::pipeline::processing::normalize::{Nps, RowView};
use crate::pipeline::processing::resolve::{HeaderRule, Matcher, KILOGRAM, NOT_MILLIMETRE};
use crate::types::TableKind;

/// Canonical flange columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlangeField {
    Nps,
    Dn,
    Od,
    Thickness,
    BoltCircle,
    BoltHoleDia,
    NumBolts,
    BoltSize,
    Bore,
    HubDia,
    HubLen,
    Weight,
}

/// Flange dimensions are inch-only; millimetre columns stay unresolved.
static RULES: &[HeaderRule<FlangeField>] = &[
    HeaderRule::new(
        FlangeField::NumBolts,
        Matcher::All(&[
            Matcher::Contains("bolt"),
            Matcher::Any(&[
                Matcher::Contains("number"),
                Matcher::Word("no"),
                Matcher::Contains("qty"),
                Matcher::Contains("quantity"),
            ]),
        ]),
    ),
    HeaderRule::new(
        FlangeField::BoltCircle,
        Matcher::All(&[
            Matcher::Any(&[
                Matcher::Contains("bolt circle"),
                Matcher::Word("bc"),
                Matcher::Contains("b.c"),
            ]),
            NOT_MILLIMETRE,
        ]),
    ),
    HeaderRule::new(
        FlangeField::BoltHoleDia,
        Matcher::All(&[
            Matcher::Any(&[
                Matcher::Contains("bolt hole"),
                Matcher::All(&[Matcher::Contains("hole"), Matcher::Contains("dia")]),
                Matcher::All(&[Matcher::Contains("bolt"), Matcher::Contains("dia")]),
            ]),
            NOT_MILLIMETRE,
        ]),
    ),
    HeaderRule::new(
        FlangeField::BoltSize,
        Matcher::All(&[Matcher::Contains("bolt"), Matcher::Contains("size")]),
    ),
    HeaderRule::new(
        FlangeField::HubDia,
        Matcher::All(&[Matcher::Contains("hub"), Matcher::Contains("dia"), NOT_MILLIMETRE]),
    ),
    HeaderRule::new(
        FlangeField::HubLen,
        Matcher::All(&[Matcher::Contains("hub"), Matcher::Contains("len"), NOT_MILLIMETRE]),
    ),
    HeaderRule::new(FlangeField::Weight, Matcher::All(&[WEIGHT, KILOGRAM])),
    HeaderRule::new(FlangeField::Od, Matcher::All(&[OUTSIDE_DIAMETER, NOT_MILLIMETRE])),
    HeaderRule::new(
        FlangeField::Thickness,
        Matcher::All(&[Matcher::Contains("thick"), NOT_MILLIMETRE]),
    ),
    HeaderRule::new(
        FlangeField::Bore,
        Matcher::All(&[Matcher::Contains("bore"), NOT_MILLIMETRE]),
    ),
    HeaderRule::new(FlangeField::Nps, NPS),
    HeaderRule::new(FlangeField::Dn, DN),
    HeaderRule::new(FlangeField::Nps, NOMINAL),
];

/// Rating class, type and facing for a batch; tables do not encode them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlangeContext {
    pub rating_class: Option<i64>,
    pub flange_type: Option<String>,
    pub facing: Option<String>,
}

/// One row of `flanges_dimensions.csv`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlangeRecord {
    pub standard: String,
    pub nps_inch: Option<f64>,
    pub dn_mm: Option<i64>,
    pub rating_class: Option<i64>,
    #[serde(rename = "type")]
    pub flange_type: String,
    pub facing: String,
    pub bore_inch: Option<f64>,
    pub od_inch: Option<f64>,
    pub thickness_inch: Option<f64>,
    pub hub_diameter_inch: Option<f64>,
    pub hub_length_inch: Option<f64>,
    pub bolt_circle_inch: Option<f64>,
    pub bolt_hole_diameter_inch: Option<f64>,
    pub number_of_bolts: Option<i64>,
    /// Left as text; sizes are written as fractions like `5/8`
    pub bolt_size_inch: Option<String>,
    pub weight_kg: Option<f64>,
    pub flange_category: String,
    pub nps_display: String,
    #[serde(rename = "b165_table")]
    pub table: String,
    #[serde(rename = "b165_page")]
    pub page: Option<u32>,
    pub source_file: String,
    pub is_active: bool,
}

impl DimensionRecord for FlangeRecord {
    type Key = (Option<FloatKey>, Option<i64>, String, String);

    fn natural_key(&self) -> Self::Key {
        (
            FloatKey::from_option(self.nps_inch),
            self.rating_class,
            self.flange_type.clone(),
            self.facing.clone(),
        )
    }

    fn set_provenance(&mut self, table_label: String) {
        self.table = table_label;
        self.page = None;
    }
}

/// ASME B16.5 flange dimension tables
#[derive(Debug, Clone)]
pub struct FlangeSchema {
    pub standard: String,
    pub source_file: String,
    pub category: String,
    pub context: FlangeContext,
}

impl FlangeSchema {
    pub fn new(standard: String, source_file: String, category: String, context: FlangeContext) -> Self {
        Self {
            standard,
            source_file,
            category,
            context,
        }
    }
}

impl Default for FlangeSchema {
    fn default() -> Self {
        Self::new(
            FLANGE_STANDARD_NAME.to_string(),
            FLANGE_SOURCE_FILE_NAME.to_string(),
            DEFAULT_CATEGORY.to_string(),
            FlangeContext::default(),
        )
    }
}

impl DimensionSchema for FlangeSchema {
    type Field = FlangeField;
    type Record = FlangeRecord;

    fn kind(&self) -> TableKind {
        TableKind::Flange
    }

    fn rules(&self) -> &'static [HeaderRule<FlangeField>] {
        RULES
    }

    fn anchor(&self) -> FlangeField {
        FlangeField::Nps
    }

    fn build(&self, row: &RowView<'_, FlangeField>, nps: Nps) -> FlangeRecord {
        let flange_type = self
            .context
            .flange_type
            .clone()
            .unwrap_or_else(|| DEFAULT_FLANGE_TYPE.to_string());
        let facing = self
            .context
            .facing
            .clone()
            .unwrap_or_else(|| DEFAULT_FLANGE_FACING.to_string());

        FlangeRecord {
            standard: self.standard.clone(),
            nps_inch: nps.inch,
            dn_mm: row.int(FlangeField::Dn),
            rating_class: self.context.rating_class,
            flange_type,
            facing,
            bore_inch: row.float(FlangeField::Bore),
            od_inch: row.float(FlangeField::Od),
            thickness_inch: row.float(FlangeField::Thickness),
            hub_diameter_inch: row.float(FlangeField::HubDia),
            hub_length_inch: row.float(FlangeField::HubLen),
            bolt_circle_inch: row.float(FlangeField::BoltCircle),
            bolt_hole_diameter_inch: row.float(FlangeField::BoltHoleDia),
            number_of_bolts: row.int(FlangeField::NumBolts),
            bolt_size_inch: row.text(FlangeField::BoltSize),
            weight_kg: row.float(FlangeField::Weight),
            flange_category: self.category.clone(),
            nps_display: nps.display,
            table: String::new(),
            page: None,
            source_file: self.source_file.clone(),
            is_active: true,
        }
    }
}
