//! Schema descriptors. Each dimension kind supplies its field dictionary, the
//! ordered header rules, its record shape and the defaults stamped on it; the
//! pipeline stages are generic over these traits.

pub mod flange;
pub mod pipe;

use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

use super::normalize::{Nps, RowView};
use super::resolve::HeaderRule;
use crate::types::TableKind;

pub use flange::{FlangeContext, FlangeField, FlangeRecord, FlangeSchema};
pub use pipe::{pressure_series_from_schedule, PipeField, PipeRecord, PipeSchema};

/// An output row produced by row normalization
pub trait DimensionRecord: Serialize + Clone + Debug {
    /// Natural key used for deduplication; `None` components compare equal
    type Key: Eq + Hash;

    fn natural_key(&self) -> Self::Key;

    /// Attach the table label (e.g. `Table_3`). The page stays null because the
    /// extractor's page numbers are not trusted for provenance.
    fn set_provenance(&mut self, table_label: String);
}

/// Describes one dimension table family end to end
pub trait DimensionSchema {
    type Field: Copy + Eq + Hash + Debug + 'static;
    type Record: DimensionRecord;

    fn kind(&self) -> TableKind;

    /// Ordered header rules; the first matching rule claims a column
    fn rules(&self) -> &'static [HeaderRule<Self::Field>];

    /// Mandatory field; rows without it are dropped
    fn anchor(&self) -> Self::Field;

    /// Build a record from a row whose anchor is present
    fn build(&self, row: &RowView<'_, Self::Field>, nps: Nps) -> Self::Record;
}

// Keyword groups shared by both schemas
pub(crate) mod keywords {
    use crate::pipeline::processing::resolve::Matcher;

    /// Explicit NPS labels; checked before DN so merged `NPS DN` cells keep the anchor
    pub const NPS: Matcher = Matcher::Any(&[Matcher::Word("nps"), Matcher::Contains("nominal pipe size")]);
    /// Bare `nominal`, tried after every other rule
    pub const NOMINAL: Matcher = Matcher::Contains("nominal");
    pub const DN: Matcher = Matcher::Any(&[Matcher::StartsWith("dn"), Matcher::Word("dn")]);
    pub const OUTSIDE_DIAMETER: Matcher = Matcher::Any(&[
        Matcher::Contains("outside"),
        Matcher::Word("od"),
        Matcher::Contains("o.d"),
    ]);
    /// Weight quantities; "Weight Class" holds STD/XS designations, not a weight
    pub const WEIGHT: Matcher = Matcher::All(&[
        Matcher::Any(&[
            Matcher::Contains("weight"),
            Matcher::Word("wt"),
            Matcher::Contains("mass"),
        ]),
        Matcher::Not(&Matcher::Word("class")),
    ]);
}
