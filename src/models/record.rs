//! Company record extracted from a funding table row.

use serde::{Deserialize, Serialize};

/// Field names in table column order.
pub const RECORD_FIELDS: [&str; 7] = [
    "name",
    "site",
    "industry",
    "country",
    "fundingAmount",
    "fundingType",
    "fundingDate",
];

/// One row of a funding table.
///
/// Fields are assigned by column position, not by header text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    /// Company name
    pub name: String,

    /// Company website
    pub site: String,

    pub industry: String,

    pub country: String,

    /// Amount as printed on the page (e.g. "$2.5M")
    pub funding_amount: String,

    /// Round type (e.g. "Seed", "Series A")
    pub funding_type: String,

    /// Date as printed on the page
    pub funding_date: String,
}

impl CompanyRecord {
    /// Number of cells a row must provide.
    pub const FIELD_COUNT: usize = RECORD_FIELDS.len();

    /// Build a record from ordered cell texts, trimming each value.
    ///
    /// Returns `None` when fewer than [`Self::FIELD_COUNT`] cells are given.
    /// Cells past the seventh are ignored.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Option<Self> {
        if cells.len() < Self::FIELD_COUNT {
            return None;
        }
        let cell = |i: usize| cells[i].as_ref().trim().to_string();

        Some(Self {
            name: cell(0),
            site: cell(1),
            industry: cell(2),
            country: cell(3),
            funding_amount: cell(4),
            funding_type: cell(5),
            funding_date: cell(6),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells() -> Vec<&'static str> {
        vec![
            " Acme ",
            "acme.io",
            "Fintech",
            "Germany",
            "$2M",
            "Seed",
            "  March 2024\n",
        ]
    }

    #[test]
    fn test_from_cells_trims_by_position() {
        let record = CompanyRecord::from_cells(&cells()).unwrap();
        assert_eq!(record.name, "Acme");
        assert_eq!(record.country, "Germany");
        assert_eq!(record.funding_date, "March 2024");
    }

    #[test]
    fn test_from_cells_rejects_short_row() {
        let short = &cells()[..6];
        assert!(CompanyRecord::from_cells(short).is_none());
        assert!(CompanyRecord::from_cells::<&str>(&[]).is_none());
    }

    #[test]
    fn test_from_cells_ignores_extra_cells() {
        let mut extra = cells();
        extra.push("ignored");
        let record = CompanyRecord::from_cells(&extra).unwrap();
        assert_eq!(record.funding_type, "Seed");
    }

    #[test]
    fn test_serializes_camel_case_fields() {
        let record = CompanyRecord::from_cells(&cells()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        let mut expected = RECORD_FIELDS.to_vec();
        keys.sort_unstable();
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(object["fundingAmount"], "$2M");
    }
}
