// ==========================================
// Bulk Label Importer - Core Enums
// ==========================================
// Canonical spreadsheet fields + import session stages
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CanonicalField - logical order attribute
// ==========================================
// A fixed destination-order attribute, independent of how the
// uploaded spreadsheet happens to name its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    // ===== Required =====
    ToName,
    ToStreet,
    ToCity,
    ToState,
    ToZip,
    ToCountry,

    // ===== Optional =====
    ToCompany,
    ToStreet2,
    Weight,
    Length,
    Width,
    Height,
    OrderId,
}

/// Required fields, in detection order.
pub const REQUIRED_FIELDS: [CanonicalField; 6] = [
    CanonicalField::ToName,
    CanonicalField::ToStreet,
    CanonicalField::ToCity,
    CanonicalField::ToState,
    CanonicalField::ToZip,
    CanonicalField::ToCountry,
];

/// Optional fields, in detection order (scanned after all required fields).
pub const OPTIONAL_FIELDS: [CanonicalField; 7] = [
    CanonicalField::ToCompany,
    CanonicalField::ToStreet2,
    CanonicalField::Weight,
    CanonicalField::Length,
    CanonicalField::Width,
    CanonicalField::Height,
    CanonicalField::OrderId,
];

impl CanonicalField {
    /// Header synonyms for heuristic column detection.
    ///
    /// Matching is case-insensitive substring containment: a header maps to
    /// this field when its lowercased, trimmed form contains any entry below.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::ToName => {
                &["name", "to name", "recipient name", "to_name", "recipient"]
            }
            CanonicalField::ToStreet => &[
                "street",
                "address",
                "street1",
                "street 1",
                "to street",
                "to_street",
                "address line 1",
            ],
            CanonicalField::ToCity => &["city", "to city", "to_city"],
            CanonicalField::ToState => &["state", "to state", "to_state", "province"],
            CanonicalField::ToZip => &[
                "zip",
                "zipcode",
                "zip code",
                "postal code",
                "postal",
                "to zip",
                "to_zip",
            ],
            CanonicalField::ToCountry => &["country", "to country", "to_country"],
            CanonicalField::ToCompany => &["company", "to company", "to_company"],
            CanonicalField::ToStreet2 => &[
                "street2",
                "street 2",
                "address line 2",
                "address2",
                "to street2",
                "to_street2",
            ],
            CanonicalField::Weight => &[
                "weight",
                "package weight",
                "weight (lbs)",
                "weight (oz)",
                "lbs",
                "oz",
                "weight_lbs",
                "weight_oz",
            ],
            CanonicalField::Length => &["length", "package length", "length (in)", "l"],
            CanonicalField::Width => &["width", "package width", "width (in)", "w"],
            CanonicalField::Height => &["height", "package height", "height (in)", "h"],
            CanonicalField::OrderId => {
                &["order id", "order_id", "order number", "order_number", "id"]
            }
        }
    }

    /// Whether the field must be mapped before rows can be submitted.
    pub fn is_required(&self) -> bool {
        REQUIRED_FIELDS.contains(self)
    }

    /// Logical name as exposed at the UI boundary (camelCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::ToName => "toName",
            CanonicalField::ToStreet => "toStreet",
            CanonicalField::ToCity => "toCity",
            CanonicalField::ToState => "toState",
            CanonicalField::ToZip => "toZip",
            CanonicalField::ToCountry => "toCountry",
            CanonicalField::ToCompany => "toCompany",
            CanonicalField::ToStreet2 => "toStreet2",
            CanonicalField::Weight => "weight",
            CanonicalField::Length => "length",
            CanonicalField::Width => "width",
            CanonicalField::Height => "height",
            CanonicalField::OrderId => "orderId",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// ImportStage - session state machine stages
// ==========================================
// Linear flow: Upload -> Map -> Review -> Processing -> Complete
// The only backward edge is an explicit reset to Upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStage {
    Upload,
    Map,
    Review,
    Processing,
    Complete,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImportStage::Upload => "upload",
            ImportStage::Map => "map",
            ImportStage::Review => "review",
            ImportStage::Processing => "processing",
            ImportStage::Complete => "complete",
        };
        f.write_str(s)
    }
}
