// ==========================================
// Bulk Label Importer - Catalog Read Models
// ==========================================
// Saved from-addresses and label types, as returned by the catalog
// collaborator. Read-only here: the pipeline only uses them to pick
// the batch defaults (from-address + label type).
// ==========================================

use serde::{Deserialize, Serialize};

/// A saved origin address the user can pick as the batch default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FromAddress {
    pub id: String,
    pub name: String,
    pub street1: String,
    #[serde(default)]
    pub street2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "US".to_string()
}

/// Maximum package dimensions a label type accepts, in inches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// A purchasable label type (service) with its price and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelType {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// Maximum package weight in lbs.
    pub max_weight: f64,
    pub max_dimensions: MaxDimensions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_type_parses_camel_case() {
        let label_type: LabelType = serde_json::from_str(
            r#"{
                "id": "lt-1",
                "name": "Priority",
                "price": 7.99,
                "maxWeight": 70.0,
                "maxDimensions": {"length": 22.0, "width": 18.0, "height": 15.0}
            }"#,
        )
        .unwrap();

        assert_eq!(label_type.id, "lt-1");
        assert_eq!(label_type.max_weight, 70.0);
        assert_eq!(label_type.max_dimensions.length, 22.0);

        let value = serde_json::to_value(&label_type).unwrap();
        assert_eq!(value["maxWeight"], 70.0);
        assert_eq!(value["maxDimensions"]["height"], 15.0);
    }

    #[test]
    fn test_from_address_defaults_optional_fields() {
        let address: FromAddress = serde_json::from_str(
            r#"{
                "id": "fa-1",
                "name": "Warehouse",
                "street1": "1 Dock Rd",
                "city": "Austin",
                "state": "TX",
                "zip": "78701"
            }"#,
        )
        .unwrap();

        assert_eq!(address.street2, "");
        assert_eq!(address.country, "US");

        let value = serde_json::to_value(&address).unwrap();
        assert_eq!(value["street1"], "1 Dock Rd");
        assert_eq!(value["country"], "US");
    }
}
