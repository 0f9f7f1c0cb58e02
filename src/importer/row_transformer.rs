// ==========================================
// Bulk Label Importer - Row Transformer / Validator
// ==========================================
// Stage 3: raw rows + frozen mapping -> MappedOrderItem list
// Defaults: weight 1 lb, dims 6 in, country US, order id BULK-{n}.
// Numeric coercion failures fall back to defaults by policy; only
// missing required address fields produce validation messages.
// ==========================================

use crate::domain::{CanonicalField, ColumnMapping, MappedOrderItem, RawRow};
use crate::importer::importer_trait::RowTransformer;
use tracing::debug;

/// Default package weight in lbs when the cell is missing or unparsable.
pub const DEFAULT_WEIGHT_LBS: f64 = 1.0;

/// Default package dimension in inches when the cell is missing or unparsable.
pub const DEFAULT_DIMENSION_IN: f64 = 6.0;

/// Default destination country when the cell is empty.
pub const DEFAULT_COUNTRY: &str = "US";

pub struct StandardRowTransformer;

impl RowTransformer for StandardRowTransformer {
    fn transform(&self, rows: &[RawRow], mapping: &ColumnMapping) -> Vec<MappedOrderItem> {
        let items: Vec<MappedOrderItem> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.transform_row(row, mapping, i))
            .collect();

        debug!(
            total = items.len(),
            valid = items.iter().filter(|i| i.is_submittable()).count(),
            "rows transformed"
        );
        items
    }
}

impl StandardRowTransformer {
    fn transform_row(
        &self,
        row: &RawRow,
        mapping: &ColumnMapping,
        index: usize,
    ) -> MappedOrderItem {
        // Header row occupies spreadsheet row 1, so data row i lives at i + 2.
        let row_number = index + 2;

        let to_name = self.read(row, mapping, CanonicalField::ToName);
        let to_company = self.read(row, mapping, CanonicalField::ToCompany);
        let to_street = self.read(row, mapping, CanonicalField::ToStreet);
        let to_street2 = self.read(row, mapping, CanonicalField::ToStreet2);
        let to_city = self.read(row, mapping, CanonicalField::ToCity);
        let to_state = self.read(row, mapping, CanonicalField::ToState);
        let to_zip = self.read(row, mapping, CanonicalField::ToZip);

        let mut to_country = self.read(row, mapping, CanonicalField::ToCountry);
        if to_country.is_empty() {
            to_country = DEFAULT_COUNTRY.to_string();
        }

        let weight = self.read_f64(row, mapping, CanonicalField::Weight, DEFAULT_WEIGHT_LBS);
        let length = self.read_f64(row, mapping, CanonicalField::Length, DEFAULT_DIMENSION_IN);
        let width = self.read_f64(row, mapping, CanonicalField::Width, DEFAULT_DIMENSION_IN);
        let height = self.read_f64(row, mapping, CanonicalField::Height, DEFAULT_DIMENSION_IN);

        let mut order_id = self.read(row, mapping, CanonicalField::OrderId);
        if order_id.is_empty() {
            order_id = format!("BULK-{}", index + 1);
        }

        // Fixed check order; all checks run so a row can carry several messages.
        let mut errors = Vec::new();
        if to_name.is_empty() {
            errors.push("Missing recipient name".to_string());
        }
        if to_street.is_empty() {
            errors.push("Missing street address".to_string());
        }
        if to_city.is_empty() {
            errors.push("Missing city".to_string());
        }
        if to_state.is_empty() {
            errors.push("Missing state".to_string());
        }
        if to_zip.is_empty() {
            errors.push("Missing zip code".to_string());
        }

        MappedOrderItem {
            row_number,
            to_name,
            to_company,
            to_street,
            to_street2,
            to_city,
            to_state,
            to_zip,
            to_country,
            weight,
            length,
            width,
            height,
            order_id,
            errors,
        }
    }

    /// Cell value for a mapped field, trimmed; empty when the field is
    /// unmapped or the cell is absent.
    fn read(&self, row: &RawRow, mapping: &ColumnMapping, field: CanonicalField) -> String {
        mapping
            .header_for(field)
            .and_then(|header| row.get(header))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Numeric cell with silent fallback to `default` on missing or
    /// unparsable input (policy choice, not an error condition).
    fn read_f64(
        &self,
        row: &RawRow,
        mapping: &ColumnMapping,
        field: CanonicalField,
        default: f64,
    ) -> f64 {
        let raw = self.read(row, mapping, field);
        if raw.is_empty() {
            return default;
        }
        raw.parse::<f64>().unwrap_or(default)
    }
}
