// ==========================================
// Bulk Label Importer - File Parser Implementations
// ==========================================
// Stage 1: file bytes -> headers + raw rows
// Supports: CSV (.csv) / Excel (.xls, .xlsx, first sheet only)
// ==========================================

use crate::domain::{ParsedSheet, RawRow};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolerate ragged row lengths
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows: Vec<RawRow> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    // A single malformed record must not sink the upload.
                    warn!(row = row_idx + 2, error = %e, "skipping malformed CSV record");
                    warnings.push(format!("Row {}: {}", row_idx + 2, e));
                    continue;
                }
            };

            let mut row_map = RawRow::new();
            for (col_idx, header) in headers.iter().enumerate() {
                let value = record.get(col_idx).unwrap_or("").trim().to_string();
                row_map.insert(header.clone(), value);
            }

            // Drop rows where every cell is blank.
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row_map);
        }

        if rows.is_empty() {
            return if let Some(first) = warnings.into_iter().next() {
                Err(ImportError::CsvParse(first))
            } else {
                Err(ImportError::NoData)
            };
        }

        debug!(rows = rows.len(), warnings = warnings.len(), "CSV parsed");
        Ok(ParsedSheet {
            headers,
            rows,
            warnings,
        })
    }
}

// ==========================================
// Excel Parser (first worksheet only)
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_names = workbook.sheet_names();
        let first_sheet = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParse("workbook has no sheets".to_string()))?;

        let range = workbook.worksheet_range(&first_sheet)?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows.next().ok_or(ImportError::NoData)?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows: Vec<RawRow> = Vec::new();
        for data_row in sheet_rows {
            let mut row_map = RawRow::new();
            for (col_idx, header) in headers.iter().enumerate() {
                // Missing trailing cells become empty strings.
                let value = data_row
                    .get(col_idx)
                    .map(|cell| cell.to_string().trim().to_string())
                    .unwrap_or_default();
                row_map.insert(header.clone(), value);
            }

            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row_map);
        }

        if rows.is_empty() {
            return Err(ImportError::NoData);
        }

        debug!(sheet = %first_sheet, rows = rows.len(), "Excel sheet parsed");
        Ok(ParsedSheet {
            headers,
            rows,
            warnings: Vec::new(),
        })
    }
}

// ==========================================
// Universal parser (dispatch by extension)
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse(file_path),
            "xls" | "xlsx" => ExcelParser.parse(file_path),
            _ => Err(ImportError::UnsupportedFormat { extension: ext }),
        }
    }
}
