use std::io::Cursor;
use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use calamine::{open_workbook_from_rs, Data, DataType, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::errors::{CoreResult, SpreadsheetError};
use crate::records::schema::whole_i64;
use crate::records::{FieldKind, FieldSpec};

/// Workbook rendering of record lists and parsing of uploaded workbooks.
#[derive(Clone, Debug, Default)]
pub struct SpreadsheetService {
    export_dir: Option<PathBuf>,
}

impl SpreadsheetService {
    pub fn new(export_dir: Option<PathBuf>) -> Self {
        Self { export_dir }
    }

    /// Base64 `.xlsx` with a header row of labels and one row per record.
    /// Also written to `<export_dir>/<table>.xlsx` when configured.
    pub async fn export(
        &self,
        table: &str,
        fields: &[FieldSpec],
        records: &[Value],
    ) -> CoreResult<String> {
        let buffer = build_workbook(table, fields, records)?;

        if let Some(dir) = &self.export_dir {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(SpreadsheetError::from)?;
            let path = dir.join(format!("{}.xlsx", table));
            tokio::fs::write(&path, &buffer)
                .await
                .map_err(SpreadsheetError::from)?;
            info!("Wrote export file {}", path.display());
        }

        info!("Exported {} {} rows", records.len(), table);
        Ok(STANDARD.encode(buffer))
    }

    /// Decode a base64 `.xlsx` and return its first sheet as JSON objects
    /// keyed by field name. Header cells may use the field name or label.
    pub fn parse(&self, fields: &[FieldSpec], encoded: &str) -> CoreResult<Vec<Map<String, Value>>> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(SpreadsheetError::from)?;
        Ok(read_rows(fields, &bytes)?)
    }
}

pub fn build_workbook(
    table: &str,
    fields: &[FieldSpec],
    records: &[Value],
) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(table))?;

    for (col_idx, spec) in fields.iter().enumerate() {
        worksheet.write_string_with_format(0, col_idx as u16, spec.label, &header)?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row = row_idx as u32 + 1;
        for (col_idx, spec) in fields.iter().enumerate() {
            let col = col_idx as u16;
            match record.get(spec.name) {
                Some(Value::String(value)) => {
                    worksheet.write_string(row, col, value)?;
                }
                Some(Value::Number(value)) => {
                    if let Some(number) = value.as_f64() {
                        worksheet.write_number(row, col, number)?;
                    }
                }
                Some(Value::Bool(value)) => {
                    worksheet.write_boolean(row, col, *value)?;
                }
                Some(Value::Array(items)) => {
                    let joined = items
                        .iter()
                        .map(|item| match item {
                            Value::String(value) => value.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    worksheet.write_string(row, col, &joined)?;
                }
                Some(Value::Null) | Some(Value::Object(_)) | None => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

pub fn read_rows(
    fields: &[FieldSpec],
    bytes: &[u8],
) -> Result<Vec<Map<String, Value>>, SpreadsheetError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::MissingSheet)??;

    if range.height() == 0 {
        return Err(SpreadsheetError::MissingHeader);
    }

    let columns: Vec<Option<&FieldSpec>> = (0..range.width())
        .map(|col_idx| match range.get((0, col_idx)) {
            Some(Data::String(header)) => match_field(fields, header),
            _ => None,
        })
        .collect();

    if columns.iter().all(Option::is_none) {
        return Err(SpreadsheetError::MissingHeader);
    }

    let mut rows = Vec::new();
    for row_idx in 1..range.height() {
        let mut row = Map::new();
        for (col_idx, spec) in columns.iter().enumerate() {
            let Some(spec) = spec else { continue };
            if let Some(value) = range.get((row_idx, col_idx)).and_then(|cell| cell_value(cell, spec)) {
                row.insert(spec.name.to_string(), value);
            }
        }

        if row.is_empty() {
            warn!("Skipping blank row {}", row_idx + 1);
            continue;
        }
        rows.push(row);
    }

    Ok(rows)
}

fn match_field<'a>(fields: &'a [FieldSpec], header: &str) -> Option<&'a FieldSpec> {
    let header = header.trim();
    fields.iter().find(|spec| {
        spec.name.eq_ignore_ascii_case(header) || spec.label.eq_ignore_ascii_case(header)
    })
}

/// Whole numbers typed into text columns (phone, IC numbers) read back
/// without the trailing `.0` Excel's float storage would add.
fn cell_value(cell: &Data, spec: &FieldSpec) -> Option<Value> {
    let textual = matches!(
        spec.kind,
        FieldKind::Text | FieldKind::Uuid | FieldKind::StringList
    );
    match cell {
        Data::Float(value) if textual && value.fract() == 0.0 => Some(
            whole_i64(*value)
                .map(|whole| Value::String(whole.to_string()))
                .unwrap_or_else(|| Value::from(*value)),
        ),
        Data::Int(value) if textual => Some(Value::String(value.to_string())),
        Data::String(value) if value.trim().is_empty() => None,
        Data::String(value) => Some(Value::String(value.clone())),
        Data::Int(value) => Some(Value::from(*value)),
        Data::Float(value) => Some(Value::from(*value)),
        Data::Bool(value) => Some(Value::Bool(*value)),
        Data::DateTime(_) => cell
            .as_date()
            .map(|date| Value::String(date.format("%Y-%m-%d").to_string())),
        Data::DateTimeIso(value) => Some(Value::String(value.clone())),
        Data::DurationIso(_) | Data::Error(_) | Data::Empty => None,
    }
}

/// Worksheet names are capped at 31 characters.
fn sheet_name(table: &str) -> String {
    table.chars().take(31).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::text("name", "name", "commodity name").required(),
        FieldSpec::float("price", "price", "price"),
        FieldSpec::list("tags", "tags", "tags"),
    ];

    #[test]
    fn test_workbook_reads_back_by_label_headers() {
        let records = vec![
            json!({ "name": "Padi", "price": 2.5, "tags": ["grain", "local"] }),
            json!({ "name": "Durian", "price": null }),
        ];

        let buffer = build_workbook("biosecurity_commodities", FIELDS, &records).unwrap();
        let rows = read_rows(FIELDS, &buffer).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some(&json!("Padi")));
        assert_eq!(rows[0].get("price"), Some(&json!(2.5)));
        assert_eq!(rows[0].get("tags"), Some(&json!("grain, local")));
        assert!(rows[1].get("price").is_none());
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let buffer = build_workbook("commodity_prices", FIELDS, &[]).unwrap();
        assert!(read_rows(FIELDS, &buffer).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_headers_rejected() {
        const OTHER: &[FieldSpec] = &[FieldSpec::text("market", "market", "market")];
        let buffer = build_workbook("commodity_prices", FIELDS, &[]).unwrap();
        assert!(matches!(
            read_rows(OTHER, &buffer),
            Err(SpreadsheetError::MissingHeader)
        ));
    }

    #[test]
    fn test_invalid_base64_is_a_validation_error() {
        let err = SpreadsheetService::default()
            .parse(FIELDS, "not base64 !!")
            .unwrap_err();
        assert_eq!(err.kind(), crate::errors::CoreErrorKind::Validation);
    }
}
