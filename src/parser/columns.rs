use std::collections::HashMap;

use crate::error::AppError;

/// Colunas obrigatórias: a importação falha se alguma estiver ausente.
pub const REQUIRED: &[&str] = &["VENDA", "UN", "DATA", "TOTAL"];

/// Header names are compared after trimming and upper-casing.
pub fn normalize_header(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Maps normalized column names to their index in a CSV record.
pub struct ColumnMap {
    indices: HashMap<String, usize>,
    headers: Vec<String>,
}

impl ColumnMap {
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut indices = HashMap::new();
        let mut header_list = Vec::new();
        for (i, field) in headers.iter().enumerate() {
            let name = normalize_header(field);
            indices.entry(name.clone()).or_insert(i);
            header_list.push(name);
        }
        ColumnMap {
            indices,
            headers: header_list,
        }
    }

    pub fn get<'a>(&self, record: &'a csv::StringRecord, col: &str) -> Option<&'a str> {
        self.indices.get(col).and_then(|&i| record.get(i))
    }

    pub fn has(&self, col: &str) -> bool {
        self.indices.contains_key(col)
    }

    pub fn all_headers(&self) -> &[String] {
        &self.headers
    }
}

/// Returns the normalized header list, or `AppError::MissingColumns`.
pub fn validate_columns(col_map: &ColumnMap) -> Result<Vec<String>, AppError> {
    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|&&c| !col_map.has(c))
        .map(|c| c.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AppError::MissingColumns(missing));
    }

    Ok(col_map.all_headers().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_headers(cols: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(cols.to_vec())
    }

    #[test]
    fn test_headers_normalized() {
        let cm = ColumnMap::from_headers(&make_headers(&[" venda ", "Un", "data", "Total "]));
        assert!(cm.has("VENDA"));
        assert!(cm.has("UN"));
        assert!(cm.has("DATA"));
        assert!(cm.has("TOTAL"));
        assert_eq!(cm.all_headers(), &["VENDA", "UN", "DATA", "TOTAL"]);
    }

    #[test]
    fn test_get_by_normalized_name() {
        let cm = ColumnMap::from_headers(&make_headers(&["Venda", "Total"]));
        let record = csv::StringRecord::from(vec!["981", "12,50"]);
        assert_eq!(cm.get(&record, "VENDA"), Some("981"));
        assert_eq!(cm.get(&record, "TOTAL"), Some("12,50"));
        assert_eq!(cm.get(&record, "UN"), None);
    }

    #[test]
    fn test_validate_columns_ok() {
        let cm = ColumnMap::from_headers(&make_headers(&["VENDA", "UN", "DATA", "TOTAL", "PRODUTO"]));
        let present = validate_columns(&cm).unwrap();
        assert_eq!(present.len(), 5);
    }

    #[test]
    fn test_validate_columns_missing_required() {
        let cm = ColumnMap::from_headers(&make_headers(&["UN", "TOTAL"]));
        match validate_columns(&cm).unwrap_err() {
            AppError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["VENDA".to_string(), "DATA".to_string()]);
            }
            other => panic!("Expected MissingColumns error, got {:?}", other),
        }
    }
}
