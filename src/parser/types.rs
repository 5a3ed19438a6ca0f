use serde::Serialize;

/// One CSV line, column values untouched.
#[derive(Debug, Clone, Default)]
pub struct SaleRaw {
    pub venda: Option<String>,
    pub un: Option<String>,
    pub data: Option<String>,
    pub total: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    pub line: usize,
    pub message: String,
}
