use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de entrada/saída: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Erro SQLite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Erro de serialização: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Erro ao gerar planilha: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Erro ZIP: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Colunas obrigatórias ausentes: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Arquivo vazio ou sem dados")]
    EmptyFile,

    #[error("Venda {sale_id} sem data válida")]
    MissingDate { sale_id: String },

    #[error("Mês inválido: {0}")]
    InvalidMonth(String),

    #[error("{0}")]
    Custom(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
