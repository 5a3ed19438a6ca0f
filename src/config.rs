use rusqlite::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    pub currency_symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    pub no_value_text: String,
    /// Monday first, seven entries.
    pub weekday_labels: Vec<String>,
    pub increase_fill: String,
    pub decrease_fill: String,
    /// Shade cells whose delta could not be computed with `decrease_fill`.
    pub shade_undefined: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            currency_symbol: "R$".into(),
            thousands_separator: ".".into(),
            decimal_separator: ",".into(),
            no_value_text: "-".into(),
            weekday_labels: vec![
                "Segunda-feira".into(),
                "Terça-feira".into(),
                "Quarta-feira".into(),
                "Quinta-feira".into(),
                "Sexta-feira".into(),
                "Sábado".into(),
                "Domingo".into(),
            ],
            increase_fill: "C6EFCE".into(),
            decrease_fill: "FFC7CE".into(),
            shade_undefined: false,
        }
    }
}

impl ReportConfig {
    /// Label for pivot row `row`; falls back to the default labels when the
    /// configured list is short.
    pub fn weekday_label(&self, row: usize) -> String {
        self.weekday_labels
            .get(row)
            .cloned()
            .or_else(|| ReportConfig::default().weekday_labels.get(row).cloned())
            .unwrap_or_default()
    }
}

pub fn get_config_from_db(conn: &Connection) -> Result<ReportConfig, rusqlite::Error> {
    let mut stmt = conn.prepare_cached("SELECT key, value FROM config")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut config = ReportConfig::default();

    for row in rows {
        let (key, value) = row?;
        match key.as_str() {
            "currency_symbol" => config.currency_symbol = value,
            "thousands_separator" => config.thousands_separator = value,
            "decimal_separator" => config.decimal_separator = value,
            "no_value_text" => config.no_value_text = value,
            "weekday_labels" => {
                if let Ok(v) = serde_json::from_str::<Vec<String>>(&value) {
                    if v.len() == 7 {
                        config.weekday_labels = v;
                    } else {
                        log::warn!("weekday_labels ignorado: {} rótulos em vez de 7", v.len());
                    }
                }
            }
            "increase_fill" => config.increase_fill = value,
            "decrease_fill" => config.decrease_fill = value,
            "shade_undefined" => config.shade_undefined = value == "1" || value == "true",
            _ => {}
        }
    }

    Ok(config)
}

pub fn update_config_in_db(conn: &Connection, config: &ReportConfig) -> Result<(), rusqlite::Error> {
    let pairs: Vec<(&str, String)> = vec![
        ("currency_symbol", config.currency_symbol.clone()),
        ("thousands_separator", config.thousands_separator.clone()),
        ("decimal_separator", config.decimal_separator.clone()),
        ("no_value_text", config.no_value_text.clone()),
        (
            "weekday_labels",
            serde_json::to_string(&config.weekday_labels).unwrap_or_default(),
        ),
        ("increase_fill", config.increase_fill.clone()),
        ("decrease_fill", config.decrease_fill.clone()),
        (
            "shade_undefined",
            if config.shade_undefined { "1" } else { "0" }.to_string(),
        ),
    ];

    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO config (key, value, updated_at) VALUES (?1, ?2, datetime('now'))",
    )?;

    for (key, value) in pairs {
        stmt.execute(rusqlite::params![key, value])?;
    }

    Ok(())
}
