pub mod columns;
pub mod deserializers;
pub mod pipeline;
pub mod types;

pub use pipeline::{detect_delimiter, parse_csv, parse_csv_reader, ParseOutput};
pub use types::{ParseWarning, SaleRaw};
