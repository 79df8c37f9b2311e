pub mod magnitude;
pub mod table;
pub mod tranco;

pub use table::extract_table;
pub use tranco::{parse_tranco_csv, TrancoList};
