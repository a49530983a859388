pub mod csv_import;
pub mod file;
pub mod store;

pub use csv_import::{import_csv, parse_csv, ImportReport};
pub use file::{load_snapshot, save_snapshot, Snapshot};
pub use store::ItemStore;
