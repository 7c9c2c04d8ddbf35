/// Curve tables and file exports
pub mod curve;

pub use curve::{CurveExport, CurveTable, export_csv, export_json, read_points_json};
