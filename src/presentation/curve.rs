use crate::application::models::{Curve, CurvePoint};
use crate::error::AppError;
use chrono::NaiveDate;
use prettytable::format;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Tabular view of a built curve: one row per node
pub struct CurveTable<'a> {
    curve: &'a Curve,
}

impl<'a> CurveTable<'a> {
    /// Wraps a curve for display
    pub fn new(curve: &'a Curve) -> Self {
        Self { curve }
    }
}

impl fmt::Display for CurveTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        table.add_row(Row::new(vec![
            Cell::new("DATE"),
            Cell::new("INSTRUMENT"),
            Cell::new("DISCOUNT FACTOR"),
            Cell::new("ZERO RATE"),
        ]));

        let instruments: HashMap<NaiveDate, &str> = self
            .curve
            .instruments()
            .iter()
            .map(|h| (h.pillar_date(), h.name()))
            .collect();

        for point in self.curve.points() {
            let instrument = if point.date == self.curve.settlement_date {
                "settlement"
            } else {
                instruments.get(&point.date).copied().unwrap_or("-")
            };
            table.add_row(Row::new(vec![
                Cell::new(&point.date.to_string()),
                Cell::new(instrument),
                Cell::new(&format!("{:.10}", point.discount_factor)),
                Cell::new(&format!("{:.6}%", point.zero_rate * 100.0)),
            ]));
        }

        writeln!(
            f,
            "{} ({}) built on {}, settling {}",
            self.curve.name, self.curve.kind, self.curve.curve_date, self.curve.settlement_date
        )?;
        write!(f, "{table}")
    }
}

/// Points of a curve as written by [`export_json`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurveExport {
    /// Curve name
    pub name: String,
    /// Date of the market data
    pub curve_date: NaiveDate,
    /// Reference date of the curve
    pub settlement_date: NaiveDate,
    /// Nodes of the curve
    pub points: Vec<CurvePoint>,
}

impl From<&Curve> for CurveExport {
    fn from(curve: &Curve) -> Self {
        Self {
            name: curve.name.clone(),
            curve_date: curve.curve_date,
            settlement_date: curve.settlement_date,
            points: curve.points(),
        }
    }
}

/// Writes `<dir>/<curve name>.csv`: a `,<name>` header, then one
/// `date,discount factor` row per node
pub fn export_csv(curve: &Curve, dir: impl AsRef<Path>) -> Result<PathBuf, AppError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.csv", curve.name));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["", curve.name.as_str()])?;
    for point in curve.points() {
        writer.write_record([point.date.to_string(), point.discount_factor.to_string()])?;
    }
    writer.flush()?;

    info!("Exported {} to {}", curve.name, path.display());
    Ok(path)
}

/// Writes `<dir>/<curve name>.json` holding a [`CurveExport`]
pub fn export_json(curve: &Curve, dir: impl AsRef<Path>) -> Result<PathBuf, AppError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", curve.name));

    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, &CurveExport::from(curve))?;
    writer.flush()?;

    info!("Exported {} to {}", curve.name, path.display());
    Ok(path)
}

/// Reads a file written by [`export_json`]
pub fn read_points_json(path: impl AsRef<Path>) -> Result<CurveExport, AppError> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    Ok(serde_json::from_reader(reader)?)
}
