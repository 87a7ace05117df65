//! Point tables on disk.
//!
//! A table holds float columns `x` and `y`, one row per vertex. The format
//! follows the extension: `.parquet` is Parquet, anything else is CSV with
//! a header row.

use anyhow::{Context, Result};
use geom_simd::{IntersectionHit, Polyline};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Csv,
    Parquet,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => Format::Parquet,
            _ => Format::Csv,
        }
    }
}

/// Read columns `x`, `y` as a polyline. Integer columns are widened.
pub fn read_points(path: &Path) -> Result<Polyline> {
    let lf = match Format::of(path) {
        Format::Parquet => LazyFrame::scan_parquet(path, ScanArgsParquet::default())
            .with_context(|| format!("scanning {}", path.display()))?,
        Format::Csv => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .finish()
            .with_context(|| format!("scanning {}", path.display()))?,
    };
    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x,y from {}", path.display()))?;
    let xs = float_column(&df, "x")?;
    let ys = float_column(&df, "y")?;
    Ok(Polyline::from_xy(xs, ys)?)
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    df.column(name)?
        .f64()?
        .into_iter()
        .collect::<Option<Vec<f64>>>()
        .with_context(|| format!("column '{name}' contains nulls"))
}

/// Write a polyline as columns `x`, `y`.
pub fn write_points(path: &Path, line: &Polyline) -> Result<()> {
    let mut df = df!(
        "x" => line.xs().to_vec(),
        "y" => line.ys().to_vec()
    )?;
    write_frame(path, &mut df)
}

/// Write polygon edge crossings, one row per hit.
pub fn write_hits(path: &Path, hits: &[IntersectionHit]) -> Result<()> {
    let mut df = df!(
        "edge_a" => hits.iter().map(|h| h.edge_a as u64).collect::<Vec<_>>(),
        "edge_b" => hits.iter().map(|h| h.edge_b as u64).collect::<Vec<_>>(),
        "t" => hits.iter().map(|h| h.hit.t).collect::<Vec<_>>(),
        "u" => hits.iter().map(|h| h.hit.u).collect::<Vec<_>>(),
        "x" => hits.iter().map(|h| h.hit.point.x).collect::<Vec<_>>(),
        "y" => hits.iter().map(|h| h.hit.point.y).collect::<Vec<_>>()
    )?;
    write_frame(path, &mut df)
}

fn write_frame(path: &Path, df: &mut DataFrame) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match Format::of(path) {
        Format::Parquet => {
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        Format::Csv => {
            CsvWriter::new(file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom_simd::Point;
    use tempfile::tempdir;

    fn sample() -> Polyline {
        Polyline::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(1.5, -2.25),
            Point::new(3.0, 4.0),
        ])
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::of(Path::new("a/b.parquet")), Format::Parquet);
        assert_eq!(Format::of(Path::new("a/b.PARQUET")), Format::Parquet);
        assert_eq!(Format::of(Path::new("a/b.csv")), Format::Csv);
        assert_eq!(Format::of(Path::new("a/b")), Format::Csv);
    }

    #[test]
    fn csv_points_survive_a_write_read_cycle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("line.csv");
        write_points(&path, &sample()).unwrap();
        assert_eq!(read_points(&path).unwrap(), sample());
    }

    #[test]
    fn parquet_points_survive_a_write_read_cycle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("line.parquet");
        write_points(&path, &sample()).unwrap();
        assert_eq!(read_points(&path).unwrap(), sample());
    }

    #[test]
    fn integer_columns_are_widened() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ints.csv");
        fs::write(&path, "x,y\n0,0\n2,1\n4,0\n").unwrap();
        let line = read_points(&path).unwrap();
        assert_eq!(line.point(1), Point::new(2.0, 1.0));
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "a,b\n1,2\n").unwrap();
        assert!(read_points(&path).is_err());
    }
}
