//! CSV point tables, hull polygons and surface samples via polars.
//!
//! Files hold percentages (`Comp1..Comp3` sum to 100); the library works in
//! fractions. Column names follow `mixdesign::table::HEADER`.

use anyhow::{bail, Context, Result};
use mixdesign::api::{MixturePoint, PointTable, SurfaceSample, HEADER};
use mixdesign::simplex::to_percent;
use nalgebra::DVector;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(df)
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let col = df
        .column(name)
        .with_context(|| format!("missing column {name}"))?
        .cast(&DataType::Float64)?;
    Ok(col.f64()?.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Read a `Comp1,Comp2,Comp3[,Score]` table; a missing score column means 0.
pub fn read_point_table(path: &Path) -> Result<PointTable> {
    let df = read_csv(path)?;
    let comps = HEADER[..3]
        .iter()
        .map(|name| f64_column(&df, name))
        .collect::<Result<Vec<_>>>()?;
    let scores = if df.get_column_names().iter().any(|n| n.to_string() == HEADER[3]) {
        f64_column(&df, HEADER[3])?
    } else {
        vec![0.0; df.height()]
    };
    let mut table = PointTable::new();
    for (row, score) in scores.into_iter().enumerate() {
        table
            .push_percent(comps[0][row], comps[1][row], comps[2][row], score)
            .with_context(|| format!("{} row {}", path.display(), row + 1))?;
    }
    tracing::debug!(path = %path.display(), rows = table.len(), "point table read");
    Ok(table)
}

pub fn write_point_table(path: &Path, table: &PointTable) -> Result<()> {
    let rows = table.percent_rows();
    let col = |i: usize| rows.iter().map(|r| r[i]).collect::<Vec<f64>>();
    let mut df = df!(
        HEADER[0] => col(0),
        HEADER[1] => col(1),
        HEADER[2] => col(2),
        HEADER[3] => col(3)
    )?;
    write_csv(path, &mut df)
}

/// Polygon vertices in percent, one per row, from every `Comp*` column in
/// file order (three or four components).
pub fn read_polygon(path: &Path) -> Result<Vec<MixturePoint>> {
    let df = read_csv(path)?;
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .filter(|n| n.starts_with("Comp"))
        .collect();
    if !(3..=4).contains(&names.len()) {
        bail!(
            "{}: expected 3 or 4 Comp columns, found {}",
            path.display(),
            names.len()
        );
    }
    let cols = names
        .iter()
        .map(|name| f64_column(&df, name))
        .collect::<Result<Vec<_>>>()?;
    Ok((0..df.height())
        .map(|row| DVector::from_iterator(cols.len(), cols.iter().map(|c| c[row])))
        .collect())
}

/// Surface samples as `Comp1..Comp3` (percent), planar `X`, `Y` and `Value`.
pub fn write_surface(path: &Path, samples: &[SurfaceSample]) -> Result<()> {
    let pct: Vec<_> = samples.iter().map(|s| to_percent(&s.point)).collect();
    let mut df = df!(
        HEADER[0] => pct.iter().map(|p| p.x).collect::<Vec<f64>>(),
        HEADER[1] => pct.iter().map(|p| p.y).collect::<Vec<f64>>(),
        HEADER[2] => pct.iter().map(|p| p.z).collect::<Vec<f64>>(),
        "X" => samples.iter().map(|s| s.planar.x).collect::<Vec<f64>>(),
        "Y" => samples.iter().map(|s| s.planar.y).collect::<Vec<f64>>(),
        "Value" => samples.iter().map(|s| s.value).collect::<Vec<f64>>()
    )?;
    write_csv(path, &mut df)
}

fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixdesign::api::{CentroidDesign, ExactLinearInterpolator};
    use mixdesign::surface::sample_surface;
    use nalgebra::vector;
    use tempfile::tempdir;

    #[test]
    fn point_table_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("points.csv");
        let mut table = PointTable::from_design(&CentroidDesign::points(3, 2).unwrap()).unwrap();
        table.set_score(6, 12.5).unwrap();
        write_point_table(&path, &table).unwrap();

        let back = read_point_table(&path).unwrap();
        assert_eq!(back.len(), 7);
        assert_eq!(back.scores()[6], 12.5);
        for (a, b) in table.points().iter().zip(back.points()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn score_column_is_optional_and_sums_are_checked() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        std::fs::write(&path, "Comp1,Comp2,Comp3\n20,30,50\n100,0,0\n").unwrap();
        let table = read_point_table(&path).unwrap();
        assert_eq!(table.scores(), vec![0.0, 0.0]);

        std::fs::write(&path, "Comp1,Comp2,Comp3,Score\n20,30,60,1\n").unwrap();
        let err = read_point_table(&path).unwrap_err();
        assert!(format!("{err:#}").contains("row 1"));
    }

    #[test]
    fn polygon_reads_all_comp_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hull.csv");
        std::fs::write(&path, "Comp1,Comp2,Comp3\n70,20,10\n20,70,10\n10,20,70\n").unwrap();
        let poly = read_polygon(&path).unwrap();
        assert_eq!(poly.len(), 3);
        assert_eq!(poly[1].len(), 3);
        assert_eq!(poly[1][1], 70.0);

        std::fs::write(&path, "Comp1,Comp2\n50,50\n").unwrap();
        assert!(read_polygon(&path).is_err());
    }

    #[test]
    fn surface_written_with_planar_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/surface.csv");
        let pts = vec![
            vector![1.0, 0.0, 0.0],
            vector![0.0, 1.0, 0.0],
            vector![0.0, 0.0, 1.0],
        ];
        let lin = ExactLinearInterpolator::new(&pts, &[1.0, 2.0, 3.0]).unwrap();
        let samples = sample_surface(&lin, 2).unwrap();
        write_surface(&path, &samples).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Comp1,Comp2,Comp3,X,Y,Value"));
        assert_eq!(text.lines().count(), 1 + 6);
    }
}
