// src/data_output/text_io.rs

use csv::{ReaderBuilder, WriterBuilder};
use ndarray::{Array2, ArrayView2};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Image;

/// Format a sample the way NumPy's `savetxt` does by default (`%.18e`).
pub fn format_sample(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let formatted = format!("{value:.18e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => formatted,
    }
}

/// Write `image` as whitespace-delimited text, one line per row.
pub fn save_dat(image: &ArrayView2<f64>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_path(path)?;
    for row in image.rows() {
        writer.write_record(row.iter().map(|&v| format_sample(v)))?;
    }
    writer.flush()?;
    log::info!("Frame written to '{}'.", path.display());
    Ok(())
}

/// Read a whitespace-delimited numeric text file back into an image.
pub fn load_dat(path: impl AsRef<Path>) -> Result<Image> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut values = Vec::new();
    let mut cols: Option<usize> = None;
    let mut rows = 0;
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = index + 1;
        let mut count = 0;
        for field in record.iter().filter(|f| !f.is_empty()) {
            let value = field.parse::<f64>().map_err(|_| Error::ParseNumber {
                path: path.to_path_buf(),
                line,
                value: field.to_string(),
            })?;
            values.push(value);
            count += 1;
        }
        if count == 0 {
            continue;
        }
        match cols {
            None => cols = Some(count),
            Some(expected) if expected != count => {
                return Err(Error::RaggedRows {
                    path: path.to_path_buf(),
                    line,
                    found: count,
                    expected,
                })
            }
            _ => {}
        }
        rows += 1;
    }
    Ok(Array2::from_shape_vec((rows, cols.unwrap_or(0)), values)?)
}


// src/data_output/text_io.rs
