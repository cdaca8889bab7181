// src/data_output/hdf5_io.rs

use hdf5::H5Type;
use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Where a dataset was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDataset {
    pub dataset: String,
    /// Absolute path of the file.
    pub path: PathBuf,
}

impl fmt::Display for SavedDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} created: {}", self.dataset, self.path.display())
    }
}

/// Write `data` verbatim as dataset `dataset` of a new HDF5 file.
///
/// An existing file at `path` is truncated.
pub fn save_hdf5<T, S, D>(
    data: &ArrayBase<S, D>,
    path: impl AsRef<Path>,
    dataset: &str,
) -> Result<SavedDataset>
where
    T: H5Type,
    S: Data<Elem = T>,
    D: Dimension,
{
    let path = path.as_ref();
    {
        let file = hdf5::File::create(path)?;
        file.new_dataset_builder()
            .with_data(data.view())
            .create(dataset)?;
    }
    let saved = SavedDataset {
        dataset: dataset.to_string(),
        path: fs::canonicalize(path)?,
    };
    log::info!("{saved}");
    Ok(saved)
}

/// Read dataset `dataset` of an HDF5 file as `f64`, whatever its stored type.
pub fn read_hdf5(path: impl AsRef<Path>, dataset: &str) -> Result<ArrayD<f64>> {
    let file = hdf5::File::open(path)?;
    Ok(file.dataset(dataset)?.read_dyn::<f64>()?)
}

/// Names of the datasets and groups at the root of an HDF5 file.
pub fn dataset_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let file = hdf5::File::open(path)?;
    Ok(file.member_names()?)
}


// src/data_output/hdf5_io.rs
