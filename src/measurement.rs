// src/measurement.rs

//! Where frames come from.
//!
//! The beamline's measurement database is an external collaborator; the
//! tools only need to list a measurement's fields and pull one field as a
//! sequence of recorded events.

use ndarray::{ArrayD, Axis, Ix2, Ix3, Ix4};
use std::collections::HashMap;
#[cfg(feature = "hdf5")]
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::ImageStack;

pub trait MeasurementSource {
    /// Names of the data fields recorded for `uid`.
    fn fields(&self, uid: &str) -> Result<Vec<String>>;

    /// Every recorded event of `field`, each as frames x rows x columns.
    fn frames(&self, uid: &str, field: &str) -> Result<Vec<ImageStack>>;
}

/// Map-backed source for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    measurements: HashMap<String, HashMap<String, Vec<ImageStack>>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        uid: impl Into<String>,
        field: impl Into<String>,
        events: Vec<ImageStack>,
    ) {
        self.measurements
            .entry(uid.into())
            .or_default()
            .insert(field.into(), events);
    }

    fn measurement(&self, uid: &str) -> Result<&HashMap<String, Vec<ImageStack>>> {
        self.measurements
            .get(uid)
            .ok_or_else(|| Error::UnknownMeasurement {
                uid: uid.to_string(),
            })
    }
}

impl MeasurementSource for InMemorySource {
    fn fields(&self, uid: &str) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.measurement(uid)?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn frames(&self, uid: &str, field: &str) -> Result<Vec<ImageStack>> {
        self.measurement(uid)?
            .get(field)
            .cloned()
            .ok_or_else(|| Error::UnknownField {
                uid: uid.to_string(),
                field: field.to_string(),
            })
    }
}

/// Split a stored array into events.
///
/// 2-D data is one single-frame event, 3-D one event, 4-D one event per
/// leading index.
pub fn events_from_array(field: &str, data: ArrayD<f64>) -> Result<Vec<ImageStack>> {
    match data.ndim() {
        2 => {
            let frame = data.into_dimensionality::<Ix2>()?;
            Ok(vec![frame.insert_axis(Axis(0))])
        }
        3 => Ok(vec![data.into_dimensionality::<Ix3>()?]),
        4 => {
            let events = data.into_dimensionality::<Ix4>()?;
            Ok(events.outer_iter().map(|event| event.to_owned()).collect())
        }
        _ => Err(Error::UnsupportedShape {
            field: field.to_string(),
            shape: data.shape().to_vec(),
        }),
    }
}

/// Reads measurements exported as `<root>/<uid>.h5`, one root-level dataset
/// per field.
#[cfg(feature = "hdf5")]
#[derive(Debug, Clone)]
pub struct Hdf5Source {
    root: PathBuf,
}

#[cfg(feature = "hdf5")]
impl Hdf5Source {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Hdf5Source { root: root.into() }
    }

    pub fn path_for(&self, uid: &str) -> PathBuf {
        self.root.join(format!("{uid}.h5"))
    }

    fn existing_path(&self, uid: &str) -> Result<PathBuf> {
        let path = self.path_for(uid);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::UnknownMeasurement {
                uid: uid.to_string(),
            })
        }
    }
}

#[cfg(feature = "hdf5")]
impl MeasurementSource for Hdf5Source {
    fn fields(&self, uid: &str) -> Result<Vec<String>> {
        crate::data_output::hdf5_io::dataset_names(self.existing_path(uid)?)
    }

    fn frames(&self, uid: &str, field: &str) -> Result<Vec<ImageStack>> {
        let path = self.existing_path(uid)?;
        if !crate::data_output::hdf5_io::dataset_names(&path)?
            .iter()
            .any(|name| name == field)
        {
            return Err(Error::UnknownField {
                uid: uid.to_string(),
                field: field.to_string(),
            });
        }
        let data = crate::data_output::hdf5_io::read_hdf5(&path, field)?;
        log::debug!("Read {field} from {}: shape {:?}", path.display(), data.shape());
        events_from_array(field, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, ArrayD, IxDyn};

    #[test]
    fn test_in_memory_source_lookup() {
        let mut source = InMemorySource::new();
        source.insert("u1", "eiger4m_single_image", vec![Array3::zeros((2, 3, 3))]);
        source.insert("u1", "timestamps", vec![]);

        assert_eq!(
            source.fields("u1").unwrap(),
            vec!["eiger4m_single_image".to_string(), "timestamps".to_string()]
        );
        assert_eq!(source.frames("u1", "eiger4m_single_image").unwrap().len(), 1);
        assert!(matches!(
            source.frames("u2", "x"),
            Err(Error::UnknownMeasurement { .. })
        ));
        assert!(matches!(
            source.frames("u1", "eiger1m"),
            Err(Error::UnknownField { .. })
        ));
    }

    #[test]
    fn test_events_from_array_shapes() {
        let two = ArrayD::<f64>::zeros(IxDyn(&[4, 5]));
        let events = events_from_array("f", two).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].dim(), (1, 4, 5));

        let three = ArrayD::<f64>::zeros(IxDyn(&[3, 4, 5]));
        assert_eq!(events_from_array("f", three).unwrap()[0].dim(), (3, 4, 5));

        let four = ArrayD::<f64>::zeros(IxDyn(&[2, 3, 4, 5]));
        let events = events_from_array("f", four).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].dim(), (3, 4, 5));

        let one = ArrayD::<f64>::zeros(IxDyn(&[7]));
        assert!(matches!(
            events_from_array("f", one),
            Err(Error::UnsupportedShape { .. })
        ));
    }

    #[cfg(feature = "hdf5")]
    #[test]
    fn test_hdf5_source_reads_saved_stack() {
        use crate::data_output::hdf5_io::save_hdf5;

        let dir = tempfile::tempdir().unwrap();
        let stack = Array3::from_shape_fn((2, 3, 4), |(f, r, c)| (f * 100 + r * 10 + c) as f64);
        save_hdf5(&stack, dir.path().join("scan1.h5"), "eiger4m_single_image").unwrap();

        let source = Hdf5Source::new(dir.path());
        assert_eq!(source.fields("scan1").unwrap(), vec!["eiger4m_single_image"]);
        let events = source.frames("scan1", "eiger4m_single_image").unwrap();
        assert_eq!(events, vec![stack]);
        assert!(matches!(
            source.frames("scan1", "other"),
            Err(Error::UnknownField { .. })
        ));
        assert!(matches!(
            source.fields("missing"),
            Err(Error::UnknownMeasurement { .. })
        ));
    }
}

// src/measurement.rs
