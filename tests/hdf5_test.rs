// tests/hdf5_test.rs

#![cfg(feature = "hdf5")]

use ndarray::{array, Array3, Ix2};

use srw_image_tools::data_output::hdf5_io::read_hdf5;
use srw_image_tools::{save_hdf5, Hdf5Source, MeasurementSource};

#[test]
fn test_two_by_two_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.h5");
    let data = array![[1.0, 2.0], [3.0, 4.0]];

    let saved = save_hdf5(&data, &path, "dataset").unwrap();
    assert_eq!(saved.dataset, "dataset");
    assert_eq!(
        saved.to_string(),
        format!("dataset created: {}", path.canonicalize().unwrap().display())
    );

    let back = read_hdf5(&path, "dataset").unwrap().into_dimensionality::<Ix2>().unwrap();
    assert_eq!(back, data);
}

#[test]
fn test_saved_events_come_back_through_source() {
    let dir = tempfile::tempdir().unwrap();
    let stack = Array3::from_shape_fn((3, 5, 4), |(f, r, c)| (f + r * c) as f64);
    save_hdf5(&stack, dir.path().join("uid-1.h5"), "eiger4m_single_image").unwrap();

    let source = Hdf5Source::new(dir.path());
    let events = source.frames("uid-1", "eiger4m_single_image").unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0], stack);
}

#[test]
fn test_unwritable_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("data.h5");
    assert!(save_hdf5(&array![[1.0]], &path, "dataset").is_err());
}
