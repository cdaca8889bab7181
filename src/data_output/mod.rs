// src/data_output/mod.rs

#[cfg(feature = "hdf5")]
pub mod hdf5_io;
pub mod text_io;

// src/data_output/mod.rs
