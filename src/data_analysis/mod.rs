// src/data_analysis/mod.rs

pub mod axis_ticks;
pub mod crop;
pub mod frame_select;
pub mod profile;

// src/data_analysis/mod.rs
