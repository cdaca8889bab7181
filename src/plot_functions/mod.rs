// src/plot_functions/mod.rs

pub mod display_cropped;
pub mod display_image;
pub mod plot_profile;

// src/plot_functions/mod.rs
