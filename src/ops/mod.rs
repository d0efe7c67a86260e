pub mod metadata_loader;
pub mod slider_math;
pub mod time_format;
