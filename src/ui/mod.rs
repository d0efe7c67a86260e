pub mod app;
pub mod player;
pub mod reveal;
pub mod shell;
pub mod slider;
pub mod volume_indicator;
