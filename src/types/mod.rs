pub mod metadata;
pub mod playback_state;
pub mod site_config;
