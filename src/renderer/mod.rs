pub mod gst_audio;
pub mod media_element;
pub mod transport;
