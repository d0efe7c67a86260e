pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Embedded picture pulled out of the track's tag.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverArt {
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

/// Descriptive fields read once from the audio file's tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub cover_art: Option<CoverArt>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl TrackMetadata {
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_ref()).unwrap_or(UNKNOWN_TITLE)
    }

    pub fn display_artist(&self) -> &str {
        non_empty(self.artist.as_ref()).unwrap_or(UNKNOWN_ARTIST)
    }
}

/// Title/artist for a player whose metadata may never have arrived.
pub fn display_labels(metadata: Option<&TrackMetadata>) -> (&str, &str) {
    match metadata {
        Some(meta) => (meta.display_title(), meta.display_artist()),
        None => (UNKNOWN_TITLE, UNKNOWN_ARTIST),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_metadata_falls_back() {
        assert_eq!(display_labels(None), (UNKNOWN_TITLE, UNKNOWN_ARTIST));
    }

    #[test]
    fn test_blank_fields_fall_back() {
        let meta = TrackMetadata {
            title: Some("   ".to_string()),
            artist: None,
            ..Default::default()
        };
        assert_eq!(meta.display_title(), UNKNOWN_TITLE);
        assert_eq!(meta.display_artist(), UNKNOWN_ARTIST);
    }

    #[test]
    fn test_present_fields_are_used() {
        let meta = TrackMetadata {
            title: Some("Outdate".to_string()),
            artist: Some("espilx".to_string()),
            ..Default::default()
        };
        assert_eq!(display_labels(Some(&meta)), ("Outdate", "espilx"));
    }
}
