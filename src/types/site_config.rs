use crate::error::ConfigError;
use crate::types::playback_state::DEFAULT_VOLUME;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "site.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub profile: Profile,
    pub audio_path: String,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub player: PlayerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Spotify,
    Youtube,
    Telegram,
    Discord,
    Other,
}

impl LinkKind {
    pub fn icon(&self) -> &'static str {
        match self {
            LinkKind::Spotify => "🎧",
            LinkKind::Youtube => "▶",
            LinkKind::Telegram => "✈",
            LinkKind::Discord => "💬",
            LinkKind::Other => "🔗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
    #[serde(default = "default_link_kind")]
    pub kind: LinkKind,
}

fn default_link_kind() -> LinkKind {
    LinkKind::Other
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f64,
    #[serde(default = "default_indicator_hide_ms")]
    pub indicator_hide_ms: u64,
}

fn default_initial_volume() -> f64 {
    DEFAULT_VOLUME
}

fn default_indicator_hide_ms() -> u64 {
    1000
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_volume: default_initial_volume(),
            indicator_hide_ms: default_indicator_hide_ms(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        let link = |label: &str, href: &str, kind| SocialLink {
            label: label.to_string(),
            href: href.to_string(),
            kind,
        };
        Self {
            profile: Profile {
                name: "espilx".to_string(),
                email: "vip.spils@gmail.com".to_string(),
                logo_path: Some("assets/logo.png".to_string()),
            },
            audio_path: "assets/Outdate.mp3".to_string(),
            social_links: vec![
                link(
                    "Spotify",
                    "https://open.spotify.com/artist/2HhYxMJQRkeObZhiWGfQKr",
                    LinkKind::Spotify,
                ),
                link(
                    "Youtube",
                    "https://www.youtube.com/@espilxspotify",
                    LinkKind::Youtube,
                ),
                link("Telegram", "https://t.me/espilx_mus", LinkKind::Telegram),
                link("Discord", "https://discord.gg/byYDJSzG3k", LinkKind::Discord),
            ],
            player: PlayerSettings::default(),
        }
    }
}

impl SiteConfig {
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<SiteConfig, ConfigError> {
        let mut file = File::open(path)?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Looks for `site.json` in the working directory, `config/`, then next to
    /// the executable. Falls back to the built-in profile.
    pub fn discover() -> SiteConfig {
        for path in Self::candidate_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "loaded site config");
                    return config;
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring site config");
                }
            }
        }
        tracing::debug!("no site config found, using built-in profile");
        SiteConfig::default()
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(dir) = std::env::current_dir() {
            candidates.push(dir.join(CONFIG_FILE_NAME));
            candidates.push(dir.join("config").join(CONFIG_FILE_NAME));
        }
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(dir.join(CONFIG_FILE_NAME));
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = SiteConfig::default();
        config.profile.name = "Test Artist".to_string();
        config.player.initial_volume = 0.8;
        config.save_to_file(&path).unwrap();

        let loaded = SiteConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let json = r#"{
            "profile": { "name": "a", "email": "b" },
            "audio_path": "track.mp3",
            "social_links": [ { "label": "Site", "href": "https://example.com" } ]
        }"#;
        let config: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.player, PlayerSettings::default());
        assert_eq!(config.profile.logo_path, None);
        assert_eq!(config.social_links[0].kind, LinkKind::Other);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SiteConfig::load_from_file(&path),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_default_profile_links() {
        let config = SiteConfig::default();
        let labels: Vec<_> = config.social_links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["Spotify", "Youtube", "Telegram", "Discord"]);
        assert_eq!(config.player.indicator_hide_ms, 1000);
    }
}
