//! Spotify playback state model
//!
//! Field names mirror the Spotify Web API response shapes so the structs
//! (de)serialize against the wire format directly.

use serde::{Deserialize, Serialize};

use super::device::SpotifyDevice;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
    pub height: i64,
    pub width: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<SpotifyArtist>,
    pub album: SpotifyAlbum,
    pub duration_ms: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyContext {
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
}

/// Current playback state as returned by `GET /me/player`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaybackState {
    pub device: SpotifyDevice,
    pub repeat_state: String,
    pub shuffle_state: bool,
    pub context: Option<SpotifyContext>,
    pub timestamp: i64,
    pub progress_ms: i64,
    pub is_playing: bool,
    pub item: Option<SpotifyTrack>,
}

/// Fixture returned when no Spotify token is configured, so playback
/// controls render something sensible.
pub fn mock_playback_state() -> SpotifyPlaybackState {
    SpotifyPlaybackState {
        device: SpotifyDevice {
            id: "mock-device".to_string(),
            is_active: true,
            is_private_session: false,
            is_restricted: false,
            name: "Kitchen Display".to_string(),
            kind: "Computer".to_string(),
            volume_percent: 65,
            supports_volume: true,
        },
        repeat_state: "off".to_string(),
        shuffle_state: false,
        context: None,
        timestamp: 0,
        progress_ms: 45_000,
        is_playing: true,
        item: Some(SpotifyTrack {
            id: "mock-track".to_string(),
            name: "Blinding Lights".to_string(),
            artists: vec![SpotifyArtist {
                id: "mock-artist".to_string(),
                name: "The Weeknd".to_string(),
            }],
            album: SpotifyAlbum {
                name: "After Hours".to_string(),
                images: vec![SpotifyImage {
                    url: "https://i.scdn.co/image/ab67616d0000b273ef6f8c9bf9b7e0c9d5f6f8b1"
                        .to_string(),
                    height: 640,
                    width: 640,
                }],
            },
            duration_ms: 200_040,
        }),
    }
}

/// Format a track duration from milliseconds to M:SS.
pub fn format_duration(ms: i64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{minutes}:{seconds:02}")
}

/// Playback progress as a 0-100 percentage.
pub fn progress_percentage(progress_ms: i64, duration_ms: i64) -> f64 {
    if duration_ms <= 0 {
        return 0.0;
    }
    (progress_ms as f64 / duration_ms as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_state_is_blinding_lights_playing() {
        let state = mock_playback_state();
        assert!(state.is_playing);
        assert_eq!(state.item.as_ref().map(|t| t.name.as_str()), Some("Blinding Lights"));
        assert_eq!(state.device.volume_percent, 65);
    }

    #[test]
    fn duration_formats_with_padded_seconds() {
        assert_eq!(format_duration(200_040), "3:20");
        assert_eq!(format_duration(61_000), "1:01");
    }

    #[test]
    fn progress_is_clamped_and_zero_safe() {
        assert_eq!(progress_percentage(50, 0), 0.0);
        assert_eq!(progress_percentage(300, 200), 100.0);
        assert!((progress_percentage(100, 200) - 50.0).abs() < f64::EPSILON);
    }
}
