//! Shareable-link settings codec
//!
//! A whitelist of settings fields is packed into JSON with short keys, then
//! base64-encoded so it can ride in the `s` query parameter. Decoding merges
//! whatever fields are present over a base record and never fails outward.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{SHARE_MESSAGE_SECS, SHARE_QUERY_KEY};
use crate::settings::SceneSettings;

/// Why a shared payload could not be applied
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wire form of the shared settings
///
/// Short keys keep URLs small. `reverse_direction` and `mesh_url` are
/// deliberately not part of the link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharePayload {
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "f", default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(rename = "or", default, skip_serializing_if = "Option::is_none")]
    pub orbit_radius: Option<f32>,
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(rename = "g", default, skip_serializing_if = "Option::is_none")]
    pub glow: Option<f32>,
    #[serde(rename = "cs", default, skip_serializing_if = "Option::is_none")]
    pub char_size: Option<f32>,
    #[serde(rename = "tt", default, skip_serializing_if = "Option::is_none")]
    pub text_thickness: Option<f32>,
    #[serde(rename = "ls", default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
    /// Tilt, degrees
    #[serde(rename = "ra", default, skip_serializing_if = "Option::is_none")]
    pub rotation_angle: Option<f32>,
    #[serde(rename = "os", default, skip_serializing_if = "Option::is_none")]
    pub object_scale: Option<f32>,
    #[serde(rename = "rx", default, skip_serializing_if = "Option::is_none")]
    pub object_rotation_x: Option<f32>,
    #[serde(rename = "ry", default, skip_serializing_if = "Option::is_none")]
    pub object_rotation_y: Option<f32>,
    #[serde(rename = "rz", default, skip_serializing_if = "Option::is_none")]
    pub object_rotation_z: Option<f32>,
    #[serde(rename = "oy", default, skip_serializing_if = "Option::is_none")]
    pub orbit_y: Option<f32>,
}

impl SharePayload {
    /// Every whitelisted field of `settings`
    pub fn from_settings(settings: &SceneSettings) -> Self {
        Self {
            text: Some(settings.text.clone()),
            color: Some(settings.color.clone()),
            font: Some(settings.font.clone()),
            orbit_radius: Some(settings.orbit_radius),
            speed: Some(settings.rotation_speed),
            glow: Some(settings.emissive_intensity),
            char_size: Some(settings.char_size),
            text_thickness: Some(settings.text_thickness),
            letter_spacing: Some(settings.letter_spacing),
            rotation_angle: Some(settings.tilt_degrees),
            object_scale: Some(settings.object_scale),
            object_rotation_x: Some(settings.object_rotation_x),
            object_rotation_y: Some(settings.object_rotation_y),
            object_rotation_z: Some(settings.object_rotation_z),
            orbit_y: Some(settings.orbit_y),
        }
    }

    /// Overwrite the fields of `base` that this payload carries
    ///
    /// Empty strings count as absent: a link can never blank the text,
    /// color or font.
    pub fn apply_to(&self, base: &SceneSettings) -> SceneSettings {
        let mut s = base.clone();

        let non_empty = |v: &Option<String>| v.as_ref().filter(|v| !v.is_empty()).cloned();
        if let Some(text) = non_empty(&self.text) {
            s.text = text;
        }
        if let Some(color) = non_empty(&self.color) {
            s.color = color;
        }
        if let Some(font) = non_empty(&self.font) {
            s.font = font;
        }

        let numeric = [
            (self.orbit_radius, &mut s.orbit_radius),
            (self.speed, &mut s.rotation_speed),
            (self.glow, &mut s.emissive_intensity),
            (self.char_size, &mut s.char_size),
            (self.text_thickness, &mut s.text_thickness),
            (self.letter_spacing, &mut s.letter_spacing),
            (self.rotation_angle, &mut s.tilt_degrees),
            (self.object_scale, &mut s.object_scale),
            (self.object_rotation_x, &mut s.object_rotation_x),
            (self.object_rotation_y, &mut s.object_rotation_y),
            (self.object_rotation_z, &mut s.object_rotation_z),
            (self.orbit_y, &mut s.orbit_y),
        ];
        for (value, field) in numeric {
            if let Some(value) = value {
                *field = value;
            }
        }

        s
    }
}

/// Encode the shareable fields of `settings` (URL-safe base64 of JSON)
pub fn encode(settings: &SceneSettings) -> String {
    encode_payload(&SharePayload::from_settings(settings))
}

/// Encode an arbitrary (possibly partial) payload
pub fn encode_payload(payload: &SharePayload) -> String {
    // Plain structs of strings and floats always serialize
    let json = serde_json::to_vec(payload).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Parse an encoded payload without applying it
///
/// Accepts the URL-safe and standard alphabets, padded or not. A `+` that
/// form decoding turned into a space is restored first.
pub fn try_decode(encoded: &str) -> Result<SharePayload, ShareError> {
    let cleaned: String = encoded
        .trim()
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .filter(|&c| c != '=')
        .collect();

    let bytes = if cleaned.contains(['+', '/']) {
        STANDARD_NO_PAD.decode(cleaned.as_bytes())?
    } else {
        URL_SAFE_NO_PAD.decode(cleaned.as_bytes())?
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Outcome of [`decode`]
#[derive(Debug)]
pub struct Decoded {
    pub settings: SceneSettings,
    /// Set when the payload was rejected and `base` came back unchanged
    pub warning: Option<ShareError>,
}

/// Merge an encoded payload over `base`
///
/// Never fails: malformed input yields `base` unchanged plus a warning.
pub fn decode(encoded: &str, base: &SceneSettings) -> Decoded {
    match try_decode(encoded) {
        Ok(payload) => Decoded {
            settings: payload.apply_to(base),
            warning: None,
        },
        Err(e) => {
            log::warn!("Failed to parse shared settings: {e}");
            Decoded {
                settings: base.clone(),
                warning: Some(e),
            }
        }
    }
}

/// Pull the encoded settings out of a query string (`?a=1&s=...`)
pub fn query_payload(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SHARE_QUERY_KEY)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Settings for a page load: `defaults` with any shared payload merged in
pub fn settings_from_query(query: &str, defaults: &SceneSettings) -> SceneSettings {
    match query_payload(query) {
        Some(encoded) => {
            let decoded = decode(&encoded, defaults);
            if decoded.warning.is_none() {
                log::info!("Applied shared settings from URL");
            }
            decoded.settings
        }
        None => defaults.clone(),
    }
}

/// Full link for sharing the current scene
pub fn share_url(origin: &str, path: &str, settings: &SceneSettings) -> String {
    format!("{origin}{path}?{SHARE_QUERY_KEY}={}", encode(settings))
}

/// Result of trying to put a share link on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Copied,
    /// Clipboard unavailable or permission denied
    CopyFailed,
}

impl ShareOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ShareOutcome::Copied => "Link copied!",
            ShareOutcome::CopyFailed => "Copy URL from address bar",
        }
    }
}

/// Transient message shown after the share button is pressed
#[derive(Debug, Clone, Default)]
pub struct ShareToast {
    message: Option<&'static str>,
    remaining: f32,
}

impl ShareToast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the message for `outcome`, restarting the timeout
    pub fn show(&mut self, outcome: ShareOutcome) {
        if outcome == ShareOutcome::CopyFailed {
            log::warn!("Clipboard write failed, falling back to address bar");
        }
        self.message = Some(outcome.message());
        self.remaining = SHARE_MESSAGE_SECS;
    }

    /// Advance the timeout; clears the message once it runs out
    pub fn tick(&mut self, dt: f32) {
        if self.message.is_none() {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.message = None;
            self.remaining = 0.0;
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use proptest::prelude::*;

    fn custom_settings() -> SceneSettings {
        SceneSettings {
            text: "HALO ✨".to_string(),
            color: "#ff00aa".to_string(),
            font: "/fonts/optimer_regular.json".to_string(),
            orbit_radius: 1.25,
            orbit_y: -0.3,
            rotation_speed: 0.9,
            emissive_intensity: 4.2,
            char_size: 0.33,
            text_thickness: 0.07,
            letter_spacing: 0.45,
            tilt_degrees: 12.0,
            object_scale: 1.1,
            object_rotation_x: 30.0,
            object_rotation_y: -45.0,
            object_rotation_z: 179.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip_restores_whitelisted_fields() {
        let settings = custom_settings();
        let decoded = decode(&encode(&settings), &SceneSettings::default());
        assert!(decoded.warning.is_none());
        assert_eq!(decoded.settings, settings);
    }

    #[test]
    fn test_encoded_payload_is_url_safe() {
        let encoded = encode(&custom_settings());
        assert!(
            encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_payload_uses_short_keys() {
        let json = serde_json::to_value(SharePayload::from_settings(&SceneSettings::default()))
            .unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["c", "cs", "f", "g", "ls", "or", "os", "oy", "ra", "rx", "ry", "rz", "s", "t", "tt"]
        );
    }

    #[test]
    fn test_reverse_and_mesh_are_not_shared() {
        let base = SceneSettings::default();
        let settings = SceneSettings {
            reverse_direction: true,
            mesh_url: "/models/other.obj".to_string(),
            ..base.clone()
        };
        let decoded = decode(&encode(&settings), &base);
        assert!(!decoded.settings.reverse_direction);
        assert_eq!(decoded.settings.mesh_url, base.mesh_url);
    }

    #[test]
    fn test_garbage_returns_base_with_warning() {
        let base = custom_settings();
        for input in ["garbage!!", "%%%", ""] {
            let decoded = decode(input, &base);
            assert_eq!(decoded.settings, base);
            assert!(decoded.warning.is_some(), "{input:?} should warn");
        }

        // Valid base64, invalid JSON
        let decoded = decode(&URL_SAFE_NO_PAD.encode(b"{not json"), &base);
        assert!(matches!(decoded.warning, Some(ShareError::Json(_))));
        assert_eq!(decoded.settings, base);
    }

    #[test]
    fn test_partial_payload_leaves_other_fields() {
        let defaults = SceneSettings::default();
        let payload = SharePayload {
            text: Some("ORBIT".to_string()),
            color: Some("#123456".to_string()),
            ..Default::default()
        };
        let decoded = decode(&encode_payload(&payload), &defaults).settings;
        assert_eq!(decoded.text, "ORBIT");
        assert_eq!(decoded.color, "#123456");
        assert_eq!(
            SceneSettings {
                text: defaults.text.clone(),
                color: defaults.color.clone(),
                ..decoded
            },
            defaults
        );
    }

    #[test]
    fn test_empty_strings_and_nulls_are_ignored() {
        let base = SceneSettings::default();
        let json = r#"{"t":"","c":"","f":"","or":null,"g":1.5}"#;
        let decoded = decode(&URL_SAFE_NO_PAD.encode(json), &base).settings;
        assert_eq!(decoded.text, base.text);
        assert_eq!(decoded.color, base.color);
        assert_eq!(decoded.font, base.font);
        assert_eq!(decoded.orbit_radius, base.orbit_radius);
        assert_eq!(decoded.emissive_intensity, 1.5);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let json = r#"{"t":"HI","zz":42,"nested":{"a":1}}"#;
        let decoded = decode(&URL_SAFE_NO_PAD.encode(json), &SceneSettings::default());
        assert!(decoded.warning.is_none());
        assert_eq!(decoded.settings.text, "HI");
    }

    #[test]
    fn test_accepts_standard_alphabet_links() {
        // Older links used padded standard base64, whose '+' may arrive as a space
        let settings = custom_settings();
        let json = serde_json::to_vec(&SharePayload::from_settings(&settings)).unwrap();
        let legacy = STANDARD.encode(&json);
        let mangled = legacy.replace('+', " ");

        let base = SceneSettings::default();
        assert_eq!(decode(&legacy, &base).settings, settings);
        assert_eq!(decode(&mangled, &base).settings, settings);
    }

    #[test]
    fn test_settings_from_query() {
        let defaults = SceneSettings::default();
        let settings = custom_settings();
        let query = format!("?foo=bar&s={}", encode(&settings));
        assert_eq!(settings_from_query(&query, &defaults), settings);
        assert_eq!(settings_from_query("?foo=bar", &defaults), defaults);
        assert_eq!(settings_from_query("", &defaults), defaults);
        assert_eq!(settings_from_query("?s=@@@", &defaults), defaults);
    }

    #[test]
    fn test_share_url_carries_payload() {
        let settings = custom_settings();
        let url = share_url("https://halo.example", "/", &settings);
        let (prefix, query) = url.split_once('?').unwrap();
        assert_eq!(prefix, "https://halo.example/");
        assert_eq!(query_payload(query), Some(encode(&settings)));
    }

    #[test]
    fn test_share_toast_clears_after_timeout() {
        let mut toast = ShareToast::new();
        assert!(!toast.is_visible());

        toast.show(ShareOutcome::Copied);
        assert_eq!(toast.message(), Some("Link copied!"));
        toast.tick(1.0);
        assert!(toast.is_visible());
        toast.tick(1.01);
        assert!(!toast.is_visible());

        toast.show(ShareOutcome::CopyFailed);
        assert_eq!(toast.message(), Some("Copy URL from address bar"));
    }

    fn finite(range: std::ops::Range<f32>) -> impl Strategy<Value = f32> {
        range
    }

    prop_compose! {
        fn arb_settings()(
            text in "[A-Za-z0-9 ✨é]{1,20}",
            rgb in any::<[u8; 3]>(),
            font in 0..crate::FONTS.len(),
            orbit_radius in finite(0.2..4.0),
            orbit_y in finite(-2.0..2.0),
            rotation_speed in finite(-1.2..1.2),
            emissive_intensity in finite(0.0..5.0),
            char_size in finite(0.12..0.6),
            text_thickness in finite(0.02..0.3),
            letter_spacing in finite(0.2..1.0),
            tilt_degrees in finite(0.0..360.0),
            object_scale in finite(0.1..3.0),
            rotation in any::<[i16; 3]>(),
        ) -> SceneSettings {
            SceneSettings {
                text,
                color: format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]),
                font: crate::FONTS[font].path.to_string(),
                orbit_radius,
                orbit_y,
                rotation_speed,
                emissive_intensity,
                char_size,
                text_thickness,
                letter_spacing,
                tilt_degrees,
                object_scale,
                object_rotation_x: (rotation[0] % 181) as f32,
                object_rotation_y: (rotation[1] % 181) as f32,
                object_rotation_z: (rotation[2] % 181) as f32,
                ..Default::default()
            }
        }
    }

    proptest! {
        #[test]
        fn prop_round_trip(settings in arb_settings()) {
            let decoded = decode(&encode(&settings), &SceneSettings::default());
            prop_assert!(decoded.warning.is_none());
            prop_assert_eq!(decoded.settings, settings);
        }

        #[test]
        fn prop_decode_never_panics(input in ".{0,64}") {
            let base = SceneSettings::default();
            let decoded = decode(&input, &base);
            if decoded.warning.is_some() {
                prop_assert_eq!(decoded.settings, base);
            }
        }
    }
}
