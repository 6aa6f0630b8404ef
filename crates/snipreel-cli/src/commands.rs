// ─── Offline commands ───────────────────────────────────────────────
//
// Everything here works without the external renderer: it reads a request
// file and reports what the pipeline would do with it.

use std::path::Path;

use anyhow::{Context, Result};

use snipreel_compose::Composition;
use snipreel_core::{Duration, RenderConfig, VideoSettings};
use snipreel_render::{compute_duration, RenderRequest};

/// Read and validate a render request from a JSON file.
pub fn load_request(path: &Path) -> Result<RenderRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let request = RenderRequest::from_json(value)?;
    Ok(request)
}

/// Pretty JSON description of one frame.
pub fn frame_json(request: &RenderRequest, frame: u64, video: VideoSettings) -> Result<String> {
    let composition = Composition::new(request.props.clone(), video);
    Ok(serde_json::to_string_pretty(&composition.frame(frame))?)
}

pub fn duration_summary(request: &RenderRequest, config: &RenderConfig, video: VideoSettings) -> String {
    let frames = compute_duration(&request.animation(), &request.props.code, config);
    format!(
        "{} frames ({} at {} fps, {} animation)",
        frames,
        Duration::from_frames(frames, video.fps),
        video.fps,
        request.props.animation_type
    )
}

pub fn themes_listing() -> String {
    let default_id = snipreel_theme::default_theme().id;
    snipreel_theme::all_themes()
        .iter()
        .map(|theme| {
            let marker = if theme.id == default_id { " (default)" } else { "" };
            format!("{:<16} {}{} - {}", theme.id, theme.name, marker, theme.description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn presets_listing() -> String {
    snipreel_anim::presets()
        .iter()
        .map(|p| format!("{} {:<10} {:<11} {}", p.icon, p.id, p.name, p.description))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipreel_compose::CompositionProps;
    use snipreel_core::Language;

    fn request(code: &str) -> RenderRequest {
        RenderRequest::new(CompositionProps::new(code, Language::Typescript))
    }

    #[test]
    fn test_load_request_from_file() {
        let path = std::env::temp_dir().join(format!("snipreel-request-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"code": "type A = string;", "language": "typescript"}"#).unwrap();
        let req = load_request(&path).unwrap();
        assert_eq!(req.props.language, Language::Typescript);

        std::fs::write(&path, r#"{"code": "", "language": "typescript"}"#).unwrap();
        assert!(load_request(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_frame_json_is_a_frame_description() {
        let json = frame_json(&request("let a = 1;"), 3, VideoSettings::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["frame"], 3);
        assert_eq!(value["canvas"]["width"], 1080);
        assert_eq!(value["animation"]["type"], "typing");
    }

    #[test]
    fn test_duration_summary() {
        let summary = duration_summary(
            &request(&"x".repeat(500)),
            &RenderConfig::default(),
            VideoSettings::default(),
        );
        assert!(summary.starts_with("280 frames (9.33s at 30 fps"));

        let fast = VideoSettings {
            fps: 600,
            ..VideoSettings::default()
        };
        let summary = duration_summary(&request(&"x".repeat(500)), &RenderConfig::default(), fast);
        assert!(summary.starts_with("280 frames (467ms at 600 fps"));
    }

    #[test]
    fn test_listings_name_every_entry() {
        let themes = themes_listing();
        assert!(themes.contains("revorgs-bronze"));
        assert!(themes.contains("(default)"));
        assert!(themes.contains("midnight-blue"));

        let presets = presets_listing();
        assert_eq!(presets.lines().count(), 3);
        assert!(presets.contains("Glow Pulse"));
    }
}
