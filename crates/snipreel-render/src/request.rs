use serde::{Deserialize, Serialize};
use serde_json::Value;

use snipreel_anim::AnimationConfig;
use snipreel_compose::CompositionProps;
use snipreel_core::{FieldIssue, OutputFormat, SnipError, SnipResult};
use snipreel_theme::is_valid_theme_id;

/// Longest accepted code sample, in characters.
pub const MAX_CODE_CHARS: usize = 5000;
/// Most lines a code sample may span.
pub const MAX_CODE_LINES: usize = 50;

const LANGUAGES: &[&str] = &["javascript", "typescript", "jsx", "tsx"];
const ANIMATION_TYPES: &[&str] = &["typing", "entrance", "glow"];
const OUTPUT_FORMATS: &[&str] = &["mp4", "webm"];

/// A request to turn a composition into a video file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    #[serde(flatten)]
    pub props: CompositionProps,
    #[serde(default)]
    pub output_format: OutputFormat,
}

impl RenderRequest {
    pub fn new(props: CompositionProps) -> Self {
        Self {
            props,
            output_format: OutputFormat::default(),
        }
    }

    /// Parse and validate a JSON request body, reporting every offending field.
    pub fn from_json(body: Value) -> SnipResult<Self> {
        let issues = check_shape(&body);
        if !issues.is_empty() {
            return Err(SnipError::Validation(issues));
        }
        let request: RenderRequest = serde_json::from_value(body)
            .map_err(|e| SnipError::invalid_field("body", e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    /// Check the bounds serde cannot express.
    pub fn validate(&self) -> SnipResult<()> {
        let mut issues = Vec::new();
        let code = &self.props.code;

        if code.trim().is_empty() {
            issues.push(FieldIssue::new("code", "must not be empty"));
        }
        let chars = code.chars().count();
        if chars > MAX_CODE_CHARS {
            issues.push(FieldIssue::new(
                "code",
                format!("must be at most {MAX_CODE_CHARS} characters (got {chars})"),
            ));
        }
        let lines = code.lines().count();
        if lines > MAX_CODE_LINES {
            issues.push(FieldIssue::new(
                "code",
                format!("must be at most {MAX_CODE_LINES} lines (got {lines})"),
            ));
        }
        if !is_valid_theme_id(&self.props.theme_id) {
            issues.push(FieldIssue::new(
                "themeId",
                "must be 1-64 lowercase letters, digits or hyphens",
            ));
        }
        issues.extend(self.animation().validate());

        if issues.is_empty() {
            Ok(())
        } else {
            Err(SnipError::Validation(issues))
        }
    }

    pub fn animation(&self) -> AnimationConfig {
        self.props.animation()
    }
}

/// Type and enum checks on the raw body, so each bad field gets its own issue
/// instead of one opaque deserialization error.
fn check_shape(body: &Value) -> Vec<FieldIssue> {
    let Some(obj) = body.as_object() else {
        return vec![FieldIssue::new("body", "must be a JSON object")];
    };
    let mut issues = Vec::new();

    match obj.get("code") {
        None | Some(Value::Null) => issues.push(FieldIssue::new("code", "is required")),
        Some(Value::String(_)) => {}
        Some(_) => issues.push(FieldIssue::new("code", "must be a string")),
    }
    match obj.get("language") {
        None | Some(Value::Null) => issues.push(FieldIssue::new("language", "is required")),
        Some(v) => check_enum(&mut issues, "language", v, LANGUAGES),
    }
    if let Some(v) = obj.get("themeId") {
        if !v.is_string() {
            issues.push(FieldIssue::new("themeId", "must be a string"));
        }
    }
    if let Some(v) = obj.get("animationType") {
        check_enum(&mut issues, "animationType", v, ANIMATION_TYPES);
    }
    if let Some(v) = obj.get("outputFormat") {
        check_enum(&mut issues, "outputFormat", v, OUTPUT_FORMATS);
    }
    for flag in ["showLineNumbers", "showWatermark"] {
        if let Some(v) = obj.get(flag) {
            if !v.is_boolean() {
                issues.push(FieldIssue::new(flag, "must be a boolean"));
            }
        }
    }
    if let Some(v) = obj.get("animationConfig") {
        if !(v.is_object() || v.is_null()) {
            issues.push(FieldIssue::new("animationConfig", "must be an object"));
        }
    }
    issues
}

fn check_enum(issues: &mut Vec<FieldIssue>, field: &str, value: &Value, allowed: &[&str]) {
    let ok = value.as_str().is_some_and(|s| allowed.contains(&s));
    if !ok {
        issues.push(FieldIssue::new(
            field,
            format!("must be one of: {}", allowed.join(", ")),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use snipreel_core::{AnimationKind, Language};

    fn issues_of(err: SnipError) -> Vec<FieldIssue> {
        match err {
            SnipError::Validation(issues) => issues,
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_minimal_body_gets_defaults() {
        let req = RenderRequest::from_json(json!({"code": "let a = 1;", "language": "javascript"}))
            .unwrap();
        assert_eq!(req.props.language, Language::Javascript);
        assert_eq!(req.props.theme_id, "revorgs-bronze");
        assert_eq!(req.props.animation_type, AnimationKind::Typing);
        assert_eq!(req.output_format, OutputFormat::Mp4);
        assert!(req.props.show_line_numbers);
    }

    #[test]
    fn test_full_body() {
        let req = RenderRequest::from_json(json!({
            "code": "<App />",
            "language": "tsx",
            "themeId": "midnight-blue",
            "animationType": "glow",
            "animationConfig": {"intensity": 2, "pulseFrames": 45},
            "showLineNumbers": false,
            "showWatermark": false,
            "outputFormat": "webm"
        }))
        .unwrap();
        assert_eq!(req.output_format, OutputFormat::Webm);
        assert_eq!(req.props.animation_type, AnimationKind::Glow);
        let overrides = req.props.animation_config.clone().unwrap();
        assert_eq!(overrides.pulse_frames, Some(45));
        assert_eq!(overrides.intensity, Some(2.0));
    }

    #[test]
    fn test_rejects_bad_enums_and_missing_fields() {
        let err = RenderRequest::from_json(json!({
            "animationType": "bounce",
            "outputFormat": "gif",
            "showWatermark": "yes"
        }))
        .unwrap_err();
        let paths: Vec<_> = issues_of(err).into_iter().map(|i| i.path).collect();
        assert_eq!(
            paths,
            ["code", "language", "animationType", "outputFormat", "showWatermark"]
        );
    }

    #[test]
    fn test_code_bounds() {
        let blank = RenderRequest::from_json(json!({"code": "  \n ", "language": "jsx"}));
        assert_eq!(issues_of(blank.unwrap_err())[0].message, "must not be empty");

        let empty = RenderRequest::from_json(json!({"code": "", "language": "jsx"}));
        assert!(empty.is_err());

        let long = "x".repeat(MAX_CODE_CHARS + 1);
        let err = RenderRequest::from_json(json!({"code": long, "language": "jsx"})).unwrap_err();
        assert_eq!(issues_of(err)[0].path, "code");

        let exact = "x".repeat(MAX_CODE_CHARS);
        assert!(RenderRequest::from_json(json!({"code": exact, "language": "jsx"})).is_ok());

        let tall = "a;\n".repeat(MAX_CODE_LINES + 1);
        let err = RenderRequest::from_json(json!({"code": tall, "language": "jsx"})).unwrap_err();
        assert!(issues_of(err)[0].message.contains("lines"));
    }

    #[test]
    fn test_theme_id_format_checked_but_unknown_allowed() {
        let ok = RenderRequest::from_json(json!({
            "code": "x", "language": "javascript", "themeId": "forest-green"
        }));
        assert!(ok.is_ok());

        let err = RenderRequest::from_json(json!({
            "code": "x", "language": "javascript", "themeId": "../secret"
        }))
        .unwrap_err();
        assert_eq!(issues_of(err)[0].path, "themeId");
    }

    #[test]
    fn test_animation_override_bounds() {
        let err = RenderRequest::from_json(json!({
            "code": "x",
            "language": "javascript",
            "animationConfig": {"charsPerFrame": -1}
        }))
        .unwrap_err();
        assert_eq!(issues_of(err)[0].path, "animationConfig.charsPerFrame");
    }
}
