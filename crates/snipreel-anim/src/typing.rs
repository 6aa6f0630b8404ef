use serde::{Deserialize, Serialize};

use crate::config::TypingConfig;

/// What the typing animation shows at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingState {
    pub visible_chars: usize,
    pub visible_code: String,
    pub cursor_visible: bool,
    pub is_complete: bool,
    /// Ratio of revealed characters, in `[0, 1]`.
    pub progress: f64,
}

/// Evaluate the typing reveal of `code` at `frame`.
///
/// Characters are Unicode scalar values, so the visible prefix always ends
/// on a character boundary.
pub fn evaluate(code: &str, config: &TypingConfig, frame: u64) -> TypingState {
    let delayed = frame.saturating_sub(config.delay as u64);
    let total = code.chars().count();

    let typed = (delayed as f64 * config.chars_per_frame).floor();
    let visible_chars = if typed.is_finite() && typed > 0.0 {
        (typed as usize).min(total)
    } else {
        0
    };
    let is_complete = visible_chars >= total;

    let blink = config.cursor_blink_frames.max(1) as u64;
    let cursor_visible = config.show_cursor && (!is_complete || (delayed / blink) % 2 == 0);

    let progress = if total > 0 {
        visible_chars as f64 / total as f64
    } else {
        1.0
    };

    TypingState {
        visible_chars,
        visible_code: prefix(code, visible_chars),
        cursor_visible,
        is_complete,
        progress,
    }
}

/// Frames after the delay until the last character appears. Saturates at
/// `u64::MAX` for vanishingly small speeds.
pub fn frames_to_complete(code: &str, config: &TypingConfig) -> u64 {
    let total = code.chars().count() as f64;
    if config.chars_per_frame <= 0.0 || !config.chars_per_frame.is_finite() {
        return 0;
    }
    (total / config.chars_per_frame).ceil() as u64
}

fn prefix(code: &str, chars: usize) -> String {
    match code.char_indices().nth(chars) {
        Some((end, _)) => code[..end].to_string(),
        None => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cpf: f64) -> TypingConfig {
        TypingConfig {
            chars_per_frame: cpf,
            ..Default::default()
        }
    }

    #[test]
    fn test_two_chars_per_frame() {
        let code = "0123456789";
        let at2 = evaluate(code, &config(2.0), 2);
        assert_eq!(at2.visible_chars, 4);
        assert_eq!(at2.visible_code, "0123");
        assert!(!at2.is_complete);

        let at5 = evaluate(code, &config(2.0), 5);
        assert_eq!(at5.visible_chars, 10);
        assert!(at5.is_complete);
        assert_eq!(at5.progress, 1.0);
    }

    #[test]
    fn test_reveal_is_monotone_prefix() {
        let code = "const greet = (name) => `hi ${name}`;\nconsole.log(greet('ü'));";
        let cfg = config(0.7);
        let mut previous = String::new();
        for frame in 0..120 {
            let state = evaluate(code, &cfg, frame);
            assert!(state.visible_code.starts_with(&previous));
            previous = state.visible_code;
        }
        assert_eq!(previous, code);
    }

    #[test]
    fn test_delay_holds_empty() {
        let cfg = TypingConfig {
            delay: 10,
            ..Default::default()
        };
        let state = evaluate("abc", &cfg, 7);
        assert_eq!(state.visible_code, "");
        assert_eq!(state.progress, 0.0);
        assert!(state.cursor_visible);
    }

    #[test]
    fn test_cursor_blinks_after_completion() {
        let cfg = config(10.0);
        // Complete at frame 1; blink period 15.
        assert!(evaluate("abc", &cfg, 14).cursor_visible);
        assert!(!evaluate("abc", &cfg, 15).cursor_visible);
        assert!(!evaluate("abc", &cfg, 29).cursor_visible);
        assert!(evaluate("abc", &cfg, 30).cursor_visible);
    }

    #[test]
    fn test_cursor_hidden_when_disabled() {
        let cfg = TypingConfig {
            show_cursor: false,
            ..Default::default()
        };
        assert!(!evaluate("abc", &cfg, 0).cursor_visible);
    }

    #[test]
    fn test_empty_code_is_complete() {
        let state = evaluate("", &config(2.0), 0);
        assert!(state.is_complete);
        assert_eq!(state.progress, 1.0);
    }

    #[test]
    fn test_multibyte_prefix() {
        let state = evaluate("héllo", &config(1.0), 2);
        assert_eq!(state.visible_code, "hé");
    }

    #[test]
    fn test_frames_to_complete() {
        assert_eq!(frames_to_complete(&"x".repeat(500), &config(2.0)), 250);
        assert_eq!(frames_to_complete("abc", &config(2.0)), 2);
        assert_eq!(frames_to_complete(&"x".repeat(5_000), &config(1e-18)), u64::MAX);
    }
}
