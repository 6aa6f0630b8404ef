use serde::{Deserialize, Serialize};

/// Source language of the code sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Typescript,
    Jsx,
    Tsx,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Javascript => write!(f, "javascript"),
            Language::Typescript => write!(f, "typescript"),
            Language::Jsx => write!(f, "jsx"),
            Language::Tsx => write!(f, "tsx"),
        }
    }
}

/// The animation style applied to the code container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    #[default]
    Typing,
    Entrance,
    Glow,
}

impl std::fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimationKind::Typing => write!(f, "typing"),
            AnimationKind::Entrance => write!(f, "entrance"),
            AnimationKind::Glow => write!(f, "glow"),
        }
    }
}

/// Container format of the finished video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Mp4,
    Webm,
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Webm => "webm",
        }
    }

    /// Video codec the external renderer should encode with.
    pub fn codec(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "h264",
            OutputFormat::Webm => "vp8",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Edge the code container slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// Output canvas and timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl VideoSettings {
    /// Vertical 1080x1920 video at 30 frames per second.
    pub fn vertical() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: 30,
        }
    }
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self::vertical()
    }
}
