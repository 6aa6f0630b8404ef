//! The themes shipped with Snipreel.

use snipreel_core::{BoxShadow, Color};

use crate::types::*;

const FONT_STACK: &str = "'JetBrains Mono', 'Fira Code', 'Consolas', monospace";

fn hex(rgb: u32) -> Color {
    Color::from_hex_u32(rgb)
}

fn rgba(r: u8, g: u8, b: u8, a: f32) -> Color {
    Color::from_rgb8(r, g, b).with_alpha(a)
}

fn drop_shadow(alpha: f32) -> BoxShadow {
    BoxShadow {
        offset_x: 0.0,
        offset_y: 25.0,
        blur_radius: 50.0,
        spread: -12.0,
        color: Color::BLACK.with_alpha(alpha),
    }
}

fn typography() -> Typography {
    Typography {
        font_family: FONT_STACK,
        font_size: 18.0,
        line_height: 1.6,
    }
}

fn traffic_lights() -> TrafficLights {
    TrafficLights {
        close: hex(0xFF5F56),
        minimize: hex(0xFFBD2E),
        maximize: hex(0x27CA40),
    }
}

/// Dark graphite with bronze/copper accents. The default theme.
pub fn revorgs_bronze() -> Theme {
    Theme {
        id: "revorgs-bronze",
        name: "RevOrgs Bronze",
        description: "Premium dark theme with bronze/copper accents",
        background: hex(0x0B0B0B),
        foreground: hex(0xE8E6E3),
        accent: hex(0xB87333),
        typography: typography(),
        code_window: CodeWindowStyle {
            background: hex(0x151515),
            border_radius: 16.0,
            shadow: drop_shadow(0.8),
            glow: BoxShadow::glow(60.0, rgba(184, 115, 51, 0.15)),
            padding: 32.0,
            border_width: 1.0,
            border_color: rgba(184, 115, 51, 0.2),
        },
        window_chrome: WindowChromeStyle {
            show: true,
            background: hex(0x1C1C1C),
            height: 40.0,
            buttons: traffic_lights(),
        },
        syntax: SyntaxPalette {
            keyword: hex(0xC9956B),
            string: hex(0x9ECE6A),
            number: hex(0xFF9E64),
            comment: hex(0x565F89),
            function: hex(0x7AA2F7),
            variable: hex(0xE8E6E3),
            operator: hex(0x89DDFF),
            punctuation: hex(0xA9B1D6),
            class_name: hex(0xBB9AF7),
            parameter: hex(0xE0AF68),
            property: hex(0x73DACA),
            tag: hex(0xF7768E),
            attribute: hex(0xBB9AF7),
            constant: hex(0xFF9E64),
            regex: hex(0xB4F9F8),
        },
        line_numbers: LineNumberStyle {
            show: true,
            color: hex(0x4A4A4A),
            background: Color::TRANSPARENT,
        },
        cursor: CursorStyle {
            color: hex(0xB87333),
            blink_frames: 15,
        },
    }
}

/// Deep blue with electric accents.
pub fn midnight_blue() -> Theme {
    Theme {
        id: "midnight-blue",
        name: "Midnight Blue",
        description: "Deep blue theme with electric accents",
        background: hex(0x0A0E1A),
        foreground: hex(0xE4E8F4),
        accent: hex(0x3B82F6),
        typography: typography(),
        code_window: CodeWindowStyle {
            background: hex(0x111827),
            border_radius: 16.0,
            shadow: drop_shadow(0.9),
            glow: BoxShadow::glow(60.0, rgba(59, 130, 246, 0.2)),
            padding: 32.0,
            border_width: 1.0,
            border_color: rgba(59, 130, 246, 0.3),
        },
        window_chrome: WindowChromeStyle {
            show: true,
            background: hex(0x1E293B),
            height: 40.0,
            buttons: traffic_lights(),
        },
        syntax: SyntaxPalette {
            keyword: hex(0x818CF8),
            string: hex(0x34D399),
            number: hex(0xFBBF24),
            comment: hex(0x64748B),
            function: hex(0x60A5FA),
            variable: hex(0xE4E8F4),
            operator: hex(0x67E8F9),
            punctuation: hex(0x94A3B8),
            class_name: hex(0xC084FC),
            parameter: hex(0xFCD34D),
            property: hex(0x2DD4BF),
            tag: hex(0xFB7185),
            attribute: hex(0xC084FC),
            constant: hex(0xFBBF24),
            regex: hex(0x22D3EE),
        },
        line_numbers: LineNumberStyle {
            show: true,
            color: hex(0x475569),
            background: Color::TRANSPARENT,
        },
        cursor: CursorStyle {
            color: hex(0x3B82F6),
            blink_frames: 15,
        },
    }
}
