use iced::Color;

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

// ── Background colors ──
pub const BG_PRIMARY: Color = rgb(0x10, 0x11, 0x18);
pub const BG_SECONDARY: Color = rgb(0x18, 0x1a, 0x25);
pub const BG_TERTIARY: Color = rgb(0x22, 0x25, 0x34);
pub const BG_HOVER: Color = rgb(0x2c, 0x30, 0x42);

// ── Border colors ──
pub const BORDER: Color = rgb(0x2e, 0x32, 0x46);
pub const BORDER_LIGHT: Color = rgb(0x45, 0x4a, 0x63);

// ── Text colors ──
pub const TEXT_PRIMARY: Color = rgb(0xec, 0xed, 0xf3);
pub const TEXT_SECONDARY: Color = rgb(0xa4, 0xa8, 0xbc);
pub const TEXT_MUTED: Color = rgb(0x6e, 0x73, 0x8c);

// ── Accent ──
pub const ACCENT: Color = rgb(0xe5, 0x4b, 0x6b);
pub const ACCENT_HOVER: Color = rgb(0xf0, 0x6e, 0x88);
pub const ACCENT_DIM: Color = rgb(0x7a, 0x2a, 0x40);

// ── Semantic ──
pub const SUCCESS: Color = rgb(0x2f, 0xbf, 0x71);
pub const WARNING: Color = rgb(0xf2, 0xa3, 0x2c);
pub const ERROR: Color = rgb(0xe8, 0x48, 0x48);

// ── Header ──
pub const HERO_TOP: Color = rgb(0x2a, 0x1a, 0x2e);
pub const SCRIM: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.6);

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha.clamp(0.0, 1.0),
        ..color
    }
}

/// Season progress color: green when caught up, accent while watching, muted otherwise.
pub fn season_progress_color(watched: usize, aired: usize) -> Color {
    if aired > 0 && watched >= aired {
        SUCCESS
    } else if watched > 0 {
        ACCENT
    } else {
        TEXT_MUTED
    }
}

/// Rating color: green >= 7.5, yellow >= 5, red below.
pub fn rating_color(rating: f32) -> Color {
    if rating >= 7.5 {
        SUCCESS
    } else if rating >= 5.0 {
        WARNING
    } else {
        ERROR
    }
}
