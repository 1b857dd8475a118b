use ratatui::style::{Color, Modifier, Style};

use crate::types::prediction::{PriceRange, SeverityTier};

/// Light, gradient-free palette for the prediction form.
pub struct Theme;

impl Theme {
    // Core palette
    pub const FG: Color = Color::Rgb(230, 233, 240);
    pub const FG_DIM: Color = Color::Rgb(150, 158, 175);
    pub const FG_MUTED: Color = Color::Rgb(95, 102, 118);
    pub const PRIMARY: Color = Color::Rgb(108, 99, 255);

    // Verdict accents
    pub const GREEN: Color = Color::Rgb(46, 204, 113);
    pub const BLUE: Color = Color::Rgb(52, 152, 219);
    pub const ORANGE: Color = Color::Rgb(243, 156, 18);
    pub const RED: Color = Color::Rgb(231, 76, 60);

    pub fn base() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Border of the panel holding the focused control.
    pub fn border_active() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::PRIMARY).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Row of the focused control.
    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::FG)
            .bg(Color::Rgb(40, 38, 80))
            .add_modifier(Modifier::BOLD)
    }

    pub fn key() -> Style {
        Style::default().fg(Self::BLUE).add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::RED).add_modifier(Modifier::BOLD)
    }

    /// Accent for a price range: green, blue, orange, red.
    pub fn range(range: PriceRange) -> Style {
        let color = match range {
            PriceRange::Low => Self::GREEN,
            PriceRange::Medium => Self::BLUE,
            PriceRange::High => Self::ORANGE,
            PriceRange::VeryHigh => Self::RED,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Border treatment for a severity tier.
    pub fn tier(tier: SeverityTier) -> Style {
        let color = match tier {
            SeverityTier::Info => Self::BLUE,
            SeverityTier::Warning => Self::ORANGE,
            SeverityTier::Error => Self::RED,
        };
        Style::default().fg(color)
    }
}
