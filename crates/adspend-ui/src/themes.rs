use adspend_core::models::Platform;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Guess the terminal background from the `COLORFGBG` environment variable.
///
/// `COLORFGBG` carries `"<fg>;<bg>"` ANSI palette indices; a background
/// index of 7 or above is treated as light. A missing or unparseable
/// variable falls back to dark.
pub fn detect_background() -> BackgroundType {
    let Ok(val) = std::env::var("COLORFGBG") else {
        return BackgroundType::Dark;
    };
    match val.split(';').next_back().and_then(|bg| bg.parse::<u8>().ok()) {
        Some(bg_num) if bg_num <= 6 => BackgroundType::Dark,
        Some(_) => BackgroundType::Light,
        None => BackgroundType::Dark,
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

fn fg(color: Color) -> Style {
    Style::default().fg(color)
}

fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Complete theme definition carrying all UI styles used by adspend-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_badge: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── KPI panel ────────────────────────────────────────────────────────────
    pub kpi_label: Style,
    pub kpi_value: Style,

    // ── Platform series ──────────────────────────────────────────────────────
    pub platform_google: Style,
    pub platform_facebook: Style,
    pub platform_linkedin: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Axis lines and tick labels on both charts.
    pub chart_axis: Style,

    // ── Share bars ───────────────────────────────────────────────────────────
    /// Unfilled portion of a cost-share bar.
    pub share_empty: Style,
    pub share_label: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default). Magenta accents, green
    /// totals row.
    pub fn dark() -> Self {
        Self {
            header: bold(Color::Magenta),
            header_badge: fg(Color::LightYellow),
            separator: fg(Color::DarkGray),

            text: fg(Color::White),
            dim: fg(Color::DarkGray),
            bold: bold(Color::White),
            label: fg(Color::Gray),
            value: bold(Color::White),

            info: fg(Color::Cyan),
            success: fg(Color::Green),
            warning: fg(Color::Yellow),
            error: fg(Color::Red),

            kpi_label: fg(Color::Gray),
            kpi_value: bold(Color::White),

            platform_google: fg(Color::Yellow),
            platform_facebook: fg(Color::Blue),
            platform_linkedin: fg(Color::Cyan),

            chart_axis: fg(Color::Gray),

            share_empty: fg(Color::DarkGray),
            share_label: fg(Color::Gray),

            table_header: bold(Color::Magenta),
            table_border: fg(Color::DarkGray),
            table_row: fg(Color::White),
            table_row_alt: fg(Color::Gray),
            table_total: bold(Color::Green),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and bright accent colours so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: bold(Color::Blue),
            header_badge: fg(Color::Magenta),
            separator: fg(Color::Gray),

            text: fg(Color::Black),
            dim: fg(Color::Gray),
            bold: bold(Color::Black),
            label: fg(Color::DarkGray),
            value: bold(Color::Black),

            info: fg(Color::Blue),
            success: fg(Color::Green),
            warning: fg(Color::Yellow),
            error: fg(Color::Red),

            kpi_label: fg(Color::DarkGray),
            kpi_value: bold(Color::Black),

            platform_google: fg(Color::Red),
            platform_facebook: fg(Color::Blue),
            platform_linkedin: fg(Color::Magenta),

            chart_axis: fg(Color::DarkGray),

            share_empty: fg(Color::Gray),
            share_label: fg(Color::DarkGray),

            table_header: bold(Color::Blue),
            table_border: fg(Color::Gray),
            table_row: fg(Color::Black),
            table_row_alt: fg(Color::DarkGray),
            table_total: bold(Color::Magenta),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to maintain a retro aesthetic and maximise
    /// compatibility with minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: fg(Color::Cyan),
            header_badge: fg(Color::White),
            separator: fg(Color::DarkGray),

            text: fg(Color::White),
            dim: fg(Color::DarkGray),
            bold: fg(Color::White),
            label: fg(Color::Gray),
            value: fg(Color::White),

            info: fg(Color::Cyan),
            success: fg(Color::Green),
            warning: fg(Color::Yellow),
            error: fg(Color::Red),

            kpi_label: fg(Color::Gray),
            kpi_value: fg(Color::White),

            platform_google: fg(Color::Yellow),
            platform_facebook: fg(Color::Blue),
            platform_linkedin: fg(Color::Cyan),

            chart_axis: fg(Color::White),

            share_empty: fg(Color::DarkGray),
            share_label: fg(Color::White),

            table_header: fg(Color::Cyan),
            table_border: fg(Color::DarkGray),
            table_row: fg(Color::White),
            table_row_alt: fg(Color::Gray),
            table_total: fg(Color::Yellow),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Return the series colour for a platform, used consistently across
    /// chart lines, scatter points, share bars and legends.
    pub fn platform_style(&self, platform: Platform) -> Style {
        match platform {
            Platform::GoogleAds => self.platform_google,
            Platform::FacebookAds => self.platform_facebook,
            Platform::LinkedinAds => self.platform_linkedin,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    // ── Theme construction ───────────────────────────────────────────────────

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        // Verify key fields are meaningfully set (not the default unstyled value
        // for all of them).
        assert_eq!(t.header.fg, Some(Color::Magenta));
        assert_eq!(t.success.fg, Some(Color::Green));
        assert_eq!(t.warning.fg, Some(Color::Yellow));
        assert_eq!(t.error.fg, Some(Color::Red));
        assert_eq!(t.platform_google.fg, Some(Color::Yellow));
        assert_eq!(t.platform_facebook.fg, Some(Color::Blue));
        assert_eq!(t.platform_linkedin.fg, Some(Color::Cyan));
        assert_eq!(t.kpi_value.fg, Some(Color::White));
        assert_eq!(t.table_total.fg, Some(Color::Green));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.platform_google.fg, Some(Color::Red));
        assert_eq!(t.table_row.fg, Some(Color::Black));
        assert_eq!(t.kpi_value.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_creation() {
        let t = Theme::classic();
        // Classic has no bold modifiers on primary text fields.
        assert!(!t.bold.add_modifier.contains(Modifier::BOLD));
        assert!(!t.kpi_value.add_modifier.contains(Modifier::BOLD));
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.table_total.fg, Some(Color::Yellow));
        // Classic table_total must NOT have BOLD (unlike dark/light).
        assert!(!t.table_total.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_dark() {
        let t = Theme::from_name("dark");
        assert_eq!(t.header.fg, Some(Color::Magenta));
    }

    #[test]
    fn test_from_name_light() {
        let t = Theme::from_name("light");
        assert_eq!(t.header.fg, Some(Color::Blue));
    }

    #[test]
    fn test_from_name_classic() {
        let t = Theme::from_name("classic");
        // Classic header is Cyan without BOLD.
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        // Unknown names must not panic and must return a valid theme.
        let t = Theme::from_name("does-not-exist");
        // Must have at least one meaningful style set.
        assert!(t.header.fg.is_some());
    }

    // ── platform_style ───────────────────────────────────────────────────────

    #[test]
    fn test_platform_style_mapping() {
        let t = Theme::dark();
        assert_eq!(
            t.platform_style(Platform::GoogleAds).fg,
            Some(Color::Yellow)
        );
        assert_eq!(
            t.platform_style(Platform::FacebookAds).fg,
            Some(Color::Blue)
        );
        assert_eq!(
            t.platform_style(Platform::LinkedinAds).fg,
            Some(Color::Cyan)
        );
    }

    #[test]
    fn test_platform_style_follows_theme() {
        let t = Theme::light();
        assert_eq!(t.platform_style(Platform::GoogleAds).fg, Some(Color::Red));
        assert_eq!(
            t.platform_style(Platform::LinkedinAds).fg,
            Some(Color::Magenta)
        );
    }
}
