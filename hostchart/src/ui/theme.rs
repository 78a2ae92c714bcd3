//! Shared UI theme constants.

use ratatui::style::Color;

// Primary and secondary series colors, shared by readout dots and chart lines
pub const SERIES_PRIMARY: Color = Color::Rgb(96, 165, 250);
pub const SERIES_SECONDARY: Color = Color::Rgb(244, 164, 96);
// Dimmed variants for the area under each series
pub const SERIES_PRIMARY_FILL: Color = Color::Rgb(36, 62, 94);
pub const SERIES_SECONDARY_FILL: Color = Color::Rgb(92, 62, 36);

pub const AXIS: Color = Color::DarkGray;
pub const MUTED: Color = Color::Gray;
pub const ERROR_TEXT: Color = Color::Rgb(170, 170, 180);
