//! Folder color swatches offered by the color picker.

/// Fixed 16-swatch palette, in picker order.
pub const FOLDER_COLORS: [&str; 16] = [
    "#ef4444", // red
    "#f97316", // orange
    "#f59e0b", // amber
    "#eab308", // yellow
    "#84cc16", // lime
    "#22c55e", // green
    "#14b8a6", // teal
    "#06b6d4", // cyan
    "#3b82f6", // blue
    "#6366f1", // indigo
    "#8b5cf6", // violet
    "#a855f7", // purple
    "#d946ef", // fuchsia
    "#ec4899", // pink
    "#f43f5e", // rose
    "#6b7280", // gray
];

/// Swatch preselected for new folders.
pub const DEFAULT_FOLDER_COLOR: &str = FOLDER_COLORS[0];

/// Returns whether `color` is one of the palette swatches (case-insensitive).
///
/// Informational only: folders may carry any color string.
pub fn is_palette_color(color: &str) -> bool {
    FOLDER_COLORS
        .iter()
        .any(|swatch| swatch.eq_ignore_ascii_case(color.trim()))
}

#[cfg(test)]
mod tests {
    use super::{is_palette_color, DEFAULT_FOLDER_COLOR, FOLDER_COLORS};
    use std::collections::HashSet;

    #[test]
    fn palette_has_sixteen_distinct_swatches() {
        let unique = FOLDER_COLORS.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), 16);
        assert_eq!(DEFAULT_FOLDER_COLOR, "#ef4444");
    }

    #[test]
    fn palette_lookup_ignores_case() {
        assert!(is_palette_color("#3B82F6"));
        assert!(!is_palette_color("#123456"));
    }
}
