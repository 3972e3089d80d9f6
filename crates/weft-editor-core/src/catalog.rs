//! Static option catalogs for the color and icon pickers.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Default color palette: 8 rows of 10 swatches, greys first.
pub const DEFAULT_COLORS: [[&str; 10]; 8] = [
    [
        "#000000", "#434343", "#666666", "#999", "#b7b7b7", "#cccccc", "#d9d9d9", "#efefef",
        "#f3f3f3", "#ffffff",
    ],
    [
        "#980000", "#ff0000", "#f90", "#ff0", "#0f0", "#0ff", "#4986e8", "#0c00ff", "#9902ff",
        "#ff00ff",
    ],
    [
        "#e6b8af", "#f3c9cb", "#fce4cd", "#fff2cc", "#d9e9d3", "#cfdfe1", "#c9daf8", "#d0e1f3",
        "#d9d1e9", "#ead1da",
    ],
    [
        "#dd7c6b", "#e89a99", "#f9cb9c", "#ffe59a", "#b5d6a8", "#a2c4c9", "#a4c2f4", "#9fc5e8",
        "#b5a5d4", "#d4a6bd",
    ],
    [
        "#cc4025", "#e06666", "#f6b26b", "#fed966", "#93c47d", "#76a5ae", "#6d9eeb", "#70a7dc",
        "#8e7cc3", "#c27ba0",
    ],
    [
        "#a51b01", "#cc0200", "#e69138", "#f1c231", "#6aa74f", "#44818e", "#3c77d8", "#3e83c6",
        "#674ea6", "#a64d77",
    ],
    [
        "#85210c", "#990001", "#b45e06", "#c09001", "#38761d", "#144f5c", "#1354cb", "#0d5394",
        "#351c73", "#741947",
    ],
    [
        "#5b0f00", "#660000", "#773f05", "#7f6000", "#284e12", "#0c343d", "#1b4585", "#083763",
        "#20124d", "#4c1130",
    ],
];

/// Default icon set: 8 rows of 5 glyphs.
pub const DEFAULT_ICONS: [[&str; 5]; 8] = [
    ["☆", "★", "✿", "✤", "⁎"],
    ["©", "®", "™", "☞", "☛"],
    ["☏", "☎", "✆", "✉", "⌂"],
    ["🏘", "【", "】", "£", "€"],
    ["♩", "♪", "♫", "♬", "♭"],
    ["☀", "☂", "☃", "➢", "➤"],
    ["♚", "♦", "♠", "♣", "♥"],
    ["⬇", "⬆", "⬍", "⇓", "⇑"],
];

/// A grid of picker values, row by row.
///
/// Empty rows are dropped on construction so that rendering never produces
/// an empty row container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<SmolStr>>", into = "Vec<Vec<SmolStr>>")]
pub struct Catalog {
    rows: Vec<Vec<SmolStr>>,
}

impl Catalog {
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        Self { rows }
    }

    /// The built-in color palette.
    pub fn default_colors() -> Self {
        Self::from_rows(DEFAULT_COLORS)
    }

    /// The built-in icon set.
    pub fn default_icons() -> Self {
        Self::from_rows(DEFAULT_ICONS)
    }

    pub fn rows(&self) -> &[Vec<SmolStr>] {
        &self.rows
    }

    /// Total number of entries across all rows.
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Vec<SmolStr>>> for Catalog {
    fn from(rows: Vec<Vec<SmolStr>>) -> Self {
        Self::from_rows(rows)
    }
}

impl From<Catalog> for Vec<Vec<SmolStr>> {
    fn from(catalog: Catalog) -> Self {
        catalog.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shapes() {
        let colors = Catalog::default_colors();
        assert_eq!(colors.rows().len(), 8);
        assert!(colors.rows().iter().all(|row| row.len() == 10));
        assert_eq!(colors.len(), 80);

        let icons = Catalog::default_icons();
        assert_eq!(icons.rows().len(), 8);
        assert!(icons.rows().iter().all(|row| row.len() == 5));
    }

    #[test]
    fn test_empty_rows_dropped() {
        let catalog = Catalog::from_rows(vec![vec!["#fff"], vec![], vec!["#000", "#111"]]);
        assert_eq!(catalog.rows().len(), 2);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_first_row_snapshot() {
        let icons = Catalog::default_icons();
        let first = icons.rows()[0].join(" ");
        insta::assert_snapshot!(first, @"☆ ★ ✿ ✤ ⁎");
    }
}
