use crate::models::Category;

/// Glyph edge length for a regular marker, in screen pixels.
pub const BASE_SIZE_PX: f64 = 24.0;

/// Highlighted markers grow by this factor.
pub const HIGHLIGHT_SCALE: f64 = 7.0 / 6.0;

pub const BASE_Z_ORDER: i32 = 400;
pub const HIGHLIGHT_Z_ORDER: i32 = 1000;

/// Category used by the temporary marker shown at a freshly picked point.
pub const PENDING_CATEGORY: Category = Category::Smoke;

/// Render description of one marker on the radar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub size_px: f64,
    /// Distance from the glyph's top-left corner to its anchor, on both axes.
    pub anchor_offset_px: f64,
    pub color: &'static str,
    pub icon: &'static str,
    pub z_order: i32,
}

pub fn category_color(category: Category) -> &'static str {
    match category {
        Category::Smoke => "#3b82f6",
        Category::Flashbang => "#f97316",
        Category::Molotov => "#ef4444",
        Category::Strategy => "#22c55e",
    }
}

/// Glyph for a marker. A pure function of its inputs; callers guarantee at
/// most one highlighted marker at a time.
pub fn build_glyph(category: Category, highlighted: bool) -> Glyph {
    let size_px = if highlighted {
        BASE_SIZE_PX * HIGHLIGHT_SCALE
    } else {
        BASE_SIZE_PX
    };
    Glyph {
        size_px,
        anchor_offset_px: size_px / 2.0,
        color: category_color(category),
        icon: category.icon(),
        z_order: if highlighted {
            HIGHLIGHT_Z_ORDER
        } else {
            BASE_Z_ORDER
        },
    }
}

pub fn pending_glyph() -> Glyph {
    build_glyph(PENDING_CATEGORY, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_table() {
        assert_eq!(category_color(Category::Smoke), "#3b82f6");
        assert_eq!(category_color(Category::Flashbang), "#f97316");
        assert_eq!(category_color(Category::Molotov), "#ef4444");
        assert_eq!(category_color(Category::Strategy), "#22c55e");
    }

    #[test]
    fn test_colors_are_distinct() {
        let colors: Vec<&str> = Category::ALL.iter().map(|c| category_color(*c)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_highlight_keeps_anchor_centered() {
        for c in Category::ALL {
            let g = build_glyph(c, true);
            assert_eq!(g.anchor_offset_px, g.size_px / 2.0);
            let plain = build_glyph(c, false);
            assert_eq!(plain.anchor_offset_px, plain.size_px / 2.0);
        }
    }

    #[test]
    fn test_highlight_is_larger_and_on_top() {
        let plain = build_glyph(Category::Molotov, false);
        let hot = build_glyph(Category::Molotov, true);
        assert!(hot.size_px > plain.size_px);
        assert!(hot.size_px <= plain.size_px * 1.2);
        assert!(hot.z_order > plain.z_order);
        assert_eq!(hot.color, plain.color);
    }

    #[test]
    fn test_pending_glyph_matches_regular_smoke() {
        assert_eq!(pending_glyph(), build_glyph(Category::Smoke, false));
    }
}
