//! Pixel whiteness classification
//!
//! Three fixed-threshold tests decide whether a pixel counts as background:
//!
//! | Test   | Alpha  | Brightness | Each channel | Variance |
//! |--------|--------|------------|--------------|----------|
//! | Strict | > 200  | ≥ 95%      | ≥ 240        | -        |
//! | Loose  | ≠ 0    | ≥ 90%      | ≥ 230        | -        |
//! | Bulk   | ≠ 0    | ≥ 90%      | ≥ 220        | < 30     |
//!
//! Brightness is `(r + g + b) / (3 * 255) * 100`. Variance is
//! `|r - g| + |g - b| + |r - b|`.

// ============================================================
// Constants
// ============================================================

/// Minimum alpha for a strict-white pixel (exclusive)
pub const STRICT_MIN_ALPHA: u8 = 200;

/// Minimum brightness percentage for strict white
pub const STRICT_MIN_BRIGHTNESS: u32 = 95;

/// Minimum per-channel value for strict white
pub const STRICT_MIN_CHANNEL: u8 = 240;

/// Minimum brightness percentage for loose white
pub const LOOSE_MIN_BRIGHTNESS: u32 = 90;

/// Minimum per-channel value for loose white
pub const LOOSE_MIN_CHANNEL: u8 = 230;

/// Minimum brightness percentage for bulk white
pub const BULK_MIN_BRIGHTNESS: u32 = 90;

/// Minimum per-channel value for bulk white
pub const BULK_MIN_CHANNEL: u8 = 220;

/// Color variance must stay strictly below this for bulk white
pub const BULK_MAX_VARIANCE: u32 = 30;

/// Sum of three full channels
const FULL_SUM: u32 = 3 * 255;

// ============================================================
// Types
// ============================================================

/// Whiteness test selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whiteness {
    /// Flood-fill membership
    Strict,
    /// Straggler cleanup next to erased pixels
    Loose,
    /// Deep clean over the whole image
    Bulk,
}

impl Whiteness {
    /// Get all tests, strictest first
    pub fn all() -> [Whiteness; 3] {
        [Whiteness::Strict, Whiteness::Loose, Whiteness::Bulk]
    }

    /// Apply this test to an RGBA pixel
    #[inline]
    pub fn matches(&self, rgba: [u8; 4]) -> bool {
        let [r, g, b, a] = rgba;
        match self {
            Whiteness::Strict => PixelClassifier::is_strict_white(r, g, b, a),
            Whiteness::Loose => PixelClassifier::is_loose_white(r, g, b, a),
            Whiteness::Bulk => PixelClassifier::is_bulk_white(r, g, b, a),
        }
    }
}

// ============================================================
// Classifier
// ============================================================

/// Stateless whiteness predicates
pub struct PixelClassifier;

impl PixelClassifier {
    /// High-confidence white used to grow erased regions.
    #[inline]
    pub fn is_strict_white(r: u8, g: u8, b: u8, a: u8) -> bool {
        a > STRICT_MIN_ALPHA
            && Self::brightness_at_least(r, g, b, STRICT_MIN_BRIGHTNESS)
            && r >= STRICT_MIN_CHANNEL
            && g >= STRICT_MIN_CHANNEL
            && b >= STRICT_MIN_CHANNEL
    }

    /// Looser white for pixels bordering erased areas.
    #[inline]
    pub fn is_loose_white(r: u8, g: u8, b: u8, a: u8) -> bool {
        a != 0
            && Self::brightness_at_least(r, g, b, LOOSE_MIN_BRIGHTNESS)
            && r >= LOOSE_MIN_CHANNEL
            && g >= LOOSE_MIN_CHANNEL
            && b >= LOOSE_MIN_CHANNEL
    }

    /// Bright and near-grey. The variance term keeps pale tints such as
    /// light yellow out.
    #[inline]
    pub fn is_bulk_white(r: u8, g: u8, b: u8, a: u8) -> bool {
        a != 0
            && Self::brightness_at_least(r, g, b, BULK_MIN_BRIGHTNESS)
            && Self::color_variance(r, g, b) < BULK_MAX_VARIANCE
            && r >= BULK_MIN_CHANNEL
            && g >= BULK_MIN_CHANNEL
            && b >= BULK_MIN_CHANNEL
    }

    /// Average brightness as a percentage (0.0 - 100.0)
    pub fn brightness_percent(r: u8, g: u8, b: u8) -> f32 {
        (r as u32 + g as u32 + b as u32) as f32 / FULL_SUM as f32 * 100.0
    }

    /// Sum of pairwise channel differences
    #[inline]
    pub fn color_variance(r: u8, g: u8, b: u8) -> u32 {
        r.abs_diff(g) as u32 + g.abs_diff(b) as u32 + r.abs_diff(b) as u32
    }

    /// `brightness_percent >= percent`, evaluated in integers
    #[inline]
    fn brightness_at_least(r: u8, g: u8, b: u8, percent: u32) -> bool {
        (r as u32 + g as u32 + b as u32) * 100 >= percent * FULL_SUM
    }
}

// ============================================================
// Tests
// ============================================================
