//! Display sizing for study cards, in `rem`.

/// Scale used for words up to `LONG_WORD_THRESHOLD` characters.
pub const BASE_SCALE: f32 = 1.8;
/// Smallest scale a long word can shrink to.
pub const MIN_SCALE: f32 = 1.0;
/// Length (in characters) after which words start shrinking.
pub const LONG_WORD_THRESHOLD: usize = 15;
/// Shrink per character beyond the threshold.
pub const SCALE_STEP: f32 = 0.1;
/// Translations render this much smaller than a word of the same length.
pub const TRANSLATION_OFFSET: f32 = 0.4;

/// Font scale for a word on a study card.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn word_scale(text: &str) -> f32 {
    let len = text.chars().count();
    if len <= LONG_WORD_THRESHOLD {
        return BASE_SCALE;
    }
    let excess = (len - LONG_WORD_THRESHOLD) as f32;
    (BASE_SCALE - excess * SCALE_STEP).max(MIN_SCALE)
}

/// Font scale for the translation line under a word.
#[must_use]
pub fn translation_scale(text: &str) -> f32 {
    word_scale(text) - TRANSLATION_OFFSET
}
