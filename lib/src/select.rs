use crate::charset::CharacterSet;
use crate::error::{GlyphtoneError, Result};
use crate::profile::GlyphProfile;

/// Pick the character whose profiled brightness is closest to `target`
///
/// Positions are scanned in set order with a strict `<`, so on a tie the
/// earliest character wins.
///
/// # Errors
/// [`GlyphtoneError::NoCharactersAvailable`] for an empty set.
pub fn select_glyph(characters: &CharacterSet, profile: &GlyphProfile, target: u8) -> Result<char> {
    let mut best: Option<(usize, u32)> = None;
    for (index, brightness) in profile.values().iter().enumerate() {
        let diff = (*brightness as i32 - target as i32).unsigned_abs();
        if best.is_none_or(|(_, best_diff)| diff < best_diff) {
            best = Some((index, diff));
        }
    }

    best.and_then(|(index, _)| characters.get(index))
        .ok_or(GlyphtoneError::NoCharactersAvailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_exact_match() {
        let set = CharacterSet::new(" .#");
        let profile = GlyphProfile::from_values(vec![0, 40, 200]);
        assert_eq!(select_glyph(&set, &profile, 40).unwrap(), '.');
        assert_eq!(select_glyph(&set, &profile, 255).unwrap(), '#');
        assert_eq!(select_glyph(&set, &profile, 0).unwrap(), ' ');
    }

    #[test]
    fn test_select_nearest() {
        let set = CharacterSet::new(" .#");
        let profile = GlyphProfile::from_values(vec![0, 40, 200]);
        assert_eq!(select_glyph(&set, &profile, 119).unwrap(), '.');
        assert_eq!(select_glyph(&set, &profile, 121).unwrap(), '#');
    }

    #[test]
    fn test_select_tie_goes_to_earlier_character() {
        let set = CharacterSet::new("ab");
        let profile = GlyphProfile::from_values(vec![90, 90]);
        assert_eq!(select_glyph(&set, &profile, 10).unwrap(), 'a');

        let set = CharacterSet::new("ba");
        assert_eq!(select_glyph(&set, &profile, 10).unwrap(), 'b');

        // Equal distance on either side of the target
        let set = CharacterSet::new("xy");
        let profile = GlyphProfile::from_values(vec![100, 120]);
        assert_eq!(select_glyph(&set, &profile, 110).unwrap(), 'x');
    }

    #[test]
    fn test_select_mid_grey_between_black_and_white() {
        // '#' at 0 and ' ' at 255: 128 is 128 from '#' and 127 from ' '
        let set = CharacterSet::new("# ");
        let profile = GlyphProfile::from_values(vec![0, 255]);
        assert_eq!(select_glyph(&set, &profile, 128).unwrap(), ' ');
    }

    #[test]
    fn test_select_empty_set() {
        let set = CharacterSet::new("");
        let profile = GlyphProfile::from_values(Vec::new());
        assert!(matches!(
            select_glyph(&set, &profile, 128),
            Err(GlyphtoneError::NoCharactersAvailable)
        ));
    }
}
