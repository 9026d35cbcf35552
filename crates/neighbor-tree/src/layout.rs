/// Vertical space allotted to each first-level group, in pixels.
pub const ROW_HEIGHT: f64 = 20.5;
/// The diagram panel never gets shorter than this.
pub const MIN_PANEL_HEIGHT: u32 = 500;

/// Height hint for the panel hosting the tree diagram, from the number of
/// first-level groups. Half-pixel results round to even.
pub fn panel_height(top_level_count: usize) -> u32 {
    let raw = (top_level_count as f64 * ROW_HEIGHT).round_ties_even();
    if raw < MIN_PANEL_HEIGHT as f64 {
        MIN_PANEL_HEIGHT
    } else if raw >= u32::MAX as f64 {
        u32::MAX
    } else {
        raw as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_trees_get_minimum() {
        assert_eq!(panel_height(0), MIN_PANEL_HEIGHT);
        assert_eq!(panel_height(24), MIN_PANEL_HEIGHT);
    }

    #[test]
    fn test_height_grows_linearly() {
        // 25 * 20.5 = 512.5, ties to even
        assert_eq!(panel_height(25), 512);
        // 27 * 20.5 = 553.5
        assert_eq!(panel_height(27), 554);
        assert_eq!(panel_height(100), 2050);
    }
}
