use crate::StringFilter;

/// Removes characters outside the Basic Multilingual Plane.
///
/// Most emojis live in the supplementary planes, so this works as a rough emoji stripper. Other
/// supplementary-plane scripts are removed as well.
#[derive(Clone, Copy, Debug, Default)]
pub struct SupplementaryPlaneFilter;

impl StringFilter for SupplementaryPlaneFilter {
    fn filter(&self, string: &str) -> String {
        string.chars().filter(|&c| u32::from(c) < 0x10000).collect()
    }
}
