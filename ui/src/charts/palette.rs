//! Qualitative color palette and the ordinal key → color mapping.

/// Tableau's ten-color categorical scheme.
pub const TABLEAU10: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Assigns palette colors to keys in the order keys are first seen, cycling
/// once the palette is exhausted. The same key always gets the same color
/// for the lifetime of the mapping.
#[derive(Debug, Clone)]
pub struct OrdinalColors<K> {
    palette: &'static [&'static str],
    seen: Vec<K>,
}

impl<K: PartialEq + Clone> OrdinalColors<K> {
    pub fn new(palette: &'static [&'static str]) -> Self {
        Self {
            palette,
            seen: Vec::new(),
        }
    }

    pub fn tableau10() -> Self {
        Self::new(&TABLEAU10)
    }

    pub fn color(&mut self, key: &K) -> &'static str {
        let slot = match self.seen.iter().position(|k| k == key) {
            Some(slot) => slot,
            None => {
                self.seen.push(key.clone());
                self.seen.len() - 1
            }
        };
        self.palette[slot % self.palette.len()]
    }
}
