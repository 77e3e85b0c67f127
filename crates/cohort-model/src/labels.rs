//! Value-to-label maps for nominal variables.
//!
//! Every nominal variable in the catalogue that is displayed in reports has
//! an entry here (`PDCAT` excepted, its values are already textual). Codes
//! outside the map decode to `None`, which downstream treats as missing
//! rather than an error.

use std::collections::BTreeMap;

/// Labels for one nominal variable, keyed by the raw integer code.
#[derive(Debug, Clone)]
pub struct CategoryLabels {
    labels: BTreeMap<i64, &'static str>,
}

impl CategoryLabels {
    fn from_pairs(pairs: &[(i64, &'static str)]) -> Self {
        Self {
            labels: pairs.iter().copied().collect(),
        }
    }

    /// Decode a raw numeric code to its label.
    ///
    /// Codes are integers in the extracts but arrive as floats after sentinel
    /// normalization; a value with a fractional part never matches.
    pub fn decode(&self, raw: f64) -> Option<&'static str> {
        if !raw.is_finite() {
            return None;
        }
        let rounded = raw.round();
        if (raw - rounded).abs() > f64::EPSILON {
            return None;
        }
        self.labels.get(&(rounded as i64)).copied()
    }
}

/// Label maps for every recodable nominal variable, keyed by variable code.
pub fn category_labels() -> BTreeMap<&'static str, CategoryLabels> {
    let mut maps = BTreeMap::new();
    maps.insert(
        "APPIOF00",
        CategoryLabels::from_pairs(&[
            (1, "Every day"),
            (2, "5-6 times per week"),
            (3, "3-4 times per week"),
            (4, "1-2 times per week"),
            (5, "1-2 times per month"),
            (6, "Less than once a month"),
        ]),
    );
    maps.insert(
        "APSMTY00",
        CategoryLabels::from_pairs(&[(1, "Yes"), (2, "No")]),
    );
    maps.insert(
        "APSMEV00",
        CategoryLabels::from_pairs(&[(1, "Yes"), (2, "No")]),
    );
    maps.insert(
        "APSMCH00",
        CategoryLabels::from_pairs(&[(1, "Yes"), (2, "No"), (3, "Can't remember")]),
    );
    maps.insert(
        "APWHCH00",
        CategoryLabels::from_pairs(&[
            (1, "First"),
            (2, "Second"),
            (3, "Third"),
            (4, "Fourth"),
            (5, "Fifth"),
            (6, "Sixth"),
            (7, "Seventh"),
            (8, "Eighth"),
            (9, "Ninth"),
            (10, "Can't remember"),
        ]),
    );
    maps.insert(
        "APSMKR00",
        CategoryLabels::from_pairs(&[(1, "Yes"), (2, "No")]),
    );
    maps.insert(
        "FCCSEX00",
        CategoryLabels::from_pairs(&[(1, "Male"), (2, "Female")]),
    );
    maps.insert(
        "FCPUHG00",
        CategoryLabels::from_pairs(&[
            (1, "My growth spurt has not yet begun"),
            (2, "My growth spurt has barely started"),
            (3, "My growth spurt has definitely started"),
            (4, "My growth spurt seems completed"),
        ]),
    );
    maps.insert(
        "FCPUBH00",
        CategoryLabels::from_pairs(&[
            (1, "My body hair has not yet begun to grow"),
            (2, "My body hair has barely started to grow"),
            (3, "My body hair has definitely started to grow"),
            (4, "My body hair growth seems completed"),
        ]),
    );
    maps.insert(
        "FCPUSK00",
        CategoryLabels::from_pairs(&[
            (1, "My skin has not yet started changing"),
            (2, "My skin has barely started changing"),
            (3, "My skin has definitely started changing"),
            (4, "My skin changes seem completed"),
        ]),
    );
    maps.insert(
        "FCPUBR00",
        CategoryLabels::from_pairs(&[
            (1, "My breasts have not yet started to grow"),
            (2, "My breasts have barely started to grow"),
            (3, "My breasts have definitely started to grow"),
            (4, "My breast growth seems completed"),
        ]),
    );
    // Menarche is recoded 1->3 / 2->0 at load so it shares the item scale
    // direction; the labels match the recoded values.
    maps.insert(
        "FCPUMN00",
        CategoryLabels::from_pairs(&[(3, "Yes"), (0, "No")]),
    );
    maps.insert(
        "FCPUVC00",
        CategoryLabels::from_pairs(&[
            (1, "My voice has not yet started getting deeper"),
            (2, "My voice has barely started getting deeper"),
            (3, "My voice has definitely started getting deeper"),
            (4, "My voice change seems completed"),
        ]),
    );
    maps.insert(
        "FCPUFH00",
        CategoryLabels::from_pairs(&[
            (1, "My facial hair has not yet started to grow"),
            (2, "My facial hair has barely started to grow"),
            (3, "My facial hair has definitely started to grow"),
            (4, "My facial hair growth seems completed"),
        ]),
    );
    maps
}
