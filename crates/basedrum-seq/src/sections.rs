//! Bar-range sections and per-instrument gain offsets.
//!
//! For long arrangements the mix breathes: a section is looked up from the
//! current bar, then a nested table gives a per-instrument dB offset applied
//! at trigger time. Absent sections or instruments mean offset 0. The tables
//! are tuning data; the lookup never fails.

use basedrum_spec::song::SongDocument;

/// Named arrangement section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Intro,
    Buildup,
    Drop,
    Breakdown,
    Peak,
}

impl Section {
    /// Returns the section as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Intro => "intro",
            Section::Buildup => "buildup",
            Section::Drop => "drop",
            Section::Breakdown => "breakdown",
            Section::Peak => "peak",
        }
    }

    /// Parses a section name as used in document arrangements.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "intro" => Some(Section::Intro),
            "buildup" => Some(Section::Buildup),
            "drop" => Some(Section::Drop),
            "breakdown" => Some(Section::Breakdown),
            "peak" => Some(Section::Peak),
            _ => None,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Standard 32-bar shape: inclusive 1-based bar ranges.
const STANDARD_RANGES: [(u16, u16, Section); 5] = [
    (1, 4, Section::Intro),
    (5, 12, Section::Buildup),
    (13, 20, Section::Drop),
    (21, 24, Section::Breakdown),
    (25, 32, Section::Peak),
];

// Per-section instrument offsets in dB. Instruments not listed sit at 0.
const SECTION_OFFSETS: [(Section, &[(&str, f64)]); 5] = [
    (
        Section::Intro,
        &[("snare", -12.0), ("bass", -6.0), ("hats", -18.0), ("lead", -24.0)],
    ),
    (Section::Buildup, &[("lead", -9.0), ("bass", -3.0)]),
    (Section::Drop, &[]),
    (
        Section::Breakdown,
        &[("kick", -9.0), ("snare", -6.0), ("hats", -3.0)],
    ),
    (Section::Peak, &[("hats", 1.5), ("lead", 1.5)]),
];

/// Bar to section to per-instrument gain-offset lookup.
#[derive(Debug, Clone, Default)]
pub struct SectionVolumeMap {
    ranges: Vec<(u16, u16, Section)>,
}

impl SectionVolumeMap {
    /// A map with no sections: every offset is 0. Right for one-bar seed
    /// loops, which have no arrangement to breathe over.
    pub fn flat() -> Self {
        Self::default()
    }

    /// The standard 32-bar intro/buildup/drop/breakdown/peak shape.
    pub fn standard() -> Self {
        Self {
            ranges: STANDARD_RANGES.to_vec(),
        }
    }

    /// Builds the map from a document's own arrangement where section names
    /// are recognized; falls back to [`SectionVolumeMap::standard`] for
    /// multi-bar documents without one, and [`SectionVolumeMap::flat`] for
    /// single-bar documents.
    pub fn for_document(doc: &SongDocument) -> Self {
        if let Some(arrangement) = &doc.arrangement {
            let mut ranges: Vec<(u16, u16, Section)> = arrangement
                .iter()
                .filter_map(|(name, entry)| {
                    Section::from_name(name).map(|s| (entry.bars[0], entry.bars[1], s))
                })
                .collect();
            if !ranges.is_empty() {
                ranges.sort_by_key(|&(start, _, _)| start);
                return Self { ranges };
            }
        }
        if doc.metadata.bars > 1 {
            Self::standard()
        } else {
            Self::flat()
        }
    }

    /// The section covering a 1-based bar index, if any.
    pub fn section_for_bar(&self, bar: u16) -> Option<Section> {
        self.ranges
            .iter()
            .find(|&&(start, end, _)| bar >= start && bar <= end)
            .map(|&(_, _, section)| section)
    }

    /// dB offset for an instrument in the section covering `bar`.
    pub fn offset(&self, bar: u16, track: &str) -> f64 {
        let Some(section) = self.section_for_bar(bar) else {
            return 0.0;
        };
        SECTION_OFFSETS
            .iter()
            .find(|&&(s, _)| s == section)
            .and_then(|&(_, offsets)| {
                offsets
                    .iter()
                    .find(|&&(name, _)| name == track)
                    .map(|&(_, db)| db)
            })
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basedrum_spec::song::{
        ActiveTracks, ArrangementSection, SongEffects, SongMetadata, SongTrack,
    };
    use std::collections::BTreeMap;

    #[test]
    fn flat_map_is_always_zero() {
        let map = SectionVolumeMap::flat();
        assert_eq!(map.section_for_bar(1), None);
        assert_eq!(map.offset(1, "kick"), 0.0);
        assert_eq!(map.offset(32, "lead"), 0.0);
    }

    #[test]
    fn standard_ranges_cover_32_bars() {
        let map = SectionVolumeMap::standard();
        assert_eq!(map.section_for_bar(1), Some(Section::Intro));
        assert_eq!(map.section_for_bar(4), Some(Section::Intro));
        assert_eq!(map.section_for_bar(5), Some(Section::Buildup));
        assert_eq!(map.section_for_bar(13), Some(Section::Drop));
        assert_eq!(map.section_for_bar(24), Some(Section::Breakdown));
        assert_eq!(map.section_for_bar(32), Some(Section::Peak));
        assert_eq!(map.section_for_bar(33), None);
    }

    #[test]
    fn absent_keys_default_to_zero() {
        let map = SectionVolumeMap::standard();
        // Drop has no listed instruments.
        assert_eq!(map.offset(13, "kick"), 0.0);
        // Intro ducks the snare but leaves the kick alone.
        assert_eq!(map.offset(1, "snare"), -12.0);
        assert_eq!(map.offset(1, "kick"), 0.0);
        // Unknown instrument names are neutral everywhere.
        assert_eq!(map.offset(1, "cowbell"), 0.0);
    }

    #[test]
    fn document_arrangement_overrides_the_standard_shape() {
        let metadata = SongMetadata::new("Arranged", 140, 32, "2024-06-01T00:00:00Z");
        let mut doc = SongDocument::new(metadata, SongEffects::default());
        doc.insert_track("kick", SongTrack::hits(vec![0], -4.0));
        let mut arrangement = BTreeMap::new();
        arrangement.insert(
            "drop".to_string(),
            ArrangementSection {
                bars: [1, 16],
                active_tracks: ActiveTracks::all(),
            },
        );
        arrangement.insert(
            "breakdown".to_string(),
            ArrangementSection {
                bars: [17, 32],
                active_tracks: ActiveTracks::all(),
            },
        );
        doc.arrangement = Some(arrangement);

        let map = SectionVolumeMap::for_document(&doc);
        assert_eq!(map.section_for_bar(2), Some(Section::Drop));
        assert_eq!(map.section_for_bar(20), Some(Section::Breakdown));
    }

    #[test]
    fn single_bar_documents_stay_flat() {
        let metadata = SongMetadata::new("Loop", 140, 1, "2024-06-01T00:00:00Z");
        let doc = SongDocument::new(metadata, SongEffects::default());
        let map = SectionVolumeMap::for_document(&doc);
        assert_eq!(map.section_for_bar(1), None);
    }
}
