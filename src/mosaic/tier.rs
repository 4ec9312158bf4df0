/// Discrete tile size, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    Tier5,
    Tier6,
    Tier7,
}

/// Lower bounds in hours, inclusive, checked from the top.
const THRESHOLDS: [(f64, SizeTier); 6] = [
    (1500.0, SizeTier::Tier7),
    (1000.0, SizeTier::Tier6),
    (600.0, SizeTier::Tier5),
    (300.0, SizeTier::Tier4),
    (100.0, SizeTier::Tier3),
    (50.0, SizeTier::Tier2),
];

/// Bucket a playtime into its tile size.
pub fn classify(playtime_hours: f64) -> SizeTier {
    THRESHOLDS
        .iter()
        .find(|(min_hours, _)| playtime_hours >= *min_hours)
        .map(|(_, tier)| *tier)
        .unwrap_or(SizeTier::Tier1)
}

impl SizeTier {
    pub const ALL: [SizeTier; 7] = [
        SizeTier::Tier1,
        SizeTier::Tier2,
        SizeTier::Tier3,
        SizeTier::Tier4,
        SizeTier::Tier5,
        SizeTier::Tier6,
        SizeTier::Tier7,
    ];

    /// Stylesheet class of the tier.
    pub fn class_name(&self) -> &'static str {
        match self {
            SizeTier::Tier1 => "size-25",
            SizeTier::Tier2 => "size-50",
            SizeTier::Tier3 => "size-100",
            SizeTier::Tier4 => "size-300",
            SizeTier::Tier5 => "size-600",
            SizeTier::Tier6 => "size-1000",
            SizeTier::Tier7 => "size-1500",
        }
    }

    /// Grid footprint as (columns, rows).
    pub fn footprint(&self) -> (u32, u32) {
        match self {
            SizeTier::Tier1 => (1, 1),
            SizeTier::Tier2 => (2, 1),
            SizeTier::Tier3 => (2, 2),
            SizeTier::Tier4 => (3, 2),
            SizeTier::Tier5 => (3, 3),
            SizeTier::Tier6 => (4, 3),
            SizeTier::Tier7 => (4, 4),
        }
    }
}
