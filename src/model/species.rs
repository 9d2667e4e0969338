use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Closed set of insect kinds. Every per-species attribute lives in the
/// static table below; nothing else branches on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Beetle,
    Butterfly,
    Ladybug,
    Caterpillar,
    Dragonfly,
    Ant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPattern {
    Walk,
    Flutter,
    Quick,
    Crawl,
}

/// Fixed attributes of one species.
pub struct SpeciesInfo {
    pub name: &'static str,
    /// Base horizontal speed in px per millisecond.
    pub speed: f64,
    pub pattern: MovementPattern,
    /// Passive income weight per creature level.
    pub income_multiplier: f64,
    pub primary: Color,
    pub secondary: Color,
    /// Two-frame walk cycle glyphs, indexed by animation frame.
    pub symbols: [char; 2],
}

static SPECIES_TABLE: [SpeciesInfo; 6] = [
    SpeciesInfo {
        name: "beetle",
        speed: 0.020,
        pattern: MovementPattern::Walk,
        income_multiplier: 1.0,
        primary: Color::Rgb(139, 69, 19),
        secondary: Color::Rgb(101, 67, 33),
        symbols: ['b', 'd'],
    },
    SpeciesInfo {
        name: "butterfly",
        speed: 0.025,
        pattern: MovementPattern::Flutter,
        income_multiplier: 1.5,
        primary: Color::Rgb(255, 105, 180),
        secondary: Color::Rgb(255, 182, 193),
        symbols: ['W', 'V'],
    },
    SpeciesInfo {
        name: "ladybug",
        speed: 0.030,
        pattern: MovementPattern::Quick,
        income_multiplier: 2.0,
        primary: Color::Rgb(255, 0, 0),
        secondary: Color::Rgb(0, 0, 0),
        symbols: ['o', '0'],
    },
    SpeciesInfo {
        name: "caterpillar",
        speed: 0.015,
        pattern: MovementPattern::Crawl,
        income_multiplier: 0.8,
        primary: Color::Rgb(50, 205, 50),
        secondary: Color::Rgb(34, 139, 34),
        symbols: ['~', '-'],
    },
    SpeciesInfo {
        name: "dragonfly",
        speed: 0.035,
        pattern: MovementPattern::Flutter,
        income_multiplier: 1.0,
        primary: Color::Rgb(0, 206, 209),
        secondary: Color::Rgb(72, 209, 204),
        symbols: ['x', '+'],
    },
    SpeciesInfo {
        name: "ant",
        speed: 0.022,
        pattern: MovementPattern::Walk,
        income_multiplier: 1.0,
        primary: Color::Rgb(59, 47, 47),
        secondary: Color::Rgb(90, 70, 60),
        symbols: ['a', 'e'],
    },
];

impl Species {
    pub const ALL: [Species; 6] = [
        Species::Beetle,
        Species::Butterfly,
        Species::Ladybug,
        Species::Caterpillar,
        Species::Dragonfly,
        Species::Ant,
    ];

    pub fn info(self) -> &'static SpeciesInfo {
        &SPECIES_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Parses the save-file tag. Unknown tags yield `None` so a corrupted
    /// record can be skipped instead of aborting the restore.
    pub fn from_tag(tag: &str) -> Option<Species> {
        Species::ALL.iter().copied().find(|s| s.name() == tag)
    }
}
