// src/config/colors.rs
//
// Static team → marker color table for the report.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TeamColor {
    pub const fn rgb(hex: u32) -> Self {
        Self { r: (hex >> 16) as u8, g: (hex >> 8) as u8, b: hex as u8 }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fallback for abbreviations missing from the table.
pub const NEUTRAL: TeamColor = TeamColor::rgb(0x80_80_80);

const BLACK: TeamColor = TeamColor::rgb(0x00_00_00);

static TEAM_COLORS: [(&str, TeamColor); 30] = [
    ("BOS", TeamColor::rgb(0x008248)),
    ("MIN", TeamColor::rgb(0x236192)),
    ("MIL", TeamColor::rgb(0x00471b)),
    ("PHI", TeamColor::rgb(0x006bb6)),
    ("DEN", TeamColor::rgb(0x0d2240)),
    ("OKC", TeamColor::rgb(0x007ac1)),
    ("SAC", TeamColor::rgb(0x5b2b82)),
    ("ORL", TeamColor::rgb(0x0b77bd)),
    ("DAL", TeamColor::rgb(0x007dc5)),
    ("LAC", TeamColor::rgb(0x1d428a)),
    ("MIA", TeamColor::rgb(0x98002e)),
    ("NYK", TeamColor::rgb(0xf58426)),
    ("CLE", TeamColor::rgb(0x6f2633)),
    ("NOP", TeamColor::rgb(0xb4975a)),
    ("HOU", TeamColor::rgb(0xce1141)),
    ("LAL", TeamColor::rgb(0x552583)),
    ("GSW", TeamColor::rgb(0xfdb927)),
    ("IND", TeamColor::rgb(0x002d62)),
    ("PHX", TeamColor::rgb(0xb95915)),
    ("BKN", BLACK),
    ("CHI", TeamColor::rgb(0xce1141)),
    ("ATL", TeamColor::rgb(0xe03a3e)),
    ("UTA", TeamColor::rgb(0x2b5134)),
    ("TOR", TeamColor::rgb(0xa0a0a3)),
    ("MEM", TeamColor::rgb(0x5d76a9)),
    ("CHA", TeamColor::rgb(0x00788c)),
    ("POR", TeamColor::rgb(0xcf0a2c)),
    ("WAS", TeamColor::rgb(0x002b5c)),
    ("SAS", BLACK),
    ("DET", TeamColor::rgb(0x1d428a)),
];

pub fn team_color(abbreviation: &str) -> TeamColor {
    TEAM_COLORS
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(abbreviation))
        .map(|(_, c)| *c)
        .unwrap_or(NEUTRAL)
}
