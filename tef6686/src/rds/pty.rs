//! Program Type (PTY) codes and their display names.

/// Rendered for a code outside the 5-bit range.
pub const PTY_ERROR: &str = "PTY ERROR";

/// Which naming table applies to PTY codes.
///
/// Europe (RDS) and North America (RBDS) share the 5-bit code space but
/// assign different meanings to most codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PtyRegion {
    #[default]
    Rds,
    Rbds,
}

const RDS_NAMES: [&str; 32] = [
    "None",
    "News",
    "Current Affairs",
    "Information",
    "Sport",
    "Education",
    "Drama",
    "Culture",
    "Science",
    "Variable",
    "Pop Music",
    "Rock Music",
    "Easy Listening",
    "Light Classical",
    "SeriousClassical",
    "Other Music",
    "Weather",
    "Finance",
    "Childrens Prog",
    "Social Affairs",
    "Religious Talk",
    "Phone-In Talk",
    "Travel",
    "Leisure",
    "Jazz Music",
    "Country Music",
    "National Music",
    "Oldies Music",
    "Folk Music",
    "Documentary",
    "Emergency Test",
    "!!!ALERT!!!",
];

const RBDS_NAMES: [&str; 32] = [
    "None",
    "News",
    "Information",
    "Sports",
    "Talk",
    "Rock",
    "Classic Rock",
    "Adult Hits",
    "Soft Rock",
    "Top 40",
    "Country",
    "Oldies",
    "Soft",
    "Nostalgia",
    "Jazz",
    "Classical",
    "Rhythm and Blues",
    "Soft R&B",
    "Language",
    "Religious Music",
    "Religious Talk",
    "Personality",
    "Public",
    "College",
    "Spanish Talk",
    "Spanish Music",
    "Hip Hop",
    "Unassigned",
    "Unassigned",
    "Weather",
    "Emergency Test",
    "Emergency",
];

/// A decoded PTY code together with the region used to name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgramType {
    code: u8,
    region: PtyRegion,
}

impl ProgramType {
    pub const fn new(code: u8, region: PtyRegion) -> Self {
        Self { code, region }
    }

    /// Extract the 5-bit code spanning the high and low bytes of block B.
    pub fn from_block_b(block_b: u16, region: PtyRegion) -> Self {
        let [high, low] = block_b.to_be_bytes();
        let code = ((high & 3) << 3) | ((low >> 5) & 7);
        Self::new(code, region)
    }

    pub const fn code(&self) -> u8 {
        self.code
    }

    pub fn name(&self) -> &'static str {
        let table = match self.region {
            PtyRegion::Rds => &RDS_NAMES,
            PtyRegion::Rbds => &RBDS_NAMES,
        };
        table.get(self.code as usize).copied().unwrap_or(PTY_ERROR)
    }
}
