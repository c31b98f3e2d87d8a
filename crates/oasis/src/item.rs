//! Section G item codes.

use crate::OasisError;
use std::fmt;
use std::str::FromStr;

/// One of the seven OASIS Section G items recorded on a note.
///
/// The declaration order is the order items are presented and transmitted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemCode {
    /// Grooming.
    M1800,
    /// Current ability to dress upper body.
    M1810,
    /// Current ability to dress lower body.
    M1820,
    /// Bathing.
    M1830,
    /// Toilet transferring.
    M1840,
    /// Transferring.
    M1850,
    /// Ambulation/locomotion.
    M1860,
}

impl ItemCode {
    /// All items, in presentation order.
    pub const ALL: [ItemCode; 7] = [
        ItemCode::M1800,
        ItemCode::M1810,
        ItemCode::M1820,
        ItemCode::M1830,
        ItemCode::M1840,
        ItemCode::M1850,
        ItemCode::M1860,
    ];

    /// Label as printed on the instrument (`M1800`).
    pub fn label(self) -> &'static str {
        match self {
            ItemCode::M1800 => "M1800",
            ItemCode::M1810 => "M1810",
            ItemCode::M1820 => "M1820",
            ItemCode::M1830 => "M1830",
            ItemCode::M1840 => "M1840",
            ItemCode::M1850 => "M1850",
            ItemCode::M1860 => "M1860",
        }
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ItemCode {
    type Err = OasisError;

    /// Accepts either the instrument label or the API field name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ItemCode::ALL
            .into_iter()
            .find(|code| code.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| OasisError::UnknownItem(s.to_owned()))
    }
}
