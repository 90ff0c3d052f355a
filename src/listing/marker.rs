use super::InputRow;
use crate::core::IpoError;

/// Which allocation tranche a report row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrancheMarker {
    /// `(a)`: the Hong Kong public offer row; starts a listing.
    Primary,
    /// `(b)`: the international placing row of the preceding listing.
    Secondary,
    /// Any other marker, including none at all.
    Unmarked,
}

impl TrancheMarker {
    /// Exact match against the two literal markers; everything else is `Unmarked`.
    pub fn classify(marker: &str) -> Self {
        match marker {
            "(a)" => TrancheMarker::Primary,
            "(b)" => TrancheMarker::Secondary,
            _ => TrancheMarker::Unmarked,
        }
    }

    /// Classifies a row by its trimmed last-but-one cell.
    pub fn of(row: &InputRow) -> Result<Self, IpoError> {
        row.marker().map(Self::classify)
    }
}
