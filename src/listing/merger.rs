use super::{Column, CompanyListing, FundRaised, InputRow, TrancheMarker};
use crate::core::IpoError;

/// Single-slot store of the most recent listing row.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CarryForward {
    #[default]
    Empty,
    Holding(CompanyListing),
}

impl CarryForward {
    pub fn current(&self) -> Option<&CompanyListing> {
        match self {
            CarryForward::Empty => None,
            CarryForward::Holding(company) => Some(company),
        }
    }
}

/// A listing joined with both of its tranche amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedListing {
    pub company: CompanyListing,
    /// Hong Kong public offer `(a)` amount.
    pub hk_fund_raised: FundRaised,
    /// International placing `(b)` amount.
    pub intl_fund_raised: FundRaised,
}

/// Folds an ordered stream of report rows into merged listings.
///
/// `(a)` and unmarked rows replace the carried listing and emit nothing;
/// a `(b)` row reads the carried listing, leaving it in place, and emits one
/// [`MergedListing`]. Pairing relies on row order alone.
#[derive(Debug, Default)]
pub struct Merger {
    slot: CarryForward,
}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self) -> &CarryForward {
        &self.slot
    }

    /// Classifies `row` by its marker and applies it.
    pub fn push(&mut self, row: &InputRow) -> Result<Option<MergedListing>, IpoError> {
        let marker = TrancheMarker::of(row)?;
        self.apply(marker, row)
    }

    /// Applies an already classified row.
    ///
    /// # Errors
    ///
    /// Column and date errors from the row, and `OrphanSecondary` when a
    /// `(b)` row arrives with nothing carried.
    pub fn apply(
        &mut self,
        marker: TrancheMarker,
        row: &InputRow,
    ) -> Result<Option<MergedListing>, IpoError> {
        match marker {
            TrancheMarker::Primary | TrancheMarker::Unmarked => {
                self.slot = CarryForward::Holding(CompanyListing::from_row(row)?);
                Ok(None)
            }
            TrancheMarker::Secondary => {
                let company = self
                    .slot
                    .current()
                    .ok_or_else(|| IpoError::OrphanSecondary {
                        source_label: row.source().to_string(),
                        line: row.line(),
                    })?;
                let intl_fund_raised = FundRaised::new(row.get(Column::FundRaised)?);
                Ok(Some(MergedListing {
                    hk_fund_raised: company.fund_raised.clone(),
                    company: company.clone(),
                    intl_fund_raised,
                }))
            }
        }
    }
}
