//! Price estimator: a static rate table plus additive surcharges.
//!
//! Estimates are non-binding; the exact price is confirmed over WhatsApp
//! after booking. The table mirrors the business's published price bands.

use std::fmt;

use crate::model::{AccessDifficulty, EstimateRequest, JobType, SizeCategory, WasteVolume};

/// Advisory line shown under every estimate.
pub const ESTIMATE_NOTE: &str =
    "Tip: if you have photos, you can confirm the exact price via WhatsApp after booking.";

/// Range used when a (job, size) pair has no entry in the rate table.
const DEFAULT_RANGE: (u32, u32) = (60, 150);

/// Base price bands per (job, size). Kept as data rather than a match so the
/// table can shrink without breaking the estimator.
const RATE_TABLE: &[(JobType, SizeCategory, (u32, u32))] = &[
    (JobType::Lawn, SizeCategory::Small, (30, 40)),
    (JobType::Lawn, SizeCategory::Medium, (40, 55)),
    (JobType::Lawn, SizeCategory::Large, (55, 80)),
    (JobType::Hedge, SizeCategory::Small, (45, 70)),
    (JobType::Hedge, SizeCategory::Medium, (70, 110)),
    (JobType::Hedge, SizeCategory::Large, (110, 160)),
    (JobType::Tidy, SizeCategory::Small, (90, 130)),
    (JobType::Tidy, SizeCategory::Medium, (130, 200)),
    (JobType::Tidy, SizeCategory::Large, (200, 320)),
    (JobType::Clearance, SizeCategory::Small, (110, 160)),
    (JobType::Clearance, SizeCategory::Medium, (160, 260)),
    (JobType::Clearance, SizeCategory::Large, (260, 420)),
    (JobType::General, SizeCategory::Small, (60, 100)),
    (JobType::General, SizeCategory::Medium, (100, 170)),
    (JobType::General, SizeCategory::Large, (170, 280)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A computed price range in whole currency units, `min <= max`.
pub struct EstimateResult {
    /// Lower bound, inclusive.
    pub min: u32,
    /// Upper bound, inclusive.
    pub max: u32,
}

impl fmt::Display for EstimateResult {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "£{} – £{}", self.min, self.max)
    }
}

/// Surcharge added to (low, high) for the access category.
fn access_surcharge(access: AccessDifficulty) -> (u32, u32) {
    match access {
        AccessDifficulty::Easy => (0, 0),
        AccessDifficulty::Average => (10, 20),
        AccessDifficulty::Difficult => (25, 45),
    }
}

/// Surcharge added to (low, high) for the waste volume, after access.
fn waste_surcharge(waste: WasteVolume) -> (u32, u32) {
    match waste {
        WasteVolume::None => (0, 0),
        WasteVolume::Some => (20, 40),
        WasteVolume::Lots => (50, 90),
    }
}

fn base_range(job: JobType, size: SizeCategory) -> (u32, u32) {
    RATE_TABLE
        .iter()
        .find(|(table_job, table_size, _)| *table_job == job && *table_size == size)
        .map_or(DEFAULT_RANGE, |(_, _, range)| *range)
}

/// Compute the displayed price range for a selection.
///
/// Deterministic, and monotone in access difficulty and waste volume when
/// the other inputs are held fixed.
#[must_use]
pub fn estimate(request: &EstimateRequest) -> EstimateResult {
    let (mut low, mut high) = base_range(request.job, request.size);

    let (access_low, access_high) = access_surcharge(request.access);
    low += access_low;
    high += access_high;

    let (waste_low, waste_high) = waste_surcharge(request.waste);
    low += waste_low;
    high += waste_high;

    EstimateResult {
        min: low,
        max: high,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        job: JobType,
        size: SizeCategory,
        access: AccessDifficulty,
        waste: WasteVolume,
    ) -> EstimateRequest {
        EstimateRequest {
            job,
            size,
            access,
            waste,
        }
    }

    #[test]
    fn every_combination_yields_an_ordered_range() {
        for job in JobType::ALL {
            for size in SizeCategory::ALL {
                for access in AccessDifficulty::ALL {
                    for waste in WasteVolume::ALL {
                        let result = estimate(&request(job, size, access, waste));
                        assert!(
                            result.min <= result.max,
                            "min must not exceed max for {job}/{size}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn harder_access_never_lowers_the_price() {
        for job in JobType::ALL {
            for size in SizeCategory::ALL {
                let mut previous = None;
                for access in AccessDifficulty::ALL {
                    let result =
                        estimate(&request(job, size, access, WasteVolume::None));
                    if let Some(EstimateResult { min, max }) = previous {
                        assert!(result.min >= min, "lower bound dropped for {job}/{size}");
                        assert!(result.max >= max, "upper bound dropped for {job}/{size}");
                    }
                    previous = Some(result);
                }
            }
        }
    }

    #[test]
    fn more_waste_never_lowers_the_price() {
        for job in JobType::ALL {
            for size in SizeCategory::ALL {
                let mut previous = None;
                for waste in WasteVolume::ALL {
                    let result =
                        estimate(&request(job, size, AccessDifficulty::Easy, waste));
                    if let Some(EstimateResult { min, max }) = previous {
                        assert!(result.min >= min, "lower bound dropped for {job}/{size}");
                        assert!(result.max >= max, "upper bound dropped for {job}/{size}");
                    }
                    previous = Some(result);
                }
            }
        }
    }

    #[test]
    fn base_bands_match_the_published_table() {
        let result = estimate(&request(
            JobType::Lawn,
            SizeCategory::Small,
            AccessDifficulty::Easy,
            WasteVolume::None,
        ));
        assert_eq!((result.min, result.max), (30, 40));

        let result = estimate(&request(
            JobType::Clearance,
            SizeCategory::Large,
            AccessDifficulty::Easy,
            WasteVolume::None,
        ));
        assert_eq!((result.min, result.max), (260, 420));
    }

    #[test]
    fn surcharges_are_additive() {
        // hedge/medium 70–110, difficult +25/+45, lots +50/+90
        let result = estimate(&request(
            JobType::Hedge,
            SizeCategory::Medium,
            AccessDifficulty::Difficult,
            WasteVolume::Lots,
        ));
        assert_eq!((result.min, result.max), (145, 245));
    }

    #[test]
    fn renders_as_a_currency_range() {
        let result = EstimateResult { min: 30, max: 40 };
        assert_eq!(result.to_string(), "£30 – £40");
    }
}
