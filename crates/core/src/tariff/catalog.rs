use rust_decimal::Decimal;
use thiserror::Error;

use super::{CommodityType, DensityBracket, ServiceLevel, TariffEntry, DENSITY_THRESHOLD};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogBuildError {
    #[error("duplicate tariff for {commodity:?}/{level:?}")]
    DuplicateEntry { commodity: CommodityType, level: ServiceLevel },
    #[error("{commodity:?}/{level:?} has no density brackets")]
    EmptyBrackets { commodity: CommodityType, level: ServiceLevel },
    #[error("{commodity:?}/{level:?} bracket [{min}, {max:?}) is empty or inverted")]
    InvertedBracket {
        commodity: CommodityType,
        level: ServiceLevel,
        min: Decimal,
        max: Decimal,
    },
    #[error("{commodity:?}/{level:?} brackets must begin exactly at the density threshold, found {found}")]
    LowerBoundNotAtThreshold {
        commodity: CommodityType,
        level: ServiceLevel,
        found: Decimal,
    },
    #[error("{commodity:?}/{level:?} brackets leave a gap between {from} and {to}")]
    Gap {
        commodity: CommodityType,
        level: ServiceLevel,
        from: Decimal,
        to: Decimal,
    },
    #[error("{commodity:?}/{level:?} brackets overlap at density {at}")]
    Overlap {
        commodity: CommodityType,
        level: ServiceLevel,
        at: Decimal,
    },
    #[error("{commodity:?}/{level:?} brackets end at {last_max} instead of an unbounded tail")]
    MissingUnboundedTail {
        commodity: CommodityType,
        level: ServiceLevel,
        last_max: Decimal,
    },
}

#[derive(Clone, Debug)]
struct TariffRecord {
    commodity: CommodityType,
    level: ServiceLevel,
    entry: TariffEntry,
}

/// Immutable tariff table keyed by (commodity, service level). Built once
/// through [`RateCatalogBuilder`], which validates that every entry's
/// brackets partition `[100, +inf)`; lookups after that never allocate or
/// lock, so the catalog is shared freely across sessions.
#[derive(Clone, Debug, Default)]
pub struct RateCatalog {
    entries: Vec<TariffRecord>,
}

impl RateCatalog {
    pub fn builder() -> RateCatalogBuilder {
        RateCatalogBuilder::default()
    }

    pub fn find(&self, commodity: CommodityType, level: ServiceLevel) -> Option<&TariffEntry> {
        self.entries
            .iter()
            .find(|record| record.commodity == commodity && record.level == level)
            .map(|record| &record.entry)
    }

    /// Service levels defined for a commodity, in catalog-insertion order.
    pub fn levels_for(&self, commodity: CommodityType) -> Vec<ServiceLevel> {
        self.entries
            .iter()
            .filter(|record| record.commodity == commodity)
            .map(|record| record.level)
            .collect()
    }

    /// Distinct commodities, in catalog-insertion order.
    pub fn commodities(&self) -> Vec<CommodityType> {
        let mut seen = Vec::new();
        for record in &self.entries {
            if !seen.contains(&record.commodity) {
                seen.push(record.commodity);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Default)]
pub struct RateCatalogBuilder {
    entries: Vec<TariffRecord>,
}

impl RateCatalogBuilder {
    pub fn entry(
        mut self,
        commodity: CommodityType,
        level: ServiceLevel,
        entry: TariffEntry,
    ) -> Self {
        self.entries.push(TariffRecord { commodity, level, entry });
        self
    }

    pub fn build(self) -> Result<RateCatalog, CatalogBuildError> {
        let mut entries = self.entries;

        for index in 0..entries.len() {
            for earlier in 0..index {
                if entries[earlier].commodity == entries[index].commodity
                    && entries[earlier].level == entries[index].level
                {
                    return Err(CatalogBuildError::DuplicateEntry {
                        commodity: entries[index].commodity,
                        level: entries[index].level,
                    });
                }
            }
        }

        for record in &mut entries {
            validate_brackets(record.commodity, record.level, &record.entry.brackets)?;
            // Stored order is descending by lower bound; resolution results
            // must not depend on it (the partition has exactly one match).
            record.entry.brackets.sort_by(|a, b| b.min_density.cmp(&a.min_density));
        }

        Ok(RateCatalog { entries })
    }
}

fn validate_brackets(
    commodity: CommodityType,
    level: ServiceLevel,
    brackets: &[DensityBracket],
) -> Result<(), CatalogBuildError> {
    if brackets.is_empty() {
        return Err(CatalogBuildError::EmptyBrackets { commodity, level });
    }

    let mut sorted: Vec<&DensityBracket> = brackets.iter().collect();
    sorted.sort_by(|a, b| a.min_density.cmp(&b.min_density));

    let mut expected = DENSITY_THRESHOLD;
    if sorted[0].min_density != expected {
        return Err(CatalogBuildError::LowerBoundNotAtThreshold {
            commodity,
            level,
            found: sorted[0].min_density,
        });
    }

    for (index, bracket) in sorted.iter().enumerate() {
        if bracket.min_density > expected {
            return Err(CatalogBuildError::Gap {
                commodity,
                level,
                from: expected,
                to: bracket.min_density,
            });
        }
        if bracket.min_density < expected {
            return Err(CatalogBuildError::Overlap { commodity, level, at: bracket.min_density });
        }

        match bracket.max_density {
            Some(max) if max <= bracket.min_density => {
                return Err(CatalogBuildError::InvertedBracket {
                    commodity,
                    level,
                    min: bracket.min_density,
                    max,
                });
            }
            Some(max) => expected = max,
            None => {
                return match sorted.get(index + 1) {
                    Some(next) => Err(CatalogBuildError::Overlap {
                        commodity,
                        level,
                        at: next.min_density,
                    }),
                    None => Ok(()),
                };
            }
        }
    }

    Err(CatalogBuildError::MissingUnboundedTail { commodity, level, last_max: expected })
}

fn per_kg(min: u32, max: impl Into<Option<u32>>, price_cents: i64) -> DensityBracket {
    DensityBracket::new(
        Decimal::from(min),
        max.into().map(Decimal::from),
        Decimal::new(price_cents, 2),
    )
}

fn entry(
    service_term_days: &str,
    price_under_threshold_cents: impl Into<Option<i64>>,
    brackets: Vec<DensityBracket>,
) -> TariffEntry {
    TariffEntry {
        service_term_days: service_term_days.to_string(),
        price_under_threshold_per_m3: price_under_threshold_cents
            .into()
            .map(|cents| Decimal::new(cents, 2)),
        brackets,
    }
}

/// The production tariff tables. Prices are USD per kg inside brackets and
/// USD per m3 under the density threshold; terms are calendar-day ranges.
pub fn default_catalog() -> Result<RateCatalog, CatalogBuildError> {
    use CommodityType::{Appliances, AutoParts, Clothing, GeneralGoods, Tools, Toys};
    use ServiceLevel::{Express, Slow, Standard};

    RateCatalog::builder()
        .entry(
            Tools,
            Express,
            entry(
                "12-15",
                25_000,
                vec![
                    per_kg(400, None, 110),
                    per_kg(350, 400, 120),
                    per_kg(300, 350, 130),
                    per_kg(250, 300, 140),
                    per_kg(200, 250, 150),
                    per_kg(190, 200, 160),
                    per_kg(180, 190, 170),
                    per_kg(170, 180, 180),
                    per_kg(160, 170, 190),
                    per_kg(150, 160, 200),
                    per_kg(140, 150, 210),
                    per_kg(130, 140, 220),
                    per_kg(120, 130, 230),
                    per_kg(110, 120, 240),
                    per_kg(100, 110, 250),
                ],
            ),
        )
        .entry(
            Tools,
            Standard,
            entry(
                "15-20",
                24_000,
                vec![
                    per_kg(400, None, 100),
                    per_kg(350, 400, 110),
                    per_kg(300, 350, 120),
                    per_kg(250, 300, 130),
                    per_kg(200, 250, 140),
                    per_kg(190, 200, 150),
                    per_kg(180, 190, 160),
                    per_kg(170, 180, 170),
                    per_kg(160, 170, 180),
                    per_kg(150, 160, 190),
                    per_kg(140, 150, 200),
                    per_kg(130, 140, 210),
                    per_kg(120, 130, 220),
                    per_kg(110, 120, 230),
                    per_kg(100, 110, 240),
                ],
            ),
        )
        .entry(
            AutoParts,
            Standard,
            entry(
                "15-20",
                26_000,
                vec![
                    per_kg(800, None, 100),
                    per_kg(600, 800, 110),
                    per_kg(400, 600, 120),
                    per_kg(350, 400, 130),
                    per_kg(300, 350, 140),
                    per_kg(250, 300, 150),
                    per_kg(200, 250, 160),
                    per_kg(190, 200, 170),
                    per_kg(180, 190, 180),
                    per_kg(170, 180, 190),
                    per_kg(160, 170, 200),
                    per_kg(150, 160, 210),
                    per_kg(140, 150, 220),
                    per_kg(130, 140, 230),
                    per_kg(120, 130, 240),
                    per_kg(110, 120, 250),
                    per_kg(100, 110, 260),
                ],
            ),
        )
        .entry(
            AutoParts,
            Express,
            entry(
                "12-15",
                27_000,
                vec![
                    per_kg(800, None, 110),
                    per_kg(600, 800, 120),
                    per_kg(400, 600, 130),
                    per_kg(350, 400, 140),
                    per_kg(300, 350, 150),
                    per_kg(250, 300, 160),
                    per_kg(200, 250, 170),
                    per_kg(190, 200, 180),
                    per_kg(180, 190, 190),
                    per_kg(170, 180, 200),
                    per_kg(160, 170, 210),
                    per_kg(150, 160, 220),
                    per_kg(140, 150, 230),
                    per_kg(130, 140, 240),
                    per_kg(120, 130, 250),
                    per_kg(110, 120, 260),
                    per_kg(100, 110, 270),
                ],
            ),
        )
        .entry(
            Toys,
            Standard,
            entry(
                "15-20",
                25_000,
                vec![
                    per_kg(250, None, 140),
                    per_kg(200, 250, 150),
                    per_kg(190, 200, 160),
                    per_kg(180, 190, 170),
                    per_kg(170, 180, 180),
                    per_kg(160, 170, 190),
                    per_kg(150, 160, 200),
                    per_kg(140, 150, 210),
                    per_kg(130, 140, 220),
                    per_kg(120, 130, 230),
                    per_kg(110, 120, 240),
                    per_kg(100, 110, 250),
                ],
            ),
        )
        .entry(
            Toys,
            Express,
            entry(
                "12-15",
                26_000,
                vec![
                    per_kg(250, None, 150),
                    per_kg(200, 250, 160),
                    per_kg(190, 200, 170),
                    per_kg(180, 190, 180),
                    per_kg(170, 180, 190),
                    per_kg(160, 170, 200),
                    per_kg(150, 160, 210),
                    per_kg(140, 150, 220),
                    per_kg(130, 140, 230),
                    per_kg(120, 130, 240),
                    per_kg(110, 120, 250),
                    per_kg(100, 110, 260),
                ],
            ),
        )
        .entry(
            Appliances,
            Standard,
            entry(
                "15-20",
                29_000,
                vec![
                    per_kg(400, None, 150),
                    per_kg(350, 400, 160),
                    per_kg(300, 350, 170),
                    per_kg(250, 300, 180),
                    per_kg(200, 250, 190),
                    per_kg(190, 200, 200),
                    per_kg(180, 190, 210),
                    per_kg(170, 180, 220),
                    per_kg(160, 170, 230),
                    per_kg(150, 160, 240),
                    per_kg(140, 150, 250),
                    per_kg(130, 140, 260),
                    per_kg(120, 130, 270),
                    per_kg(110, 120, 280),
                    per_kg(100, 110, 290),
                ],
            ),
        )
        .entry(
            Appliances,
            Express,
            entry(
                "12-15",
                30_000,
                vec![
                    per_kg(400, None, 160),
                    per_kg(350, 400, 170),
                    per_kg(300, 350, 180),
                    per_kg(250, 300, 190),
                    per_kg(200, 250, 200),
                    per_kg(190, 200, 210),
                    per_kg(180, 190, 220),
                    per_kg(170, 180, 230),
                    per_kg(160, 170, 240),
                    per_kg(150, 160, 250),
                    per_kg(140, 150, 260),
                    per_kg(130, 140, 270),
                    per_kg(120, 130, 280),
                    per_kg(110, 120, 290),
                    per_kg(100, 110, 300),
                ],
            ),
        )
        .entry(
            GeneralGoods,
            Express,
            entry(
                "12-15",
                28_000,
                vec![
                    per_kg(800, None, 120),
                    per_kg(600, 800, 130),
                    per_kg(400, 600, 140),
                    per_kg(350, 400, 150),
                    per_kg(300, 350, 160),
                    per_kg(250, 300, 170),
                    per_kg(200, 250, 180),
                    per_kg(190, 200, 190),
                    per_kg(180, 190, 200),
                    per_kg(170, 180, 210),
                    per_kg(160, 170, 220),
                    per_kg(150, 160, 230),
                    per_kg(140, 150, 240),
                    per_kg(130, 140, 250),
                    per_kg(120, 130, 260),
                    per_kg(110, 120, 270),
                    per_kg(100, 110, 280),
                ],
            ),
        )
        .entry(
            Clothing,
            Slow,
            entry(
                "25-30",
                None,
                vec![
                    per_kg(300, None, 190),
                    per_kg(250, 300, 200),
                    per_kg(200, 250, 210),
                    per_kg(100, 200, 220),
                ],
            ),
        )
        .entry(
            Clothing,
            Standard,
            entry(
                "18-25",
                None,
                vec![
                    per_kg(300, None, 210),
                    per_kg(250, 300, 220),
                    per_kg(200, 250, 230),
                    per_kg(100, 200, 240),
                ],
            ),
        )
        .entry(
            Clothing,
            Express,
            entry(
                "13-15",
                None,
                vec![
                    per_kg(300, None, 250),
                    per_kg(250, 300, 260),
                    per_kg(200, 250, 270),
                    per_kg(100, 200, 280),
                ],
            ),
        )
        .build()
}
