//! Derived statistics: rating distributions over review sets and label
//! popularity over the toy catalog. Single-pass reductions, no store access.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::toy::Toy;

/// Rating summary for a review set.
///
/// Precondition: every rating is in `1..=5`; values outside the range are a
/// caller error and are not counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStats {
    /// Mean rating, rounded to one decimal (half away from zero).
    pub average: f64,
    pub count: usize,
    /// Percentage of the set per rating value 1..=5, rounded to one decimal.
    pub distribution: BTreeMap<u8, f64>,
}

impl Default for RatingStats {
    fn default() -> Self {
        Self { average: 0.0, count: 0, distribution: (1..=5).map(|r| (r, 0.0)).collect() }
    }
}

pub fn rating_stats(ratings: &[f64]) -> RatingStats {
    if ratings.is_empty() {
        return RatingStats::default();
    }
    let count = ratings.len();
    let average = round1(ratings.iter().sum::<f64>() / count as f64);
    let mut buckets = [0usize; 5];
    for r in ratings {
        let idx = r.round() as i64;
        if (1..=5).contains(&idx) {
            buckets[(idx - 1) as usize] += 1;
        }
    }
    let distribution = (1..=5u8)
        .map(|r| (r, round1(buckets[(r - 1) as usize] as f64 * 100.0 / count as f64)))
        .collect();
    RatingStats { average, count, distribution }
}

/// One of the three tag categories popularity is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelDimension {
    Brands,
    ProductTypes,
    Companies,
}

impl Toy {
    pub fn labels(&self, dim: LabelDimension) -> &[String] {
        match dim {
            LabelDimension::Brands => &self.brands,
            LabelDimension::ProductTypes => &self.product_types,
            LabelDimension::Companies => &self.companies,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPercentage {
    pub name: String,
    pub count: usize,
    pub percent: f64,
}

/// Label popularity across in-stock toys, in first-observed order.
///
/// The denominator is the total number of label occurrences, not the number
/// of toys: a toy carrying three brands contributes three to it.
pub fn label_percentages(toys: &[Toy], dim: LabelDimension) -> Vec<LabelPercentage> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut total = 0usize;
    for toy in toys.iter().filter(|t| t.in_stock) {
        for label in toy.labels(dim) {
            match counts.iter_mut().find(|(name, _)| name == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label.clone(), 1)),
            }
            total += 1;
        }
    }
    if total == 0 {
        return Vec::new();
    }
    counts
        .into_iter()
        .map(|(name, count)| LabelPercentage {
            name,
            count,
            percent: round1(count as f64 * 100.0 / total as f64),
        })
        .collect()
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
