//! Aggregate statistics over the feedback log.
//!
//! Always recomputed from the full set of entries; nothing is cached, so the
//! numbers reflect the log at the moment they are computed.

use serde::Serialize;
use std::collections::BTreeMap;

use super::FeedbackEntry;
use crate::domain::coaching::BarrierCategory;

/// Summary of every feedback entry in the log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackStatistics {
    pub total_responses: usize,
    pub average_rating: f64,
    /// Share of responses answering `Yes` or `Maybe`, 0 to 100.
    pub would_try_percent: f64,
    /// Mean rating per technique name.
    pub technique_performance: BTreeMap<String, f64>,
    /// Number of responses per barrier category.
    pub component_distribution: BTreeMap<BarrierCategory, usize>,
    /// Rows in the log that could not be parsed and were left out.
    pub skipped_rows: usize,
}

/// Mean rating for one technique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechniquePerformance {
    pub technique: String,
    pub average_rating: f64,
}

impl FeedbackStatistics {
    /// Computes statistics, or `None` when there are no entries.
    pub fn compute(entries: &[FeedbackEntry], skipped_rows: usize) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }

        let total = entries.len();
        let mut rating_sum = 0.0;
        let mut open_to_trying = 0usize;
        let mut per_technique: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        let mut component_distribution = BTreeMap::new();

        for entry in entries {
            let record = &entry.record;
            let rating = record.rating.as_f64();
            rating_sum += rating;

            if record.would_try.is_open_to_trying() {
                open_to_trying += 1;
            }

            let slot = per_technique
                .entry(record.technique_used.clone())
                .or_insert((0.0, 0));
            slot.0 += rating;
            slot.1 += 1;

            *component_distribution
                .entry(record.target_component)
                .or_insert(0) += 1;
        }

        let technique_performance = per_technique
            .into_iter()
            .map(|(name, (sum, count))| (name, sum / count as f64))
            .collect();

        Some(Self {
            total_responses: total,
            average_rating: rating_sum / total as f64,
            would_try_percent: open_to_trying as f64 / total as f64 * 100.0,
            technique_performance,
            component_distribution,
            skipped_rows,
        })
    }

    /// The `limit` best-rated techniques, highest mean first.
    ///
    /// Equal means are ordered by technique name.
    pub fn top_techniques(&self, limit: usize) -> Vec<TechniquePerformance> {
        let mut ranked: Vec<TechniquePerformance> = self
            .technique_performance
            .iter()
            .map(|(technique, average_rating)| TechniquePerformance {
                technique: technique.clone(),
                average_rating: *average_rating,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.average_rating
                .total_cmp(&a.average_rating)
                .then_with(|| a.technique.cmp(&b.technique))
        });
        ranked.truncate(limit);
        ranked
    }

    /// Percentage of responses in `category`, 0 to 100.
    pub fn component_share(&self, category: BarrierCategory) -> f64 {
        let count = self
            .component_distribution
            .get(&category)
            .copied()
            .unwrap_or(0);
        count as f64 / self.total_responses as f64 * 100.0
    }
}
