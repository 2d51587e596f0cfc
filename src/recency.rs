use chrono::NaiveDate;

use crate::registry::CompetitorId;

/// Per-competitor log of the stream positions they played at.
///
/// Lists only grow. Windowing happens at query time against the dates of the
/// stream, so a competitor's recent activity is found without touching
/// anybody else's matches.
#[derive(Debug, Clone, Default)]
pub struct RecencyIndex {
    positions: Vec<Vec<usize>>,
}

impl RecencyIndex {
    pub fn new() -> RecencyIndex {
        RecencyIndex::default()
    }

    /// Appends `position`. Positions must be recorded in stream order.
    pub fn record(&mut self, competitor: CompetitorId, position: usize) {
        let index = competitor.index();
        if self.positions.len() <= index {
            self.positions.resize_with(index + 1, Vec::new);
        }
        let list = &mut self.positions[index];
        debug_assert!(list.last().map_or(true, |&last| last <= position));
        list.push(position);
    }

    pub fn positions(&self, competitor: CompetitorId) -> &[usize] {
        self.positions
            .get(competitor.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of recorded matches of `competitor` dated on or after `cutoff`.
    ///
    /// `dates` are the effective dates of the whole stream, indexed by
    /// position. Since the stream is sorted by date, each list is too, and
    /// the count is a binary search over the competitor's own list.
    pub fn matches_since(
        &self,
        competitor: CompetitorId,
        cutoff: NaiveDate,
        dates: &[NaiveDate],
    ) -> usize {
        let positions = self.positions(competitor);
        positions.len() - positions.partition_point(|&position| dates[position] < cutoff)
    }
}
