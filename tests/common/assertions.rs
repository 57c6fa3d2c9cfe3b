//! Custom test assertions

use hospital_bulk::{BatchResult, RowStatus};

/// Assertions for BatchResult
pub trait BatchResultAssertions {
    /// Assert total, processed and failed counts
    fn assert_counts(&self, total: usize, processed: usize, failed: usize);

    /// Assert every row ended in `status`
    fn assert_all_rows(&self, status: RowStatus);

    /// Assert row ordinals run 1..=total in order
    fn assert_dense_ordinals(&self);
}

impl BatchResultAssertions for BatchResult {
    fn assert_counts(&self, total: usize, processed: usize, failed: usize) {
        assert_eq!(
            (
                self.total_hospitals,
                self.processed_hospitals,
                self.failed_hospitals
            ),
            (total, processed, failed),
            "unexpected (total, processed, failed) for batch {}",
            self.batch_id
        );
    }

    fn assert_all_rows(&self, status: RowStatus) {
        for outcome in &self.hospitals {
            assert_eq!(
                outcome.status, status,
                "row {} ({}) has status {:?}",
                outcome.row, outcome.name, outcome.status
            );
        }
    }

    fn assert_dense_ordinals(&self) {
        let ordinals: Vec<usize> = self.hospitals.iter().map(|h| h.row).collect();
        let expected: Vec<usize> = (1..=self.total_hospitals).collect();
        assert_eq!(ordinals, expected);
    }
}
