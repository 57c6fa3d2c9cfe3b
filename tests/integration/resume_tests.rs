//! Resume of failed rows against the mock directory

#[cfg(test)]
mod tests {
    use crate::common::{BatchResultAssertions, CsvFactory, MockDirectory};
    use hospital_bulk::{BatchStatus, BulkError, RowStatus};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_resume_retries_only_failed_rows() {
        let directory = MockDirectory::start().await;
        directory.fail_create_calls(&[2]);
        let processor = directory.processor(20);

        let first = processor
            .process_upload(CsvFactory::two_hospitals().as_bytes())
            .await
            .unwrap();
        first.assert_counts(2, 1, 1);

        directory.recover();
        let resumed = processor.resume(first.batch_id).await.unwrap();

        assert_eq!(resumed.batch_id, first.batch_id);
        resumed.assert_counts(2, 2, 0);
        resumed.assert_dense_ordinals();
        resumed.assert_all_rows(RowStatus::CreatedAndActivated);
        assert!(resumed.batch_activated);

        let payloads = directory.create_payloads().await;
        assert_eq!(payloads.len(), 3);
        assert_eq!(payloads[2]["name"], "Hospital B");
        assert_eq!(payloads[2]["creation_batch_id"], first.batch_id.to_string());
        assert_eq!(directory.activation_paths().await.len(), 1);

        let snapshot = processor
            .store()
            .unwrap()
            .get_snapshot(first.batch_id)
            .await
            .unwrap();
        assert_eq!(snapshot.status, BatchStatus::Completed);
    }

    #[tokio::test]
    async fn test_resume_keeps_rows_that_fail_again() {
        let directory = MockDirectory::start().await;
        directory.fail_create_calls(&[1, 4]);
        let processor = directory.processor(20);

        let first = processor
            .process_upload(CsvFactory::hospitals(3).as_bytes())
            .await
            .unwrap();
        first.assert_counts(3, 2, 1);

        // Call 4 is the retry of row 1.
        let resumed = processor.resume(first.batch_id).await.unwrap();
        resumed.assert_counts(3, 2, 1);
        assert_eq!(resumed.hospitals[0].status, RowStatus::Failed);
        assert!(!resumed.batch_activated);

        let again = processor.resume(first.batch_id).await.unwrap();
        again.assert_counts(3, 3, 0);
        again.assert_all_rows(RowStatus::CreatedAndActivated);
        assert_eq!(directory.create_payloads().await.len(), 5);
    }

    #[tokio::test]
    async fn test_resume_without_failed_rows_changes_nothing() {
        let directory = MockDirectory::start().await;
        let processor = directory.processor(20);

        let result = processor
            .process_upload(CsvFactory::two_hospitals().as_bytes())
            .await
            .unwrap();
        let store = processor.store().unwrap();
        let before = store.get_snapshot(result.batch_id).await.unwrap();

        let err = processor.resume(result.batch_id).await.unwrap_err();
        assert!(matches!(err, BulkError::NoFailedRows(id) if id == result.batch_id));

        let after = store.get_snapshot(result.batch_id).await.unwrap();
        assert_eq!(before, after);
        assert_eq!(directory.create_payloads().await.len(), 2);
        assert_eq!(directory.activation_paths().await.len(), 1);
    }

    #[tokio::test]
    async fn test_resume_unknown_batch() {
        let directory = MockDirectory::start().await;
        let processor = directory.processor(20);
        let batch_id = Uuid::new_v4();

        let err = processor.resume(batch_id).await.unwrap_err();
        assert!(matches!(err, BulkError::BatchNotFound(id) if id == batch_id));
        assert!(directory.create_payloads().await.is_empty());
    }

    #[tokio::test]
    async fn test_processing_time_accumulates_across_resume() {
        let directory = MockDirectory::start().await;
        directory.fail_create_calls(&[1]);
        let processor = directory.processor(20);

        let first = processor
            .process_upload(CsvFactory::hospitals(1).as_bytes())
            .await
            .unwrap();
        directory.recover();
        let resumed = processor.resume(first.batch_id).await.unwrap();

        assert!(resumed.processing_time_seconds >= first.processing_time_seconds);
    }
}
