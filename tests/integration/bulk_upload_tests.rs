//! Bulk upload flows through the real HTTP directory client

#[cfg(test)]
mod tests {
    use crate::common::{BatchResultAssertions, CsvFactory, MockDirectory};
    use hospital_bulk::{
        BatchStatus, BatchStore, BulkProcessor, HttpClientFactory, RowStatus, StoreMode,
    };
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_all_rows_created_and_activated() {
        let directory = MockDirectory::start().await;
        let processor = directory.processor(20);

        let result = processor
            .process_upload(CsvFactory::two_hospitals().as_bytes())
            .await
            .unwrap();

        result.assert_counts(2, 2, 0);
        result.assert_dense_ordinals();
        result.assert_all_rows(RowStatus::CreatedAndActivated);
        assert!(result.batch_activated);
        assert!(result.activation_error.is_none());
        assert_eq!(result.hospitals[0].hospital_id, Some(1001));
        assert_eq!(result.hospitals[1].hospital_id, Some(1002));

        let activations = directory.activation_paths().await;
        assert_eq!(
            activations,
            vec![format!("/hospitals/batch/{}/activate", result.batch_id)]
        );

        let snapshot = processor
            .store()
            .unwrap()
            .get_snapshot(result.batch_id)
            .await
            .unwrap();
        assert_eq!(snapshot.status, BatchStatus::Completed);
    }

    #[tokio::test]
    async fn test_payload_carries_batch_id_and_omits_missing_phone() {
        let directory = MockDirectory::start().await;
        let processor = directory.processor(20);

        let result = processor
            .process_upload(CsvFactory::two_hospitals().as_bytes())
            .await
            .unwrap();

        let payloads = directory.create_payloads().await;
        let batch_id = result.batch_id.to_string();
        assert_eq!(
            payloads,
            vec![
                json!({
                    "name": "Hospital A",
                    "address": "123 Main St",
                    "phone": "555-1",
                    "creation_batch_id": batch_id,
                }),
                json!({
                    "name": "Hospital B",
                    "address": "456 Oak St",
                    "creation_batch_id": batch_id,
                }),
            ]
        );
    }

    #[tokio::test]
    async fn test_partial_failure_skips_activation() {
        let directory = MockDirectory::start().await;
        directory.fail_create_calls(&[2]);
        let processor = directory.processor(20);

        let result = processor
            .process_upload(CsvFactory::two_hospitals().as_bytes())
            .await
            .unwrap();

        result.assert_counts(2, 1, 1);
        assert!(!result.batch_activated);
        assert!(result.activation_error.is_none());
        assert_eq!(result.hospitals[0].status, RowStatus::Created);
        assert_eq!(result.hospitals[1].status, RowStatus::Failed);
        assert_eq!(
            result.hospitals[1].error.as_deref(),
            Some("[500] Directory temporarily unavailable")
        );
        assert!(directory.activation_paths().await.is_empty());

        let snapshot = processor
            .store()
            .unwrap()
            .get_snapshot(result.batch_id)
            .await
            .unwrap();
        assert_eq!(snapshot.status, BatchStatus::CompletedWithFailures);
    }

    #[tokio::test]
    async fn test_activation_failure_then_retry() {
        let directory = MockDirectory::start().await;
        directory.fail_activation(true);
        let processor = directory.processor(20);

        let result = processor
            .process_upload(CsvFactory::two_hospitals().as_bytes())
            .await
            .unwrap();

        result.assert_counts(2, 2, 0);
        result.assert_all_rows(RowStatus::Created);
        assert!(!result.batch_activated);
        assert_eq!(result.activation_error.as_deref(), Some("[502] Bad gateway"));

        directory.recover();
        let retried = processor.retry_activation(result.batch_id).await.unwrap();

        retried.assert_counts(2, 2, 0);
        retried.assert_all_rows(RowStatus::CreatedAndActivated);
        assert!(retried.batch_activated);
        assert!(retried.activation_error.is_none());
        assert_eq!(directory.create_payloads().await.len(), 2);
        assert_eq!(directory.activation_paths().await.len(), 2);
    }

    #[tokio::test]
    async fn test_every_upload_gets_its_own_batch() {
        let directory = MockDirectory::start().await;
        let processor = directory.processor(20);
        let csv = CsvFactory::hospitals(3);

        let (first, second) = tokio::join!(
            processor.process_upload(csv.as_bytes()),
            processor.process_upload(csv.as_bytes()),
        );
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_ne!(first.batch_id, second.batch_id);
        first.assert_counts(3, 3, 0);
        second.assert_counts(3, 3, 0);
        assert_eq!(processor.store().unwrap().len().await, 2);
        assert_eq!(directory.create_payloads().await.len(), 6);
    }

    #[tokio::test]
    async fn test_unreachable_directory_fails_rows() {
        let directory = MockDirectory::start().await;
        let mut upstream = directory.upstream_config();
        upstream.base_url = "http://127.0.0.1:9".to_string();
        upstream.timeout_seconds = 1.0;
        let processor = BulkProcessor::new(
            20,
            Arc::new(HttpClientFactory::new(upstream)),
            StoreMode::Tracked(Arc::new(BatchStore::new())),
        );

        let result = processor
            .process_upload(CsvFactory::hospitals(1).as_bytes())
            .await
            .unwrap();

        result.assert_counts(1, 0, 1);
        let error = result.hospitals[0].error.as_deref().unwrap();
        assert!(error.starts_with("[0] "), "unexpected error: {error}");
    }
}
