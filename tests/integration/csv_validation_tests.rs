//! Upload validation through the public API

#[cfg(test)]
mod tests {
    use crate::common::{CsvFactory, MockDirectory};
    use hospital_bulk::{BulkError, parse_hospital_csv};

    #[test]
    fn test_ordinals_follow_data_lines() {
        let rows = parse_hospital_csv(CsvFactory::hospitals(5).as_bytes(), 20).unwrap();
        let ordinals: Vec<usize> = rows.iter().map(|row| row.row_number).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
        assert_eq!(rows[4].name, "Hospital 5");
    }

    #[test]
    fn test_row_limit_reports_limit_and_actual() {
        let err = parse_hospital_csv(CsvFactory::two_hospitals().as_bytes(), 1).unwrap_err();
        match err {
            BulkError::CsvTooLarge { limit, actual } => {
                assert_eq!(limit, 1);
                assert_eq!(actual, 2);
            }
            other => panic!("expected size error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_column_checked_before_unknown_columns() {
        let csv = "name,phone,website\nGeneral,555,example.org\n";
        let err = parse_hospital_csv(csv.as_bytes(), 20).unwrap_err();
        match err {
            BulkError::CsvFormat { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].row, 0);
                assert!(errors[0].message.contains("address"));
                assert!(!errors[0].message.contains("website"));
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_row_errors_are_collected() {
        let csv = "name,address\n,1 Main St\nGeneral,\n";
        let err = parse_hospital_csv(csv.as_bytes(), 20).unwrap_err();
        match err {
            BulkError::CsvFormat { errors } => {
                let rows: Vec<usize> = errors.iter().map(|e| e.row).collect();
                assert_eq!(rows, vec![1, 2]);
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejected_upload_never_reaches_directory() {
        let directory = MockDirectory::start().await;
        let processor = directory.processor(1);

        let err = processor
            .process_upload(CsvFactory::two_hospitals().as_bytes())
            .await
            .unwrap_err();
        assert!(matches!(err, BulkError::CsvTooLarge { .. }));

        let err = processor.process_upload(b"name,address\n").await.unwrap_err();
        assert!(matches!(err, BulkError::CsvFormat { .. }));

        assert!(processor.store().unwrap().is_empty().await);
        assert!(directory.create_payloads().await.is_empty());
    }
}
