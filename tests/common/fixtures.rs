//! Test fixtures and data factories

/// Factory for upload CSV content
pub struct CsvFactory;

impl CsvFactory {
    /// Two valid hospitals, the second without a phone number
    pub fn two_hospitals() -> String {
        "name,address,phone\nHospital A,123 Main St,555-1\nHospital B,456 Oak St,\n".to_string()
    }

    /// `count` valid hospitals with predictable names
    pub fn hospitals(count: usize) -> String {
        let mut csv = String::from("name,address,phone\n");
        for n in 1..=count {
            csv.push_str(&format!("Hospital {n},{n} Main St,555-{n:04}\n"));
        }
        csv
    }
}

/// Factory for multipart upload bodies
pub struct MultipartFactory;

impl MultipartFactory {
    pub const BOUNDARY: &'static str = "hospital-bulk-boundary";

    /// Value for the request's `content-type` header
    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={}", Self::BOUNDARY)
    }

    /// A `file` part holding `contents` as text/csv
    pub fn csv_upload(contents: &str) -> Vec<u8> {
        Self::file_part("file", "text/csv", contents)
    }

    pub fn file_part(field: &str, content_type: &str, contents: &str) -> Vec<u8> {
        format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"hospitals.csv\"\r\n\
             Content-Type: {content_type}\r\n\
             \r\n\
             {contents}\r\n\
             --{b}--\r\n",
            b = Self::BOUNDARY,
        )
        .into_bytes()
    }
}
