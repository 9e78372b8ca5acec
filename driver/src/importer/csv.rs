use std::path::Path;

use error_stack::ResultExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use kernel::KernelError;

use crate::error::ConvertError;

const SPACED: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const T_SEPARATED: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// A row of `users.csv`. The leading id column is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub user_name: String,
    pub password: String,
}

/// A row of `reviews.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRecord {
    pub user_name: String,
    pub book_id: i64,
    pub review_text: String,
    pub rating: i64,
    pub timestamp: String,
}

/// Reads every row after the header, trimming each field.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> error_stack::Result<Vec<T>, KernelError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .convert_error()
        .attach_printable_lazy(|| format!("cannot open {}", path.display()))?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .convert_error()
        .attach_printable_lazy(|| format!("malformed {}", path.display()))
}

/// RFC 3339, or a zone-less `YYYY-MM-DD HH:MM:SS` taken as UTC.
pub fn parse_timestamp(raw: &str) -> error_stack::Result<OffsetDateTime, KernelError> {
    let raw = raw.trim();
    if let Ok(timestamp) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(timestamp);
    }
    PrimitiveDateTime::parse(raw, SPACED)
        .or_else(|_| PrimitiveDateTime::parse(raw, T_SEPARATED))
        .map(PrimitiveDateTime::assume_utc)
        .convert_error()
        .attach_printable_lazy(|| format!("invalid timestamp {:?}", raw))
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use kernel::KernelError;

    use crate::importer::csv::parse_timestamp;

    #[test]
    fn timestamps_in_both_layouts() -> error_stack::Result<(), KernelError> {
        let expected = datetime!(2020-02-28 14:31:26 UTC);
        assert_eq!(parse_timestamp("2020-02-28 14:31:26")?, expected);
        assert_eq!(parse_timestamp("2020-02-28T14:31:26")?, expected);
        assert_eq!(parse_timestamp(" 2020-02-28T14:31:26Z ")?, expected);
        assert_eq!(
            parse_timestamp("2020-02-28T16:31:26+02:00")?,
            expected
        );
        Ok(())
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        let error = parse_timestamp("yesterday").expect_err("not a timestamp");
        assert_eq!(error.current_context(), &KernelError::Internal);
    }
}
