//! Per-record transformation
//!
//! A [`Transform`] maps each annotated holiday to an arbitrary JSON value
//! before aggregation. The function is supplied by the caller, so its
//! failures, including panics, are caught here and reported as
//! [`HolidayExportError::Transform`] rather than as fetch or write errors.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{ExportResult, HolidayExportError};
use crate::models::AnnotatedHoliday;

/// Error type returned by fallible transforms
pub type TransformFailure = Box<dyn std::error::Error + Send + Sync>;

type TransformFn = dyn Fn(AnnotatedHoliday) -> Result<Value, TransformFailure> + Send + Sync;

/// Caller-supplied mapping applied to every annotated record
#[derive(Clone)]
pub struct Transform {
    func: Arc<TransformFn>,
}

impl Transform {
    /// The identity transform: the annotated record as a JSON object
    pub fn identity() -> Self {
        Self::try_new(|holiday| Ok(serde_json::to_value(holiday)?))
    }

    /// Wrap an infallible mapping
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(AnnotatedHoliday) -> Value + Send + Sync + 'static,
    {
        Self::try_new(move |holiday| Ok(func(holiday)))
    }

    /// Wrap a fallible mapping
    pub fn try_new<F>(func: F) -> Self
    where
        F: Fn(AnnotatedHoliday) -> Result<Value, TransformFailure> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Drop and rename top-level fields of the annotated record
    ///
    /// Renames keep the field's position. Omissions match the output key, so
    /// `omit = ["countryCode"]` with `countryCode -> country` keeps `country`.
    pub fn reshape(omit: Vec<String>, rename: Vec<(String, String)>) -> Self {
        Self::try_new(move |holiday| {
            let Value::Object(fields) = holiday.to_json()? else {
                return Err("annotated holiday did not serialize to an object".into());
            };

            let mut reshaped = Map::with_capacity(fields.len());
            for (key, value) in fields {
                let key = rename
                    .iter()
                    .find(|(from, _)| *from == key)
                    .map(|(_, to)| to.clone())
                    .unwrap_or(key);
                if omit.contains(&key) {
                    continue;
                }
                reshaped.insert(key, value);
            }

            Ok(Value::Object(reshaped))
        })
    }

    /// Apply the transform to the record at `index` of the aggregated sequence
    pub fn apply(&self, index: usize, holiday: AnnotatedHoliday) -> ExportResult<Value> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.func)(holiday))) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(HolidayExportError::Transform {
                index,
                message: err.to_string(),
            }),
            Err(payload) => Err(HolidayExportError::Transform {
                index,
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("transform panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("transform panicked: {}", message)
    } else {
        "transform panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Country, HolidayRecord, HolidayType};
    use chrono::NaiveDate;
    use serde_json::json;

    fn holiday() -> AnnotatedHoliday {
        let record = HolidayRecord::new(
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            "Dia de Portugal",
            HolidayType::Public,
        )
        .with_note("national day");
        AnnotatedHoliday::new(record, &Country::new("PT", "Portugal"))
    }

    #[test]
    fn test_identity() {
        let value = Transform::identity().apply(0, holiday()).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "2024-06-10",
                "name": "Dia de Portugal",
                "type": "public",
                "note": "national day",
                "countryCode": "PT",
                "countryName": "Portugal",
            })
        );
    }

    #[test]
    fn test_computed_fields() {
        let transform = Transform::new(|h| {
            json!({ "day": h.holiday.date.to_string(), "country": h.country_code })
        });
        let value = transform.apply(0, holiday()).unwrap();
        assert_eq!(value, json!({ "day": "2024-06-10", "country": "PT" }));
    }

    #[test]
    fn test_reshape_renames_in_place_and_omits() {
        let transform = Transform::reshape(
            vec!["countryName".into(), "note".into(), "substitute".into()],
            vec![("countryCode".into(), "country".into())],
        );
        let value = transform.apply(0, holiday()).unwrap();

        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["date", "name", "type", "country"]);
        assert_eq!(value["country"], "PT");
    }

    #[test]
    fn test_rename_wins_over_omitting_old_name() {
        let transform = Transform::reshape(
            vec!["countryCode".into(), "countryName".into()],
            vec![("countryCode".into(), "country".into())],
        );
        let value = transform.apply(0, holiday()).unwrap();

        assert_eq!(value["country"], "PT");
        assert!(value.get("countryCode").is_none());
        assert!(value.get("countryName").is_none());
    }

    #[test]
    fn test_omit_renamed_target() {
        let transform = Transform::reshape(
            vec!["country".into()],
            vec![("countryCode".into(), "country".into())],
        );
        let value = transform.apply(0, holiday()).unwrap();

        assert!(value.get("country").is_none());
        assert!(value.get("countryCode").is_none());
    }

    #[test]
    fn test_same_input_same_output() {
        let transform = Transform::reshape(vec!["note".into()], Vec::new());
        let first = transform.apply(0, holiday()).unwrap();
        let second = transform.apply(0, holiday()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_failure_is_transform_error() {
        let transform = Transform::try_new(|_| Err("bad record".into()));
        let err = transform.apply(7, holiday()).unwrap_err();
        assert!(matches!(
            err,
            HolidayExportError::Transform { index: 7, ref message } if message == "bad record"
        ));
    }

    #[test]
    fn test_panic_is_transform_error() {
        let transform = Transform::new(|_| panic!("unexpected"));
        let err = transform.apply(2, holiday()).unwrap_err();
        match err {
            HolidayExportError::Transform { index, message } => {
                assert_eq!(index, 2);
                assert!(message.contains("unexpected"));
            }
            other => panic!("expected transform error, got {:?}", other),
        }
    }
}
