//! Building records from untyped JSON.
//!
//! serde's derived `Deserialize` stops at the first problem with a message
//! that is hard to classify, so construction walks the `Value` by hand and
//! reports the exact field path together with the kind of failure.

use super::{ActivityDetails, BreadCrumb, Image, Location, Price, Review};
use crate::error::{ActivityError, Result};
use serde_json::{Map, Value};

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Typed access to the fields of one JSON object
struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Fields<'a> {
    fn new(value: &'a Value, path: String) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            other => Err(ActivityError::TypeMismatch {
                field: if path.is_empty() { "$".to_string() } else { path },
                expected: "object",
                found: kind(other),
            }),
        }
    }

    fn path(&self, key: &str) -> String {
        join(&self.path, key)
    }

    /// Present and non-null value for `key`
    fn required(&self, key: &str) -> Result<&'a Value> {
        match self.map.get(key) {
            None | Some(Value::Null) => Err(ActivityError::MissingRequiredField {
                field: self.path(key),
            }),
            Some(value) => Ok(value),
        }
    }

    fn mismatch(&self, key: &str, expected: &'static str, found: &Value) -> ActivityError {
        ActivityError::TypeMismatch {
            field: self.path(key),
            expected,
            found: kind(found),
        }
    }

    fn string(&self, key: &str) -> Result<String> {
        let value = self.required(key)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(key, "string", value))
    }

    /// Three-state text: missing or `null` is absent, anything else must be a string
    fn optional_string(&self, key: &str) -> Result<Option<String>> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.mismatch(key, "string or null", other)),
        }
    }

    fn unsigned(&self, key: &str) -> Result<u64> {
        let value = self.required(key)?;
        let Value::Number(n) = value else {
            return Err(self.mismatch(key, "integer", value));
        };

        if let Some(u) = n.as_u64() {
            return Ok(u);
        }
        if let Some(i) = n.as_i64() {
            return Err(ActivityError::OutOfRangeValue {
                field: self.path(key),
                message: format!("{} is negative", i),
            });
        }
        Err(self.mismatch(key, "integer", value))
    }

    fn dimension(&self, key: &str) -> Result<u32> {
        let raw = self.unsigned(key)?;
        u32::try_from(raw).map_err(|_| ActivityError::OutOfRangeValue {
            field: self.path(key),
            message: format!("{} exceeds {}", raw, u32::MAX),
        })
    }

    fn number(&self, key: &str) -> Result<f64> {
        let value = self.required(key)?;
        value
            .as_f64()
            .ok_or_else(|| self.mismatch(key, "number", value))
    }

    fn object(&self, key: &str) -> Result<Fields<'a>> {
        Fields::new(self.required(key)?, self.path(key))
    }

    /// Elements of an optional array field; a missing or `null` field is empty
    fn array(&self, key: &str) -> Result<Vec<(String, &'a Value)>> {
        match self.map.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .enumerate()
                .map(|(i, item)| (format!("{}[{}]", self.path(key), i), item))
                .collect()),
            Some(other) => Err(self.mismatch(key, "array", other)),
        }
    }
}

impl Price {
    fn from_fields(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            market_price: f.string("marketPrice")?,
            selling_price: f.string("sellingPrice")?,
            currency: f.string("currency")?,
        })
    }
}

impl Location {
    fn from_fields(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            address: f.string("address")?,
            coordinates: f.string("coordinates")?,
            image_url: f.string("imageUrl")?,
        })
    }
}

impl Review {
    fn from_fields(f: &Fields<'_>) -> Result<Self> {
        let score = f.number("score")?;
        if !score.is_finite() {
            return Err(ActivityError::OutOfRangeValue {
                field: f.path("score"),
                message: "score must be a finite number".to_string(),
            });
        }

        Ok(Self {
            count: f.unsigned("count")?,
            score,
            description: f.string("description")?,
        })
    }
}

impl Image {
    fn from_fields(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            url: f.string("url")?,
            description: f.optional_string("description")?,
            alt: f.optional_string("alt")?,
            width: f.dimension("width")?,
            height: f.dimension("height")?,
        })
    }
}

impl BreadCrumb {
    fn from_fields(f: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            name: f.string("name")?,
            url: f.string("url")?,
        })
    }
}

impl ActivityDetails {
    /// Build a record from raw, untyped JSON.
    ///
    /// Fails on the first missing required field, wrongly typed field, or
    /// negative integer. Sequence fields keep their input order and default
    /// to empty when missing. Image `description`/`alt` are `None` when the
    /// key is missing or `null`, and `Some("")` when given as empty text.
    pub fn from_value(value: &Value) -> Result<Self> {
        let f = Fields::new(value, String::new())?;

        let highlights = f
            .array("highlights")?
            .into_iter()
            .map(|(path, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or(ActivityError::TypeMismatch {
                        field: path,
                        expected: "string",
                        found: kind(item),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let images = f
            .array("images")?
            .into_iter()
            .map(|(path, item)| Image::from_fields(&Fields::new(item, path)?))
            .collect::<Result<Vec<_>>>()?;

        let breadcrumbs = f
            .array("breadcrumbs")?
            .into_iter()
            .map(|(path, item)| BreadCrumb::from_fields(&Fields::new(item, path)?))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: f.unsigned("id")?,
            title: f.string("title")?,
            url: f.string("url")?,
            description: f.string("description")?,
            summary: f.string("summary")?,
            highlights,
            price: Price::from_fields(&f.object("price")?)?,
            location: Location::from_fields(&f.object("location")?)?,
            review: Review::from_fields(&f.object("review")?)?,
            no_past_participants: f.string("noPastParticipants")?,
            images,
            breadcrumbs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::city_tour;

    #[test]
    fn test_city_tour_scenario() {
        let record = ActivityDetails::from_value(&city_tour()).unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.title, "City Tour");
        assert_eq!(record.highlights, vec!["Guide included"]);
        assert_eq!(record.price.selling_price, "$40");
        assert_eq!(record.location.coordinates, "40.7,-74.0");
        assert_eq!(record.review.count, 120);
        assert_eq!(record.review.score, 4.5);
        assert_eq!(record.no_past_participants, "5,000+");
        assert_eq!(record.images[0].description, None);
        assert_eq!(record.images[0].alt, None);
        let crumbs: Vec<&str> = record.breadcrumbs.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(crumbs, vec!["Home", "City Tour"]);
    }

    #[test]
    fn test_missing_top_level_field() {
        for key in [
            "id",
            "title",
            "url",
            "description",
            "summary",
            "price",
            "location",
            "review",
            "noPastParticipants",
        ] {
            let mut raw = city_tour();
            raw.as_object_mut().unwrap().remove(key);

            let err = ActivityDetails::from_value(&raw).unwrap_err();
            assert_eq!(
                err,
                ActivityError::MissingRequiredField {
                    field: key.to_string()
                },
                "removing {}",
                key
            );
        }
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let mut raw = city_tour();
        raw["title"] = Value::Null;

        let err = ActivityDetails::from_value(&raw).unwrap_err();
        assert_eq!(err.field(), Some("title"));
        assert!(matches!(err, ActivityError::MissingRequiredField { .. }));
    }

    #[test]
    fn test_missing_nested_field_reports_path() {
        let mut raw = city_tour();
        raw["price"].as_object_mut().unwrap().remove("currency");
        let err = ActivityDetails::from_value(&raw).unwrap_err();
        assert_eq!(err.field(), Some("price.currency"));

        let mut raw = city_tour();
        raw["images"][0].as_object_mut().unwrap().remove("height");
        let err = ActivityDetails::from_value(&raw).unwrap_err();
        assert_eq!(
            err,
            ActivityError::MissingRequiredField {
                field: "images[0].height".to_string()
            }
        );
    }

    #[test]
    fn test_count_as_string_is_type_mismatch() {
        let mut raw = city_tour();
        raw["review"]["count"] = Value::from("120");

        let err = ActivityDetails::from_value(&raw).unwrap_err();
        assert_eq!(
            err,
            ActivityError::TypeMismatch {
                field: "review.count".to_string(),
                expected: "integer",
                found: "string",
            }
        );
    }

    #[test]
    fn test_fractional_id_is_type_mismatch() {
        let mut raw = city_tour();
        raw["id"] = Value::from(7.5);

        let err = ActivityDetails::from_value(&raw).unwrap_err();
        assert!(matches!(err, ActivityError::TypeMismatch { ref field, .. } if field == "id"));
    }

    #[test]
    fn test_negative_width_is_out_of_range() {
        let mut raw = city_tour();
        raw["images"][0]["width"] = Value::from(-800);

        let err = ActivityDetails::from_value(&raw).unwrap_err();
        assert!(
            matches!(err, ActivityError::OutOfRangeValue { ref field, .. } if field == "images[0].width")
        );
    }

    #[test]
    fn test_negative_review_count_is_out_of_range() {
        let mut raw = city_tour();
        raw["review"]["count"] = Value::from(-1);

        let err = ActivityDetails::from_value(&raw).unwrap_err();
        assert_eq!(err.field(), Some("review.count"));
        assert!(matches!(err, ActivityError::OutOfRangeValue { .. }));
    }

    #[test]
    fn test_missing_sequences_default_to_empty() {
        let mut raw = city_tour();
        let obj = raw.as_object_mut().unwrap();
        obj.remove("highlights");
        obj.remove("images");
        obj.insert("breadcrumbs".to_string(), Value::Null);

        let record = ActivityDetails::from_value(&raw).unwrap();
        assert!(record.highlights.is_empty());
        assert!(record.images.is_empty());
        assert!(record.breadcrumbs.is_empty());
    }

    #[test]
    fn test_image_text_three_states() {
        let mut raw = city_tour();
        raw["images"] = serde_json::json!([
            {"url": "/a.jpg", "description": "Harbour", "alt": "", "width": 1, "height": 1},
            {"url": "/b.jpg", "width": 1, "height": 1}
        ]);

        let record = ActivityDetails::from_value(&raw).unwrap();
        assert_eq!(record.images[0].description.as_deref(), Some("Harbour"));
        assert_eq!(record.images[0].alt.as_deref(), Some(""));
        assert_eq!(record.images[1].description, None);
        assert_eq!(record.images[1].alt, None);
    }

    #[test]
    fn test_non_string_alt_is_rejected() {
        let mut raw = city_tour();
        raw["images"][0]["alt"] = Value::from(false);

        let err = ActivityDetails::from_value(&raw).unwrap_err();
        assert_eq!(
            err,
            ActivityError::TypeMismatch {
                field: "images[0].alt".to_string(),
                expected: "string or null",
                found: "boolean",
            }
        );
    }

    #[test]
    fn test_highlight_element_type_checked() {
        let mut raw = city_tour();
        raw["highlights"] = serde_json::json!(["Guide included", 3]);

        let err = ActivityDetails::from_value(&raw).unwrap_err();
        assert_eq!(err.field(), Some("highlights[1]"));
    }

    #[test]
    fn test_non_object_input() {
        let err = ActivityDetails::from_value(&Value::from("not a record")).unwrap_err();
        assert_eq!(
            err,
            ActivityError::TypeMismatch {
                field: "$".to_string(),
                expected: "object",
                found: "string",
            }
        );
    }

    #[test]
    fn test_from_json_str_rejects_malformed_text() {
        let err = ActivityDetails::from_json_str("{\"id\": ").unwrap_err();
        assert!(matches!(err, ActivityError::InvalidJson(_)));
    }
}
