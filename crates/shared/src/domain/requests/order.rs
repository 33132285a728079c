use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::ToSchema;
use validator::Validate;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO-8601 timestamp. `T` or a space may separate date and time,
/// seconds are optional, and a `Z` or `±hh:mm` offset is converted to UTC.
fn parse_order_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let normalized = match raw.as_bytes().get(10) {
        Some(b' ') => format!("{}T{}", &raw[..10], &raw[11..]),
        _ => raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Some(dt.naive_utc());
        }
    }

    if let Some(utc) = normalized.strip_suffix('Z') {
        if let Ok(dt) = NaiveDateTime::parse_from_str(utc, "%Y-%m-%dT%H:%M") {
            return Some(dt);
        }
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
}

fn deserialize_order_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_order_date(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid order_date '{raw}'")))
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(deserialize_with = "deserialize_order_date")]
    #[schema(value_type = String, example = "2024-05-01T14:30:00")]
    pub order_date: NaiveDateTime,

    #[schema(example = 1)]
    pub user_id: i32,
}

/// An empty or absent list is rejected by the service after the order lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct RemoveProductsRequest {
    #[serde(default)]
    #[schema(example = json!([1, 2, 3]))]
    pub product_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_date_parses_iso_timestamp() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"order_date":"2024-05-01T14:30:00","user_id":3}"#).unwrap();
        assert_eq!(req.order_date.to_string(), "2024-05-01 14:30:00");
        assert!(req.validate().is_ok());
    }

    fn order_date_of(raw: &str) -> Result<NaiveDateTime, serde_json::Error> {
        let body = serde_json::json!({"order_date": raw, "user_id": 1});
        serde_json::from_value::<CreateOrderRequest>(body).map(|req| req.order_date)
    }

    #[test]
    fn order_date_accepts_utc_designator() {
        let parsed = order_date_of("2024-05-01T14:30:00Z").unwrap();
        assert_eq!(parsed.to_string(), "2024-05-01 14:30:00");
    }

    #[test]
    fn order_date_converts_offsets_to_utc() {
        assert_eq!(
            order_date_of("2024-05-01T14:30:00+00:00").unwrap().to_string(),
            "2024-05-01 14:30:00"
        );
        assert_eq!(
            order_date_of("2024-05-01T16:30:00+02:00").unwrap().to_string(),
            "2024-05-01 14:30:00"
        );
        assert_eq!(
            order_date_of("2024-05-01T14:30+02:00").unwrap().to_string(),
            "2024-05-01 12:30:00"
        );
    }

    #[test]
    fn order_date_allows_missing_seconds() {
        assert_eq!(
            order_date_of("2024-05-01T14:30").unwrap().to_string(),
            "2024-05-01 14:30:00"
        );
        assert_eq!(
            order_date_of("2024-05-01T14:30Z").unwrap().to_string(),
            "2024-05-01 14:30:00"
        );
    }

    #[test]
    fn order_date_allows_space_separator() {
        assert_eq!(
            order_date_of("2024-05-01 14:30:00").unwrap().to_string(),
            "2024-05-01 14:30:00"
        );
        assert_eq!(
            order_date_of("2024-05-01 14:30:00.250").unwrap().to_string(),
            "2024-05-01 14:30:00.250"
        );
    }

    #[test]
    fn order_date_rejects_garbage() {
        assert!(order_date_of("yesterday").is_err());
        assert!(order_date_of("2024-13-01T00:00:00").is_err());
    }

    #[test]
    fn missing_user_id_fails_deserialization() {
        let parsed =
            serde_json::from_str::<CreateOrderRequest>(r#"{"order_date":"2024-05-01T14:30:00"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn product_ids_default_to_empty() {
        let req: RemoveProductsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.product_ids.is_empty());
    }
}
