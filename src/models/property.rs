//! Property Model
//!
//! Defines the property listing record served by this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Property ==
/// A property listing record.
///
/// Records are created and mutated by external administrative flows; this
/// service only reads them. The price is carried as decimal text (e.g.
/// `"199999.00"`) so it survives serialization without floating-point drift,
/// and `created_at` serializes to an ISO 8601 / RFC 3339 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Unique identifier
    pub id: u64,
    /// Listing title
    pub title: String,
    /// Listing description
    pub description: String,
    /// Price as decimal text, never a bare number
    pub price: String,
    /// Location text
    pub location: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_property() -> Property {
        Property {
            id: 1,
            title: "Seaside flat".to_string(),
            description: "Two bedrooms with a view".to_string(),
            price: "199999.00".to_string(),
            location: "Brighton".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_price_serializes_as_string() {
        let json = serde_json::to_value(sample_property()).unwrap();
        assert!(json["price"].is_string());
        assert_eq!(json["price"], "199999.00");
    }

    #[test]
    fn test_created_at_serializes_as_iso8601() {
        let json = serde_json::to_value(sample_property()).unwrap();
        let text = json["created_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(text).is_ok());
    }

    #[test]
    fn test_property_round_trips_through_json() {
        let property = sample_property();
        let json = serde_json::to_string(&property).unwrap();
        let decoded: Property = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, property);
    }
}
