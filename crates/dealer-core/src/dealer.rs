use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A dealer contact record (`res.partner` in the ERP).
///
/// The record keeps the object exactly as the ERP returned it: `false` for
/// empty fields, `[id, "label"]` relation pairs, numeric strings, and any key
/// the query did not ask for. Serializing it writes the same object back.
/// The accessors interpret the raw values for rendering; none of them
/// rewrites the record.
///
/// Coordinates come in two pairs: the ERP's own geolocation fields and a
/// legacy custom pair that older records still carry. Use
/// [`DealerRecord::latitude`] and [`DealerRecord::longitude`] rather than
/// reading the fields directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealerRecord {
    fields: Map<String, Value>,
}

impl From<Map<String, Value>> for DealerRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl DealerRecord {
    /// Creates a record with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self::default().with("name", Value::String(name.into()))
    }

    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    /// The raw value of `field`, if the ERP sent it.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn id(&self) -> Option<i64> {
        self.get("id").and_then(Value::as_i64)
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn street(&self) -> Option<&str> {
        self.text("street")
    }

    pub fn street2(&self) -> Option<&str> {
        self.text("street2")
    }

    pub fn city(&self) -> Option<&str> {
        self.text("city")
    }

    pub fn zip(&self) -> Option<&str> {
        self.text("zip")
    }

    pub fn phone(&self) -> Option<&str> {
        self.text("phone")
    }

    pub fn email(&self) -> Option<&str> {
        self.text("email")
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinate("partner_latitude", "x_latitude")
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinate("partner_longitude", "x_longitude")
    }

    pub fn state_label(&self) -> Option<&str> {
        self.relation_label("state_id")
    }

    pub fn country_label(&self) -> Option<&str> {
        self.relation_label("country_id")
    }

    /// Non-empty string value; `false`, `null` and `""` are all "no value".
    fn text(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The ERP stores an unset geolocation as `0.0`, so a zero primary value
    /// falls through to the legacy field.
    fn coordinate(&self, primary: &str, legacy: &str) -> Option<f64> {
        self.number(primary)
            .filter(|v| *v != 0.0)
            .or_else(|| self.number(legacy))
    }

    fn number(&self, field: &str) -> Option<f64> {
        match self.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn relation_label(&self, field: &str) -> Option<&str> {
        self.get(field)?
            .as_array()?
            .get(1)?
            .as_str()
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> DealerRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_false_fields_are_absent() {
        let record = record(json!({
            "id": 7,
            "name": "Acme Tractor",
            "street": false,
            "street2": "",
            "city": "Omaha",
            "state_id": [27, "Nebraska (US)"],
            "zip": "68102",
            "country_id": false,
            "phone": null,
            "email": "sales@acme.test",
            "partner_latitude": 0.0,
            "partner_longitude": 0.0,
            "x_latitude": false,
            "x_longitude": false
        }));

        assert_eq!(record.id(), Some(7));
        assert_eq!(record.name(), Some("Acme Tractor"));
        assert!(record.street().is_none());
        assert!(record.street2().is_none());
        assert!(record.phone().is_none());
        assert_eq!(record.state_label(), Some("Nebraska (US)"));
        assert!(record.country_label().is_none());
        assert!(record.latitude().is_none());
    }

    #[test]
    fn test_missing_keys_are_absent() {
        let record = record(json!({ "name": "Solo" }));
        assert_eq!(record, DealerRecord::named("Solo"));
        assert!(record.id().is_none());
        assert!(record.city().is_none());
    }

    #[test]
    fn test_coordinates_prefer_primary_pair() {
        let record = record(json!({
            "partner_latitude": 41.25,
            "partner_longitude": -95.93,
            "x_latitude": 1.0,
            "x_longitude": 2.0
        }));
        assert_eq!(record.latitude(), Some(41.25));
        assert_eq!(record.longitude(), Some(-95.93));
    }

    #[test]
    fn test_coordinates_fall_back_to_legacy_pair() {
        let record = record(json!({
            "partner_latitude": 0.0,
            "partner_longitude": false,
            "x_latitude": "29.950",
            "x_longitude": -90.07
        }));
        assert_eq!(record.latitude(), Some(29.95));
        assert_eq!(record.longitude(), Some(-90.07));
    }

    #[test]
    fn test_relation_with_odd_label_has_no_label() {
        let record = record(json!({ "state_id": [5, null], "country_id": [233] }));
        assert!(record.state_label().is_none());
        assert!(record.country_label().is_none());
    }

    #[test]
    fn test_round_trip_keeps_erp_values_verbatim() {
        let raw = json!({
            "id": 3,
            "name": "Delta Supply",
            "x_latitude": "29.950",
            "phone": "",
            "email": false,
            "state_id": [5, null],
            "country_id": [233, "United States"],
            "website": "https://delta.example"
        });
        let value = serde_json::to_value(record(raw.clone())).unwrap();
        assert_eq!(value, raw);
    }
}
