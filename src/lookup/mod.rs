//! Caller connection metadata
//!
//! Projects the edge-supplied metadata bundle onto the fixed field set the
//! service reports, and renders that set in the supported output formats.

pub mod render;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HandlerError;

/// The reported view of one caller connection: the validated address plus
/// twelve metadata fields projected from the edge bundle.
///
/// Field order here is the output order of every format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub ip: String,
    pub asn: u32,
    pub as_organization: String,
    pub continent: String,
    pub country: String,
    pub region: String,
    pub region_code: String,
    pub city: String,
    pub postal_code: String,
    pub longitude: String,
    pub latitude: String,
    pub timezone: String,
    pub colo: String,
}

/// Bundle keys this service projects. Unknown bundle keys are ignored here
/// and only surface through the raw route.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleFields {
    asn: u32,
    #[serde(default)]
    as_organization: String,
    #[serde(default)]
    continent: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    region_code: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    postal_code: String,
    #[serde(default)]
    longitude: String,
    #[serde(default)]
    latitude: String,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    colo: String,
}

impl ConnectionInfo {
    /// Project the metadata bundle onto the fixed field set.
    ///
    /// `asn` must be present as a number; the string fields are empty when
    /// the edge omits them.
    pub fn from_bundle(ip: String, bundle: &Value) -> Result<Self, HandlerError> {
        let fields = BundleFields::deserialize(bundle).map_err(HandlerError::MetadataShape)?;
        Ok(Self {
            ip,
            asn: fields.asn,
            as_organization: fields.as_organization,
            continent: fields.continent,
            country: fields.country,
            region: fields.region,
            region_code: fields.region_code,
            city: fields.city,
            postal_code: fields.postal_code,
            longitude: fields.longitude,
            latitude: fields.latitude,
            timezone: fields.timezone,
            colo: fields.colo,
        })
    }

    /// All fields in output order as (serialized name, display label, value).
    ///
    /// Machine formats key entries by the serialized name, human formats by
    /// the display label.
    pub fn fields(&self) -> [(&'static str, &'static str, String); 13] {
        [
            ("ip", "IP", self.ip.clone()),
            ("asn", "ASN", self.asn.to_string()),
            ("asOrganization", "AS", self.as_organization.clone()),
            ("continent", "Continent", self.continent.clone()),
            ("country", "Country", self.country.clone()),
            ("region", "Region", self.region.clone()),
            ("regionCode", "Region Code", self.region_code.clone()),
            ("city", "City", self.city.clone()),
            ("postalCode", "Zip", self.postal_code.clone()),
            ("longitude", "Longitude", self.longitude.clone()),
            ("latitude", "Latitude", self.latitude.clone()),
            ("timezone", "Timezone", self.timezone.clone()),
            ("colo", "Server", self.colo.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_bundle() -> Value {
        json!({
            "asn": 13335,
            "asOrganization": "Example Carrier Ltd",
            "continent": "NA",
            "country": "US",
            "region": "California",
            "regionCode": "CA",
            "city": "San Francisco",
            "postalCode": "94107",
            "longitude": "-122.39420",
            "latitude": "37.76720",
            "timezone": "America/Los_Angeles",
            "colo": "SJC",
            "httpProtocol": "HTTP/2",
            "tlsVersion": "TLSv1.3"
        })
    }

    #[test]
    fn test_projection_from_full_bundle() {
        let info =
            ConnectionInfo::from_bundle("203.0.113.5".to_string(), &sample_bundle()).unwrap();
        assert_eq!(info.ip, "203.0.113.5");
        assert_eq!(info.asn, 13335);
        assert_eq!(info.as_organization, "Example Carrier Ltd");
        assert_eq!(info.region_code, "CA");
        assert_eq!(info.postal_code, "94107");
        assert_eq!(info.colo, "SJC");
    }

    #[test]
    fn test_missing_string_fields_default_to_empty() {
        let info =
            ConnectionInfo::from_bundle("203.0.113.5".to_string(), &json!({ "asn": 64501 }))
                .unwrap();
        assert_eq!(info.asn, 64501);
        assert_eq!(info.country, "");
        assert_eq!(info.timezone, "");
        assert_eq!(info.colo, "");
    }

    #[test]
    fn test_missing_asn_is_a_shape_error() {
        let err = ConnectionInfo::from_bundle("203.0.113.5".to_string(), &json!({"country": "US"}))
            .unwrap_err();
        assert!(matches!(err, HandlerError::MetadataShape(_)));
    }

    #[test]
    fn test_non_object_bundle_is_a_shape_error() {
        let err =
            ConnectionInfo::from_bundle("203.0.113.5".to_string(), &json!("plain string"))
                .unwrap_err();
        assert!(matches!(err, HandlerError::MetadataShape(_)));
    }

    #[test]
    fn test_field_order_and_labels() {
        let info =
            ConnectionInfo::from_bundle("203.0.113.5".to_string(), &sample_bundle()).unwrap();
        let fields = info.fields();
        assert_eq!(fields.len(), 13);
        assert_eq!(fields[0], ("ip", "IP", "203.0.113.5".to_string()));
        assert_eq!(fields[1], ("asn", "ASN", "13335".to_string()));
        assert_eq!(fields[6].1, "Region Code");
        assert_eq!(fields[8], ("postalCode", "Zip", "94107".to_string()));
        assert_eq!(fields[12], ("colo", "Server", "SJC".to_string()));
    }

    #[test]
    fn test_serialized_names_match_bundle_keys() {
        let info =
            ConnectionInfo::from_bundle("203.0.113.5".to_string(), &sample_bundle()).unwrap();
        let value = serde_json::to_value(&info).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 13);
        assert_eq!(object["asOrganization"], "Example Carrier Ltd");
        assert_eq!(object["regionCode"], "CA");
        assert_eq!(object["postalCode"], "94107");
        assert_eq!(object["colo"], "SJC");
        assert_eq!(object["asn"], 13335);
    }
}
