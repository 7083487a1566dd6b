//! ESB API response types for the store-catalog endpoints.
//!
//! The catalog endpoint wraps its records in an OData-style envelope:
//! `{"value": [ ... ]}`, where `value` may be `null` or absent on an empty
//! page. The count endpoint returns a plain numeric body (observed with a
//! leading BOM on some responses, hence the cleaning pass before parsing).
//!
//! Every record field is nullable at the source. `null` and `""` are
//! distinct states and the normalizer treats them differently for optional
//! fields, so everything is modeled as `Option<String>` rather than
//! defaulting to empty strings here.

use serde::Deserialize;

/// Envelope for `GET /stores`.
#[derive(Debug, Deserialize)]
pub struct StoresPage {
    /// Records for the requested page. `null` and absent both mean an empty
    /// page.
    #[serde(default)]
    pub value: Option<Vec<RawStore>>,
}

/// A single store record as returned by the ESB, before any validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStore {
    /// Store number as a string; the canonical unique id once parsed.
    #[serde(default)]
    pub store_facts_number: Option<String>,

    /// Display name of the store.
    #[serde(default)]
    pub name_alias: Option<String>,

    /// Street address.
    #[serde(default)]
    pub primary_address: Option<String>,

    /// Shopping-center / mall name, when the store sits inside one.
    #[serde(default)]
    pub facility_shopping_center_name: Option<String>,

    /// Franchisee partner (operating company) name.
    #[serde(default)]
    pub franchisee_partner_name: Option<String>,

    /// Brand identifier.
    #[serde(default)]
    pub brand_id: Option<String>,

    /// Store format identifier.
    #[serde(default)]
    pub store_format_id: Option<String>,

    /// Lifecycle status code; free-form at the source.
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_record() {
        let raw: RawStore = serde_json::from_str(
            r#"{
                "storeFactsNumber": "42",
                "nameAlias": "Central",
                "primaryAddress": "Main st. 1",
                "facilityShoppingCenterName": "Galleria",
                "franchiseePartnerName": "Acme Retail",
                "brandId": "B1",
                "storeFormatId": "F2",
                "status": "Open"
            }"#,
        )
        .unwrap();
        assert_eq!(raw.store_facts_number.as_deref(), Some("42"));
        assert_eq!(raw.name_alias.as_deref(), Some("Central"));
        assert_eq!(raw.facility_shopping_center_name.as_deref(), Some("Galleria"));
        assert_eq!(raw.status.as_deref(), Some("Open"));
    }

    #[test]
    fn missing_and_null_fields_are_none() {
        let raw: RawStore =
            serde_json::from_str(r#"{"storeFactsNumber": null, "status": "Open"}"#).unwrap();
        assert!(raw.store_facts_number.is_none());
        assert!(raw.name_alias.is_none());
        assert!(raw.primary_address.is_none());
    }

    #[test]
    fn page_envelope_tolerates_null_value() {
        let page: StoresPage = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert!(page.value.is_none());
        let page: StoresPage = serde_json::from_str("{}").unwrap();
        assert!(page.value.is_none());
    }
}
