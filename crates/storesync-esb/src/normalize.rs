//! Normalization from raw ESB records to [`storesync_core::Store`].
//!
//! Field policy:
//! - `number`, `name`, `address` are required. Null, empty-after-cleaning,
//!   and (for the number) unparsable values each fail with their own error
//!   variant, and no `Store` is produced.
//! - `mall`, `company`, `brand`, `format` are optional. A non-null value is
//!   accepted even when empty — the source saying "this field is empty" is
//!   preserved as-is for optional fields, unlike the required-field rule.
//!   Null values default to the empty string.
//! - An unrecognized status code degrades to `Undefined` instead of failing
//!   the record; a null or empty status leaves the default untouched.
//!
//! Every field passes through [`clean_string`] before validation or storage.

use storesync_core::{clean_string, Store, StoreStatus};

use crate::error::NormalizeError;
use crate::types::RawStore;

/// Normalizes a single raw record into the canonical model.
///
/// Pure record-level validation: a failure rejects this record only and
/// never the batch. The caller is expected to log the rejection together
/// with the raw payload and continue.
///
/// # Errors
///
/// Returns the matching [`NormalizeError`] variant when `storeFactsNumber`,
/// `nameAlias`, or `primaryAddress` is null, cleans to an empty string, or
/// (for the number) does not parse as an integer.
pub fn normalize_store(raw: &RawStore) -> Result<Store, NormalizeError> {
    let mut store = Store::default();

    // Must: store number
    let number_raw = raw
        .store_facts_number
        .as_deref()
        .ok_or(NormalizeError::NilNumber)?;
    let number_str = clean_string(number_raw);
    if number_str.is_empty() {
        return Err(NormalizeError::EmptyNumber);
    }
    store.number = number_str
        .parse::<i64>()
        .map_err(|_| NormalizeError::ParseNumber(number_str))?;

    // Must: name
    let name_raw = raw.name_alias.as_deref().ok_or(NormalizeError::NilName)?;
    let name = clean_string(name_raw);
    if name.is_empty() {
        return Err(NormalizeError::EmptyName);
    }
    store.name = name;

    // Must: address
    let address_raw = raw
        .primary_address
        .as_deref()
        .ok_or(NormalizeError::NilAddress)?;
    let address = clean_string(address_raw);
    if address.is_empty() {
        return Err(NormalizeError::EmptyAddress);
    }
    store.address = address;

    // Optional fields: any non-null value is kept, empty included.
    if let Some(mall) = raw.facility_shopping_center_name.as_deref() {
        store.mall = clean_string(mall);
    }
    if let Some(company) = raw.franchisee_partner_name.as_deref() {
        store.company = clean_string(company);
    }
    if let Some(brand) = raw.brand_id.as_deref() {
        store.brand = clean_string(brand);
    }
    if let Some(format) = raw.store_format_id.as_deref() {
        store.format = clean_string(format);
    }

    // Optional: status. Null/empty leaves the default; unknown codes degrade.
    if let Some(code) = raw.status.as_deref() {
        if !code.is_empty() {
            store.status = StoreStatus::from_code(code).unwrap_or_else(|| {
                tracing::warn!(status = code, raw = ?raw, "unrecognized store status");
                StoreStatus::Undefined
            });
        }
    }

    Ok(store)
}
