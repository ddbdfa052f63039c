//! Additional Authenticated Data (AAD) for history records.
//!
//! AAD follows the pattern `vc:<type>:v1|<identifiers>` so a record's
//! ciphertext is bound to the identifier it was sealed under.

use crate::ids::RecordId;

/// Current AAD format version.
const AAD_VERSION: &str = "v1";

/// AAD namespace prefix for all application data.
const AAD_NAMESPACE: &str = "vc";

/// Generates AAD for a clipboard history record.
///
/// # Format
///
/// `vc:record:v1|{record_id}`
///
/// ```rust
/// use vc_core::ids::RecordId;
/// use vc_core::security::aad::for_record;
///
/// let aad = for_record(&RecordId::from("test-record"));
/// assert_eq!(aad, b"vc:record:v1|test-record".to_vec());
/// ```
pub fn for_record(record_id: &RecordId) -> Vec<u8> {
    format!("{AAD_NAMESPACE}:record:{AAD_VERSION}|{}", record_id.as_str()).into_bytes()
}
