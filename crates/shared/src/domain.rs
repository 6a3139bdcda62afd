use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned by the report store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

/// A persisted stray-cat report. Owned by the external report store; this
/// system only reads and displays it.
///
/// Everything except the id is optional on the wire: absent and `null`
/// fields read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatReport {
    pub report_id: ReportId,
    /// ISO 8601, kept as the store sent it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cat_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assessment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub immediate_care_steps: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_categories: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: String,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
