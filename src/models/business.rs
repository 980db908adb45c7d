use serde::Deserialize;

/// One entry from the cuisine search index.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexHit {
    #[serde(rename = "BusinessId")]
    pub business_id: String,
    #[serde(default)]
    pub score: f64,
}

/// Display record resolved from the business directory.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Rating")]
    pub rating: String,
}
