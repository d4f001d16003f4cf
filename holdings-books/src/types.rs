use serde::Deserialize;

/// Response body of `GET /books/v1/volumes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    #[serde(default)]
    pub total_items: u32,
    /// Absent entirely when nothing matched.
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    #[serde(default)]
    pub image_links: Option<ImageLinks>,
}

impl VolumeInfo {
    /// All authors joined by spaces, as used for fuzzy matching.
    pub fn joined_authors(&self) -> String {
        self.authors.join(" ")
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.image_links
            .as_ref()
            .and_then(|links| links.thumbnail.as_deref())
    }
}

/// One identifier entry, e.g. `{"type": "ISBN_13", "identifier": "9780131103627"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default)]
    pub small_thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}
