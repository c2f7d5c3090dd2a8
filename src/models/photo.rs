use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::{number_or_string, string_or_number, Content};

/// Photo entry of a set listing or search result.
///
/// Size URLs and other requested extras land in `extras`, keyed by their
/// wire name (`url_l`, `height_l`, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PhotoSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub server: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub farm: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub datetaken: Option<String>,
    #[serde(default)]
    pub pathalias: Option<String>,
    /// Present only when `last_update` is requested as an extra.
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub lastupdate: Option<String>,
    #[serde(flatten)]
    pub extras: HashMap<String, Value>,
}

impl PhotoSummary {
    pub fn new(id: impl Into<String>, lastupdate: Option<&str>) -> Self {
        Self {
            id: id.into(),
            lastupdate: lastupdate.map(str::to_string),
            ..Self::default()
        }
    }
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let text = string_or_number(deserializer)?;
    Ok(if text.is_empty() { None } else { Some(text) })
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PhotoDates {
    #[serde(default, deserialize_with = "string_or_number")]
    pub posted: String,
    #[serde(default)]
    pub taken: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub lastupdate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TagSummary {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub raw: String,
    #[serde(rename = "_content", default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PhotoTags {
    #[serde(default)]
    pub tag: Vec<TagSummary>,
}

/// `photos.getInfo` result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PhotoInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub server: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub farm: u64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub dateuploaded: String,
    #[serde(default)]
    pub title: Content,
    #[serde(default)]
    pub description: Content,
    #[serde(default)]
    pub dates: PhotoDates,
    #[serde(default, deserialize_with = "number_or_string")]
    pub views: u64,
    #[serde(default)]
    pub tags: PhotoTags,
}

/// Entry of `photos.getSizes`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Size {
    pub label: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub width: u64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub height: u64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub media: String,
}

/// Set membership entry of `photos.getAllContexts`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MemberSet {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub server: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub farm: u64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub count_photo: u64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub count_video: u64,
}

/// Entry of `photos.getExif`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Exif {
    #[serde(default)]
    pub tagspace: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub tagspaceid: u64,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub raw: Content,
}

/// Entry of `tags.getListUserRaw`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Tag {
    #[serde(default)]
    pub clean: String,
    #[serde(default)]
    pub raw: Vec<Content>,
}
