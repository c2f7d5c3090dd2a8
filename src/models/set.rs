use serde::{Deserialize, Serialize};

use super::{number_or_string, string_or_number, Content, PhotoSummary};

/// `photosets.getInfo` result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SetInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub title: Content,
    #[serde(default)]
    pub description: Content,
    #[serde(default, deserialize_with = "number_or_string")]
    pub photos: u64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub count_views: u64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub date_create: String,
    /// Unix seconds of the last set level edit
    #[serde(default, deserialize_with = "string_or_number")]
    pub date_update: String,
}

impl SetInfo {
    /// Last update as Unix seconds, zero when absent or malformed.
    pub fn last_update(&self) -> i64 {
        self.date_update.trim().parse().unwrap_or(0)
    }
}

/// `photosets.getPhotos` result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SetPhotos {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub ownername: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub page: u64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub pages: u64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub total: u64,
    #[serde(default)]
    pub photo: Vec<PhotoSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_info_last_update() {
        let json = r#"{"id": "72157688725486731", "owner": "60950751@N04",
            "title": {"_content": "Owyhee Powder"}, "photos": 28,
            "date_create": "1511224535", "date_update": "1511225009"}"#;

        let info: SetInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.title.content, "Owyhee Powder");
        assert_eq!(info.photos, 28);
        assert_eq!(info.last_update(), 1511225009);
    }

    #[test]
    fn test_set_photos_counts_as_strings() {
        let json = r#"{"id": "1", "page": 1, "pages": "1", "total": "2",
            "photo": [{"id": "10", "lastupdate": "5"}, {"id": "11"}]}"#;

        let photos: SetPhotos = serde_json::from_str(json).unwrap();
        assert_eq!(photos.total, 2);
        assert_eq!(photos.photo.len(), 2);
        assert_eq!(photos.photo[1].lastupdate, None);
    }
}
