//! Response shapes for the Flickr methods this crate calls.
//!
//! Only the fields the client or change detection read are typed; Flickr
//! sends many more and serde ignores them. Flickr is inconsistent about
//! quoting numbers, so ids, counts and timestamps accept either form.

mod collection;
mod photo;
mod set;

pub use collection::{Collection, SetSummary};
pub use photo::{
    Exif, MemberSet, PhotoDates, PhotoInfo, PhotoSummary, PhotoTags, Size, Tag, TagSummary,
};
pub use set::{SetInfo, SetPhotos};

use serde::{Deserialize, Deserializer};

/// Flickr's `{"_content": "..."}` text wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct Content {
    #[serde(rename = "_content", default)]
    pub content: String,
}

/// Helper to deserialize a value sent as either string or number into a string.
/// Null becomes an empty string.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

/// Helper to deserialize a count sent as either string or number.
/// Anything unparseable becomes zero.
pub(crate) fn number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let text = string_or_number(deserializer)?;
    Ok(text.trim().parse().unwrap_or(0))
}
