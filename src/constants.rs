//! Flickr endpoint, method and parameter constants.

use std::fmt;

/// Default scheme and host for API calls.
pub const API_BASE_URL: &str = "https://api.flickr.com";

/// REST endpoint path appended to the host.
pub const REST_PATH: &str = "/services/rest/";

/// Prefix added to every method name on the wire.
pub const METHOD_PREFIX: &str = "flickr.";

/// OAuth endpoints. Token exchange itself is handled outside this crate.
pub mod oauth_url {
    pub const REQUEST_TOKEN: &str = "https://www.flickr.com/services/oauth/request_token";
    pub const AUTHORIZE: &str = "https://www.flickr.com/services/oauth/authorize";
    pub const ACCESS_TOKEN: &str = "https://www.flickr.com/services/oauth/access_token";
}

/// API method names, without the `flickr.` prefix.
pub mod method {
    pub const COLLECTIONS: &str = "collections.getTree";

    pub mod set {
        pub const INFO: &str = "photosets.getInfo";
        pub const PHOTOS: &str = "photosets.getPhotos";
    }

    pub mod photo {
        pub const EXIF: &str = "photos.getExif";
        pub const INFO: &str = "photos.getInfo";
        pub const SEARCH: &str = "photos.search";
        pub const SETS: &str = "photos.getAllContexts";
        pub const SIZES: &str = "photos.getSizes";
        pub const TAGS: &str = "tags.getListUserRaw";
    }
}

/// Kind of entity an [`Identity`](crate::api::Identity) refers to. The
/// string form is the query parameter name that carries the entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdType {
    User,
    Set,
    Photo,
}

impl IdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::User => "user_id",
            IdType::Set => "photoset_id",
            IdType::Photo => "photo_id",
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra fields that may be requested with photo listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extra {
    Description,
    Tags,
    DateTaken,
    /// Required for photo level change detection.
    DateUpdated,
    Location,
    PathAlias,
}

impl Extra {
    pub fn as_str(&self) -> &'static str {
        match self {
            Extra::Description => "description",
            Extra::Tags => "tags",
            Extra::DateTaken => "date_taken",
            Extra::DateUpdated => "last_update",
            Extra::Location => "geo",
            Extra::PathAlias => "path_alias",
        }
    }
}

/// Photo size URL fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUrl {
    Thumb,
    Square75,
    Square150,
    Small240,
    Small320,
    Medium500,
    Medium640,
    Medium800,
    Large1024,
    Large1600,
    Large2048,
    Original,
}

impl SizeUrl {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeUrl::Thumb => "url_t",
            SizeUrl::Square75 => "url_sq",
            SizeUrl::Square150 => "url_q",
            SizeUrl::Small240 => "url_s",
            SizeUrl::Small320 => "url_n",
            SizeUrl::Medium500 => "url_m",
            SizeUrl::Medium640 => "url_z",
            SizeUrl::Medium800 => "url_c",
            SizeUrl::Large1024 => "url_l",
            SizeUrl::Large1600 => "url_h",
            SizeUrl::Large2048 => "url_k",
            SizeUrl::Original => "url_o",
        }
    }
}

/// Search result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    DatePostedAsc,
    DatePostedDesc,
    DateTakenAsc,
    DateTakenDesc,
    InterestingDesc,
    InterestingAsc,
    Relevance,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::DatePostedAsc => "date-posted-asc",
            Sort::DatePostedDesc => "date-posted-desc",
            Sort::DateTakenAsc => "date-taken-asc",
            Sort::DateTakenDesc => "date-taken-desc",
            Sort::InterestingDesc => "interestingness-desc",
            Sort::InterestingAsc => "interestingness-asc",
            Sort::Relevance => "relevance",
        }
    }
}

/// Join a list of wire values with commas.
pub(crate) fn join<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_type_param_names() {
        assert_eq!(IdType::User.as_str(), "user_id");
        assert_eq!(IdType::Set.to_string(), "photoset_id");
        assert_eq!(IdType::Photo.as_str(), "photo_id");
    }

    #[test]
    fn test_join_extras() {
        let joined = join([Extra::DateUpdated.as_str(), SizeUrl::Large1024.as_str()]);
        assert_eq!(joined, "last_update,url_l");
    }
}
