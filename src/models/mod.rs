mod organization;
mod profile;
mod request;
mod summary;

pub use organization::{find_organization, Organization};
pub use profile::{linkedin_urls, Profile};
pub use request::{OrgSearchRequest, PeopleSearchRequest, SummarizeRequest};
pub use summary::{SummaryResponse, SummaryResult};

use serde::{Deserialize, Deserializer};

/// Helper to deserialize id as either string or integer.
/// A null id becomes the empty string so one bad row does not fail a list.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, integer or null")
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

        fn visit_unit<E>(self) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Helper to deserialize nullable strings as empty string
/// Handles both missing fields and explicit null values
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct IdHolder {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
        #[serde(default, deserialize_with = "deserialize_nullable_string")]
        label: String,
    }

    #[test]
    fn test_deserialize_id_accepts_string_and_integer() {
        let a: IdHolder = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        let b: IdHolder = serde_json::from_str(r#"{"id":17}"#).unwrap();
        assert_eq!(a.id, "abc");
        assert_eq!(b.id, "17");
    }

    #[test]
    fn test_deserialize_id_accepts_null() {
        let holder: IdHolder = serde_json::from_str(r#"{"id":null}"#).unwrap();
        assert_eq!(holder.id, "");
    }

    #[test]
    fn test_deserialize_id_rejects_other_types() {
        assert!(serde_json::from_str::<IdHolder>(r#"{"id":[1]}"#).is_err());
    }

    #[test]
    fn test_deserialize_nullable_string() {
        let missing: IdHolder = serde_json::from_str(r#"{"id":1}"#).unwrap();
        let null: IdHolder = serde_json::from_str(r#"{"id":1,"label":null}"#).unwrap();
        assert_eq!(missing.label, "");
        assert_eq!(null.label, "");
    }
}
