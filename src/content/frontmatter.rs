//! Front-matter parsing for embedded post documents

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

use super::ContentError;
use crate::helpers::date::parse_date_string;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub id: Option<u32>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub author: Option<AuthorMatter>,
    pub date: Option<String>,
    pub updated: Option<String>,
    pub read_time: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub featured: bool,
    pub trending: bool,
    pub seo: Option<SeoMatter>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            id: None,
            title: None,
            excerpt: None,
            category: None,
            author: None,
            date: None,
            updated: None,
            read_time: None,
            image: None,
            image_alt: None,
            tags: Vec::new(),
            featured: false,
            trending: false,
            seo: None,
        }
    }
}

/// Author block in front-matter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorMatter {
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub bio: String,
}

/// SEO block in front-matter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoMatter {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: Option<String>,
}

impl FrontMatter {
    /// Parse YAML front-matter delimited by `---` lines.
    /// Returns (front_matter, body).
    pub fn parse<'a>(name: &str, content: &'a str) -> Result<(Self, &'a str), ContentError> {
        let content = content.trim_start();

        let Some(rest) = content.strip_prefix("---") else {
            return Err(ContentError::FrontMatter {
                name: name.to_string(),
                message: "document does not start with ---".to_string(),
            });
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end) = rest.find("\n---") else {
            return Err(ContentError::FrontMatter {
                name: name.to_string(),
                message: "missing closing ---".to_string(),
            });
        };

        let yaml = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\n', '\r']);

        let fm: FrontMatter =
            serde_yaml::from_str(yaml).map_err(|e| ContentError::FrontMatter {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        Ok((fm, body))
    }

    /// Parse the publication date string
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_date_string)
    }

    /// Parse the updated date string
    pub fn parse_updated(&self) -> Option<DateTime<Local>> {
        self.updated.as_deref().and_then(parse_date_string)
    }
}
