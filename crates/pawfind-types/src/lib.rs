//! Data model shared by the pawfind client and controller.
//!
//! These types mirror the catalog service's wire format. They carry no
//! behavior beyond formatting and parsing of the sort parameter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A dog record as returned by `POST /dogs/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: String,
    /// Image URL. May be empty while the service has no photo.
    #[serde(default)]
    pub img: String,
    pub name: String,
    pub age: u32,
    pub zip_code: String,
    pub breed: String,
}

/// Field the catalog service sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    #[default]
    Breed,
    ZipCode,
    Age,
}

impl SortField {
    /// Wire name used in the `sort` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Breed => "breed",
            SortField::ZipCode => "zip_code",
            SortField::Age => "age",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "breed" => Ok(SortField::Breed),
            "zip_code" | "zip" | "zipcode" => Ok(SortField::ZipCode),
            "age" => Ok(SortField::Age),
            other => Err(format!(
                "unknown sort field '{other}' (expected name, breed, zip_code or age)"
            )),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{other}' (expected asc or desc)")),
        }
    }
}

/// Sort order requested from the service, rendered as `<field>:<asc|desc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field.as_str(), self.direction.as_str())
    }
}

impl FromStr for Sort {
    type Err = String;

    /// Accepts `field` or `field:direction`; direction defaults to ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((field, direction)) => Ok(Sort::new(field.parse()?, direction.parse()?)),
            None => Ok(Sort::new(s.parse()?, SortDirection::Asc)),
        }
    }
}

/// Parameters for one `GET /dogs/search` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub breeds: Vec<String>,
    pub size: u32,
    /// Zero-based offset into the full result set.
    pub from: u32,
    pub sort: Sort,
}

impl SearchQuery {
    /// Flattens the query into `(key, value)` pairs. `breeds` repeats once
    /// per breed and is omitted when empty.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = self
            .breeds
            .iter()
            .map(|breed| ("breeds", breed.clone()))
            .collect();
        pairs.push(("size", self.size.to_string()));
        pairs.push(("from", self.from.to_string()));
        pairs.push(("sort", self.sort.to_string()));
        pairs
    }
}

/// Response body of `GET /dogs/search`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub result_ids: Vec<String>,
    pub total: u64,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_renders_field_and_direction() {
        let sort = Sort::new(SortField::ZipCode, SortDirection::Desc);
        assert_eq!(sort.to_string(), "zip_code:desc");
        assert_eq!(Sort::default().to_string(), "breed:asc");
    }

    #[test]
    fn sort_parses_with_and_without_direction() {
        assert_eq!(
            "age:desc".parse::<Sort>().unwrap(),
            Sort::new(SortField::Age, SortDirection::Desc)
        );
        assert_eq!(
            "name".parse::<Sort>().unwrap(),
            Sort::new(SortField::Name, SortDirection::Asc)
        );
        assert!("height:asc".parse::<Sort>().is_err());
        assert!("age:sideways".parse::<Sort>().is_err());
    }

    #[test]
    fn query_pairs_repeat_breeds() {
        let query = SearchQuery {
            breeds: vec!["Poodle".to_string(), "Beagle".to_string()],
            size: 25,
            from: 50,
            sort: Sort::default(),
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("breeds", "Poodle".to_string()),
                ("breeds", "Beagle".to_string()),
                ("size", "25".to_string()),
                ("from", "50".to_string()),
                ("sort", "breed:asc".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_omit_empty_breeds() {
        let query = SearchQuery {
            breeds: Vec::new(),
            size: 10,
            from: 0,
            sort: Sort::default(),
        };
        assert!(query.to_pairs().iter().all(|(key, _)| *key != "breeds"));
    }

    #[test]
    fn search_results_ignore_cursor_fields() {
        let body = r#"{"resultIds":["a","b"],"total":42,"next":"/dogs/search?from=2"}"#;
        let results: SearchResults = serde_json::from_str(body).unwrap();
        assert_eq!(results.result_ids, vec!["a", "b"]);
        assert_eq!(results.total, 42);
    }

    #[test]
    fn dog_tolerates_missing_image() {
        let body = r#"{"id":"x1","name":"Rex","age":3,"zip_code":"10001","breed":"Beagle"}"#;
        let dog: Dog = serde_json::from_str(body).unwrap();
        assert!(dog.img.is_empty());
        assert_eq!(dog.zip_code, "10001");
    }
}
