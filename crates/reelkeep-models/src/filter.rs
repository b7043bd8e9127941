use serde::{Deserialize, Serialize};

/// Parameters for filtered discovery. Unset fields are omitted from the
/// request entirely rather than sent with defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieFilter {
    pub page: u32,
    pub sort_by: String,
    pub genre: Option<u64>,
    pub year: Option<u32>,
    pub min_rating: Option<f64>,
}

impl Default for MovieFilter {
    fn default() -> Self {
        Self {
            page: 1,
            sort_by: "popularity.desc".to_string(),
            genre: None,
            year: None,
            min_rating: None,
        }
    }
}

impl MovieFilter {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    pub fn genre(mut self, genre: u64) -> Self {
        self.genre = Some(genre);
        self
    }

    pub fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }
}
