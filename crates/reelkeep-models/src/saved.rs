use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::movie::MovieRecord;

/// Locally persisted projection of a catalog movie.
///
/// Serialized field names match the on-disk JSON shape: `savedAt` is an
/// RFC 3339 timestamp captured at save time, `isFavorite` is only present
/// on favorites entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedMovie {
    pub id: u64,
    pub title: String,
    pub poster_path: String,
    pub vote_average: f64,
    pub release_date: Option<String>,
    #[serde(rename = "savedAt")]
    pub saved_at: DateTime<Utc>,
    #[serde(rename = "isFavorite", skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl SavedMovie {
    /// Project any movie variant into a saved entry with a fresh timestamp.
    /// A missing poster path is stored as an empty string.
    pub fn from_record(movie: &dyn MovieRecord, favorite: bool) -> Self {
        Self {
            id: movie.id(),
            title: movie.title().to_string(),
            poster_path: movie.poster_path().unwrap_or_default().to_string(),
            vote_average: movie.vote_average(),
            release_date: movie.release_date().map(|d| d.to_string()),
            saved_at: Utc::now(),
            is_favorite: favorite.then_some(true),
        }
    }
}

impl MovieRecord for SavedMovie {
    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn poster_path(&self) -> Option<&str> {
        if self.poster_path.is_empty() {
            None
        } else {
            Some(&self.poster_path)
        }
    }

    fn vote_average(&self) -> f64 {
        self.vote_average
    }

    fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::Movie;

    fn movie(id: u64, poster: Option<&str>) -> Movie {
        Movie {
            id,
            title: "X".to_string(),
            poster_path: poster.map(|p| p.to_string()),
            backdrop_path: None,
            overview: None,
            vote_average: 7.5,
            vote_count: 100,
            release_date: Some("2020-01-01".to_string()),
            genre_ids: vec![],
            popularity: 0.0,
        }
    }

    #[test]
    fn projection_copies_fields_and_timestamps() {
        let saved = SavedMovie::from_record(&movie(42, Some("/x.jpg")), false);
        assert_eq!(saved.id, 42);
        assert_eq!(saved.poster_path, "/x.jpg");
        assert_eq!(saved.release_date.as_deref(), Some("2020-01-01"));
        assert_eq!(saved.is_favorite, None);
    }

    #[test]
    fn missing_poster_becomes_empty_string() {
        let saved = SavedMovie::from_record(&movie(1, None), false);
        assert_eq!(saved.poster_path, "");
        assert_eq!(saved.poster_path(), None);
    }

    #[test]
    fn favorite_flag_serializes_only_when_set() {
        let fav = SavedMovie::from_record(&movie(1, None), true);
        let json = serde_json::to_value(&fav).unwrap();
        assert_eq!(json["isFavorite"], serde_json::json!(true));
        assert!(json["savedAt"].as_str().is_some_and(|s| !s.is_empty()));

        let plain = SavedMovie::from_record(&movie(1, None), false);
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("isFavorite").is_none());
    }
}
