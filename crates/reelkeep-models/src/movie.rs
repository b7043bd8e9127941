use serde::{Deserialize, Serialize};

use crate::genre::Genre;

/// Catalog movie as returned by list endpoints (search, discover, similar).
/// Immutable snapshot from the remote source; never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub popularity: f64,
}

/// Detail-fetch variant with the extended fields only `/movie/{id}` carries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub homepage: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
}

/// Paginated envelope returned by filtered discovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    pub results: Vec<Movie>,
    pub page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// Minimal projection every saveable movie variant exposes.
///
/// Both the list variant and the detail variant can be added to a
/// collection; the store only ever looks at these five fields.
pub trait MovieRecord {
    fn id(&self) -> u64;
    fn title(&self) -> &str;
    fn poster_path(&self) -> Option<&str>;
    fn vote_average(&self) -> f64;
    fn release_date(&self) -> Option<&str>;
}

impl MovieRecord for Movie {
    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref()
    }

    fn vote_average(&self) -> f64 {
        self.vote_average
    }

    fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }
}

impl MovieRecord for MovieDetails {
    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref()
    }

    fn vote_average(&self) -> f64 {
        self.vote_average
    }

    fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }
}
