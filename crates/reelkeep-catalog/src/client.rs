use anyhow::{anyhow, Result};
use reelkeep_models::{Credits, Genre, Movie, MovieDetails, MovieFilter, MoviePage, Review};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Deserialize)]
struct ResultsEnvelope<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct GenreListResponse {
    genres: Vec<Genre>,
}

/// Read-only client for the TMDB v3 catalog API.
///
/// One GET per operation, bearer-token auth, no retries and no caching.
/// Any non-success status or decode failure surfaces as an error naming
/// the failed operation.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    token: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search the catalog by title. An empty query falls back to
    /// popularity-sorted discovery.
    pub async fn search(&self, query: &str) -> Result<Vec<Movie>> {
        if query.is_empty() {
            return self.discover("popularity.desc").await;
        }
        let path = format!("/search/movie?query={}", urlencoding::encode(query));
        let envelope: ResultsEnvelope<Movie> = self.get(&path, "search movies").await?;
        Ok(envelope.results)
    }

    pub async fn discover(&self, sort_by: &str) -> Result<Vec<Movie>> {
        let path = format!("/discover/movie?sort_by={}", sort_by);
        let envelope: ResultsEnvelope<Movie> = self.get(&path, "discover movies").await?;
        Ok(envelope.results)
    }

    pub async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
        self.get(&format!("/movie/{}", movie_id), "fetch movie details")
            .await
    }

    pub async fn movie_credits(&self, movie_id: u64) -> Result<Credits> {
        self.get(
            &format!("/movie/{}/credits", movie_id),
            "fetch movie credits",
        )
        .await
    }

    pub async fn similar_movies(&self, movie_id: u64) -> Result<Vec<Movie>> {
        let envelope: ResultsEnvelope<Movie> = self
            .get(
                &format!("/movie/{}/similar", movie_id),
                "fetch similar movies",
            )
            .await?;
        Ok(envelope.results)
    }

    pub async fn movie_reviews(&self, movie_id: u64) -> Result<Vec<Review>> {
        let envelope: ResultsEnvelope<Review> = self
            .get(
                &format!("/movie/{}/reviews", movie_id),
                "fetch movie reviews",
            )
            .await?;
        Ok(envelope.results)
    }

    pub async fn genres(&self) -> Result<Vec<Genre>> {
        let response: GenreListResponse = self.get("/genre/movie/list", "fetch genres").await?;
        Ok(response.genres)
    }

    /// Filtered discovery with the full pagination envelope.
    pub async fn discover_filtered(&self, filter: &MovieFilter) -> Result<MoviePage> {
        let path = format!("/discover/movie?{}", filter_query(filter));
        self.get(&path, "fetch filtered movies").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, operation: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Catalog request: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| anyhow!("Failed to {}: {}", operation, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Failed to {}: {} - {}",
                operation,
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to {}: invalid response: {}", operation, e))
    }
}

/// Assemble the discover query string; unset filter fields are omitted.
fn filter_query(filter: &MovieFilter) -> String {
    let mut query = format!("page={}&sort_by={}", filter.page, filter.sort_by);
    if let Some(genre) = filter.genre {
        query.push_str(&format!("&with_genres={}", genre));
    }
    if let Some(year) = filter.year {
        query.push_str(&format!("&year={}", year));
    }
    if let Some(min_rating) = filter.min_rating {
        query.push_str(&format!("&vote_average.gte={}", min_rating));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_query_includes_only_set_parameters() {
        let query = filter_query(&MovieFilter::default());
        assert_eq!(query, "page=1&sort_by=popularity.desc");

        let full = MovieFilter::default()
            .page(3)
            .sort_by("vote_average.desc")
            .genre(28)
            .year(1999)
            .min_rating(7.0);
        assert_eq!(
            filter_query(&full),
            "page=3&sort_by=vote_average.desc&with_genres=28&year=1999&vote_average.gte=7"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = TmdbClient::with_base_url("t".into(), "http://localhost:8080/".into());
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn movie_list_payload_decodes() {
        let payload = r#"{
            "page": 1,
            "results": [
                {
                    "id": 603,
                    "title": "The Matrix",
                    "poster_path": "/matrix.jpg",
                    "backdrop_path": null,
                    "overview": "A hacker learns the truth.",
                    "vote_average": 8.2,
                    "vote_count": 26000,
                    "release_date": "1999-03-30",
                    "genre_ids": [28, 878],
                    "popularity": 88.5
                }
            ],
            "total_pages": 10,
            "total_results": 200
        }"#;
        let envelope: ResultsEnvelope<Movie> = serde_json::from_str(payload).unwrap();
        assert_eq!(envelope.results.len(), 1);
        assert_eq!(envelope.results[0].id, 603);
        assert_eq!(envelope.results[0].genre_ids, vec![28, 878]);

        let page: MoviePage = serde_json::from_str(payload).unwrap();
        assert_eq!(page.total_pages, 10);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn details_payload_decodes_with_extended_fields() {
        let payload = r#"{
            "id": 603,
            "title": "The Matrix",
            "poster_path": "/matrix.jpg",
            "backdrop_path": "/matrix-bg.jpg",
            "overview": "A hacker learns the truth.",
            "vote_average": 8.2,
            "vote_count": 26000,
            "release_date": "1999-03-30",
            "runtime": 136,
            "budget": 63000000,
            "revenue": 463517383,
            "tagline": "Free your mind.",
            "status": "Released",
            "genres": [{"id": 28, "name": "Action"}],
            "production_companies": [
                {"id": 79, "name": "Village Roadshow Pictures", "logo_path": null}
            ],
            "homepage": null
        }"#;
        let details: MovieDetails = serde_json::from_str(payload).unwrap();
        assert_eq!(details.runtime, Some(136));
        assert_eq!(details.genres[0].name, "Action");
        assert_eq!(details.production_companies.len(), 1);
    }

    #[test]
    fn credits_payload_decodes() {
        let payload = r#"{
            "id": 603,
            "cast": [
                {"id": 6384, "name": "Keanu Reeves", "character": "Neo",
                 "profile_path": "/keanu.jpg", "order": 0}
            ],
            "crew": [
                {"id": 9340, "name": "Lana Wachowski", "job": "Director",
                 "department": "Directing", "profile_path": null}
            ]
        }"#;
        let credits: Credits = serde_json::from_str(payload).unwrap();
        assert_eq!(credits.cast[0].character, "Neo");
        assert_eq!(credits.crew[0].job, "Director");
    }

    #[test]
    fn review_payload_tolerates_missing_author_details() {
        let payload = r#"{
            "results": [
                {"id": "r1", "author": "critic", "content": "Great.",
                 "created_at": "2020-01-01T00:00:00Z", "url": null}
            ]
        }"#;
        let envelope: ResultsEnvelope<Review> = serde_json::from_str(payload).unwrap();
        assert_eq!(envelope.results[0].author, "critic");
        assert_eq!(envelope.results[0].author_details.rating, None);
    }
}
