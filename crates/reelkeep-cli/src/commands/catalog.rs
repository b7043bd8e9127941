use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use owo_colors::OwoColorize;
use reelkeep_models::{Movie, MovieFilter};
use serde_json::json;

use crate::commands::AppContext;
use crate::output::Output;

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let movies = ctx
        .catalog()?
        .search(query)
        .await
        .map_err(|e| eyre!("{}", e))?;

    if movies.is_empty() {
        output.warn(format!("No results for '{}'", query));
        return Ok(());
    }

    let max_rows = ctx.config.display.max_rows;
    output.data(&serde_json::to_value(&movies)?, || {
        print_movie_table(&movies, max_rows);
    });
    Ok(())
}

pub async fn run_discover(
    sort_by: Option<String>,
    page: u32,
    genre: Option<u64>,
    year: Option<u32>,
    min_rating: Option<f64>,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::init()?;

    let mut filter = MovieFilter::default()
        .page(page)
        .sort_by(sort_by.unwrap_or_else(|| ctx.config.tmdb.default_sort.clone()));
    if let Some(genre) = genre {
        filter = filter.genre(genre);
    }
    if let Some(year) = year {
        filter = filter.year(year);
    }
    if let Some(min_rating) = min_rating {
        filter = filter.min_rating(min_rating);
    }

    let page = ctx
        .catalog()?
        .discover_filtered(&filter)
        .await
        .map_err(|e| eyre!("{}", e))?;

    let max_rows = ctx.config.display.max_rows;
    output.data(&serde_json::to_value(&page)?, || {
        print_movie_table(&page.results, max_rows);
        println!("Page {} of {}", page.page, page.total_pages);
    });
    Ok(())
}

pub async fn run_genres(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let genres = ctx.catalog()?.genres().await.map_err(|e| eyre!("{}", e))?;

    output.data(&serde_json::to_value(&genres)?, || {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Id", "Genre"]);
        for genre in &genres {
            table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
        }
        println!("{table}");
    });
    Ok(())
}

pub async fn run_movie(id: u64, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let catalog = ctx.catalog()?;

    // The four catalog fetches are independent; run them concurrently and
    // render whatever subset succeeded.
    let (details, credits, similar, reviews) = tokio::join!(
        catalog.movie_details(id),
        catalog.movie_credits(id),
        catalog.similar_movies(id),
        catalog.movie_reviews(id),
    );

    let rating = ctx.store.rating(id).await;
    let in_watchlist = ctx.store.in_watchlist(id).await;
    let in_favorites = ctx.store.in_favorites(id).await;

    if !output.is_human() {
        let mut doc = json!({
            "id": id,
            "user_rating": rating,
            "in_watchlist": in_watchlist,
            "in_favorites": in_favorites,
        });
        match &details {
            Ok(d) => doc["details"] = serde_json::to_value(d)?,
            Err(e) => doc["details_error"] = json!(e.to_string()),
        }
        match &credits {
            Ok(c) => doc["credits"] = serde_json::to_value(c)?,
            Err(e) => doc["credits_error"] = json!(e.to_string()),
        }
        match &similar {
            Ok(s) => doc["similar"] = serde_json::to_value(s)?,
            Err(e) => doc["similar_error"] = json!(e.to_string()),
        }
        match &reviews {
            Ok(r) => doc["reviews"] = serde_json::to_value(r)?,
            Err(e) => doc["reviews_error"] = json!(e.to_string()),
        }
        output.data(&doc, || {});
        return Ok(());
    }

    match details {
        Ok(details) => {
            println!("{}", details.title.bold());
            if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
                println!("{}", tagline.italic());
            }
            println!(
                "Released {}  ·  {} min  ·  {:.1}/10 ({} votes)",
                details.release_date.as_deref().unwrap_or("unknown"),
                details
                    .runtime
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "?".to_string()),
                details.vote_average,
                details.vote_count
            );
            if !details.genres.is_empty() {
                let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
                println!("Genres: {}", names.join(", "));
            }
            if let Some(overview) = details.overview.as_deref().filter(|o| !o.is_empty()) {
                println!("\n{}", overview);
            }
        }
        Err(e) => output.warn(format!("{}", e)),
    }

    let mut personal = Vec::new();
    if let Some(rating) = rating {
        personal.push(format!("rated {}/10", rating));
    }
    if in_watchlist {
        personal.push("on watchlist".to_string());
    }
    if in_favorites {
        personal.push("in favorites".to_string());
    }
    if !personal.is_empty() {
        println!("\nYours: {}", personal.join(", "));
    }

    match credits {
        Ok(credits) if !credits.cast.is_empty() => {
            println!("\n{}", "Cast".bold());
            for member in credits.cast.iter().take(10) {
                println!("  {} as {}", member.name, member.character);
            }
        }
        Ok(_) => {}
        Err(e) => output.warn(format!("{}", e)),
    }

    match similar {
        Ok(similar) if !similar.is_empty() => {
            println!("\n{}", "Similar".bold());
            for movie in similar.iter().take(5) {
                println!(
                    "  {} ({}) [{}]",
                    movie.title,
                    movie.release_date.as_deref().unwrap_or("?"),
                    movie.id
                );
            }
        }
        Ok(_) => {}
        Err(e) => output.warn(format!("{}", e)),
    }

    match reviews {
        Ok(reviews) if !reviews.is_empty() => {
            println!("\n{}", "Reviews".bold());
            for review in reviews.iter().take(3) {
                let snippet: String = review.content.chars().take(200).collect();
                println!("  {} — {}", review.author.bold(), snippet);
            }
        }
        Ok(_) => {}
        Err(e) => output.warn(format!("{}", e)),
    }

    Ok(())
}

fn print_movie_table(movies: &[Movie], max_rows: usize) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Id", "Title", "Released", "Rating"]);
    for movie in movies.iter().take(max_rows) {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(movie.release_date.as_deref().unwrap_or("-")),
            Cell::new(format!("{:.1}", movie.vote_average)),
        ]);
    }
    println!("{table}");
    if movies.len() > max_rows {
        println!("... and {} more", movies.len() - max_rows);
    }
}
