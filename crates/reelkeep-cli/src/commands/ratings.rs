use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use serde_json::json;

use crate::commands::AppContext;
use crate::output::Output;

pub async fn run_rate(id: u64, rating: u8, output: &Output) -> Result<()> {
    // The store accepts any value; the 1-10 domain is enforced here.
    if !(1..=10).contains(&rating) {
        return Err(eyre!("Rating must be between 1 and 10, got {}", rating));
    }

    let ctx = AppContext::init()?;
    let previous = ctx.store.rating(id).await;
    ctx.store
        .set_rating(id, rating)
        .await
        .map_err(|e| eyre!("{}", e))?;

    match previous {
        Some(previous) if previous != rating => output.success(format!(
            "Rated movie {} as {}/10 (was {}/10)",
            id, rating, previous
        )),
        _ => output.success(format!("Rated movie {} as {}/10", id, rating)),
    }
    Ok(())
}

pub async fn run_ratings(output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;
    let ratings = ctx.store.ratings().await;

    if ratings.is_empty() {
        output.println("No ratings stored yet");
        return Ok(());
    }

    // Saved entries provide titles for rated movies we also keep locally.
    let mut titles = std::collections::HashMap::new();
    for entry in ctx.store.watchlist().await {
        titles.insert(entry.id, entry.title);
    }
    for entry in ctx.store.favorites().await {
        titles.entry(entry.id).or_insert(entry.title);
    }

    let doc = json!(ratings
        .iter()
        .map(|(id, rating)| json!({
            "id": id,
            "rating": rating,
            "title": titles.get(id),
        }))
        .collect::<Vec<_>>());

    output.data(&doc, || {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Id", "Title", "Rating"]);
        for (id, rating) in &ratings {
            table.add_row(vec![
                Cell::new(id),
                Cell::new(titles.get(id).map(String::as_str).unwrap_or("-")),
                Cell::new(format!("{}/10", rating)),
            ]);
        }
        println!("{table}");
    });
    Ok(())
}
