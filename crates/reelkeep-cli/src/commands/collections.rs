use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use reelkeep_models::SavedMovie;

use crate::commands::{AppContext, CollectionKind};
use crate::output::Output;
use crate::CollectionCommands;

pub async fn run_collection(
    kind: CollectionKind,
    cmd: CollectionCommands,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::init()?;

    match cmd {
        CollectionCommands::List => {
            let entries = match kind {
                CollectionKind::Watchlist => ctx.store.watchlist().await,
                CollectionKind::Favorites => ctx.store.favorites().await,
            };
            if entries.is_empty() {
                output.println(format!("Your {} is empty", kind.noun()));
                return Ok(());
            }
            output.data(&serde_json::to_value(&entries)?, || {
                print_saved_table(&entries);
            });
        }
        CollectionCommands::Add { id } => {
            let already_saved = match kind {
                CollectionKind::Watchlist => ctx.store.in_watchlist(id).await,
                CollectionKind::Favorites => ctx.store.in_favorites(id).await,
            };
            if already_saved {
                output.println(format!("Movie {} is already on your {}", id, kind.noun()));
                return Ok(());
            }

            // Fetch the full record so the saved projection carries real
            // title/poster/rating data rather than placeholders.
            let details = ctx
                .catalog()?
                .movie_details(id)
                .await
                .map_err(|e| eyre!("{}", e))?;
            match kind {
                CollectionKind::Watchlist => ctx.store.add_to_watchlist(&details).await,
                CollectionKind::Favorites => ctx.store.add_to_favorites(&details).await,
            }
            .map_err(|e| eyre!("{}", e))?;
            output.success(format!("Added '{}' to your {}", details.title, kind.noun()));
        }
        CollectionCommands::Remove { id } => {
            match kind {
                CollectionKind::Watchlist => ctx.store.remove_from_watchlist(id).await,
                CollectionKind::Favorites => ctx.store.remove_from_favorites(id).await,
            }
            .map_err(|e| eyre!("{}", e))?;
            output.success(format!("Removed {} from your {}", id, kind.noun()));
        }
    }

    Ok(())
}

fn print_saved_table(entries: &[SavedMovie]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Id", "Title", "Released", "Rating", "Saved"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.id),
            Cell::new(&entry.title),
            Cell::new(entry.release_date.as_deref().unwrap_or("-")),
            Cell::new(format!("{:.1}", entry.vote_average)),
            Cell::new(entry.saved_at.format("%Y-%m-%d").to_string()),
        ]);
    }
    println!("{table}");
}
