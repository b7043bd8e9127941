use color_eyre::Result;
use dialoguer::Confirm;

use crate::commands::AppContext;
use crate::output::Output;

pub async fn run_clear(yes: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Remove your watchlist, favorites, and all ratings?")
            .default(false)
            .interact()?;
        if !confirmed {
            output.println("Nothing cleared");
            return Ok(());
        }
    }

    ctx.store.clear_all().await;
    output.success("Cleared watchlist, favorites, and ratings");
    Ok(())
}
