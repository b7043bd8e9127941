use color_eyre::eyre::eyre;
use color_eyre::Result;
use reelkeep_config::CredentialStore;
use serde_json::json;

use crate::commands::AppContext;
use crate::output::Output;
use crate::ConfigCommands;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let ctx = AppContext::init()?;

    match cmd {
        ConfigCommands::Show => {
            let mut credentials = CredentialStore::new(ctx.paths.credentials_file());
            credentials
                .load()
                .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
            let token = credentials.tmdb_token().map(mask);

            let doc = json!({
                "config_file": ctx.paths.config_file(),
                "data_dir": ctx.paths.data_dir(),
                "tmdb": {
                    "base_url": ctx.config.tmdb.base_url,
                    "default_sort": ctx.config.tmdb.default_sort,
                    "token": token,
                },
                "display": { "max_rows": ctx.config.display.max_rows },
            });
            output.data(&doc, || {
                println!("Config file: {}", ctx.paths.config_file().display());
                println!("Data dir:    {}", ctx.paths.data_dir().display());
                println!("Base URL:    {}", ctx.config.tmdb.base_url);
                println!("Sort order:  {}", ctx.config.tmdb.default_sort);
                match doc["tmdb"]["token"].as_str() {
                    Some(masked) => println!("API token:   {}", masked),
                    None => println!("API token:   (not set)"),
                }
            });
        }
        ConfigCommands::SetToken { token } => {
            let token = match token {
                Some(token) => token,
                None => rpassword::prompt_password("TMDB API read access token: ")?,
            };
            if token.trim().is_empty() {
                output.error("Token cannot be empty");
                return Ok(());
            }

            let mut credentials = CredentialStore::new(ctx.paths.credentials_file());
            credentials
                .load()
                .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
            credentials.set_tmdb_token(token.trim().to_string());
            credentials
                .save()
                .map_err(|e| eyre!("Failed to save credentials: {}", e))?;
            output.success("TMDB API token saved");
        }
    }

    Ok(())
}

fn mask(token: String) -> String {
    if token.len() <= 8 {
        "*".repeat(token.len())
    } else {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    }
}
