use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::env;
use std::path::Path;
use tracing::debug;

/// Load the app settings from `.env`, `config/settings.yaml` and `APP__*` environment variables.
pub fn load_app_settings() -> Result<AppSettings> {
    dotenv::from_path(".env").ok();
    let config_path = Path::new("config/settings.yaml").canonicalize()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let mut raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;

    // The provider's own variable name is accepted as well.
    let has_key = raw_settings
        .secrets
        .openai_api_key
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty());
    if !has_key && let Ok(key) = env::var("OPENAI_API_KEY") {
        debug!("Using OPENAI_API_KEY from the environment");
        raw_settings.secrets.openai_api_key = Some(key);
    }

    Ok(raw_settings.into())
}
