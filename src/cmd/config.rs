use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use config::Config;
use serde::{Deserialize, Serialize};

static CONFIG: OnceLock<LtpaConfig> = OnceLock::new();

#[derive(Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LtpaConfig {
    /// key file used when `--keyfile` is not given
    pub keyfile: Option<PathBuf>,

    #[serde(skip_serializing)]
    pub password: Option<String>,

    // lifetime of tokens issued without an explicit expiry
    pub token_ttl_secs: u64,

    pub log_level: String,
}

impl Default for LtpaConfig {
    fn default() -> Self {
        Self {
            keyfile: None,
            password: None,
            token_ttl_secs: 7200,
            log_level: "info".to_string(),
        }
    }
}

impl Debug for LtpaConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LtpaConfig")
            .field("keyfile", &self.keyfile)
            .field("password", &self.password.as_ref().map(|_| ".."))
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl LtpaConfig {
    /// The loaded configuration, the defaults if [`Self::init`] was never called.
    pub fn config() -> &'static Self {
        CONFIG.get_or_init(Self::default)
    }

    /// Loads defaults, then the optional file, then `LTPA_*` environment variables such as
    /// `LTPA_PASSWORD`. Only the first call loads anything.
    pub fn init(f: Option<&Path>) -> anyhow::Result<&'static Self> {
        if let Some(c) = CONFIG.get() {
            return Ok(c);
        }

        let config = Self::load(f)?;
        Ok(CONFIG.get_or_init(|| config))
    }

    fn load(f: Option<&Path>) -> anyhow::Result<Self> {
        let default_config = Config::try_from(&LtpaConfig::default())?;

        let mut builder = Config::builder().add_source(default_config);
        if let Some(f) = f {
            builder = builder.add_source(config::File::from(f).required(true));
        }
        // no `try_parsing`, a password like `0123` must stay a string
        builder = builder.add_source(
            config::Environment::with_prefix("LTPA")
                .prefix_separator("_")
                .separator("__"),
        );

        let mut config: LtpaConfig = builder.build()?.try_deserialize()?;
        config.password = config.password.filter(|p| !p.is_empty());

        Ok(config)
    }
}
