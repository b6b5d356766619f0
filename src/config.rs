//! Configuration management for `apiboard`
//!
//! Handles loading configuration from files and environment variables,
//! and validates every setting before the dashboard is built.

use crate::ApiboardError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `apiboard`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiboardConfig {
    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Outgoing HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
    /// Upstream API endpoints
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
    /// PEM certificate, enables TLS together with `tls_key`
    #[serde(default)]
    pub tls_cert: Option<PathBuf>,
    /// PEM private key
    #[serde(default)]
    pub tls_key: Option<PathBuf>,
}

/// Outgoing HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User agent sent with every upstream request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Base URLs of every upstream API.
///
/// Path-parameter endpoints (countries, dictionary, pokeapi, github) get the
/// encoded value appended as a final segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_geocoding_url")]
    pub geocoding: String,
    #[serde(default = "default_forecast_url")]
    pub forecast: String,
    #[serde(default = "default_potter_url")]
    pub potter: String,
    #[serde(default = "default_quotable_url")]
    pub quotable: String,
    #[serde(default = "default_countries_url")]
    pub countries: String,
    #[serde(default = "default_advice_url")]
    pub advice: String,
    #[serde(default = "default_cat_fact_url")]
    pub cat_fact: String,
    #[serde(default = "default_dog_fact_url")]
    pub dog_fact: String,
    #[serde(default = "default_joke_url")]
    pub joke: String,
    #[serde(default = "default_meal_url")]
    pub meal: String,
    #[serde(default = "default_agify_url")]
    pub agify: String,
    #[serde(default = "default_dictionary_url")]
    pub dictionary: String,
    #[serde(default = "default_pokeapi_url")]
    pub pokeapi: String,
    #[serde(default = "default_cocktail_url")]
    pub cocktail: String,
    #[serde(default = "default_github_url")]
    pub github: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_user_agent() -> String {
    format!("apiboard/{}", crate::VERSION)
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_potter_url() -> String {
    "https://potterapi-fedeperin.vercel.app/es/characters".to_string()
}

fn default_quotable_url() -> String {
    "https://api.quotable.io/random".to_string()
}

fn default_countries_url() -> String {
    "https://restcountries.com/v3.1/name".to_string()
}

fn default_advice_url() -> String {
    "https://api.adviceslip.com/advice".to_string()
}

fn default_cat_fact_url() -> String {
    "https://catfact.ninja/fact".to_string()
}

fn default_dog_fact_url() -> String {
    "https://dogapi.dog/api/v2/facts".to_string()
}

fn default_joke_url() -> String {
    "https://official-joke-api.appspot.com/jokes/random".to_string()
}

fn default_meal_url() -> String {
    "https://www.themealdb.com/api/json/v1/1/random.php".to_string()
}

fn default_agify_url() -> String {
    "https://api.agify.io".to_string()
}

fn default_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_pokeapi_url() -> String {
    "https://pokeapi.co/api/v2/pokemon".to_string()
}

fn default_cocktail_url() -> String {
    "https://www.thecocktaildb.com/api/json/v1/1/search.php".to_string()
}

fn default_github_url() -> String {
    "https://api.github.com/users".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tls_cert: None,
            tls_key: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            geocoding: default_geocoding_url(),
            forecast: default_forecast_url(),
            potter: default_potter_url(),
            quotable: default_quotable_url(),
            countries: default_countries_url(),
            advice: default_advice_url(),
            cat_fact: default_cat_fact_url(),
            dog_fact: default_dog_fact_url(),
            joke: default_joke_url(),
            meal: default_meal_url(),
            agify: default_agify_url(),
            dictionary: default_dictionary_url(),
            pokeapi: default_pokeapi_url(),
            cocktail: default_cocktail_url(),
            github: default_github_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl EndpointsConfig {
    /// Every endpoint paired with its config key
    pub fn entries(&self) -> [(&'static str, &str); 15] {
        [
            ("geocoding", &self.geocoding),
            ("forecast", &self.forecast),
            ("potter", &self.potter),
            ("quotable", &self.quotable),
            ("countries", &self.countries),
            ("advice", &self.advice),
            ("cat_fact", &self.cat_fact),
            ("dog_fact", &self.dog_fact),
            ("joke", &self.joke),
            ("meal", &self.meal),
            ("agify", &self.agify),
            ("dictionary", &self.dictionary),
            ("pokeapi", &self.pokeapi),
            ("cocktail", &self.cocktail),
            ("github", &self.github),
        ]
    }

    /// Point every endpoint at one base URL, keeping the upstream paths.
    ///
    /// Used to aim the whole dashboard at a single mock or proxy server.
    #[must_use]
    pub fn rebased(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            geocoding: format!("{base}/v1/search"),
            forecast: format!("{base}/v1/forecast"),
            potter: format!("{base}/es/characters"),
            quotable: format!("{base}/random"),
            countries: format!("{base}/v3.1/name"),
            advice: format!("{base}/advice"),
            cat_fact: format!("{base}/fact"),
            dog_fact: format!("{base}/api/v2/facts"),
            joke: format!("{base}/jokes/random"),
            meal: format!("{base}/api/json/v1/1/random.php"),
            agify: format!("{base}/agify"),
            dictionary: format!("{base}/api/v2/entries/en"),
            pokeapi: format!("{base}/api/v2/pokemon"),
            cocktail: format!("{base}/api/json/v1/1/search.php"),
            github: format!("{base}/users"),
        }
    }
}

impl ApiboardConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. APIBOARD_SERVER__PORT=9000, APIBOARD_ENDPOINTS__GITHUB=...
        builder = builder.add_source(
            Environment::with_prefix("APIBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ApiboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("apiboard").join("config.toml"))
    }

    /// Apply default values to blank configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_server()?;
        self.validate_endpoints()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ApiboardError::config("Server port cannot be 0").into());
        }

        if self.server.tls_cert.is_some() != self.server.tls_key.is_some() {
            return Err(ApiboardError::config(
                "TLS requires both server.tls_cert and server.tls_key",
            )
            .into());
        }

        Ok(())
    }

    fn validate_endpoints(&self) -> Result<()> {
        for (key, url) in self.endpoints.entries() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiboardError::config(format!(
                    "Endpoint '{key}' must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }
        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ApiboardError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ApiboardError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(ApiboardError::config("HTTP user agent cannot be blank").into());
        }

        Ok(())
    }
}
