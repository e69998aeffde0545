// ABOUTME: Immutable process configuration loaded once at startup.
// ABOUTME: Credentials are required keys; base URLs default to public endpoints.

//! Configuration is read from the environment (or any key lookup) exactly once
//! and then passed by reference into the agent core and every adapter.
//!
//! Required keys:
//! - `WEATHER_API_KEY`
//! - `FLIGHTS_API_KEY`, `FLIGHTS_API_SECRET`
//! - `HOTELS_API_KEY`, `HOTELS_API_SECRET`
//! - `NEWS_API_KEY`
//! - `OPENAI_API_KEY` when `LLM_PROVIDER=openai`
//!
//! Optional keys: `LLM_PROVIDER`, `LLM_MODEL`, `OLLAMA_BASE_URL`,
//! `OPENAI_BASE_URL`, `LLM_TIMEOUT_SECS`, `WEATHER_BASE_URL`,
//! `FLIGHTS_BASE_URL`, `HOTELS_BASE_URL`, `CURRENCY_BASE_URL`,
//! `NEWS_BASE_URL`, `TOOL_TIMEOUT_SECS`, `AGENT_MAX_TOOL_ATTEMPTS`,
//! `AGENT_MAX_ITERATIONS`.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_OLLAMA_MODEL: &str = "qwen2.5:7b";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_AMADEUS_BASE_URL: &str = "https://test.api.amadeus.com";
pub const DEFAULT_CURRENCY_BASE_URL: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies";
pub const DEFAULT_NEWS_BASE_URL: &str = "https://newsapi.org/v2";

/// Which reasoning engine backend to talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    Ollama { base_url: String },
    OpenAI { api_key: String, base_url: String },
}

/// Reasoning engine configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub timeout: Duration,
}

/// Weather forecast capability.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
}

/// Client-credential pair plus base URL for the Amadeus-style travel APIs.
#[derive(Debug, Clone)]
pub struct OAuthServiceConfig {
    pub client_id: String,
    pub client_secret: String,
    pub base_url: String,
}

pub type FlightsConfig = OAuthServiceConfig;
pub type HotelsConfig = OAuthServiceConfig;

/// Exchange-rate table capability. The public table needs no credential.
#[derive(Debug, Clone)]
pub struct CurrencyConfig {
    pub base_url: String,
}

/// News search capability.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub api_key: String,
    pub base_url: String,
}

/// Outbound HTTP settings shared by every adapter.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
        }
    }
}

/// Orchestrator-level bounds on tool attempts and engine round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts always allowed for a failing capability before giving up.
    pub min_attempts: u32,
    /// Hard ceiling on attempts per capability within one invocation.
    pub max_attempts: u32,
    /// Ceiling on reasoning-engine round trips within one invocation.
    pub max_iterations: u32,
}

impl RetryPolicy {
    pub const MIN_ATTEMPTS: u32 = 2;
    pub const MAX_ATTEMPTS: u32 = 4;

    /// Build a policy, rejecting attempt ceilings outside `[2, 4]` and
    /// iteration ceilings below 3.
    pub fn new(max_attempts: u32, max_iterations: u32) -> Result<Self, ConfigError> {
        if !(Self::MIN_ATTEMPTS..=Self::MAX_ATTEMPTS).contains(&max_attempts) {
            return Err(ConfigError::invalid(
                "AGENT_MAX_TOOL_ATTEMPTS",
                format!(
                    "must be between {} and {}, got {}",
                    Self::MIN_ATTEMPTS,
                    Self::MAX_ATTEMPTS,
                    max_attempts
                ),
            ));
        }
        // Room for two attempts at a capability plus the answering round trip.
        let min_iterations = Self::MIN_ATTEMPTS + 1;
        if max_iterations < min_iterations {
            return Err(ConfigError::invalid(
                "AGENT_MAX_ITERATIONS",
                format!("must be at least {}, got {}", min_iterations, max_iterations),
            ));
        }

        Ok(Self {
            min_attempts: Self::MIN_ATTEMPTS,
            max_attempts,
            max_iterations,
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_attempts: Self::MIN_ATTEMPTS,
            max_attempts: Self::MAX_ATTEMPTS,
            max_iterations: 10,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub weather: WeatherConfig,
    pub flights: FlightsConfig,
    pub hotels: HotelsConfig,
    pub currency: CurrencyConfig,
    pub news: NewsConfig,
    pub http: HttpConfig,
    pub retry: RetryPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` naming the first absent credential,
    /// or `ConfigError::InvalidValue` for unparsable numeric settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(&lookup);

        let llm = LlmConfig::load(&env)?;

        let weather = WeatherConfig {
            api_key: env.required("WEATHER_API_KEY")?,
            base_url: env.or("WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL),
        };

        let flights = OAuthServiceConfig {
            client_id: env.required("FLIGHTS_API_KEY")?,
            client_secret: env.required("FLIGHTS_API_SECRET")?,
            base_url: env.or("FLIGHTS_BASE_URL", DEFAULT_AMADEUS_BASE_URL),
        };

        let hotels = OAuthServiceConfig {
            client_id: env.required("HOTELS_API_KEY")?,
            client_secret: env.required("HOTELS_API_SECRET")?,
            base_url: env.or("HOTELS_BASE_URL", DEFAULT_AMADEUS_BASE_URL),
        };

        let currency = CurrencyConfig {
            base_url: env.or("CURRENCY_BASE_URL", DEFAULT_CURRENCY_BASE_URL),
        };

        let news = NewsConfig {
            api_key: env.required("NEWS_API_KEY")?,
            base_url: env.or("NEWS_BASE_URL", DEFAULT_NEWS_BASE_URL),
        };

        let tool_timeout = env.parsed("TOOL_TIMEOUT_SECS", 15u64)?;
        if !(1..=300).contains(&tool_timeout) {
            return Err(ConfigError::invalid(
                "TOOL_TIMEOUT_SECS",
                format!("must be between 1 and 300 seconds, got {}", tool_timeout),
            ));
        }

        let retry = RetryPolicy::new(
            env.parsed("AGENT_MAX_TOOL_ATTEMPTS", RetryPolicy::MAX_ATTEMPTS)?,
            env.parsed("AGENT_MAX_ITERATIONS", 10u32)?,
        )?;

        Ok(Self {
            llm,
            weather,
            flights,
            hotels,
            currency,
            news,
            http: HttpConfig {
                timeout: Duration::from_secs(tool_timeout),
            },
            retry,
        })
    }
}

impl LlmConfig {
    fn load<F>(env: &Lookup<'_, F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider_name = env.or("LLM_PROVIDER", "ollama").to_lowercase();
        let (provider, default_model) = match provider_name.as_str() {
            "ollama" => (
                LlmProvider::Ollama {
                    base_url: env.or("OLLAMA_BASE_URL", crate::llm::OLLAMA_BASE_URL),
                },
                DEFAULT_OLLAMA_MODEL,
            ),
            "openai" => (
                LlmProvider::OpenAI {
                    api_key: env.required("OPENAI_API_KEY")?,
                    base_url: env.or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
                },
                DEFAULT_OPENAI_MODEL,
            ),
            other => {
                return Err(ConfigError::invalid(
                    "LLM_PROVIDER",
                    format!("expected 'ollama' or 'openai', got '{}'", other),
                ));
            }
        };

        Ok(Self {
            provider,
            model: env.or("LLM_MODEL", default_model),
            timeout: Duration::from_secs(env.parsed("LLM_TIMEOUT_SECS", 120u64)?),
        })
    }
}

struct Lookup<'a, F>(&'a F);

impl<F> Lookup<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .parse()
                .map_err(|e: T::Err| ConfigError::invalid(key, e.to_string())),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("WEATHER_API_KEY", "w-key"),
            ("FLIGHTS_API_KEY", "f-id"),
            ("FLIGHTS_API_SECRET", "f-secret"),
            ("HOTELS_API_KEY", "h-id"),
            ("HOTELS_API_SECRET", "h-secret"),
            ("NEWS_API_KEY", "n-key"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&base_env()).unwrap();

        assert_eq!(config.llm.model, DEFAULT_OLLAMA_MODEL);
        assert!(matches!(config.llm.provider, LlmProvider::Ollama { .. }));
        assert_eq!(config.weather.base_url, DEFAULT_WEATHER_BASE_URL);
        assert_eq!(config.flights.base_url, DEFAULT_AMADEUS_BASE_URL);
        assert_eq!(config.currency.base_url, DEFAULT_CURRENCY_BASE_URL);
        assert_eq!(config.http.timeout, Duration::from_secs(15));
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let mut env = base_env();
        env.remove("HOTELS_API_SECRET");

        match load(&env) {
            Err(ConfigError::MissingEnvVar(key)) => assert_eq!(key, "HOTELS_API_SECRET"),
            other => panic!("expected missing env var, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let mut env = base_env();
        env.insert("NEWS_API_KEY", "   ");

        assert!(matches!(load(&env), Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn test_base_urls_overridable() {
        let mut env = base_env();
        env.insert("NEWS_BASE_URL", "http://localhost:9000");
        env.insert("CURRENCY_BASE_URL", "http://localhost:9001/rates");

        let config = load(&env).unwrap();
        assert_eq!(config.news.base_url, "http://localhost:9000");
        assert_eq!(config.currency.base_url, "http://localhost:9001/rates");
    }

    #[test]
    fn test_openai_provider_requires_key() {
        let mut env = base_env();
        env.insert("LLM_PROVIDER", "openai");
        assert!(matches!(load(&env), Err(ConfigError::MissingEnvVar(k)) if k == "OPENAI_API_KEY"));

        env.insert("OPENAI_API_KEY", "sk-test");
        let config = load(&env).unwrap();
        assert_eq!(config.llm.model, DEFAULT_OPENAI_MODEL);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut env = base_env();
        env.insert("LLM_PROVIDER", "carrier-pigeon");
        assert!(matches!(load(&env), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_attempt_ceiling_bounds() {
        let mut env = base_env();
        env.insert("AGENT_MAX_TOOL_ATTEMPTS", "5");
        assert!(matches!(load(&env), Err(ConfigError::InvalidValue { .. })));

        env.insert("AGENT_MAX_TOOL_ATTEMPTS", "1");
        assert!(matches!(load(&env), Err(ConfigError::InvalidValue { .. })));

        env.insert("AGENT_MAX_TOOL_ATTEMPTS", "3");
        assert_eq!(load(&env).unwrap().retry.max_attempts, 3);
    }

    #[test]
    fn test_iteration_ceiling_leaves_room_for_two_attempts() {
        let mut env = base_env();
        for too_low in ["0", "1", "2"] {
            env.insert("AGENT_MAX_ITERATIONS", too_low);
            assert!(matches!(
                load(&env),
                Err(ConfigError::InvalidValue { key, .. }) if key == "AGENT_MAX_ITERATIONS"
            ));
        }

        env.insert("AGENT_MAX_ITERATIONS", "3");
        assert_eq!(load(&env).unwrap().retry.max_iterations, 3);
        assert!(RetryPolicy::new(4, 2).is_err());
    }

    #[test]
    fn test_unparsable_timeout_rejected() {
        let mut env = base_env();
        env.insert("TOOL_TIMEOUT_SECS", "soon");
        assert!(matches!(load(&env), Err(ConfigError::InvalidValue { .. })));

        env.insert("TOOL_TIMEOUT_SECS", "0");
        assert!(matches!(load(&env), Err(ConfigError::InvalidValue { .. })));
    }
}
