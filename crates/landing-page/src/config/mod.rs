use crate::branding::{EffectiveBranding, LogoSet};
use crate::page::DEFAULT_TEMPLATE_ID;
use crate::theme::{HslColor, ThemeError};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub platform: PlatformConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            platform: PlatformConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Multi-tenant platform settings: domain layout, default template and the
/// system branding layer every tenant inherits from.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub base_domain: Option<String>,
    pub default_template: String,
    pub system_brand: EffectiveBranding,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_domain: None,
            default_template: DEFAULT_TEMPLATE_ID.to_string(),
            system_brand: default_system_brand(),
        }
    }
}

impl PlatformConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = default_system_brand();

        let system_brand = EffectiveBranding {
            display_name: env::var("BRAND_NAME").unwrap_or(defaults.display_name),
            tagline: optional_var("BRAND_TAGLINE").or(defaults.tagline),
            logos: LogoSet {
                generic: optional_var("BRAND_LOGO_URL"),
                ..LogoSet::default()
            },
            favicon: optional_var("BRAND_FAVICON_URL").or(defaults.favicon),
            primary_color: color_var("BRAND_PRIMARY_COLOR", defaults.primary_color)?,
            secondary_color: color_var("BRAND_SECONDARY_COLOR", defaults.secondary_color)?,
            accent_color: color_var("BRAND_ACCENT_COLOR", defaults.accent_color)?,
        };

        Ok(Self {
            base_domain: optional_var("PLATFORM_BASE_DOMAIN"),
            default_template: env::var("PLATFORM_DEFAULT_TEMPLATE")
                .unwrap_or_else(|_| DEFAULT_TEMPLATE_ID.to_string()),
            system_brand,
        })
    }
}

fn default_system_brand() -> EffectiveBranding {
    EffectiveBranding {
        display_name: "Landing Studio".to_string(),
        tagline: None,
        logos: LogoSet::default(),
        favicon: Some("/favicon.ico".to_string()),
        primary_color: HslColor::new(222, 47, 11),
        secondary_color: HslColor::new(210, 40, 96),
        accent_color: HslColor::new(38, 92, 50),
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn color_var(name: &'static str, fallback: HslColor) -> Result<HslColor, ConfigError> {
    match optional_var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|source| ConfigError::InvalidColor {
                variable: name,
                source,
            }),
        None => Ok(fallback),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidColor {
        variable: &'static str,
        source: ThemeError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidColor { variable, .. } => {
                write!(f, "{variable} must be a hex color or an 'H S% L%' triple")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidColor { source, .. } => Some(source),
        }
    }
}
