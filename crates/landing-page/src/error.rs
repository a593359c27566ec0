use crate::config::ConfigError;
use crate::page::{EditError, StoreError};
use crate::site::SiteError;
use crate::telemetry::TelemetryError;
use crate::theme::ThemeError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Site(SiteError),
    Theme(ThemeError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Site(err) => site_status(err),
            AppError::Theme(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn site_status(err: &SiteError) -> StatusCode {
    match err {
        SiteError::UnknownTenant(_)
        | SiteError::UnknownTemplate(_)
        | SiteError::Edit(EditError::SectionNotFound(_)) => StatusCode::NOT_FOUND,
        SiteError::Edit(EditError::SettingsTypeMismatch { .. })
        | SiteError::Edit(EditError::UnknownSectionType { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SiteError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        SiteError::Store(StoreError::Serialization(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Site(err) => write!(f, "{}", err),
            AppError::Theme(err) => write!(f, "theme error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Site(err) => Some(err),
            AppError::Theme(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<SiteError> for AppError {
    fn from(value: SiteError) -> Self {
        Self::Site(value)
    }
}

impl From<ThemeError> for AppError {
    fn from(value: ThemeError) -> Self {
        Self::Theme(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::SectionId;

    #[test]
    fn site_errors_map_to_client_statuses() {
        let missing = AppError::from(SiteError::Edit(EditError::SectionNotFound(SectionId::new(
            "ghost",
        ))));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let offline = AppError::from(SiteError::Store(StoreError::Unavailable(
            "offline".to_string(),
        )));
        assert_eq!(offline.status(), StatusCode::SERVICE_UNAVAILABLE);

        let mismatch = AppError::from(SiteError::Edit(EditError::SettingsTypeMismatch {
            section_id: SectionId::new("hero"),
            expected: "hero".to_string(),
        }));
        assert_eq!(mismatch.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            AppError::Config(ConfigError::InvalidPort).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn color_errors_are_unprocessable() {
        let err = AppError::from(ThemeError::InvalidColorFormat("#12".to_string()));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.to_string().starts_with("theme error: invalid color format '#12'"));
    }
}
