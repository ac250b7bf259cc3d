//! Session service: login, location grant, and page navigation
//!
//! Each user interaction context owns one session; there is no cross-session
//! sharing. Sessions live in an in-memory table keyed by an opaque bearer
//! token and are lost on restart.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::LocationResolver;
use crate::SessionStore;
use shared::{Page, Season};

/// Per-user interaction context
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: Uuid,
    pub username: String,
    pub location_granted: bool,
    pub country: Option<String>,
    pub season: Option<Season>,
    pub page: Page,
    pub created_at: DateTime<Utc>,
}

/// Session state exposed to clients (token withheld)
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub username: String,
    pub location_granted: bool,
    pub country: Option<String>,
    pub season: Option<Season>,
    pub page: Page,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            username: session.username.clone(),
            location_granted: session.location_granted,
            country: session.country.clone(),
            season: session.season,
            page: session.page,
        }
    }
}

/// Session service
#[derive(Clone)]
pub struct SessionService {
    store: SessionStore,
    config: Arc<Config>,
}

impl SessionService {
    pub fn new(store: SessionStore, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// Validate credentials and open a new session on the login page
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        if username != self.config.auth.username || password != self.config.auth.password {
            tracing::warn!("Failed login attempt for user '{}'", username);
            return Err(AppError::InvalidCredentials);
        }

        let session = Session {
            token: Uuid::new_v4(),
            username: username.to_string(),
            location_granted: false,
            country: None,
            season: None,
            page: Page::Login,
            created_at: Utc::now(),
        };

        self.store
            .write()
            .await
            .insert(session.token, session.clone());

        tracing::info!("User '{}' logged in", username);
        Ok(session)
    }

    /// Fetch a session by token
    pub async fn get(&self, token: Uuid) -> AppResult<Session> {
        self.store
            .read()
            .await
            .get(&token)
            .cloned()
            .ok_or(AppError::SessionNotFound)
    }

    /// Attempt the location lookup for a logged-in session. Success records
    /// the country, derives the season from the calendar month, and moves
    /// the session to the dashboard. Failure leaves it on the login page.
    pub async fn grant_location(
        &self,
        token: Uuid,
        locator: &dyn LocationResolver,
    ) -> AppResult<Session> {
        let session = self.get(token).await?;
        if session.location_granted {
            return Ok(session);
        }

        let location = locator.resolve().await?;
        let season = Season::from_month(Utc::now().month());

        let mut sessions = self.store.write().await;
        let session = sessions.get_mut(&token).ok_or(AppError::SessionNotFound)?;
        session.location_granted = true;
        session.country = Some(location.country.clone());
        session.season = Some(season);
        session.page = Page::Dashboard;

        tracing::info!(
            "Location granted for '{}': {} ({})",
            session.username,
            location.country,
            season.as_str()
        );
        Ok(session.clone())
    }

    /// Explicit page navigation. Only dashboard/monitoring moves are valid;
    /// a session never navigates back to the login page.
    pub async fn navigate(&self, token: Uuid, target: Page) -> AppResult<Session> {
        let mut sessions = self.store.write().await;
        let session = sessions.get_mut(&token).ok_or(AppError::SessionNotFound)?;

        match (session.page, target) {
            (Page::Login, _) => {
                return Err(AppError::InvalidStateTransition(
                    "Grant location access before leaving the login page".to_string(),
                ));
            }
            (_, Page::Login) => {
                return Err(AppError::InvalidStateTransition(
                    "Cannot navigate back to the login page".to_string(),
                ));
            }
            (Page::Dashboard, Page::Monitoring)
            | (Page::Monitoring, Page::Dashboard)
            | (Page::Dashboard, Page::Dashboard)
            | (Page::Monitoring, Page::Monitoring) => {
                session.page = target;
            }
        }

        Ok(session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ArtifactConfig, AuthConfig, GenerativeConfig, GeolocationConfig, MonitoringConfig,
        ServerConfig,
    };
    use crate::external::ResolvedLocation;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    fn test_config() -> Arc<Config> {
        Arc::new(Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            auth: AuthConfig {
                username: "aa".to_string(),
                password: "aa".to_string(),
            },
            artifacts: ArtifactConfig {
                scaler_path: "model/scaler.json".to_string(),
                model_path: "model/model.json".to_string(),
            },
            geolocation: GeolocationConfig {
                base_url: "http://ip-api.com".to_string(),
            },
            generative: GenerativeConfig {
                api_endpoint: "http://localhost".to_string(),
                api_key: String::new(),
                model: "gemini-1.5-pro".to_string(),
            },
            monitoring: MonitoringConfig { seed: 42 },
        })
    }

    fn service() -> SessionService {
        SessionService::new(Arc::new(RwLock::new(HashMap::new())), test_config())
    }

    struct FakeLocator {
        fail: bool,
    }

    #[async_trait]
    impl LocationResolver for FakeLocator {
        async fn resolve(&self) -> AppResult<ResolvedLocation> {
            if self.fail {
                Err(AppError::LocationUnavailable)
            } else {
                Ok(ResolvedLocation {
                    country: "Morocco".to_string(),
                    country_code: "MA".to_string(),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let service = service();
        let session = service.login("aa", "aa").await.unwrap();
        assert_eq!(session.page, Page::Login);
        assert!(!session.location_granted);
        assert!(service.get(session.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_login_with_invalid_credentials() {
        let service = service();
        assert!(matches!(
            service.login("aa", "wrong").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("intruder", "aa").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_location_grant_moves_to_dashboard() {
        let service = service();
        let session = service.login("aa", "aa").await.unwrap();
        let locator = FakeLocator { fail: false };
        let session = service
            .grant_location(session.token, &locator)
            .await
            .unwrap();
        assert!(session.location_granted);
        assert_eq!(session.country.as_deref(), Some("Morocco"));
        assert!(session.season.is_some());
        assert_eq!(session.page, Page::Dashboard);
    }

    #[tokio::test]
    async fn test_location_failure_stays_on_login() {
        let service = service();
        let session = service.login("aa", "aa").await.unwrap();
        let locator = FakeLocator { fail: true };
        assert!(matches!(
            service.grant_location(session.token, &locator).await,
            Err(AppError::LocationUnavailable)
        ));
        let session = service.get(session.token).await.unwrap();
        assert_eq!(session.page, Page::Login);
        assert!(!session.location_granted);
    }

    #[tokio::test]
    async fn test_location_grant_is_idempotent() {
        let service = service();
        let session = service.login("aa", "aa").await.unwrap();
        let locator = FakeLocator { fail: false };
        let first = service
            .grant_location(session.token, &locator)
            .await
            .unwrap();
        // A failing locator must not matter once location is granted
        let failing = FakeLocator { fail: true };
        let second = service
            .grant_location(session.token, &failing)
            .await
            .unwrap();
        assert_eq!(first.country, second.country);
        assert_eq!(second.page, Page::Dashboard);
    }

    #[tokio::test]
    async fn test_navigation_between_dashboard_and_monitoring() {
        let service = service();
        let session = service.login("aa", "aa").await.unwrap();
        let locator = FakeLocator { fail: false };
        service
            .grant_location(session.token, &locator)
            .await
            .unwrap();

        let session = service
            .navigate(session.token, Page::Monitoring)
            .await
            .unwrap();
        assert_eq!(session.page, Page::Monitoring);

        let session = service
            .navigate(session.token, Page::Dashboard)
            .await
            .unwrap();
        assert_eq!(session.page, Page::Dashboard);
    }

    #[tokio::test]
    async fn test_navigation_from_login_rejected() {
        let service = service();
        let session = service.login("aa", "aa").await.unwrap();
        assert!(matches!(
            service.navigate(session.token, Page::Monitoring).await,
            Err(AppError::InvalidStateTransition(_))
        ));
    }

    #[tokio::test]
    async fn test_navigation_back_to_login_rejected() {
        let service = service();
        let session = service.login("aa", "aa").await.unwrap();
        let locator = FakeLocator { fail: false };
        service
            .grant_location(session.token, &locator)
            .await
            .unwrap();
        assert!(matches!(
            service.navigate(session.token, Page::Login).await,
            Err(AppError::InvalidStateTransition(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_token_is_session_not_found() {
        let service = service();
        assert!(matches!(
            service.get(Uuid::new_v4()).await,
            Err(AppError::SessionNotFound)
        ));
    }
}
