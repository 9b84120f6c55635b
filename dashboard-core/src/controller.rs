use anyhow::Result;
use std::sync::Arc;

use crate::{
    client::WeatherClient,
    config::Config,
    credential::{Credential, CredentialStore},
    forecast::sample_daily,
    model::{CurrentConditions, ForecastSample, ForecastSeries},
    notify::{Notification, Notifier},
};

/// Observable phase of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardState {
    /// No API key held; credential entry has been requested.
    NoCredential,
    /// Key held, nothing loaded yet.
    Idle,
    Loading,
    Loaded,
    /// Last fetch failed. Data from an earlier load, if any, is still shown.
    Error,
}

impl DashboardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardState::NoCredential => "no_credential",
            DashboardState::Idle => "idle",
            DashboardState::Loading => "loading",
            DashboardState::Loaded => "loaded",
            DashboardState::Error => "error",
        }
    }
}

impl std::fmt::Display for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a renderer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView<'a> {
    pub state: DashboardState,
    pub current: Option<&'a CurrentConditions>,
    /// Day-sampled, at most `max_entries` long.
    pub forecast: Option<Vec<ForecastSample>>,
    pub loading: bool,
    pub credential_requested: bool,
}

/// Drives one dashboard: holds the API key, runs searches and keeps the last good data.
pub struct DashboardController {
    client: Box<dyn WeatherClient>,
    store: Box<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    config: Config,
    credential: Option<Credential>,
    current: Option<CurrentConditions>,
    forecast: Option<ForecastSeries>,
    state: DashboardState,
    credential_requested: bool,
}

impl DashboardController {
    pub fn new(
        client: Box<dyn WeatherClient>,
        store: Box<dyn CredentialStore>,
        notifier: Arc<dyn Notifier>,
        config: Config,
    ) -> Self {
        Self {
            client,
            store,
            notifier,
            config,
            credential: None,
            current: None,
            forecast: None,
            state: DashboardState::NoCredential,
            credential_requested: false,
        }
    }

    /// Load the stored key and, if there is one, fetch the default city.
    pub async fn start(&mut self) -> Result<()> {
        match self.store.load()? {
            Some(credential) => {
                self.credential = Some(credential);
                self.set_state(DashboardState::Idle);
                let city = self.config.default_city.clone();
                self.fetch(&city).await;
            }
            None => {
                self.credential = None;
                self.credential_requested = true;
                self.set_state(DashboardState::NoCredential);
            }
        }
        Ok(())
    }

    /// Persist a newly entered key, then reload the default city.
    ///
    /// Blank input and storage failures are returned without touching the current state.
    pub async fn submit_credential(&mut self, raw: &str) -> Result<()> {
        let credential = Credential::new(raw)?;
        self.store.save(&credential)?;

        self.credential = Some(credential);
        self.credential_requested = false;
        if self.state == DashboardState::NoCredential {
            self.set_state(DashboardState::Idle);
        }

        let city = self.config.default_city.clone();
        self.fetch(&city).await;
        Ok(())
    }

    /// Search for `city`. Blank input is ignored.
    pub async fn search(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }
        self.fetch(city).await;
    }

    /// Open credential entry, e.g. from an "API settings" action.
    pub fn request_credential(&mut self) {
        self.credential_requested = true;
    }

    pub fn dismiss_credential_request(&mut self) {
        self.credential_requested = false;
    }

    pub fn state(&self) -> DashboardState {
        self.state
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn view(&self) -> DashboardView<'_> {
        DashboardView {
            state: self.state,
            current: self.current.as_ref(),
            forecast: self
                .forecast
                .as_ref()
                .map(|series| sample_daily(&series.list, self.config.forecast)),
            loading: self.state == DashboardState::Loading,
            credential_requested: self.credential_requested,
        }
    }

    async fn fetch(&mut self, city: &str) {
        let Some(credential) = self.credential.clone() else {
            self.credential_requested = true;
            self.notifier.notify(&Notification::credential_required());
            self.set_state(DashboardState::NoCredential);
            return;
        };

        self.set_state(DashboardState::Loading);

        let (current, forecast) = tokio::join!(
            self.client.fetch_current(city, &credential),
            self.client.fetch_forecast(city, &credential),
        );

        match (current, forecast) {
            (Ok(current), Ok(forecast)) => {
                let notification = Notification::updated(&current.name);
                self.current = Some(current);
                self.forecast = Some(forecast);
                self.set_state(DashboardState::Loaded);
                self.notifier.notify(&notification);
            }
            (current, forecast) => {
                for err in [current.err(), forecast.err()].into_iter().flatten() {
                    tracing::warn!(%city, error = %err, "Weather fetch failed");
                }
                self.set_state(DashboardState::Error);
                self.notifier.notify(&Notification::fetch_failed());
            }
        }
    }

    fn set_state(&mut self, state: DashboardState) {
        if self.state != state {
            tracing::info!(from = %self.state, to = %state, "Dashboard state changed");
        }
        self.state = state;
        self.notifier.state_changed(state);
    }
}

impl std::fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("client", &self.client)
            .field("state", &self.state)
            .field("has_credential", &self.credential.is_some())
            .field("credential_requested", &self.credential_requested)
            .finish_non_exhaustive()
    }
}
