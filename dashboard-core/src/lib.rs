//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - The OpenWeatherMap client and its error mapping
//! - API key persistence on top of a small local key-value file
//! - The dashboard controller that joins current conditions and forecast into one view
//! - Display helpers: icon-code categories and day sampling of the forecast
//!
//! It is used by `weather-dashboard`, but has no terminal dependencies of its own.

pub mod client;
pub mod condition;
pub mod config;
pub mod controller;
pub mod credential;
pub mod error;
pub mod forecast;
pub mod model;
pub mod notify;
pub mod storage;

pub use client::{OpenWeatherClient, WeatherClient};
pub use condition::ConditionCategory;
pub use config::Config;
pub use controller::{DashboardController, DashboardState, DashboardView};
pub use credential::{Credential, CredentialStore, LocalCredentialStore};
pub use error::{CredentialError, WeatherError};
pub use forecast::{SamplingPolicy, sample_daily};
pub use model::{CurrentConditions, ForecastSample, ForecastSeries};
pub use notify::{Notification, NotificationKind, Notifier};
pub use storage::LocalStorage;
