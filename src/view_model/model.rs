//! The page's view-model: display state plus the actions that refresh it from the backend.
//!
//! State lives in a [`watch`] channel. Each mutation is a single `send_modify`, and every
//! subscriber is woken after it, which is how front-ends re-render. Actions are not
//! coordinated with each other; when they overlap, the last response to arrive wins.

use crate::api_client::{CatalogApi, RequestError};
use crate::view_model::state::{failed_status, STATUS_COMPLETE, STATUS_PLEASE_WAIT};
use crate::view_model::ViewState;
use tokio::sync::watch;
use tracing::{debug, info};

pub struct ViewModel<A> {
    api: A,
    state: watch::Sender<ViewState>,
}

impl<A: CatalogApi> ViewModel<A> {
    pub fn new(api: A, initial: ViewState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { api, state }
    }

    /// Returns a receiver that is notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn can_create(&self) -> bool {
        let can_create = self.state.borrow().creatable_artist_name().is_some();
        debug!(can_create, "computed can_create");
        can_create
    }

    pub fn set_artist_name(&self, name: &str) {
        self.state
            .send_modify(|state| state.artist.artist_name = name.to_string());
    }

    /// Initial load, run once when the page comes up.
    pub async fn mount(&self) -> Result<(), RequestError> {
        self.refresh_years().await
    }

    /// Replaces the year list and the album/track totals with the backend's.
    ///
    /// On failure the previous values are kept and the error is recorded.
    pub async fn refresh_years(&self) -> Result<(), RequestError> {
        info!("refreshing years");

        match self.api.fetch_years().await {
            Ok(snapshot) => {
                self.state.send_modify(|state| {
                    state.apply_years(snapshot);
                    state.last_error = None;
                });
                Ok(())
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// Submits the artist draft, then reloads the year list.
    ///
    /// The catalog is cleared and the input emptied before the request goes out, and
    /// both stay that way whatever the backend answers. The status message ends on
    /// "complete" only if the submission and the reload both succeeded.
    pub async fn create_content(&self) -> Result<(), RequestError> {
        let mut artist = None;
        self.state.send_modify(|state| {
            state.clear_catalog();
            state.status_message = STATUS_PLEASE_WAIT.to_string();
            artist = Some(std::mem::take(&mut state.artist));
        });
        let artist = artist.unwrap_or_default();

        info!(artist = %artist.artist_name, "creating content");
        let submitted = self.api.create_artist(&artist).await.map(|_| ());
        let refreshed = self.refresh_years().await;
        let outcome = submitted.and(refreshed);

        self.state.send_modify(|state| match &outcome {
            Ok(()) => state.status_message = STATUS_COMPLETE.to_string(),
            Err(e) => {
                state.status_message = failed_status(&e.to_string());
                state.last_error = Some(e.to_string());
            }
        });

        outcome
    }

    /// Loads the albums and tracks released in `year`.
    pub async fn update_content(&self, year: i32) -> Result<(), RequestError> {
        info!(year, "updating content");

        match self.api.fetch_content(year).await {
            Ok(snapshot) => {
                self.state.send_modify(|state| {
                    state.apply_content(snapshot);
                    state.last_error = None;
                });
                Ok(())
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    fn record_error(&self, e: &RequestError) {
        self.state
            .send_modify(|state| state.last_error = Some(e.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::MockCatalogApi;
    use crate::catalog::{Album, Artist, ContentSnapshot, Track, YearEntry, YearsSnapshot};
    use async_trait::async_trait;
    use serde_json::json;

    fn years(values: &[i32], album_count: u64, track_count: u64) -> YearsSnapshot {
        YearsSnapshot {
            years: values.iter().copied().map(YearEntry::from).collect(),
            album_count,
            track_count,
        }
    }

    fn server_error() -> RequestError {
        RequestError::Status {
            status: 500,
            url: "http://localhost:5000/music_page/api/v1.0/artist".to_string(),
        }
    }

    fn album(name: &str) -> Album {
        Album {
            collection_name: Some(name.to_string()),
            ..Album::default()
        }
    }

    fn track(name: &str) -> Track {
        Track {
            track_name: Some(name.to_string()),
            ..Track::default()
        }
    }

    #[tokio::test]
    async fn test_refresh_years_copies_response() {
        let mut api = MockCatalogApi::new();
        api.expect_fetch_years()
            .times(1)
            .returning(|| Ok(years(&[2020, 2021], 5, 42)));

        let view_model = ViewModel::new(api, ViewState::default());
        view_model.refresh_years().await.unwrap();

        let state = view_model.snapshot();
        assert_eq!(state.years, vec![YearEntry::from(2020), YearEntry::from(2021)]);
        assert_eq!(state.album_count, 5);
        assert_eq!(state.track_count, 42);
    }

    #[tokio::test]
    async fn test_mount_refreshes_years_once() {
        let mut api = MockCatalogApi::new();
        api.expect_fetch_years()
            .times(1)
            .returning(|| Ok(years(&[1973], 1, 10)));

        let view_model = ViewModel::new(api, ViewState::default());
        view_model.mount().await.unwrap();

        assert_eq!(view_model.snapshot().years, vec![YearEntry::from(1973)]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_years() {
        let mut api = MockCatalogApi::new();
        let mut calls = 0;
        api.expect_fetch_years().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(years(&[1994], 1, 11))
            } else {
                Err(server_error())
            }
        });

        let view_model = ViewModel::new(api, ViewState::default());
        view_model.refresh_years().await.unwrap();
        assert!(view_model.refresh_years().await.is_err());

        let state = view_model.snapshot();
        assert_eq!(state.years, vec![YearEntry::from(1994)]);
        assert_eq!(state.album_count, 1);
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn test_can_create_follows_trimmed_name() {
        let view_model = ViewModel::new(MockCatalogApi::new(), ViewState::default());
        assert!(view_model.can_create());

        view_model.set_artist_name("  ");
        assert!(!view_model.can_create());

        view_model.set_artist_name("");
        assert!(!view_model.can_create());

        view_model.set_artist_name(" Radiohead");
        assert!(view_model.can_create());
    }

    #[tokio::test]
    async fn test_create_content_submits_draft_and_refreshes() {
        let mut api = MockCatalogApi::new();
        api.expect_create_artist()
            .withf(|artist: &Artist| artist.artist_name == "Pink Floyd")
            .times(1)
            .returning(|_| Ok(json!(487143)));
        api.expect_fetch_years()
            .times(1)
            .returning(|| Ok(years(&[1973, 1975, 1979], 3, 31)));

        let view_model = ViewModel::new(api, ViewState::default());
        view_model.create_content().await.unwrap();

        let state = view_model.snapshot();
        assert_eq!(state.artist.artist_name, "");
        assert_eq!(state.years.len(), 3);
        assert_eq!(state.album_count, 3);
        assert_eq!(state.track_count, 31);
        assert_eq!(state.status_message, STATUS_COMPLETE);
        assert!(state.last_error.is_none());
    }

    #[tokio::test]
    async fn test_create_content_clears_previous_content() {
        let mut api = MockCatalogApi::new();
        api.expect_fetch_content()
            .returning(|_| {
                Ok(ContentSnapshot {
                    albums: vec![album("Animals")],
                    tracks: vec![track("Dogs")],
                })
            });
        api.expect_create_artist().returning(|_| Ok(json!(1)));
        api.expect_fetch_years()
            .returning(|| Ok(years(&[2001], 1, 1)));

        let view_model = ViewModel::new(api, ViewState::new("Air"));
        view_model.update_content(1977).await.unwrap();
        view_model.create_content().await.unwrap();

        let state = view_model.snapshot();
        assert!(state.albums.is_empty());
        assert!(state.tracks.is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_clears_input_and_reports_failure() {
        let mut api = MockCatalogApi::new();
        api.expect_create_artist()
            .times(1)
            .returning(|_| Err(server_error()));
        api.expect_fetch_years()
            .times(1)
            .returning(|| Ok(years(&[], 0, 0)));

        let view_model = ViewModel::new(api, ViewState::new("Nobody Known"));
        let result = view_model.create_content().await;

        assert!(matches!(result, Err(RequestError::Status { status: 500, .. })));
        let state = view_model.snapshot();
        assert_eq!(state.artist.artist_name, "");
        assert_ne!(state.status_message, STATUS_COMPLETE);
        assert!(state.status_message.starts_with("Loading failed"));
        assert!(state.last_error.is_some());
    }

    /// Backend whose every call suspends once, like a real request would.
    struct YieldingCatalog;

    #[async_trait]
    impl CatalogApi for YieldingCatalog {
        async fn fetch_years(&self) -> Result<YearsSnapshot, RequestError> {
            tokio::task::yield_now().await;
            Ok(years(&[1999], 1, 2))
        }

        async fn create_artist(&self, _artist: &Artist) -> Result<serde_json::Value, RequestError> {
            tokio::task::yield_now().await;
            Ok(json!(1))
        }

        async fn fetch_content(&self, _year: i32) -> Result<ContentSnapshot, RequestError> {
            tokio::task::yield_now().await;
            Ok(ContentSnapshot::default())
        }
    }

    #[tokio::test]
    async fn test_create_content_reports_wait_status_to_subscribers() {
        let view_model = ViewModel::new(YieldingCatalog, ViewState::default());
        let mut receiver = view_model.subscribe();
        let mut statuses = Vec::new();

        let watcher = async {
            while receiver.changed().await.is_ok() {
                let status = receiver.borrow_and_update().status_message.clone();
                if statuses.last() != Some(&status) {
                    statuses.push(status);
                }
                if statuses.last().map(String::as_str) == Some(STATUS_COMPLETE) {
                    break;
                }
            }
        };

        let (result, _) = tokio::join!(view_model.create_content(), watcher);
        result.unwrap();

        assert_eq!(statuses.first().map(String::as_str), Some(STATUS_PLEASE_WAIT));
        assert_eq!(statuses.last().map(String::as_str), Some(STATUS_COMPLETE));
    }

    #[tokio::test]
    async fn test_update_content_replaces_albums_and_tracks() {
        let mut api = MockCatalogApi::new();
        api.expect_fetch_content()
            .withf(|year| *year == 2014)
            .times(1)
            .returning(|_| {
                Ok(ContentSnapshot {
                    albums: vec![album("The Endless River")],
                    tracks: vec![track("Louder than Words"), track("Things Left Unsaid")],
                })
            });

        let view_model = ViewModel::new(api, ViewState::default());
        let mut receiver = view_model.subscribe();
        view_model.update_content(2014).await.unwrap();

        assert!(receiver.has_changed().unwrap());
        let state = receiver.borrow_and_update().clone();
        assert_eq!(state.albums, vec![album("The Endless River")]);
        assert_eq!(
            state.tracks,
            vec![track("Louder than Words"), track("Things Left Unsaid")]
        );
    }
}
