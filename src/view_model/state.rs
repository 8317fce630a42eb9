use crate::catalog::{Album, Artist, ContentSnapshot, Track, YearEntry, YearsSnapshot};
use crate::configuration::DEFAULT_ARTIST_NAME;

pub const STATUS_PLEASE_WAIT: &str = "Please wait...";
pub const STATUS_COMPLETE: &str = "Loading is complete!";

pub fn failed_status(reason: &str) -> String {
    format!("Loading failed: {reason}")
}

/// Everything the page displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub artist: Artist,
    pub years: Vec<YearEntry>,
    pub albums: Vec<Album>,
    pub tracks: Vec<Track>,
    pub album_count: u64,
    pub track_count: u64,
    pub status_message: String,
    pub last_error: Option<String>,
}

impl ViewState {
    pub fn new(artist_name: &str) -> Self {
        Self {
            artist: Artist::new(artist_name),
            years: Vec::new(),
            albums: Vec::new(),
            tracks: Vec::new(),
            album_count: 0,
            track_count: 0,
            status_message: STATUS_COMPLETE.to_string(),
            last_error: None,
        }
    }

    /// The trimmed artist name, or `None` when there is nothing to submit.
    ///
    /// ```
    /// use music_page::view_model::ViewState;
    ///
    /// assert_eq!(ViewState::new("  Can ").creatable_artist_name(), Some("Can"));
    /// assert_eq!(ViewState::new("  ").creatable_artist_name(), None);
    /// ```
    pub fn creatable_artist_name(&self) -> Option<&str> {
        Some(self.artist.artist_name.trim()).filter(|name| !name.is_empty())
    }

    pub(crate) fn clear_catalog(&mut self) {
        self.years.clear();
        self.albums.clear();
        self.tracks.clear();
        self.album_count = 0;
        self.track_count = 0;
    }

    pub(crate) fn apply_years(&mut self, snapshot: YearsSnapshot) {
        self.years = snapshot.years;
        self.album_count = snapshot.album_count;
        self.track_count = snapshot.track_count;
    }

    pub(crate) fn apply_content(&mut self, snapshot: ContentSnapshot) {
        self.albums = snapshot.albums;
        self.tracks = snapshot.tracks;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIST_NAME)
    }
}
