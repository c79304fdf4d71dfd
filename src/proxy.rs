use std::net::SocketAddr;
use std::time::Duration;

use log::{debug, error};

use crate::clients::{
    DeezerClient,
    entities::{ExtendedAlbum, ExtendedArtist, Track, TrackWithContributors},
    errors::{Error, Result},
};

/// Number of tracks requested from the top-tracks endpoint unless the caller asks otherwise.
pub const DEFAULT_TOP_TRACKS_LIMIT: u32 = 5;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PORT: u16 = 3000;

/// Runtime settings for the proxy
pub struct Config {
    pub deezer: DeezerClient,
    pub bind_address: SocketAddr,
}

/// Builds a [`Config`]. Unset values are read from the environment.
#[derive(Default)]
pub struct ConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    bind_address: Option<SocketAddr>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn bind_address(mut self, bind_address: SocketAddr) -> Self {
        self.bind_address = Some(bind_address);
        self
    }

    pub fn build(self) -> Result<Config> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => std::env::var("DEEZER_API")
                .map_err(|e| Error::ConfigurationError(format!("DEEZER_API: {e}")))?,
        };
        check_base_url(&base_url)?;
        let timeout = match self.timeout {
            Some(t) => t,
            None => Duration::from_secs(env_or("DEEZER_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?),
        };
        let bind_address = match self.bind_address {
            Some(addr) => addr,
            None => env_or(
                "DEEZER_PROXY_BIND",
                SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            )?,
        };
        debug!("Upstream {base_url}, timeout {timeout:?}, bind {bind_address}");

        Ok(Config {
            deezer: DeezerClient::try_new(&base_url, timeout)?,
            bind_address,
        })
    }
}

// The upstream base must be an absolute http(s) URL, e.g. `https://api.deezer.com`
fn check_base_url(base_url: &str) -> Result<()> {
    let url = reqwest::Url::parse(base_url)
        .map_err(|e| Error::ConfigurationError(format!("DEEZER_API={base_url}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::ConfigurationError(format!(
            "DEEZER_API={base_url}: unsupported scheme {scheme:?}"
        ))),
    }
}

// Parse `name` from the environment, falling back to `default` when unset
fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::ConfigurationError(format!("{name}={raw}: {e}"))),
        Err(std::env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(Error::from(e)),
    }
}

/// Stateless proxy over the Deezer catalog. Every operation makes exactly one
/// upstream call and projects the response into output records.
pub struct CatalogProxy {
    deezer: DeezerClient,
}

impl CatalogProxy {
    #[must_use]
    pub fn new(deezer: DeezerClient) -> Self {
        CatalogProxy { deezer }
    }

    /// Search tracks. An empty result set is [`Error::NotFound`].
    pub async fn search_tracks(&self, query: &str) -> Result<Vec<Track>> {
        debug!("Searching tracks for {query:?}");
        let tracks: Vec<Track> = self
            .deezer
            .search(query)
            .await
            .inspect_err(|e| error!("Track search failed: {e}"))?
            .into_iter()
            .map(Track::from)
            .collect();

        if tracks.is_empty() {
            return Err(Error::NotFound("No Results Found".to_string()));
        }
        Ok(tracks)
    }

    pub async fn get_artist(&self, id: u64) -> Result<ExtendedArtist> {
        let artist = self
            .deezer
            .artist(id)
            .await
            .inspect_err(|e| error!("Artist {id} lookup failed: {e}"))?;
        Ok(ExtendedArtist::from(artist))
    }

    // Upstream failures are surfaced, never swallowed into an empty list
    pub async fn get_artist_top_tracks(
        &self,
        id: u64,
        limit: u32,
    ) -> Result<Vec<TrackWithContributors>> {
        let tracks = self
            .deezer
            .artist_top_tracks(id, limit)
            .await
            .inspect_err(|e| error!("Top tracks for artist {id} failed: {e}"))?;
        Ok(tracks.into_iter().map(TrackWithContributors::from).collect())
    }

    pub async fn get_artist_albums(&self, id: u64) -> Result<Vec<ExtendedAlbum>> {
        let albums = self
            .deezer
            .artist_albums(id)
            .await
            .inspect_err(|e| error!("Albums for artist {id} failed: {e}"))?;
        Ok(albums.into_iter().map(ExtendedAlbum::from).collect())
    }
}
