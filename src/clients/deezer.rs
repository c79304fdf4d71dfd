use std::time::Duration;

use log::debug;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{
    entities::{
        Album, Artist, Contributor, ExtendedAlbum, ExtendedArtist, Track, TrackWithContributors,
    },
    errors::{Error, Result},
};

// Wire shapes of the Deezer API. Only the fields the output records need are
// declared; everything else in the payload is ignored on deserialization.

/// Artist object as embedded in tracks.
#[derive(Deserialize, Debug)]
pub struct DeezerArtist {
    id: u64,
    name: String,
    picture: Option<String>,
    picture_small: Option<String>,
    picture_medium: Option<String>,
    picture_big: Option<String>,
    picture_xl: Option<String>,
    tracklist: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Payload of `/artist/{id}`.
#[derive(Deserialize, Debug)]
pub struct DeezerArtistDetails {
    #[serde(flatten)]
    artist: DeezerArtist,
    share: String,
    nb_album: u32,
    radio: bool,
}

/// Album object as embedded in tracks.
#[derive(Deserialize, Debug)]
pub struct DeezerAlbum {
    id: u64,
    title: String,
    cover: Option<String>,
    cover_small: Option<String>,
    cover_medium: Option<String>,
    cover_big: Option<String>,
    cover_xl: Option<String>,
    tracklist: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Item of `/artist/{id}/albums`.
#[derive(Deserialize, Debug)]
pub struct DeezerArtistAlbum {
    #[serde(flatten)]
    album: DeezerAlbum,
    genre_id: i64,
    fans: u64,
    release_date: String,
    record_type: String,
    explicit_lyrics: bool,
}

/// Item of a track's `contributors` list.
#[derive(Deserialize, Debug)]
pub struct DeezerContributor {
    id: u64,
    name: String,
    link: String,
    share: String,
    picture: String,
    picture_small: String,
    picture_medium: String,
    picture_big: String,
    picture_xl: String,
    radio: bool,
    tracklist: String,
    #[serde(rename = "type")]
    kind: String,
    role: String,
}

/// Item of `/search`.
#[derive(Deserialize, Debug)]
pub struct DeezerTrack {
    id: u64,
    readable: bool,
    title: String,
    title_short: String,
    #[serde(default)]
    title_version: String,
    link: String,
    duration: u32,
    rank: u64,
    explicit_lyrics: bool,
    explicit_content_lyrics: u8,
    explicit_content_cover: u8,
    preview: String,
    md5_image: String,
    artist: DeezerArtist,
    album: DeezerAlbum,
    #[serde(rename = "type")]
    kind: String,
}

/// Item of `/artist/{id}/top`.
#[derive(Deserialize, Debug)]
pub struct DeezerTopTrack {
    #[serde(flatten)]
    track: DeezerTrack,
    #[serde(default)]
    contributors: Vec<DeezerContributor>,
}

#[derive(Deserialize, Debug)]
struct DeezerList<T> {
    data: Vec<T>,
}

// Deezer reports some failures (unknown id, quota) as a 200 with this body.
#[derive(Deserialize, Debug)]
struct DeezerApiError {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: i64,
}

impl From<DeezerArtist> for Artist {
    fn from(f: DeezerArtist) -> Artist {
        Artist {
            id: f.id,
            name: f.name,
            picture: f.picture,
            picture_small: f.picture_small,
            picture_medium: f.picture_medium,
            picture_big: f.picture_big,
            picture_xl: f.picture_xl,
            tracklist: f.tracklist,
            kind: f.kind,
        }
    }
}

impl From<DeezerArtistDetails> for ExtendedArtist {
    fn from(f: DeezerArtistDetails) -> ExtendedArtist {
        ExtendedArtist {
            artist: Artist::from(f.artist),
            share: f.share,
            nb_album: f.nb_album,
            radio: f.radio,
        }
    }
}

impl From<DeezerAlbum> for Album {
    fn from(f: DeezerAlbum) -> Album {
        Album {
            id: f.id,
            title: f.title,
            cover: f.cover,
            cover_small: f.cover_small,
            cover_medium: f.cover_medium,
            cover_big: f.cover_big,
            cover_xl: f.cover_xl,
            tracklist: f.tracklist,
            kind: f.kind,
        }
    }
}

impl From<DeezerArtistAlbum> for ExtendedAlbum {
    fn from(f: DeezerArtistAlbum) -> ExtendedAlbum {
        ExtendedAlbum {
            album: Album::from(f.album),
            genre_id: f.genre_id,
            fans: f.fans,
            release_date: f.release_date,
            record_type: f.record_type,
            explicit_lyrics: f.explicit_lyrics,
        }
    }
}

impl From<DeezerContributor> for Contributor {
    fn from(f: DeezerContributor) -> Contributor {
        Contributor {
            id: f.id,
            name: f.name,
            link: f.link,
            share: f.share,
            picture: f.picture,
            picture_small: f.picture_small,
            picture_medium: f.picture_medium,
            picture_big: f.picture_big,
            picture_xl: f.picture_xl,
            radio: f.radio,
            tracklist: f.tracklist,
            kind: f.kind,
            role: f.role,
        }
    }
}

impl From<DeezerTrack> for Track {
    fn from(f: DeezerTrack) -> Track {
        Track {
            id: f.id,
            readable: f.readable,
            title: f.title,
            title_short: f.title_short,
            title_version: f.title_version,
            link: f.link,
            duration: f.duration,
            rank: f.rank,
            explicit_lyrics: f.explicit_lyrics,
            explicit_content_lyrics: f.explicit_content_lyrics,
            explicit_content_cover: f.explicit_content_cover,
            preview: f.preview,
            md5_image: f.md5_image,
            artist: Artist::from(f.artist),
            album: Album::from(f.album),
            kind: f.kind,
        }
    }
}

impl From<DeezerTopTrack> for TrackWithContributors {
    fn from(f: DeezerTopTrack) -> TrackWithContributors {
        TrackWithContributors {
            track: Track::from(f.track),
            contributors: f.contributors.into_iter().map(Contributor::from).collect(),
        }
    }
}

/// Read-only client for the Deezer catalog API.
#[derive(Debug, Clone)]
pub struct DeezerClient {
    client: reqwest::Client,
    base_url: String,
}

impl DeezerClient {
    /// Wrap an existing HTTP client. A trailing `/` on `base_url` is dropped.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        DeezerClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // Build a client whose requests give up after `timeout`
    pub fn try_new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(DeezerClient::new(client, base_url))
    }

    /// `GET /search?q=`
    pub async fn search(&self, query: &str) -> Result<Vec<DeezerTrack>> {
        let list: DeezerList<DeezerTrack> = self.get("/search", &[("q", query)]).await?;
        Ok(list.data)
    }

    pub async fn artist(&self, id: u64) -> Result<DeezerArtistDetails> {
        self.get(&format!("/artist/{id}"), &[]).await
    }

    pub async fn artist_top_tracks(&self, id: u64, limit: u32) -> Result<Vec<DeezerTopTrack>> {
        let limit = limit.to_string();
        let list: DeezerList<DeezerTopTrack> = self
            .get(&format!("/artist/{id}/top"), &[("limit", limit.as_str())])
            .await?;
        Ok(list.data)
    }

    pub async fn artist_albums(&self, id: u64) -> Result<Vec<DeezerArtistAlbum>> {
        let list: DeezerList<DeezerArtistAlbum> =
            self.get(&format!("/artist/{id}/albums"), &[]).await?;
        Ok(list.data)
    }

    // Single GET: non-2xx statuses, error envelopes and bodies that don't fit
    // `T` all end up as `Error::UpstreamError`.
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!("GET {url} {query:?}");

        let body: Value = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = body.get("error") {
            let err: DeezerApiError = serde_json::from_value(err.clone())?;
            return Err(Error::UpstreamError(format!(
                "Deezer API error {} ({}): {}",
                err.code, err.kind, err.message
            )));
        }

        Ok(serde_json::from_value(body)?)
    }
}
