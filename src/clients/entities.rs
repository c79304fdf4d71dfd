//! Output records returned to clients.
//!
//! Every type here is one version of the exposed contract: a field is hidden
//! simply by not being a member. Records are built once from an upstream
//! object and never mutated afterwards.

use serde::Serialize;

/// Artist as nested inside tracks and returned by the artist lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artist {
    pub id: u64,
    pub name: String,
    // Top tracks embed an artist without any picture.
    pub picture: Option<String>,
    pub picture_small: Option<String>,
    pub picture_medium: Option<String>,
    pub picture_big: Option<String>,
    pub picture_xl: Option<String>,
    pub tracklist: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Artist lookup result: the base artist plus share link, album count and radio flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedArtist {
    #[serde(flatten)]
    pub artist: Artist,
    pub share: String,
    pub nb_album: u32,
    pub radio: bool,
}

/// Album as nested inside tracks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Album {
    pub id: u64,
    pub title: String,
    pub cover: Option<String>,
    pub cover_small: Option<String>,
    pub cover_medium: Option<String>,
    pub cover_big: Option<String>,
    pub cover_xl: Option<String>,
    pub tracklist: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Album listed for an artist, with release metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedAlbum {
    #[serde(flatten)]
    pub album: Album,
    pub genre_id: i64,
    pub fans: u64,
    pub release_date: String,
    pub record_type: String,
    pub explicit_lyrics: bool,
}

/// Artist credited on a track, with the role they played on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contributor {
    pub id: u64,
    pub name: String,
    pub link: String,
    pub share: String,
    pub picture: String,
    pub picture_small: String,
    pub picture_medium: String,
    pub picture_big: String,
    pub picture_xl: String,
    pub radio: bool,
    pub tracklist: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub role: String,
}

/// Track as returned by search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub id: u64,
    pub readable: bool,
    pub title: String,
    pub title_short: String,
    pub title_version: String,
    pub link: String,
    pub duration: u32,
    pub rank: u64,
    pub explicit_lyrics: bool,
    pub explicit_content_lyrics: u8,
    pub explicit_content_cover: u8,
    pub preview: String,
    pub md5_image: String,
    pub artist: Artist,
    pub album: Album,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Track from an artist's top list, carrying every credited contributor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackWithContributors {
    #[serde(flatten)]
    pub track: Track,
    pub contributors: Vec<Contributor>,
}
