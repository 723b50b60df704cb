pub mod board;
pub mod config;
pub mod datetime;
pub mod geocode;
pub mod links;
pub mod scripts;

use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

const VIDEO_EXTENSIONS: &[&str] = &[
  "mp4", "webm", "mov", "m4v", "mkv",
  "avi", "ogv"
];

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(transparent)]
pub struct FileId(pub u64);

impl fmt::Display for FileId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub enum MediaKind {
  Image,
  Video
}

impl MediaKind {
  /// Classifies a resource by the extension of its path, ignoring any
  /// query string or fragment.
  #[must_use]
  pub fn from_path(
    path: &str
  ) -> Self {
    let path = path
      .split(['?', '#'])
      .next()
      .unwrap_or_default();
    let file_name = path
      .rsplit('/')
      .next()
      .unwrap_or_default();

    let Some((_, extension)) =
      file_name.rsplit_once('.')
    else {
      return MediaKind::Image;
    };

    let extension =
      extension.to_ascii_lowercase();
    if VIDEO_EXTENSIONS
      .contains(&extension.as_str())
    {
      MediaKind::Video
    } else {
      MediaKind::Image
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct FileRecord {
  pub id:            FileId,
  #[serde(default)]
  pub title:         String,
  pub thumbnail_url: String,
  pub resource_url:  String,
  #[serde(default)]
  pub registered_at: String,
  #[serde(default)]
  pub index:         usize
}

impl FileRecord {
  #[must_use]
  pub fn media_kind(&self) -> MediaKind {
    MediaKind::from_path(
      &self.resource_url
    )
  }

  #[must_use]
  pub fn is_video(&self) -> bool {
    self.media_kind()
      == MediaKind::Video
  }
}

/// Payload of a card's "edit title" click.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct EditRequest {
  pub index:         usize,
  pub current_title: String
}
