use crate::config::AppConfig;

pub const DOWNLOAD_PATH: &str =
  "/download";
pub const LAUNCH_URL: &str =
  "ksis://open";
pub const MAP_SDK_BASE_URL: &str =
  "https://dapi.kakao.com/v2/maps/sdk.js";

/// Where the installer comes from and the name the browser saves it under.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct DownloadTarget {
  pub url:       String,
  pub file_name: String
}

impl DownloadTarget {
  #[must_use]
  pub fn from_config(
    config: &AppConfig
  ) -> Self {
    Self {
      url:       download_url(
        &config.api.base_url
      ),
      file_name: config
        .download
        .file_name
        .clone()
    }
  }
}

fn trim_base(base: &str) -> &str {
  let trimmed = base.trim();
  trimmed
    .strip_suffix('/')
    .unwrap_or(trimmed)
}

#[must_use]
pub fn download_url(base: &str) -> String {
  format!(
    "{}{DOWNLOAD_PATH}",
    trim_base(base)
  )
}

/// SDK script URL; `autoload=false` defers bootstrap to `kakao.maps.load`.
#[must_use]
pub fn map_sdk_url(
  api_key: &str
) -> String {
  format!(
    "{MAP_SDK_BASE_URL}?appkey={}&libraries=services&autoload=false",
    api_key.trim()
  )
}

/// Joins a media path onto the API base unless it is already absolute.
#[must_use]
pub fn resolve_media_url(
  base: &str,
  path: &str
) -> String {
  let path = path.trim();
  if path.starts_with("http://")
    || path.starts_with("https://")
    || path.starts_with("//")
    || path.starts_with("data:")
  {
    return path.to_string();
  }

  format!(
    "{}/{}",
    trim_base(base),
    path.trim_start_matches('/')
  )
}
