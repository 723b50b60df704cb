use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::datetime::{
  DEFAULT_DISPLAY_TIMEZONE,
  parse_timezone
};
use crate::geocode::Coordinate;

pub const API_BASE_URL_ENV: &str =
  "KSIS_API_BASE_URL";
pub const MAP_API_KEY_ENV: &str =
  "KSIS_MAP_API_KEY";
pub const DISPLAY_TIMEZONE_ENV: &str =
  "KSIS_DISPLAY_TIMEZONE";

const DEFAULT_API_BASE_URL: &str =
  "http://localhost:8080";
const DEFAULT_MAP_ADDRESS: &str =
  "제주특별자치도 제주시 광양9길 10";
const DEFAULT_MAP_LEVEL: u32 = 3;
const DEFAULT_INSTALLER_FILE_NAME: &str =
  "KSIS_Setup.exe";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to parse configuration: {0}")]
  Parse(#[from] toml::de::Error)
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Deserialize,
)]
#[serde(default)]
pub struct AppConfig {
  pub api:      ApiSection,
  pub map:      MapSection,
  pub download: DownloadSection,
  pub display:  DisplaySection
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ApiSection {
  pub base_url: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct MapSection {
  pub api_key:        String,
  pub address:        String,
  pub default_center: Coordinate,
  pub level:          u32
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct DownloadSection {
  pub file_name: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct DisplaySection {
  pub timezone: String
}

/// Values taken from the build environment; `None` or blank entries leave
/// the bundled configuration untouched.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
  pub api_base_url:     Option<String>,
  pub map_api_key:      Option<String>,
  pub display_timezone: Option<String>
}

impl Default for ApiSection {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_API_BASE_URL
        .to_string()
    }
  }
}

impl Default for MapSection {
  fn default() -> Self {
    Self {
      api_key:        String::new(),
      address:        DEFAULT_MAP_ADDRESS
        .to_string(),
      default_center:
        Coordinate::DEFAULT_CENTER,
      level:          DEFAULT_MAP_LEVEL
    }
  }
}

impl Default for DownloadSection {
  fn default() -> Self {
    Self {
      file_name:
        DEFAULT_INSTALLER_FILE_NAME
          .to_string()
    }
  }
}

impl Default for DisplaySection {
  fn default() -> Self {
    Self {
      timezone: DEFAULT_DISPLAY_TIMEZONE
        .to_string()
    }
  }
}

impl AppConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> Result<Self, ConfigError> {
    Ok(toml::from_str::<AppConfig>(raw)?)
  }

  /// Parses the bundled configuration, falls back to defaults when it is
  /// unreadable, then layers the build environment on top.
  #[must_use]
  pub fn load(
    raw: &str,
    overrides: EnvOverrides
  ) -> Self {
    let mut config =
      match Self::from_toml_str(raw) {
        | Ok(config) => config,
        | Err(error) => {
          error!(%error, "failed parsing bundled config; using defaults");
          Self::default()
        }
      };

    config.apply_overrides(overrides);
    config.sanitize();

    info!(
      api_base_url = %config.api.base_url,
      map_key_present = config.has_map_key(),
      timezone = %config.display.timezone,
      "loaded app config"
    );
    config
  }

  pub fn apply_overrides(
    &mut self,
    overrides: EnvOverrides
  ) {
    if let Some(value) =
      non_blank(overrides.api_base_url)
    {
      debug!(key = API_BASE_URL_ENV, value = %value, "applying override");
      self.api.base_url = value;
    }
    if let Some(value) =
      non_blank(overrides.map_api_key)
    {
      debug!(
        key = MAP_API_KEY_ENV,
        "applying override"
      );
      self.map.api_key = value;
    }
    if let Some(value) = non_blank(
      overrides.display_timezone
    ) {
      debug!(key = DISPLAY_TIMEZONE_ENV, value = %value, "applying override");
      self.display.timezone = value;
    }
  }

  fn sanitize(&mut self) {
    if self.api.base_url.trim().is_empty()
    {
      warn!(
        "api base url was empty; using \
         default"
      );
      self.api.base_url =
        DEFAULT_API_BASE_URL.to_string();
    }

    if self.map.level == 0 {
      self.map.level = DEFAULT_MAP_LEVEL;
    }

    if self
      .download
      .file_name
      .trim()
      .is_empty()
    {
      self.download.file_name =
        DEFAULT_INSTALLER_FILE_NAME
          .to_string();
    }

    if let Err(error) =
      parse_timezone(&self.display.timezone)
    {
      error!(%error, "invalid display timezone; using default");
      self.display.timezone =
        DEFAULT_DISPLAY_TIMEZONE
          .to_string();
    }
  }

  #[must_use]
  pub fn has_map_key(&self) -> bool {
    !self.map.api_key.trim().is_empty()
  }

  #[must_use]
  pub fn display_timezone(&self) -> Tz {
    parse_timezone(&self.display.timezone)
      .unwrap_or(chrono_tz::Asia::Seoul)
  }
}

fn non_blank(
  value: Option<String>
) -> Option<String> {
  value
    .map(|value| value.trim().to_string())
    .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  const BUNDLED: &str = r#"
[api]
base_url = "https://files.example.com/api"

[map]
api_key = "bundled-key"
address = "Jeju City Hall"
default_center = { lat = 33.5, lng = 126.5 }

[display]
timezone = "UTC"
"#;

  #[test]
  fn parses_bundled_sections() {
    let config =
      AppConfig::from_toml_str(BUNDLED)
        .expect("parse config");

    assert_eq!(
      config.api.base_url,
      "https://files.example.com/api"
    );
    assert_eq!(
      config.map.address,
      "Jeju City Hall"
    );
    assert_eq!(
      config.map.default_center,
      Coordinate {
        lat: 33.5,
        lng: 126.5
      }
    );
    assert_eq!(
      config.map.level,
      DEFAULT_MAP_LEVEL
    );
    assert_eq!(
      config.download.file_name,
      DEFAULT_INSTALLER_FILE_NAME
    );
  }

  #[test]
  fn environment_overrides_win() {
    let config = AppConfig::load(
      BUNDLED,
      EnvOverrides {
        api_base_url:     Some(
          "https://prod.example.com"
            .to_string()
        ),
        map_api_key:      Some(
          "  ".to_string()
        ),
        display_timezone: Some(
          "Asia/Tokyo".to_string()
        )
      }
    );

    assert_eq!(
      config.api.base_url,
      "https://prod.example.com"
    );
    assert_eq!(
      config.map.api_key,
      "bundled-key"
    );
    assert_eq!(
      config.display_timezone(),
      chrono_tz::Asia::Tokyo
    );
  }

  #[test]
  fn unreadable_config_falls_back_to_defaults(
  ) {
    let config = AppConfig::load(
      "[api\nbase_url =",
      EnvOverrides::default()
    );

    assert_eq!(
      config,
      AppConfig::default()
    );
    assert!(!config.has_map_key());
  }

  #[test]
  fn invalid_timezone_is_replaced() {
    let config = AppConfig::load(
      "[display]\ntimezone = \"Nowhere/Land\"\n",
      EnvOverrides::default()
    );

    assert_eq!(
      config.display.timezone,
      DEFAULT_DISPLAY_TIMEZONE
    );
    assert_eq!(
      config.display_timezone(),
      chrono_tz::Asia::Seoul
    );
  }
}
