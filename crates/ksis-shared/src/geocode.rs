use serde::Deserialize;

/// A latitude/longitude pair in degrees.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Deserialize,
)]
pub struct Coordinate {
  pub lat: f64,
  pub lng: f64
}

impl Coordinate {
  pub const DEFAULT_CENTER: Coordinate =
    Coordinate {
      lat: 33.450701,
      lng: 126.570667
    };
}

impl Default for Coordinate {
  fn default() -> Self {
    Self::DEFAULT_CENTER
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum GeocodeStatus {
  Ok,
  ZeroResult,
  Error
}

impl GeocodeStatus {
  /// Maps the SDK's `kakao.maps.services.Status` string.
  #[must_use]
  pub fn from_sdk(raw: &str) -> Self {
    match raw {
      | "OK" => GeocodeStatus::Ok,
      | "ZERO_RESULT" => {
        GeocodeStatus::ZeroResult
      }
      | _ => GeocodeStatus::Error
    }
  }
}

/// One entry of an address search result. The SDK reports `x` as the
/// longitude and `y` as the latitude, both as decimal strings.
#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct AddressMatch {
  #[serde(default)]
  pub address_name: String,
  pub x:            String,
  pub y:            String
}

impl AddressMatch {
  pub fn coordinate(
    &self
  ) -> Result<Coordinate, GeocodeError> {
    let parse = |raw: &str| {
      raw.trim().parse::<f64>().map_err(
        |_| {
          GeocodeError::BadCoordinate(
            raw.to_string()
          )
        }
      )
    };

    Ok(Coordinate {
      lat: parse(&self.y)?,
      lng: parse(&self.x)?
    })
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, thiserror::Error,
)]
pub enum GeocodeError {
  #[error("no location found for `{0}`")]
  NotFound(String),
  #[error("geocoder failed for `{0}`")]
  Failed(String),
  #[error("geocoder returned unparseable coordinate `{0}`")]
  BadCoordinate(String)
}

/// Resolves a geocoder reply to the coordinate of its first match.
pub fn resolve_geocode(
  address: &str,
  status: GeocodeStatus,
  matches: &[AddressMatch]
) -> Result<Coordinate, GeocodeError> {
  match status {
    | GeocodeStatus::Ok => {
      matches
        .first()
        .ok_or_else(|| {
          GeocodeError::NotFound(
            address.to_string()
          )
        })?
        .coordinate()
    }
    | GeocodeStatus::ZeroResult => {
      Err(GeocodeError::NotFound(
        address.to_string()
      ))
    }
    | GeocodeStatus::Error => {
      Err(GeocodeError::Failed(
        address.to_string()
      ))
    }
  }
}

/// Hands out monotonically increasing request generations so replies to
/// superseded lookups can be told apart from the latest one.
#[derive(Debug, Default)]
pub struct GeocodeGenerations {
  latest: u64
}

impl GeocodeGenerations {
  pub fn issue(&mut self) -> u64 {
    self.latest += 1;
    self.latest
  }

  #[must_use]
  pub fn latest(&self) -> u64 {
    self.latest
  }

  #[must_use]
  pub fn is_current(
    &self,
    generation: u64
  ) -> bool {
    generation == self.latest
  }
}

/// The parts of a rendered map a lookup needs to drive.
pub trait MapSurface {
  fn set_center(&mut self, at: Coordinate);
  fn place_marker(
    &mut self,
    at: Coordinate
  );
  fn clear_marker(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeReply {
  pub generation: u64,
  pub status:     GeocodeStatus,
  pub matches:    Vec<AddressMatch>
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
  Placed(Coordinate),
  Stale,
  Failed(GeocodeError)
}

/// Resets a map to its default view before a new address is looked up.
pub fn begin_lookup<M: MapSurface>(
  map: &mut M,
  default_center: Coordinate
) {
  map.clear_marker();
  map.set_center(default_center);
}

/// Applies a geocoder reply to the map: stale generations are dropped,
/// failures leave the map untouched, a hit recenters and places the single
/// marker.
pub fn apply_geocode_reply<M: MapSurface>(
  map: &mut M,
  generations: &GeocodeGenerations,
  address: &str,
  reply: &GeocodeReply
) -> GeocodeOutcome {
  if !generations
    .is_current(reply.generation)
  {
    tracing::debug!(
      address,
      generation = reply.generation,
      latest = generations.latest(),
      "discarding stale geocode reply"
    );
    return GeocodeOutcome::Stale;
  }

  match resolve_geocode(
    address,
    reply.status,
    &reply.matches
  ) {
    | Ok(at) => {
      map.clear_marker();
      map.place_marker(at);
      map.set_center(at);
      tracing::info!(
        address,
        lat = at.lat,
        lng = at.lng,
        "placed map marker"
      );
      GeocodeOutcome::Placed(at)
    }
    | Err(error) => {
      tracing::warn!(%error, address, "geocode lookup failed");
      GeocodeOutcome::Failed(error)
    }
  }
}
