//! Bindings to the Kakao Maps JavaScript SDK.
//!
//! The SDK is fetched with `autoload=false`, so every entry point first
//! goes through [`ensure_sdk`].

use js_sys::{
  Array,
  Function,
  Object,
  Promise,
  Reflect
};
use ksis_shared::geocode::{
  AddressMatch,
  Coordinate,
  GeocodeStatus,
  MapSurface
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlElement;

use crate::script_loader;

#[wasm_bindgen]
extern "C" {
  #[wasm_bindgen(catch, js_namespace = ["kakao", "maps"], js_name = load)]
  fn maps_load(
    callback: &Function
  ) -> Result<(), JsValue>;

  #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
  type LatLng;

  #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"])]
  fn new(lat: f64, lng: f64) -> LatLng;

  #[wasm_bindgen(js_namespace = ["kakao", "maps"], js_name = Map)]
  type SdkMap;

  #[wasm_bindgen(catch, constructor, js_namespace = ["kakao", "maps"], js_class = "Map")]
  fn new(
    container: &HtmlElement,
    options: &Object
  ) -> Result<SdkMap, JsValue>;

  #[wasm_bindgen(method, js_name = setCenter)]
  fn set_center(
    this: &SdkMap,
    at: &LatLng
  );

  #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
  type Marker;

  #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"])]
  fn new(options: &Object) -> Marker;

  #[wasm_bindgen(method, js_name = setMap)]
  fn set_map(this: &Marker, map: &JsValue);

  #[wasm_bindgen(js_namespace = ["kakao", "maps", "services"])]
  type Geocoder;

  #[wasm_bindgen(catch, constructor, js_namespace = ["kakao", "maps", "services"])]
  fn new() -> Result<Geocoder, JsValue>;

  #[wasm_bindgen(catch, method, js_name = addressSearch)]
  fn address_search(
    this: &Geocoder,
    address: &str,
    callback: &Function
  ) -> Result<(), JsValue>;
}

fn lat_lng(at: Coordinate) -> LatLng {
  LatLng::new(at.lat, at.lng)
}

fn set_field(
  target: &Object,
  key: &str,
  value: &JsValue
) -> Result<(), String> {
  Reflect::set(
    target,
    &JsValue::from_str(key),
    value
  )
  .map(|_| ())
  .map_err(|e| {
    format!(
      "failed to set option {key}: {e:?}"
    )
  })
}

fn sdk_present() -> bool {
  Reflect::get(
    &js_sys::global(),
    &JsValue::from_str("kakao")
  )
  .map(|value| {
    !value.is_undefined()
      && !value.is_null()
  })
  .unwrap_or(false)
}

/// Makes sure the SDK script is on the page and bootstrapped.
pub async fn ensure_sdk(
  sdk_url: &str
) -> Result<(), String> {
  if !sdk_present() {
    script_loader::load_script(sdk_url)
      .await?;
  }

  let mut bootstrap_error = None;
  let ready =
    Promise::new(&mut |resolve, _reject| {
      if let Err(error) = maps_load(&resolve)
      {
        bootstrap_error = Some(error);
      }
    });
  if let Some(error) = bootstrap_error {
    return Err(format!(
      "map sdk bootstrap failed: \
       {error:?}"
    ));
  }

  JsFuture::from(ready)
    .await
    .map(|_| ())
    .map_err(|e| {
      format!(
        "map sdk bootstrap failed: {e:?}"
      )
    })
}

/// Runs an address search and waits for the SDK's callback.
pub async fn address_search(
  address: &str
) -> Result<
  (GeocodeStatus, Vec<AddressMatch>),
  String
> {
  let geocoder =
    Geocoder::new().map_err(|e| {
      format!(
        "failed to create geocoder: {e:?}"
      )
    })?;

  let mut search_error = None;
  let reply =
    Promise::new(&mut |resolve, _reject| {
      let callback = Closure::once_into_js(
        move |result: JsValue,
              status: String| {
          let reply = Array::of2(
            &result,
            &JsValue::from_str(&status)
          );
          if let Err(error) = resolve
            .call1(&JsValue::NULL, &reply)
          {
            tracing::debug!(
              ?error,
              "failed to settle address search"
            );
          }
        }
      );
      if let Err(error) = geocoder
        .address_search(
          address,
          callback.unchecked_ref()
        )
      {
        search_error = Some(error);
      }
    });
  if let Some(error) = search_error {
    return Err(format!(
      "address search failed: {error:?}"
    ));
  }

  let reply = JsFuture::from(reply)
    .await
    .map_err(|e| {
      format!(
        "address search failed: {e:?}"
      )
    })?
    .dyn_into::<Array>()
    .map_err(|_| {
      "address search reply was not an \
       array"
        .to_string()
    })?;

  let status = GeocodeStatus::from_sdk(
    &reply
      .get(1)
      .as_string()
      .unwrap_or_default()
  );
  let matches = if status
    == GeocodeStatus::Ok
  {
    serde_wasm_bindgen::from_value::<
      Vec<AddressMatch>
    >(reply.get(0))
    .map_err(|e| {
      format!(
        "decode error: {e}"
      )
    })?
  } else {
    Vec::new()
  };

  Ok((status, matches))
}

/// A rendered SDK map carrying at most one marker.
pub struct KakaoMapView {
  map:    SdkMap,
  marker: Option<Marker>
}

impl KakaoMapView {
  pub fn new(
    container: &HtmlElement,
    center: Coordinate,
    level: u32
  ) -> Result<Self, String> {
    let options = Object::new();
    set_field(
      &options,
      "center",
      &lat_lng(center)
    )?;
    set_field(
      &options,
      "level",
      &JsValue::from(level)
    )?;

    let map = SdkMap::new(
      container, &options
    )
    .map_err(|e| {
      format!(
        "failed to create map: {e:?}"
      )
    })?;

    Ok(Self {
      map,
      marker: None
    })
  }
}

impl MapSurface for KakaoMapView {
  fn set_center(&mut self, at: Coordinate) {
    self.map.set_center(&lat_lng(at));
  }

  fn place_marker(
    &mut self,
    at: Coordinate
  ) {
    let options = Object::new();
    let placed = set_field(
      &options,
      "position",
      &lat_lng(at)
    )
    .and_then(|()| {
      set_field(
        &options, "map", &self.map
      )
    });

    match placed {
      | Ok(()) => {
        self.marker =
          Some(Marker::new(&options));
      }
      | Err(error) => {
        tracing::error!(%error, "failed to place map marker")
      }
    }
  }

  fn clear_marker(&mut self) {
    if let Some(marker) =
      self.marker.take()
    {
      marker.set_map(&JsValue::NULL);
    }
  }
}
