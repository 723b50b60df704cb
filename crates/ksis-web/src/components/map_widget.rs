use ksis_shared::geocode::{
  Coordinate,
  GeocodeGenerations,
  GeocodeOutcome,
  GeocodeReply,
  apply_geocode_reply,
  begin_lookup
};
use web_sys::HtmlElement;
use yew::{
  AttrValue,
  Html,
  Properties,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_node_ref,
  use_state
};

use crate::kakao::{
  self,
  KakaoMapView
};

#[derive(Properties, PartialEq)]
pub struct MapWidgetProps {
  pub address:        AttrValue,
  /// Empty when no map key is configured.
  pub sdk_url:        AttrValue,
  #[prop_or(Coordinate::DEFAULT_CENTER)]
  pub default_center: Coordinate,
  #[prop_or(3)]
  pub level:          u32
}

#[derive(
  Clone, Copy, Debug, PartialEq, Eq,
)]
enum MapStatus {
  Loading,
  Ready,
  NotFound,
  Unavailable
}

#[function_component(MapWidget)]
pub fn map_widget(
  props: &MapWidgetProps
) -> Html {
  let container = use_node_ref();
  let view =
    use_mut_ref(|| None::<KakaoMapView>);
  let generations =
    use_mut_ref(GeocodeGenerations::default);
  let status =
    use_state(|| MapStatus::Loading);

  {
    let container = container.clone();
    let view = view.clone();
    let generations = generations.clone();
    let status = status.clone();
    let sdk_url = props.sdk_url.clone();
    let center = props.default_center;
    let level = props.level;

    use_effect_with(
      props.address.clone(),
      move |address| {
        let address = address.clone();
        let generation =
          generations.borrow_mut().issue();

        if sdk_url.is_empty() {
          tracing::warn!(
            "map api key is not configured"
          );
          status.set(MapStatus::Unavailable);
        } else {
          status.set(MapStatus::Loading);
          wasm_bindgen_futures::spawn_local(async move {
            if let Err(error) = kakao::ensure_sdk(&sdk_url).await {
              tracing::error!(%error, "map sdk unavailable");
              status.set(MapStatus::Unavailable);
              return;
            }
            if !generations.borrow().is_current(generation) {
              tracing::debug!(address = %address, generation, "address changed before sdk was ready");
              return;
            }

            if view.borrow().is_none() {
              let Some(element) = container.cast::<HtmlElement>() else {
                tracing::warn!("map container is not mounted");
                return;
              };
              match KakaoMapView::new(&element, center, level) {
                | Ok(map) => *view.borrow_mut() = Some(map),
                | Err(error) => {
                  tracing::error!(%error, "failed to initialize map");
                  status.set(MapStatus::Unavailable);
                  return;
                }
              }
            }

            if let Some(map) = view.borrow_mut().as_mut() {
              begin_lookup(map, center);
            }

            let (geocode_status, matches) =
              match kakao::address_search(&address).await {
                | Ok(reply) => reply,
                | Err(error) => {
                  tracing::error!(%error, address = %address, "address search failed");
                  if generations.borrow().is_current(generation) {
                    status.set(MapStatus::NotFound);
                  }
                  return;
                }
              };

            let outcome = {
              let mut view = view.borrow_mut();
              let Some(map) = view.as_mut() else {
                return;
              };
              apply_geocode_reply(
                map,
                &generations.borrow(),
                &address,
                &GeocodeReply {
                  generation,
                  status: geocode_status,
                  matches
                }
              )
            };

            match outcome {
              | GeocodeOutcome::Placed(_) => status.set(MapStatus::Ready),
              | GeocodeOutcome::Failed(_) => status.set(MapStatus::NotFound),
              | GeocodeOutcome::Stale => {}
            }
          });
        }

        || ()
      }
    );
  }

  let notice = match *status {
    | MapStatus::Loading => {
      Some("Loading map…")
    }
    | MapStatus::Ready => None,
    | MapStatus::NotFound => {
      Some("Address not found")
    }
    | MapStatus::Unavailable => {
      Some("Map unavailable")
    }
  };

  html! {
      <div class="map-widget">
          <div class="map-canvas" ref={container}></div>
          {
              if let Some(text) = notice {
                  html! { <div class="map-notice">{ text }</div> }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
