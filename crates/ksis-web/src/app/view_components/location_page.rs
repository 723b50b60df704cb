use ksis_shared::geocode::Coordinate;
use yew::{
  AttrValue,
  Html,
  Properties,
  function_component,
  html
};

use crate::components::MapWidget;

#[derive(Properties, PartialEq)]
pub struct LocationPageProps {
  pub address:        AttrValue,
  pub sdk_url:        AttrValue,
  pub default_center: Coordinate,
  pub level:          u32
}

#[function_component(LocationPage)]
pub fn location_page(
  props: &LocationPageProps
) -> Html {
  html! {
      <section class="panel location-page">
          <div class="header">{ "Location" }</div>
          <div class="location-address">{ props.address.clone() }</div>
          <MapWidget
              address={props.address.clone()}
              sdk_url={props.sdk_url.clone()}
              default_center={props.default_center}
              level={props.level}
          />
      </section>
  }
}
