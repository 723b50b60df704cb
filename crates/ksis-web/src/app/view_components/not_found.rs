use yew::{
  Html,
  function_component,
  html
};
use yew_router::prelude::*;

use crate::app::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
  html! {
      <section class="panel not-found">
          <div class="header">{ "Page not found" }</div>
          <Link<Route> to={Route::ImageBoard}>{ "Back to the boards" }</Link<Route>>
      </section>
  }
}
