use yew::{
  Html,
  classes,
  function_component,
  html
};
use yew_router::prelude::*;

use crate::app::Route;

#[function_component(SiteHeader)]
pub fn site_header() -> Html {
  let route = use_route::<Route>();
  let nav_class = |active: bool| {
    if active { "nav-link active" } else { "nav-link" }
  };
  let on_boards = matches!(
    route,
    Some(Route::ImageBoard | Route::VideoBoard)
  );

  html! {
      <header class="site-header">
          <div class="site-brand">
              <span class="site-title">{ "KSIS" }</span>
          </div>
          <nav class="site-nav">
              <Link<Route> classes={classes!(nav_class(on_boards))} to={Route::ImageBoard}>{ "Boards" }</Link<Route>>
              <Link<Route> classes={classes!(nav_class(route == Some(Route::Download)))} to={Route::Download}>{ "Download" }</Link<Route>>
              <Link<Route> classes={classes!(nav_class(route == Some(Route::Location)))} to={Route::Location}>{ "Location" }</Link<Route>>
          </nav>
      </header>
  }
}
