mod view_components;

use std::rc::Rc;

use gloo::console::log;
use ksis_shared::board::{
  BoardKind,
  BoardManifest
};
use ksis_shared::config::{
  AppConfig,
  EnvOverrides
};
use ksis_shared::links::{
  DownloadTarget,
  LAUNCH_URL,
  map_sdk_url
};
use yew::{
  Html,
  function_component,
  html,
  use_state
};
use yew_router::prelude::*;

use self::view_components::{
  BoardPage,
  DownloadPage,
  LocationPage,
  NotFound
};
use crate::components::SiteHeader;

const APP_CONFIG_TOML: &str =
  include_str!("../assets/ksis.toml");
const BOARD_MANIFEST_TOML: &str =
  include_str!("../assets/boards.toml");

#[derive(
  Clone, Debug, PartialEq, Routable,
)]
pub enum Route {
  #[at("/")]
  Home,
  #[at("/board/image")]
  ImageBoard,
  #[at("/board/video")]
  VideoBoard,
  #[at("/download")]
  Download,
  #[at("/location")]
  Location,
  #[not_found]
  #[at("/404")]
  NotFound
}

struct AppState {
  config:   AppConfig,
  manifest: BoardManifest
}

fn load_app_config() -> AppConfig {
  AppConfig::load(
    APP_CONFIG_TOML,
    EnvOverrides {
      api_base_url:     option_env!(
        "KSIS_API_BASE_URL"
      )
      .map(str::to_string),
      map_api_key:      option_env!(
        "KSIS_MAP_API_KEY"
      )
      .map(str::to_string),
      display_timezone: option_env!(
        "KSIS_DISPLAY_TIMEZONE"
      )
      .map(str::to_string)
    }
  )
}

fn load_board_manifest(
  config: &AppConfig
) -> BoardManifest {
  match BoardManifest::from_toml_str(
    BOARD_MANIFEST_TOML
  ) {
    | Ok(mut manifest) => {
      manifest
        .resolve_urls(&config.api.base_url);
      tracing::info!(
        images = manifest.image.len(),
        videos = manifest.video.len(),
        "loaded board manifest"
      );
      manifest
    }
    | Err(error) => {
      tracing::error!(%error, "failed to parse board manifest; boards will be empty");
      BoardManifest::default()
    }
  }
}

fn load_app_state() -> Rc<AppState> {
  let config = load_app_config();
  let manifest =
    load_board_manifest(&config);
  Rc::new(AppState {
    config,
    manifest
  })
}

#[function_component(App)]
pub fn app() -> Html {
  let state = use_state(load_app_state);
  let state = (*state).clone();

  html! {
      <BrowserRouter>
          <div class="app-shell">
              <SiteHeader />
              <main class="app-main">
                  <Switch<Route> render={move |route| switch(route, &state)} />
              </main>
          </div>
      </BrowserRouter>
  }
}

fn board(
  kind: BoardKind,
  state: &AppState
) -> Html {
  html! {
      <BoardPage
          key={kind.path()}
          {kind}
          records={state.manifest.records(kind)}
          timezone={state.config.display_timezone()}
      />
  }
}

fn switch(
  route: Route,
  state: &AppState
) -> Html {
  ui_debug("route", &route.to_path());

  match route {
    | Route::Home => html! {
        <Redirect<Route> to={Route::ImageBoard} />
    },
    | Route::ImageBoard => {
      board(BoardKind::Image, state)
    }
    | Route::VideoBoard => {
      board(BoardKind::Video, state)
    }
    | Route::Download => html! {
        <DownloadPage
            target={DownloadTarget::from_config(&state.config)}
            launch_url={LAUNCH_URL}
        />
    },
    | Route::Location => {
      let map = &state.config.map;
      let sdk_url = if state
        .config
        .has_map_key()
      {
        map_sdk_url(&map.api_key)
      } else {
        String::new()
      };
      html! {
          <LocationPage
              address={map.address.clone()}
              {sdk_url}
              default_center={map.default_center}
              level={map.level}
          />
      }
    }
    | Route::NotFound => html! {
        <NotFound />
    }
  }
}

pub(crate) fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn board_routes_match_board_paths() {
    assert_eq!(
      Route::ImageBoard.to_path(),
      BoardKind::Image.path()
    );
    assert_eq!(
      Route::VideoBoard.to_path(),
      BoardKind::Video.path()
    );
    assert_eq!(
      Route::recognize(
        BoardKind::Video.path()
      ),
      Some(Route::VideoBoard)
    );
  }

  #[test]
  fn bundled_assets_parse() {
    let config =
      AppConfig::from_toml_str(
        APP_CONFIG_TOML
      )
      .expect("bundled config parses");
    assert_eq!(
      config.download.file_name,
      "KSIS_Setup.exe"
    );

    let manifest =
      BoardManifest::from_toml_str(
        BOARD_MANIFEST_TOML
      )
      .expect("bundled manifest parses");
    assert!(
      manifest
        .records(BoardKind::Image)
        .iter()
        .all(|record| !record.is_video())
    );
    assert!(
      manifest
        .records(BoardKind::Video)
        .iter()
        .all(|record| record.is_video())
    );
  }
}
