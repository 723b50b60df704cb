use ksis_shared::board::{
  BoardKind,
  tab_click_target,
  tab_state
};
use yew::{
  AttrValue,
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};
use yew_router::prelude::*;

use super::TabButton;
use crate::app::Route;

#[derive(Properties, PartialEq)]
pub struct TabNavigationProps {
  pub current_path: AttrValue,
  #[prop_or(AttrValue::Static(
    BoardKind::IMAGE_PATH
  ))]
  pub image_path:   AttrValue,
  #[prop_or(AttrValue::Static(
    BoardKind::VIDEO_PATH
  ))]
  pub video_path:   AttrValue
}

#[function_component(TabNavigation)]
pub fn tab_navigation(
  props: &TabNavigationProps
) -> Html {
  let navigator = use_navigator();
  let tabs = tab_state(
    &props.current_path,
    &props.image_path,
    &props.video_path
  );

  let go_to = |tab_path: AttrValue| {
    let navigator = navigator.clone();
    let current_path =
      props.current_path.clone();
    Callback::from(
      move |_: MouseEvent| {
        let Some(target) =
          tab_click_target(
            &current_path,
            &tab_path
          )
        else {
          return;
        };

        match (
          navigator.as_ref(),
          Route::recognize(&target)
        ) {
          | (Some(navigator), Some(route)) => {
            tracing::debug!(target = %target, "switching board tab");
            navigator.push(&route);
          }
          | (None, _) => {
            tracing::warn!(
              "tab navigation rendered \
               outside a router"
            )
          }
          | (_, None) => {
            tracing::warn!(target = %target, "tab path matches no route")
          }
        }
      }
    )
  };

  html! {
      <nav class="board-tabs" role="tablist">
          <TabButton
              label={BoardKind::Image.label()}
              is_active={tabs.image_active}
              onclick={go_to(props.image_path.clone())}
          />
          <TabButton
              label={BoardKind::Video.label()}
              is_active={tabs.video_active}
              onclick={go_to(props.video_path.clone())}
          />
      </nav>
  }
}
