use yew::{
  AttrValue,
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TabButtonProps {
  pub label:     AttrValue,
  pub is_active: bool,
  pub onclick:   Callback<MouseEvent>
}

#[function_component(TabButton)]
pub fn tab_button(
  props: &TabButtonProps
) -> Html {
  html! {
      <button
          class={if props.is_active { "board-tab active" } else { "board-tab" }}
          aria-selected={if props.is_active { "true" } else { "false" }}
          role="tab"
          onclick={props.onclick.clone()}
      >
          { props.label.clone() }
      </button>
  }
}
