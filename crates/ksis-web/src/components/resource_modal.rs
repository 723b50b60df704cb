use gloo::events::EventListener;
use ksis_shared::MediaKind;
use ksis_shared::board::TitleKey;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::{
  AttrValue,
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html,
  use_effect_with
};

#[derive(Properties, PartialEq)]
pub struct ResourceModalProps {
  pub resource_url: AttrValue,
  pub on_close:     Callback<()>
}

#[function_component(ResourceModal)]
pub fn resource_modal(
  props: &ResourceModalProps
) -> Html {
  {
    let on_close = props.on_close.clone();
    use_effect_with((), move |_| {
      let listener = web_sys::window()
        .map(|window| {
          EventListener::new(
            &window,
            "keydown",
            move |event| {
              if let Some(event) = event
                .dyn_ref::<KeyboardEvent>()
                && TitleKey::from_key(
                  &event.key()
                ) == TitleKey::Cancel
              {
                on_close.emit(());
              }
            }
          )
        });
      move || drop(listener)
    });
  }

  let on_backdrop = {
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      on_close.emit(())
    })
  };
  let on_close_button = {
    let on_close = props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      on_close.emit(())
    })
  };
  let keep_open =
    Callback::from(|event: MouseEvent| {
      event.stop_propagation()
    });

  let media = match MediaKind::from_path(
    &props.resource_url
  ) {
    | MediaKind::Video => html! {
        <video
            class="resource-media"
            src={props.resource_url.clone()}
            controls=true
            autoplay=true
            playsinline=true
        />
    },
    | MediaKind::Image => html! {
        <img class="resource-media" src={props.resource_url.clone()} alt="" />
    }
  };

  html! {
      <div class="modal-backdrop" onclick={on_backdrop}>
          <div class="modal resource-modal" role="dialog" onclick={keep_open}>
              <button class="btn icon modal-close" title="Close" onclick={on_close_button}>{ "✕" }</button>
              { media }
          </div>
      </div>
  }
}
