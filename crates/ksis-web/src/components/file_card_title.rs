use web_sys::HtmlInputElement;
use yew::{
  AttrValue,
  Callback,
  FocusEvent,
  Html,
  InputEvent,
  KeyboardEvent,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_node_ref
};

#[derive(Properties, PartialEq)]
pub struct FileCardTitleProps {
  pub title:      AttrValue,
  pub draft:      AttrValue,
  pub is_editing: bool,
  pub on_begin:   Callback<MouseEvent>,
  pub on_input:   Callback<String>,
  pub on_keydown: Callback<KeyboardEvent>,
  pub on_blur:    Callback<FocusEvent>
}

#[function_component(FileCardTitle)]
pub fn file_card_title(
  props: &FileCardTitleProps
) -> Html {
  let input_ref = use_node_ref();

  {
    let input_ref = input_ref.clone();
    use_effect_with(
      props.is_editing,
      move |is_editing| {
        if *is_editing
          && let Some(input) = input_ref
            .cast::<HtmlInputElement>()
          && let Err(error) = input.focus()
        {
          tracing::debug!(?error, "failed to focus title input");
        }
        || ()
      }
    );
  }

  if !props.is_editing {
    return html! {
        <div class="file-title">
            <span class="file-title-text" onclick={props.on_begin.clone()}>
                { props.title.clone() }
            </span>
            <button class="btn icon" title="Edit title" onclick={props.on_begin.clone()}>
                { "✎" }
            </button>
        </div>
    };
  }

  let oninput = {
    let on_input = props.on_input.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        on_input.emit(input.value());
      }
    )
  };

  html! {
      <div class="file-title editing">
          <input
              ref={input_ref}
              class="file-title-input"
              type="text"
              value={props.draft.clone()}
              {oninput}
              onkeydown={props.on_keydown.clone()}
              onblur={props.on_blur.clone()}
          />
      </div>
  }
}
