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
pub struct FileThumbnailProps {
  pub src:      AttrValue,
  pub alt:      AttrValue,
  pub is_video: bool,
  pub onclick:  Callback<MouseEvent>
}

#[function_component(FileThumbnail)]
pub fn file_thumbnail(
  props: &FileThumbnailProps
) -> Html {
  html! {
      <div class="file-thumb" onclick={props.onclick.clone()}>
          <img src={props.src.clone()} alt={props.alt.clone()} loading="lazy" />
          {
              if props.is_video {
                  html! { <span class="play-overlay" aria-hidden="true">{ "▶" }</span> }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
