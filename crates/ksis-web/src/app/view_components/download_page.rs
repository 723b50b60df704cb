use ksis_shared::links::DownloadTarget;
use yew::{
  AttrValue,
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html,
  use_state
};

use crate::api::{
  download_installer,
  launch_desktop_app
};

#[derive(Properties, PartialEq)]
pub struct DownloadPageProps {
  pub target:     DownloadTarget,
  pub launch_url: AttrValue
}

#[function_component(DownloadPage)]
pub fn download_page(
  props: &DownloadPageProps
) -> Html {
  let error = use_state(|| None::<String>);

  let on_download = {
    let error = error.clone();
    let target = props.target.clone();
    Callback::from(move |_: MouseEvent| {
      match download_installer(&target) {
        | Ok(()) => error.set(None),
        | Err(err) => {
          tracing::error!(error = %err, "installer download failed");
          error.set(Some(err));
        }
      }
    })
  };

  let on_launch = {
    let error = error.clone();
    let launch_url =
      props.launch_url.clone();
    Callback::from(move |_: MouseEvent| {
      match launch_desktop_app(&launch_url) {
        | Ok(()) => error.set(None),
        | Err(err) => {
          tracing::error!(error = %err, "desktop app launch failed");
          error.set(Some(err));
        }
      }
    })
  };

  html! {
      <section class="panel download-page">
          <div class="header">{ "KSIS 데스크톱 앱" }</div>
          <div class="details">
              <p>{ "설치 파일을 내려받은 뒤, 설치가 끝나면 앱 실행하기를 눌러 주세요." }</p>
              <div class="actions">
                  <button class="btn primary" onclick={on_download}>{ "Windows용 다운로드" }</button>
                  <button class="btn" onclick={on_launch}>{ "앱 실행하기" }</button>
              </div>
              {
                  if let Some(message) = (*error).clone() {
                      html! { <div class="notice error">{ message }</div> }
                  } else {
                      html! {}
                  }
              }
          </div>
      </section>
  }
}
