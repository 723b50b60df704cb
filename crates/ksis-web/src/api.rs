use ksis_shared::links::DownloadTarget;
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  HtmlAnchorElement
};

fn document() -> Result<Document, String> {
  web_sys::window()
    .and_then(|window| window.document())
    .ok_or_else(|| {
      "no document available".to_string()
    })
}

/// Saves the installer through a throwaway `<a download>` element.
pub fn download_installer(
  target: &DownloadTarget
) -> Result<(), String> {
  let document = document()?;
  let anchor = document
    .create_element("a")
    .map_err(|e| {
      format!(
        "failed to create anchor: {e:?}"
      )
    })?
    .dyn_into::<HtmlAnchorElement>()
    .map_err(|_| {
      "created element is not an anchor"
        .to_string()
    })?;

  anchor.set_href(&target.url);
  anchor.set_download(&target.file_name);

  let body = document
    .body()
    .ok_or_else(|| {
      "document has no body".to_string()
    })?;
  body.append_child(&anchor).map_err(
    |e| {
      format!(
        "failed to attach anchor: {e:?}"
      )
    }
  )?;

  anchor.click();
  anchor.remove();

  tracing::info!(
    url = %target.url,
    file_name = %target.file_name,
    "started installer download"
  );
  Ok(())
}

/// Hands off to the installed desktop app through its URL scheme.
pub fn launch_desktop_app(
  url: &str
) -> Result<(), String> {
  let window = web_sys::window()
    .ok_or_else(|| {
      "no window available".to_string()
    })?;

  window
    .location()
    .set_href(url)
    .map_err(|e| {
      format!(
        "failed to open {url}: {e:?}"
      )
    })?;

  tracing::info!(
    url,
    "requested desktop app launch"
  );
  Ok(())
}
