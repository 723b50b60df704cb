use std::cell::RefCell;

use js_sys::{
  Object,
  Promise
};
use ksis_shared::scripts::ScriptRegistry;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlScriptElement;

thread_local! {
  static SCRIPTS: RefCell<ScriptRegistry<Promise>> =
    RefCell::new(ScriptRegistry::default());
}

/// Loads an external script once per URL for the lifetime of the page.
///
/// Concurrent callers wait on the same load. A failed load is evicted so a
/// later call injects a fresh tag.
pub async fn load_script(
  src: &str
) -> Result<(), String> {
  let (promise, injected) =
    SCRIPTS.with(|scripts| {
      scripts
        .borrow_mut()
        .get_or_inject(src, || {
          inject_script(src)
        })
    })?;

  tracing::debug!(
    src,
    injected,
    "waiting for script"
  );

  match JsFuture::from(promise.clone())
    .await
  {
    | Ok(_) => Ok(()),
    | Err(error) => {
      let evicted = SCRIPTS.with(|scripts| {
        scripts.borrow_mut().evict_if(
          src,
          |cached| {
            Object::is(cached, &promise)
          }
        )
      });
      tracing::debug!(src, evicted, "cleared failed script load");
      tracing::error!(src, ?error, "script failed to load");
      Err(format!(
        "failed to load script {src}"
      ))
    }
  }
}

fn inject_script(
  src: &str
) -> Result<Promise, String> {
  let document = web_sys::window()
    .and_then(|window| window.document())
    .ok_or_else(|| {
      "no document available".to_string()
    })?;

  let script = document
    .create_element("script")
    .map_err(|e| {
      format!(
        "failed to create script tag: \
         {e:?}"
      )
    })?
    .dyn_into::<HtmlScriptElement>()
    .map_err(|_| {
      "created element is not a script"
        .to_string()
    })?;
  script.set_src(src);
  script.set_async(true);

  let promise =
    Promise::new(&mut |resolve, reject| {
      script.set_onload(Some(&resolve));
      script.set_onerror(Some(&reject));
    });

  document
    .head()
    .ok_or_else(|| {
      "document has no head".to_string()
    })?
    .append_child(&script)
    .map_err(|e| {
      format!(
        "failed to attach script tag: \
         {e:?}"
      )
    })?;

  Ok(promise)
}
