use std::collections::HashMap;

/// Per-URL cache of in-flight or settled script loads.
///
/// `H` is whatever handle the host uses to wait on a load (a promise in the
/// browser). Each URL is injected at most once while its entry is cached;
/// evicting a failed entry lets the next caller inject it again.
#[derive(Debug)]
pub struct ScriptRegistry<H> {
  entries: HashMap<String, H>
}

impl<H> Default for ScriptRegistry<H> {
  fn default() -> Self {
    Self {
      entries: HashMap::new()
    }
  }
}

impl<H: Clone> ScriptRegistry<H> {
  /// Returns the cached handle for `url`, or runs `inject` and caches what
  /// it returns. The flag is `true` when `inject` ran.
  pub fn get_or_inject<E>(
    &mut self,
    url: &str,
    inject: impl FnOnce() -> Result<H, E>
  ) -> Result<(H, bool), E> {
    if let Some(handle) =
      self.entries.get(url)
    {
      tracing::debug!(
        url,
        "reusing cached script load"
      );
      return Ok((handle.clone(), false));
    }

    let handle = inject()?;
    tracing::info!(
      url,
      "injected script tag"
    );
    self
      .entries
      .insert(url.to_string(), handle.clone());
    Ok((handle, true))
  }

  /// Drops the entry for `url` only when `is_failed` recognizes it as the
  /// load that failed. A fresh load cached since then is left alone.
  pub fn evict_if(
    &mut self,
    url: &str,
    is_failed: impl FnOnce(&H) -> bool
  ) -> bool {
    let failed = self
      .entries
      .get(url)
      .is_some_and(is_failed);
    if failed {
      self.entries.remove(url);
    }
    failed
  }
}

#[cfg(test)]
impl<H> ScriptRegistry<H> {
  fn contains(
    &self,
    url: &str
  ) -> bool {
    self.entries.contains_key(url)
  }

  fn len(&self) -> usize {
    self.entries.len()
  }

  fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
