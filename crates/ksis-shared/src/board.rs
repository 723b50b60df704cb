use std::collections::HashSet;

use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};

use crate::links::resolve_media_url;
use crate::{
  EditRequest,
  FileId,
  FileRecord
};

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
pub enum BoardKind {
  Image,
  Video
}

impl BoardKind {
  pub const IMAGE_PATH: &'static str =
    "/board/image";
  pub const VIDEO_PATH: &'static str =
    "/board/video";

  #[must_use]
  pub fn path(self) -> &'static str {
    match self {
      | BoardKind::Image => Self::IMAGE_PATH,
      | BoardKind::Video => Self::VIDEO_PATH
    }
  }

  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      | BoardKind::Image => "Image board",
      | BoardKind::Video => "Video board"
    }
  }
}

/// Compares two route paths, ignoring one trailing slash on either side.
#[must_use]
pub fn paths_match(
  left: &str,
  right: &str
) -> bool {
  fn normalize(path: &str) -> &str {
    if path.len() > 1 {
      path.strip_suffix('/').unwrap_or(path)
    } else {
      path
    }
  }

  normalize(left) == normalize(right)
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct TabState {
  pub image_active: bool,
  pub video_active: bool
}

#[must_use]
pub fn tab_state(
  current_path: &str,
  image_path: &str,
  video_path: &str
) -> TabState {
  TabState {
    image_active: paths_match(
      current_path,
      image_path
    ),
    video_active: paths_match(
      current_path,
      video_path
    )
  }
}

/// Where clicking the tab for `tab_path` should navigate, or `None` when
/// that tab is already the current one.
#[must_use]
pub fn tab_click_target(
  current_path: &str,
  tab_path: &str
) -> Option<String> {
  if paths_match(current_path, tab_path) {
    None
  } else {
    Some(tab_path.to_string())
  }
}

/// What a key press inside the title input means.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TitleKey {
  Commit,
  Cancel,
  Other
}

impl TitleKey {
  #[must_use]
  pub fn from_key(key: &str) -> Self {
    match key {
      | "Enter" => TitleKey::Commit,
      | "Escape" | "Esc" => TitleKey::Cancel,
      | _ => TitleKey::Other
    }
  }
}

#[derive(
  Debug, Clone, PartialEq,
)]
pub enum BoardAction {
  BeginEdit(EditRequest),
  SetDraft(String),
  Save(FileId),
  CancelEdit,
  Delete(FileId),
  OpenResource(String),
  CloseResource
}

/// In-memory state of one board: its records, the single card being edited
/// and the resource shown in the modal.
#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct BoardState {
  pub records:       Vec<FileRecord>,
  pub editing_index: Option<usize>,
  pub draft_title:   String,
  pub open_resource: Option<String>
}

impl BoardState {
  #[must_use]
  pub fn new(
    records: Vec<FileRecord>
  ) -> Self {
    let mut state = Self::default();
    state.load(records);
    state
  }

  pub fn apply(
    &mut self,
    action: BoardAction
  ) {
    match action {
      | BoardAction::BeginEdit(request) => {
        self.begin_edit(request)
      }
      | BoardAction::SetDraft(value) => {
        if self.editing_index.is_some() {
          self.draft_title = value;
        }
      }
      | BoardAction::Save(id) => self.save(id),
      | BoardAction::CancelEdit => {
        self.end_edit()
      }
      | BoardAction::Delete(id) => {
        self.delete(id)
      }
      | BoardAction::OpenResource(path) => {
        debug!(path = %path, "opening resource modal");
        self.open_resource = Some(path);
      }
      | BoardAction::CloseResource => {
        self.open_resource = None;
      }
    }
  }

  fn load(
    &mut self,
    records: Vec<FileRecord>
  ) {
    self.records = records;
    reindex(&mut self.records);
    self.end_edit();
    self.open_resource = None;
    debug!(
      total = self.records.len(),
      "loaded board records"
    );
  }

  fn begin_edit(
    &mut self,
    request: EditRequest
  ) {
    if request.index >= self.records.len() {
      warn!(
        index = request.index,
        total = self.records.len(),
        "ignoring edit for unknown card"
      );
      return;
    }

    if let Some(previous) =
      self.editing_index
      && previous != request.index
    {
      debug!(
        previous,
        next = request.index,
        "discarding draft of previous card"
      );
    }

    self.editing_index =
      Some(request.index);
    self.draft_title =
      request.current_title;
  }

  fn save(&mut self, id: FileId) {
    let Some(index) = self.editing_index
    else {
      debug!(%id, "save without active edit; ignoring");
      return;
    };

    if index >= self.records.len() {
      self.end_edit();
      return;
    }

    let draft =
      self.draft_title.trim().to_string();
    let record = &mut self.records[index];

    if record.id != id {
      warn!(
        %id,
        editing = %record.id,
        "save for a card that is not being edited"
      );
      return;
    }

    if draft.is_empty() {
      debug!(%id, "blank title draft; keeping old title");
    } else if draft != record.title {
      info!(%id, title = %draft, "renamed file");
      record.title = draft;
    }

    self.end_edit();
  }

  fn delete(&mut self, id: FileId) {
    let Some(position) = self
      .records
      .iter()
      .position(|record| record.id == id)
    else {
      warn!(%id, "delete for unknown file");
      return;
    };

    let removed =
      self.records.remove(position);
    reindex(&mut self.records);
    info!(%id, title = %removed.title, "deleted file");

    if self.open_resource.as_deref()
      == Some(removed.resource_url.as_str())
    {
      self.open_resource = None;
    }

    match self.editing_index {
      | Some(editing)
        if editing == position =>
      {
        self.end_edit()
      }
      | Some(editing)
        if editing > position =>
      {
        self.editing_index =
          Some(editing - 1)
      }
      | _ => {}
    }
  }

  fn end_edit(&mut self) {
    self.editing_index = None;
    self.draft_title.clear();
  }
}

fn reindex(records: &mut [FileRecord]) {
  for (index, record) in
    records.iter_mut().enumerate()
  {
    record.index = index;
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
  #[error("failed to parse board manifest: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("file id {0} appears more than once in the board manifest")]
  DuplicateId(FileId)
}

/// Records bundled for each board, one `[[image]]` or `[[video]]` table per
/// file.
#[derive(
  Debug, Clone, Default, PartialEq, Deserialize,
)]
pub struct BoardManifest {
  #[serde(default)]
  pub image: Vec<FileRecord>,
  #[serde(default)]
  pub video: Vec<FileRecord>
}

impl BoardManifest {
  /// Parses the manifest. File ids must be unique across both boards.
  pub fn from_toml_str(
    raw: &str
  ) -> Result<Self, ManifestError> {
    let manifest: Self =
      toml::from_str(raw)?;

    let mut seen = HashSet::new();
    for record in manifest
      .image
      .iter()
      .chain(manifest.video.iter())
    {
      if !seen.insert(record.id) {
        return Err(
          ManifestError::DuplicateId(
            record.id
          )
        );
      }
    }

    Ok(manifest)
  }

  /// Rewrites relative media paths to absolute URLs under `base`.
  pub fn resolve_urls(
    &mut self,
    base: &str
  ) {
    for record in self
      .image
      .iter_mut()
      .chain(self.video.iter_mut())
    {
      record.thumbnail_url =
        resolve_media_url(
          base,
          &record.thumbnail_url
        );
      record.resource_url =
        resolve_media_url(
          base,
          &record.resource_url
        );
    }
  }

  #[must_use]
  pub fn records(
    &self,
    kind: BoardKind
  ) -> Vec<FileRecord> {
    let mut records = match kind {
      | BoardKind::Image => {
        self.image.clone()
      }
      | BoardKind::Video => {
        self.video.clone()
      }
    };
    reindex(&mut records);
    records
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(
    id: u64,
    title: &str
  ) -> FileRecord {
    FileRecord {
      id:            FileId(id),
      title:         title.to_string(),
      thumbnail_url: format!(
        "/thumbs/{id}.jpg"
      ),
      resource_url:  format!(
        "/media/{id}.jpg"
      ),
      registered_at: "2024-05-02"
        .to_string(),
      index:         99
    }
  }

  fn board() -> BoardState {
    BoardState::new(vec![
      record(1, "one"),
      record(2, "two"),
      record(3, "three"),
    ])
  }

  #[test]
  fn image_path_activates_image_tab() {
    assert_eq!(
      tab_state(
        BoardKind::IMAGE_PATH,
        BoardKind::IMAGE_PATH,
        BoardKind::VIDEO_PATH
      ),
      TabState {
        image_active: true,
        video_active: false
      }
    );
    assert_eq!(
      tab_state(
        "/board/video/",
        BoardKind::IMAGE_PATH,
        BoardKind::VIDEO_PATH
      ),
      TabState {
        image_active: false,
        video_active: true
      }
    );
    assert_eq!(
      tab_state(
        "/download",
        BoardKind::IMAGE_PATH,
        BoardKind::VIDEO_PATH
      ),
      TabState {
        image_active: false,
        video_active: false
      }
    );
  }

  #[test]
  fn clicking_active_tab_stays_put() {
    assert_eq!(
      tab_click_target(
        BoardKind::IMAGE_PATH,
        BoardKind::IMAGE_PATH
      ),
      None
    );
    assert_eq!(
      tab_click_target(
        BoardKind::IMAGE_PATH,
        BoardKind::VIDEO_PATH
      ),
      Some(
        BoardKind::VIDEO_PATH.to_string()
      )
    );
  }

  #[test]
  fn title_keys() {
    assert_eq!(
      TitleKey::from_key("Enter"),
      TitleKey::Commit
    );
    assert_eq!(
      TitleKey::from_key("Escape"),
      TitleKey::Cancel
    );
    assert_eq!(
      TitleKey::from_key("a"),
      TitleKey::Other
    );
  }

  #[test]
  fn new_state_reindexes_records() {
    let state = board();
    let indices: Vec<usize> = state
      .records
      .iter()
      .map(|record| record.index)
      .collect();
    assert_eq!(indices, vec![0, 1, 2]);
  }

  #[test]
  fn only_one_card_edits_at_a_time() {
    let mut state = board();
    state.apply(BoardAction::BeginEdit(
      EditRequest {
        index:         0,
        current_title: "one".to_string()
      }
    ));
    state.apply(BoardAction::SetDraft(
      "draft for one".to_string()
    ));
    state.apply(BoardAction::BeginEdit(
      EditRequest {
        index:         2,
        current_title: "three"
          .to_string()
      }
    ));

    assert_eq!(state.editing_index, Some(2));
    assert_eq!(state.draft_title, "three");
    assert_eq!(
      state.records[0].title,
      "one"
    );
  }

  #[test]
  fn save_trims_and_leaves_edit_mode() {
    let mut state = board();
    state.apply(BoardAction::BeginEdit(
      EditRequest {
        index:         1,
        current_title: "two".to_string()
      }
    ));
    state.apply(BoardAction::SetDraft(
      "  harbor at dusk ".to_string()
    ));
    state.apply(BoardAction::Save(FileId(2)));

    assert_eq!(
      state.records[1].title,
      "harbor at dusk"
    );
    assert_eq!(state.editing_index, None);
    assert!(state.draft_title.is_empty());

    state.apply(BoardAction::Save(FileId(2)));
    assert_eq!(
      state.records[1].title,
      "harbor at dusk"
    );
  }

  #[test]
  fn blank_draft_keeps_old_title() {
    let mut state = board();
    state.apply(BoardAction::BeginEdit(
      EditRequest {
        index:         0,
        current_title: "one".to_string()
      }
    ));
    state.apply(BoardAction::SetDraft(
      "   ".to_string()
    ));
    state.apply(BoardAction::Save(FileId(1)));

    assert_eq!(state.records[0].title, "one");
    assert_eq!(state.editing_index, None);
  }

  #[test]
  fn draft_is_ignored_outside_edit_mode() {
    let mut state = board();
    state.apply(BoardAction::SetDraft(
      "stray".to_string()
    ));
    assert!(state.draft_title.is_empty());
  }

  #[test]
  fn delete_reindexes_and_follows_editing_card(
  ) {
    let mut state = board();
    state.apply(BoardAction::BeginEdit(
      EditRequest {
        index:         2,
        current_title: "three"
          .to_string()
      }
    ));
    state.apply(BoardAction::Delete(
      FileId(1)
    ));

    assert_eq!(state.records.len(), 2);
    assert_eq!(state.records[0].index, 0);
    assert_eq!(state.records[1].index, 1);
    assert_eq!(state.editing_index, Some(1));
    assert_eq!(
      state.records[1].id,
      FileId(3)
    );
  }

  #[test]
  fn deleting_edited_card_ends_edit() {
    let mut state = board();
    state.apply(BoardAction::BeginEdit(
      EditRequest {
        index:         1,
        current_title: "two".to_string()
      }
    ));
    state.apply(BoardAction::OpenResource(
      "/media/2.jpg".to_string()
    ));
    state.apply(BoardAction::Delete(
      FileId(2)
    ));

    assert_eq!(state.editing_index, None);
    assert_eq!(state.open_resource, None);
  }

  #[test]
  fn manifest_splits_boards() {
    let manifest =
      BoardManifest::from_toml_str(
        r#"
[[image]]
id = 1
title = "beach"
thumbnail_url = "/thumbs/1.jpg"
resource_url = "/media/1.jpg"
registered_at = "2024-05-02T09:30:00+09:00"

[[video]]
id = 2
title = "waves"
thumbnail_url = "/thumbs/2.jpg"
resource_url = "/media/2.mp4"

[[video]]
id = 3
title = "tide"
thumbnail_url = "/thumbs/3.jpg"
resource_url = "/media/3.mp4"
"#
      )
      .expect("parse manifest");

    assert_eq!(
      manifest
        .records(BoardKind::Image)
        .len(),
      1
    );
    let videos =
      manifest.records(BoardKind::Video);
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[1].index, 1);
    assert!(videos.iter().all(FileRecord::is_video));
  }

  #[test]
  fn manifest_rejects_duplicate_ids() {
    let result =
      BoardManifest::from_toml_str(
        r#"
[[image]]
id = 7
title = "beach"
thumbnail_url = "/thumbs/7.jpg"
resource_url = "/media/7.jpg"

[[video]]
id = 7
title = "waves"
thumbnail_url = "/thumbs/7v.jpg"
resource_url = "/media/7.mp4"
"#
      );

    assert!(matches!(
      result,
      Err(ManifestError::DuplicateId(
        FileId(7)
      ))
    ));
  }

  #[test]
  fn manifest_urls_resolve_against_api_base() {
    let mut manifest = BoardManifest {
      image: vec![record(1, "one")],
      video: vec![]
    };
    manifest.resolve_urls(
      "https://api.example.com/"
    );

    assert_eq!(
      manifest.image[0].resource_url,
      "https://api.example.com/media/1.jpg"
    );
    assert_eq!(
      manifest.image[0].thumbnail_url,
      "https://api.example.com/thumbs/1.jpg"
    );
  }
}
