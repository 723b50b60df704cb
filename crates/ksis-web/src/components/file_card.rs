use std::cell::RefCell;
use std::rc::Rc;

use chrono_tz::Tz;
use ksis_shared::board::TitleKey;
use ksis_shared::datetime::format_registered_at;
use ksis_shared::{
  EditRequest,
  FileId,
  FileRecord
};
use yew::{
  AttrValue,
  Callback,
  FocusEvent,
  Html,
  KeyboardEvent,
  MouseEvent,
  Properties,
  function_component,
  html,
  use_effect_with,
  use_mut_ref
};

use super::{
  FileCardTitle,
  FileThumbnail
};

#[derive(Properties, PartialEq)]
pub struct FileCardProps {
  pub record:           FileRecord,
  pub editing_index:    Option<usize>,
  pub draft_title:      AttrValue,
  pub timezone:         Tz,
  pub on_open_resource: Callback<String>,
  pub on_edit_click:    Callback<EditRequest>,
  pub on_title_input:   Callback<String>,
  pub on_save:          Callback<FileId>,
  pub on_cancel_edit:   Callback<()>,
  pub on_delete:        Callback<FileId>
}

fn is_editing(
  editing_index: Option<usize>,
  index: usize
) -> bool {
  editing_index == Some(index)
}

/// The card's outgoing events, bound to one record.
///
/// `committed` is shared across renders and makes Enter followed by the
/// blur of the unmounting input produce a single save.
#[derive(Clone)]
struct CardActions {
  id:               FileId,
  index:            usize,
  title:            String,
  resource_url:     String,
  committed:        Rc<RefCell<bool>>,
  on_open_resource: Callback<String>,
  on_edit_click:    Callback<EditRequest>,
  on_save:          Callback<FileId>,
  on_cancel_edit:   Callback<()>,
  on_delete:        Callback<FileId>
}

impl CardActions {
  fn new(
    props: &FileCardProps,
    committed: Rc<RefCell<bool>>
  ) -> Self {
    Self {
      id: props.record.id,
      index: props.record.index,
      title: props.record.title.clone(),
      resource_url: props
        .record
        .resource_url
        .clone(),
      committed,
      on_open_resource: props
        .on_open_resource
        .clone(),
      on_edit_click: props
        .on_edit_click
        .clone(),
      on_save: props.on_save.clone(),
      on_cancel_edit: props
        .on_cancel_edit
        .clone(),
      on_delete: props.on_delete.clone()
    }
  }

  fn open_resource(&self) {
    self
      .on_open_resource
      .emit(self.resource_url.clone());
  }

  fn begin_edit(&self) {
    self.committed.replace(false);
    self.on_edit_click.emit(EditRequest {
      index:         self.index,
      current_title: self.title.clone()
    });
  }

  fn commit(&self) {
    if self.committed.replace(true) {
      return;
    }
    self.on_save.emit(self.id);
  }

  fn cancel(&self) {
    if self.committed.replace(true) {
      return;
    }
    self.on_cancel_edit.emit(());
  }

  /// Returns `true` when the key was consumed.
  fn key(&self, key: &str) -> bool {
    match TitleKey::from_key(key) {
      | TitleKey::Commit => {
        self.commit();
        true
      }
      | TitleKey::Cancel => {
        self.cancel();
        true
      }
      | TitleKey::Other => false
    }
  }

  fn delete(&self) {
    self.on_delete.emit(self.id);
  }
}

#[function_component(FileCard)]
pub fn file_card(
  props: &FileCardProps
) -> Html {
  let committed = use_mut_ref(|| false);
  let editing = is_editing(
    props.editing_index,
    props.record.index
  );

  {
    let committed = committed.clone();
    use_effect_with(editing, move |editing| {
      if *editing {
        committed.replace(false);
      }
      || ()
    });
  }

  let actions =
    CardActions::new(props, committed);

  let on_thumbnail = {
    let actions = actions.clone();
    Callback::from(move |_: MouseEvent| {
      actions.open_resource()
    })
  };
  let on_begin = {
    let actions = actions.clone();
    Callback::from(move |_: MouseEvent| {
      actions.begin_edit()
    })
  };
  let on_keydown = {
    let actions = actions.clone();
    Callback::from(
      move |event: KeyboardEvent| {
        if actions.key(&event.key()) {
          event.prevent_default();
        }
      }
    )
  };
  let on_blur = {
    let actions = actions.clone();
    Callback::from(move |_: FocusEvent| {
      actions.commit()
    })
  };
  let on_delete = {
    let actions = actions.clone();
    Callback::from(move |_: MouseEvent| {
      actions.delete()
    })
  };

  let registered = format_registered_at(
    &props.record.registered_at,
    props.timezone
  );

  html! {
      <article class={if editing { "file-card editing" } else { "file-card" }}>
          <FileThumbnail
              src={props.record.thumbnail_url.clone()}
              alt={props.record.title.clone()}
              is_video={props.record.is_video()}
              onclick={on_thumbnail}
          />
          <div class="file-card-body">
              <FileCardTitle
                  title={props.record.title.clone()}
                  draft={props.draft_title.clone()}
                  is_editing={editing}
                  {on_begin}
                  on_input={props.on_title_input.clone()}
                  {on_keydown}
                  {on_blur}
              />
              <div class="file-card-meta">
                  <span class="file-date">{ registered }</span>
                  <button class="btn danger" onclick={on_delete}>{ "Delete" }</button>
              </div>
          </div>
      </article>
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct Emitted {
    opened:  Vec<String>,
    edits:   Vec<EditRequest>,
    saves:   Vec<FileId>,
    cancels: usize,
    deletes: Vec<FileId>
  }

  fn props(
    emitted: &Rc<RefCell<Emitted>>
  ) -> FileCardProps {
    let opened = emitted.clone();
    let edits = emitted.clone();
    let saves = emitted.clone();
    let cancels = emitted.clone();
    let deletes = emitted.clone();

    FileCardProps {
      record:           FileRecord {
        id:            FileId(42),
        title:         "harbor".to_string(),
        thumbnail_url: "/thumbs/42.jpg"
          .to_string(),
        resource_url:  "/media/encoded/42.mp4"
          .to_string(),
        registered_at: "2024-05-02T09:30:00+09:00"
          .to_string(),
        index:         3
      },
      editing_index:    None,
      draft_title:      AttrValue::default(),
      timezone:         chrono_tz::Asia::Seoul,
      on_open_resource: Callback::from(
        move |path| {
          opened.borrow_mut().opened.push(path)
        }
      ),
      on_edit_click:    Callback::from(
        move |request| {
          edits.borrow_mut().edits.push(request)
        }
      ),
      on_title_input:   Callback::noop(),
      on_save:          Callback::from(
        move |id| {
          saves.borrow_mut().saves.push(id)
        }
      ),
      on_cancel_edit:   Callback::from(
        move |()| {
          cancels.borrow_mut().cancels += 1
        }
      ),
      on_delete:        Callback::from(
        move |id| {
          deletes.borrow_mut().deletes.push(id)
        }
      )
    }
  }

  fn actions(
    emitted: &Rc<RefCell<Emitted>>
  ) -> CardActions {
    CardActions::new(
      &props(emitted),
      Rc::new(RefCell::new(false))
    )
  }

  #[test]
  fn editing_follows_tracked_index() {
    assert!(is_editing(Some(3), 3));
    assert!(!is_editing(Some(2), 3));
    assert!(!is_editing(None, 3));
  }

  #[test]
  fn thumbnail_opens_full_resource_once() {
    let emitted =
      Rc::new(RefCell::new(Emitted::default()));
    actions(&emitted).open_resource();

    assert_eq!(
      emitted.borrow().opened,
      vec!["/media/encoded/42.mp4".to_string()]
    );
  }

  #[test]
  fn edit_click_reports_index_and_title() {
    let emitted =
      Rc::new(RefCell::new(Emitted::default()));
    actions(&emitted).begin_edit();

    assert_eq!(
      emitted.borrow().edits,
      vec![EditRequest {
        index:         3,
        current_title: "harbor".to_string()
      }]
    );
  }

  #[test]
  fn enter_then_blur_saves_once() {
    let emitted =
      Rc::new(RefCell::new(Emitted::default()));
    let actions = actions(&emitted);

    assert!(actions.key("Enter"));
    actions.commit();

    assert_eq!(
      emitted.borrow().saves,
      vec![FileId(42)]
    );
  }

  #[test]
  fn blur_alone_saves_once() {
    let emitted =
      Rc::new(RefCell::new(Emitted::default()));
    actions(&emitted).commit();

    assert_eq!(
      emitted.borrow().saves,
      vec![FileId(42)]
    );
  }

  #[test]
  fn new_edit_session_can_save_again() {
    let emitted =
      Rc::new(RefCell::new(Emitted::default()));
    let actions = actions(&emitted);

    actions.commit();
    actions.begin_edit();
    actions.commit();

    assert_eq!(
      emitted.borrow().saves.len(),
      2
    );
  }

  #[test]
  fn escape_cancels_without_saving() {
    let emitted =
      Rc::new(RefCell::new(Emitted::default()));
    let actions = actions(&emitted);

    assert!(actions.key("Escape"));
    actions.commit();
    assert!(!actions.key("a"));

    let emitted = emitted.borrow();
    assert_eq!(emitted.cancels, 1);
    assert!(emitted.saves.is_empty());
  }

  #[test]
  fn delete_reports_identifier() {
    let emitted =
      Rc::new(RefCell::new(Emitted::default()));
    actions(&emitted).delete();

    assert_eq!(
      emitted.borrow().deletes,
      vec![FileId(42)]
    );
  }
}
