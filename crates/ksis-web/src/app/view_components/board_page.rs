use std::rc::Rc;

use chrono_tz::Tz;
use ksis_shared::board::{
  BoardAction,
  BoardKind,
  BoardState
};
use ksis_shared::{
  EditRequest,
  FileId,
  FileRecord
};
use yew::{
  Callback,
  Html,
  Properties,
  Reducible,
  function_component,
  html,
  use_reducer
};
use yew_router::prelude::*;

use crate::app::ui_debug;
use crate::components::{
  FileCard,
  ResourceModal,
  TabNavigation
};

#[derive(Default, PartialEq)]
struct BoardModel(BoardState);

impl Reducible for BoardModel {
  type Action = BoardAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = self.0.clone();
    next.apply(action);
    Rc::new(Self(next))
  }
}

#[derive(Properties, PartialEq)]
pub struct BoardPageProps {
  pub kind:     BoardKind,
  pub records:  Vec<FileRecord>,
  pub timezone: Tz
}

#[function_component(BoardPage)]
pub fn board_page(
  props: &BoardPageProps
) -> Html {
  let board = {
    let records = props.records.clone();
    use_reducer(move || {
      BoardModel(BoardState::new(records))
    })
  };
  let current_path = use_location()
    .map(|location| {
      location.path().to_string()
    })
    .unwrap_or_else(|| {
      props.kind.path().to_string()
    });

  let on_edit_click = {
    let board = board.clone();
    Callback::from(
      move |request: EditRequest| {
        ui_debug(
          "edit-title",
          &request.index.to_string()
        );
        board.dispatch(
          BoardAction::BeginEdit(request)
        );
      }
    )
  };
  let on_title_input = {
    let board = board.clone();
    Callback::from(move |value: String| {
      board.dispatch(BoardAction::SetDraft(
        value
      ));
    })
  };
  let on_save = {
    let board = board.clone();
    Callback::from(move |id: FileId| {
      board.dispatch(BoardAction::Save(id));
    })
  };
  let on_cancel_edit = {
    let board = board.clone();
    Callback::from(move |()| {
      board.dispatch(BoardAction::CancelEdit);
    })
  };
  let on_delete = {
    let board = board.clone();
    Callback::from(move |id: FileId| {
      ui_debug("delete", &id.to_string());
      board.dispatch(BoardAction::Delete(id));
    })
  };
  let on_open_resource = {
    let board = board.clone();
    Callback::from(move |path: String| {
      board.dispatch(
        BoardAction::OpenResource(path)
      );
    })
  };
  let on_close_resource = {
    let board = board.clone();
    Callback::from(move |()| {
      board
        .dispatch(BoardAction::CloseResource);
    })
  };

  let state = &board.0;

  html! {
      <section class="panel board">
          <TabNavigation current_path={current_path} />
          <div class="header board-header">
              <span>{ props.kind.label() }</span>
              <span class="badge">{ state.records.len().to_string() }</span>
          </div>
          {
              if state.records.is_empty() {
                  html! { <div class="board-empty">{ "No files yet" }</div> }
              } else {
                  html! {
                      <div class="file-grid">
                          {
                              for state.records.iter().map(|record| html! {
                                  <FileCard
                                      key={record.id.to_string()}
                                      record={record.clone()}
                                      editing_index={state.editing_index}
                                      draft_title={state.draft_title.clone()}
                                      timezone={props.timezone}
                                      on_open_resource={on_open_resource.clone()}
                                      on_edit_click={on_edit_click.clone()}
                                      on_title_input={on_title_input.clone()}
                                      on_save={on_save.clone()}
                                      on_cancel_edit={on_cancel_edit.clone()}
                                      on_delete={on_delete.clone()}
                                  />
                              })
                          }
                      </div>
                  }
              }
          }
          {
              if let Some(path) = state.open_resource.clone() {
                  html! { <ResourceModal resource_url={path} on_close={on_close_resource} /> }
              } else {
                  html! {}
              }
          }
      </section>
  }
}
