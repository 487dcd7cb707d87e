//! Chore catalog pages.

use askama::Template;
use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    response::Response,
    Form,
};
use chorechart_core::chore::{self, ChoreInput};
use serde::Deserialize;

use super::{render, see_other, wants_delete, NoticeQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::views::{notice_text, ChoreView, Notice};

#[derive(Template)]
#[template(path = "chores.html")]
struct ChoresTemplate {
    notice: String,
    chores: Vec<ChoreView>,
}

#[derive(Template)]
#[template(path = "chore_form.html")]
struct ChoreFormTemplate {
    notice: String,
    editing: bool,
    action: String,
    chore: ChoreView,
    chores: Vec<ChoreView>,
}

/// Fields posted by the chore form. Missing fields parse as blank.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChoreForm {
    pub name: String,
    pub value: String,
    pub description: String,
    pub category: String,
    pub delete: Option<String>,
}

impl ChoreForm {
    fn input(&self) -> chorechart_core::CoreResult<ChoreInput> {
        ChoreInput::parse(&self.name, &self.value, &self.description, &self.category)
    }
}

fn catalog(state: &AppState) -> Result<Vec<ChoreView>, AppError> {
    Ok(chore::list_chores(&state.db)?
        .iter()
        .map(ChoreView::from_chore)
        .collect())
}

/// GET /chores - List chores.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, AppError> {
    render(&ChoresTemplate {
        notice: notice_text(query.notice.as_deref()),
        chores: catalog(&state)?,
    })
}

/// GET /chore/create - Empty chore form.
pub async fn new_form(State(state): State<AppState>) -> Result<Response, AppError> {
    render(&ChoreFormTemplate {
        notice: String::new(),
        editing: false,
        action: "/chore/create".to_string(),
        chore: ChoreView::blank(),
        chores: catalog(&state)?,
    })
}

/// POST /chore/create - Add a chore.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ChoreForm>,
) -> Result<Response, AppError> {
    chore::create_chore(&state.db, &form.input()?)?;
    Ok(see_other("/chores", Notice::ChoreCreated))
}

/// GET /chore/edit/{id} - Chore form filled with the current values.
pub async fn edit_form(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = path?;
    let current = chore::get_chore(&state.db, id)?;
    render(&ChoreFormTemplate {
        notice: String::new(),
        editing: true,
        action: format!("/chore/edit/{}", id),
        chore: ChoreView::from_chore(&current),
        chores: catalog(&state)?,
    })
}

/// POST /chore/edit/{id} - Save or delete (`delete=1`) a chore.
pub async fn edit(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    Form(form): Form<ChoreForm>,
) -> Result<Response, AppError> {
    let Path(id) = path?;
    if wants_delete(form.delete.as_deref()) {
        chore::delete_chore(&state.db, id)?;
        return Ok(see_other("/chores", Notice::ChoreDeleted));
    }

    chore::get_chore(&state.db, id)?;
    chore::update_chore(&state.db, id, &form.input()?)?;
    Ok(see_other("/chores", Notice::ChoreSaved))
}
