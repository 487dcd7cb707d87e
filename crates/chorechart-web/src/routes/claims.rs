//! Claim pages.

use askama::Template;
use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    response::Response,
    Form,
};
use chorechart_core::chore;
use chorechart_core::claim::{self, ClaimUpdate, NewClaim};
use chrono::Utc;
use serde::Deserialize;

use super::{render, see_other, wants_delete, NoticeQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::views::{notice_text, window_dates, ChoreView, ClaimView, Notice};

#[derive(Template)]
#[template(path = "claim_form.html")]
struct ClaimFormTemplate {
    notice: String,
    claim: ClaimView,
    chores: Vec<ChoreView>,
    completed_at_min: String,
    completed_at_max: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewClaimForm {
    pub chore_id: String,
    pub completed_by: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClaimForm {
    pub chore_id: String,
    pub value: String,
    pub completed_by: String,
    pub completed_at: String,
    pub note: String,
    pub delete: Option<String>,
}

/// POST /claim/create - Record a claim and continue on its edit page.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<NewClaimForm>,
) -> Result<Response, AppError> {
    let new_claim = NewClaim::parse(&form.chore_id, &form.completed_by)?;
    let created = claim::create_claim(&state.db, &new_claim)?;
    Ok(see_other(&format!("/claim/edit/{}", created.id), Notice::ClaimCreated))
}

/// GET /claim/edit/{id} - Claim form filled with the current values.
pub async fn edit_form(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, AppError> {
    let Path(id) = path?;
    let current = claim::get_claim(&state.db, id)?;
    let chores = chore::list_chores(&state.db)?;
    let (completed_at_min, completed_at_max) = window_dates(&state.window, Utc::now());

    render(&ClaimFormTemplate {
        notice: notice_text(query.notice.as_deref()),
        claim: ClaimView::from_claim(&current),
        chores: chores.iter().map(ChoreView::from_chore).collect(),
        completed_at_min,
        completed_at_max,
    })
}

/// POST /claim/edit/{id} - Save or delete (`delete=1`) a claim.
pub async fn edit(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    Form(form): Form<ClaimForm>,
) -> Result<Response, AppError> {
    let Path(id) = path?;
    if wants_delete(form.delete.as_deref()) {
        claim::delete_claim(&state.db, id)?;
        return Ok(see_other("/", Notice::ClaimDeleted));
    }

    let current = claim::get_claim(&state.db, id)?;
    let update = ClaimUpdate::parse(
        &form.chore_id,
        &form.value,
        &form.completed_by,
        &form.completed_at,
        &form.note,
    )?
    .keep_completed_at(&current);
    claim::update_claim(&state.db, id, &update)?;
    Ok(see_other("/", Notice::ClaimSaved))
}
