//! Landing page and weekly view.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Response,
};
use chorechart_core::{chore, tally};

use super::{render, NoticeQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::views::{notice_text, ChoreView, ClaimView, TallyView};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    notice: String,
    chores: Vec<ChoreView>,
    claims: Vec<ClaimView>,
    tally: TallyView,
}

#[derive(Template)]
#[template(path = "week.html")]
struct WeekTemplate {
    notice: String,
    claims: Vec<ClaimView>,
    tally: TallyView,
}

/// GET / - Claim form, leaderboard and this window's claims.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, AppError> {
    let weekly = tally::weekly_tally(&state.db, &state.window)?;
    let chores = chore::list_chores(&state.db)?;

    render(&IndexTemplate {
        notice: notice_text(query.notice.as_deref()),
        chores: chores.iter().map(ChoreView::from_chore).collect(),
        claims: weekly.claims.iter().map(ClaimView::from_claim).collect(),
        tally: TallyView::from_weekly(&weekly),
    })
}

/// GET /week - Weekly claims and tally.
pub async fn week(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, AppError> {
    let weekly = tally::weekly_tally(&state.db, &state.window)?;

    render(&WeekTemplate {
        notice: notice_text(query.notice.as_deref()),
        claims: weekly.claims.iter().map(ClaimView::from_claim).collect(),
        tally: TallyView::from_weekly(&weekly),
    })
}
