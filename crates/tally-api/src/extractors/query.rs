//! Query string extractors
//!
//! Uses `axum_extra`'s `Query` so repeated keys such as `client_id[]=1&client_id[]=2`
//! collect into a `Vec`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::Query;
use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tally_core::{ClientId, DateRange, ProjectFilter, TimeFrame, TimesheetEntryId, UserId};

use crate::response::ApiError;

/// Query string parsed with repeated-key support
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(QueryParams(value))
    }
}

/// `GET /projects` filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilterParams {
    #[serde(default, rename = "client_id[]")]
    pub client_ids: Vec<ClientId>,
    #[serde(default, rename = "user_id[]")]
    pub user_ids: Vec<UserId>,
    pub billable: Option<bool>,
    pub search: Option<String>,
}

impl From<ProjectFilterParams> for ProjectFilter {
    fn from(params: ProjectFilterParams) -> Self {
        Self {
            client_ids: params.client_ids,
            user_ids: params.user_ids,
            billable: params.billable,
            search: params.search,
        }
    }
}

/// `?time_frame=` keyword; unknown or missing values mean the current week
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeFrameParams {
    pub time_frame: Option<String>,
}

impl TimeFrameParams {
    pub fn time_frame(&self) -> TimeFrame {
        TimeFrame::parse_or_default(self.time_frame.as_deref())
    }
}

/// `?from=&to=` window for the caller's timesheet
///
/// Missing bounds default to the current week.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRangeParams {
    pub fn range_at(&self, today: NaiveDate) -> Result<DateRange, ApiError> {
        let week = TimeFrame::Week.range(today);
        let range = DateRange::new(self.from.unwrap_or(week.from), self.to.unwrap_or(week.to));
        if range.from > range.to {
            return Err(ApiError::invalid_query("`from` must not be after `to`"));
        }
        Ok(range)
    }

    pub fn range(&self) -> Result<DateRange, ApiError> {
        self.range_at(Utc::now().date_naive())
    }
}

/// `?selected_entries[]=` for line item candidates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectedEntriesParams {
    #[serde(default, rename = "selected_entries[]")]
    pub selected_entries: Vec<TimesheetEntryId>,
}
