//! Listing pages and JSON lists built on top of a [`DataSource`].

use crate::dto::table::{TablePage, TableParams};
use crate::services::source::DataSource;
use crate::services::{ServiceError, ServiceResult};
use crate::table::controller::{LoadState, TableController};
use crate::table::filter::ListQuery;
use crate::table::record::Record;
use crate::table::sort::{SortState, sort_records};
use crate::table::view::RowRenderer;

fn parse_params<R: RowRenderer>(
    params: &TableParams,
) -> ServiceResult<(ListQuery<R>, SortState)> {
    let query = params.list_query::<R>().map_err(|err| {
        log::error!("Invalid {} filters: {err}", R::NOUN);
        ServiceError::from(err)
    })?;
    let sort = params.sort_state::<R>().map_err(|err| {
        log::error!("Invalid {} sort: {err}", R::NOUN);
        ServiceError::from(err)
    })?;
    Ok((query, sort))
}

/// Loads one table page.
///
/// Invalid parameters are an error. A failed fetch is not: it renders as the
/// table's error state with a retry link for the same query.
pub async fn load_table<R, S>(
    source: &S,
    base_path: &str,
    params: &TableParams,
    breakpoint: u32,
) -> ServiceResult<TablePage>
where
    R: RowRenderer,
    S: DataSource<R> + ?Sized,
{
    let (query, sort) = parse_params::<R>(params)?;

    let mut controller = TableController::new(breakpoint).with_query(query);
    controller.set_sort(sort);
    if let Some(width) = params.width {
        controller.resize(width);
    }

    controller.refresh(source).await;
    if let LoadState::Failed(message) = controller.state() {
        log::error!("Rendering {} error state: {message}", R::NOUN);
    }

    for id in params.expanded_ids() {
        controller.expand_row(&id);
    }

    Ok(TablePage::build(base_path, params, &controller))
}

/// Filtered and sorted records for the JSON API.
pub async fn list_records<R, S>(source: &S, params: &TableParams) -> ServiceResult<Vec<R>>
where
    R: RowRenderer,
    S: DataSource<R> + ?Sized,
{
    let (query, sort) = parse_params::<R>(params)?;
    let records = source.fetch_list(&query).await?;

    Ok(sort_records(&records, &sort).into_iter().cloned().collect())
}
