//! Pagination engine
//!
//! [`paginate_query`] issues one bounded fetch plus one count over the same
//! predicate snapshot and assembles a [`PageResult`]. [`Pager`] is the
//! composition form: supply the page parameters and an externally built
//! [`Query`], then run it against a connection. The positional
//! [`paginate`](crate::Repository::paginate) terminal delegates here, so
//! both forms produce identical results for identical inputs.

use crate::connection::Connection;
use crate::entity::EntityTrait;
use crate::error::Error;
use crate::error::Result;
use crate::query::Query;
use crate::repository::fetch_all;
use crate::repository::fetch_count;

/// Page parameters: 1-based page number and a positive page size
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageQuery {
    pub page_no:   u64,
    pub page_size: u64,
}

impl PageQuery {
    pub fn new(page_no: u64, page_size: u64) -> Self {
        Self { page_no, page_size }
    }

    /// Reject zero page size or page number before any query executes
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::InvalidArgument("page_size must be greater than zero".to_string()));
        }
        if self.page_no == 0 {
            return Err(Error::InvalidArgument("page_no starts at 1".to_string()));
        }
        Ok(())
    }

    /// Rows skipped before this page: `(page_no - 1) * page_size`
    pub fn offset(&self) -> u64 {
        self.page_no.saturating_sub(1) * self.page_size
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page_no: 1, page_size: 10 }
    }
}

/// One page of results with total-count bookkeeping
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct PageResult<M> {
    pub page_no:    u64,
    pub page_size:  u64,
    pub total_page: u64,
    pub total_size: u64,
    pub list:       Vec<M>,
}

fn total_pages(total_size: u64, page_size: u64) -> u64 {
    if total_size % page_size > 0 { total_size / page_size + 1 } else { total_size / page_size }
}

/// Fetch one page over `query`'s predicates
///
/// The fetch is bounded by the page's offset and size (overriding any limit
/// or offset already on the state); the count runs over the same predicates
/// ignoring ordering, limit and offset. Both build from the single `query`
/// snapshot passed in.
pub async fn paginate_query<E: EntityTrait>(
    conn: &Connection,
    query: &Query,
    page: &PageQuery,
) -> Result<PageResult<E::Model>> {
    if let Some(message) = query.pending() {
        return Err(Error::InvalidArgument(message.to_string()));
    }
    page.validate()?;

    let fetch = query.clone().limit(page.page_size).offset(page.offset());
    let (sql, params) = fetch.build_select(E::table_name());
    let list = fetch_all::<E>(conn, &sql, params).await?;

    let (count_sql, count_params) = query.build_count(E::table_name());
    let total_size = fetch_count(conn, &count_sql, count_params).await?;

    Ok(PageResult {
        page_no:    page.page_no,
        page_size:  page.page_size,
        total_page: total_pages(total_size, page.page_size),
        total_size,
        list,
    })
}

/// Composition builder for pagination
///
/// # Example
///
/// ```ignore
/// let page = Pager::new()
///     .with_query(Query::new().eq("status", "active"))
///     .page_no(2)
///     .page_size(20)
///     .run::<UserEntity>(&conn)
///     .await?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pager {
    page:  PageQuery,
    query: Query,
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_no(mut self, page_no: u64) -> Self {
        self.page.page_no = page_no;
        self
    }

    pub fn page_size(mut self, page_size: u64) -> Self {
        self.page.page_size = page_size;
        self
    }

    pub fn page(mut self, page: PageQuery) -> Self {
        self.page = page;
        self
    }

    /// Base query supplying the predicate snapshot (default: unfiltered)
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub async fn run<E: EntityTrait>(self, conn: &Connection) -> Result<PageResult<E::Model>> {
        paginate_query::<E>(conn, &self.query, &self.page).await
    }
}
