//! URI-addressed access to the movie table.
//!
//! `MovieProvider` routes each identifier to its shape, builds the matching
//! selection, runs it against the store, and posts a change notification
//! after successful mutations.

use std::sync::Arc;

use flickster_catalog::contract::TABLE_MOVIE;
use flickster_catalog::{ContentKind, ContentValues, FieldValue};
use rusqlite::params;

use crate::clock::{DayClock, SystemDayClock};
use crate::error::ProviderError;
use crate::notify::{ChangeNotifier, NoopNotifier};
use crate::selection::{Query, Selection};
use crate::store::{self, MovieStore, RowSet};
use crate::uri::{MovieUri, ResourceShape};

/// Predicate substituted when a delete names none, so the reported count
/// covers every removed row.
const MATCH_ALL: &str = "1";

/// The movie data-access façade.
pub struct MovieProvider {
    store: MovieStore,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Box<dyn DayClock>,
}

impl MovieProvider {
    /// A provider over `store` that uses the local clock and discards
    /// change notifications.
    pub fn new(store: MovieStore) -> Self {
        Self {
            store,
            notifier: Arc::new(NoopNotifier),
            clock: Box::new(SystemDayClock),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn ChangeNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_clock(mut self, clock: impl DayClock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    /// Date bucket the filter shapes currently resolve to.
    pub fn today(&self) -> i64 {
        self.clock.today()
    }

    /// Content kind for `uri`: a collection for the first three shapes, a
    /// single item for `movie/{date}/{id}`.
    pub fn get_type(&self, uri: &str) -> Result<ContentKind, ProviderError> {
        Ok(MovieUri::parse(uri)?.content_kind())
    }

    /// Query the rows addressed by `uri`.
    ///
    /// The returned set carries `uri` as its notification identifier.
    pub fn query(&self, uri: &str, request: &Query) -> Result<RowSet, ProviderError> {
        let target = MovieUri::parse(uri)?;
        let selection = Selection::for_shape(target.shape(), self.clock.today());
        let (clause, args, order) = selection.resolve(request);
        log::debug!("query {} -> {:?}", target, target.shape());

        let conn = self.store.connection()?;
        let mut rows = store::query(
            conn,
            TABLE_MOVIE,
            request.projection.as_deref(),
            clause,
            args,
            None,
            None,
            order,
        )?;
        rows.notification_uri = Some(target);
        Ok(rows)
    }

    /// Insert one row, replacing any row with the same id.
    ///
    /// Returns the item identifier `movie/{date}/{id}` of the written row.
    /// The write and the date read-back share a transaction, so a row whose
    /// date is not an integer is rolled back rather than left behind.
    pub fn insert(&self, uri: &str, values: &ContentValues) -> Result<MovieUri, ProviderError> {
        let target = MovieUri::parse(uri)?;
        let ResourceShape::AllMovies = target.shape() else {
            return Err(ProviderError::unsupported(uri));
        };

        let conn = self.store.connection()?;
        let (date, id) = store::with_transaction(conn, |tx| -> Result<_, ProviderError> {
            let id = store::insert_or_replace(tx, TABLE_MOVIE, values)?;
            if !is_valid_row_id(id) {
                return Err(ProviderError::insert_failed(uri));
            }
            let date: i64 = tx.query_row(
                "SELECT date FROM movie WHERE rowid = ?1",
                params![id],
                |row| row.get(0),
            )?;
            Ok((date, id))
        })?;

        self.notifier.notify_change(&target);
        Ok(MovieUri::from_shape(ResourceShape::ByDateAndId { date, id }))
    }

    /// Insert a batch of rows.
    ///
    /// For the movie collection the whole batch runs in one transaction: any
    /// engine error rolls back every row. Rows the engine accepts without a
    /// valid row id are left out of the count. Other targets fall back to
    /// inserting one row at a time.
    pub fn bulk_insert(&self, uri: &str, rows: &[ContentValues]) -> Result<usize, ProviderError> {
        let target = MovieUri::parse(uri)?;
        let ResourceShape::AllMovies = target.shape() else {
            return self.insert_each(uri, rows);
        };

        let conn = self.store.connection()?;
        let accepted = store::with_transaction(conn, |tx| -> Result<usize, ProviderError> {
            let mut accepted = 0;
            for values in rows {
                let id = store::insert_or_replace(tx, TABLE_MOVIE, values)?;
                if is_valid_row_id(id) {
                    accepted += 1;
                } else {
                    log::warn!("Engine returned row id {} during bulk insert into {}", id, target);
                }
            }
            Ok(accepted)
        })?;

        log::info!("Bulk inserted {} of {} row(s) into {}", accepted, rows.len(), target);
        if accepted > 0 {
            self.notifier.notify_change(&target);
        }
        Ok(accepted)
    }

    /// Update rows in the movie collection. Returns the number changed.
    pub fn update(
        &self,
        uri: &str,
        values: &ContentValues,
        selection: Option<&str>,
        args: &[FieldValue],
    ) -> Result<usize, ProviderError> {
        let target = MovieUri::parse(uri)?;
        let ResourceShape::AllMovies = target.shape() else {
            return Err(ProviderError::unsupported(uri));
        };

        let conn = self.store.connection()?;
        let updated = store::update(conn, TABLE_MOVIE, values, selection, args)?;
        if updated > 0 {
            self.notifier.notify_change(&target);
        }
        Ok(updated)
    }

    /// Delete rows from the movie collection. Returns the number removed.
    ///
    /// With no selection every row is removed and counted.
    pub fn delete(
        &self,
        uri: &str,
        selection: Option<&str>,
        args: &[FieldValue],
    ) -> Result<usize, ProviderError> {
        let target = MovieUri::parse(uri)?;
        let ResourceShape::AllMovies = target.shape() else {
            return Err(ProviderError::unsupported(uri));
        };

        let selection = match selection.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => MATCH_ALL,
        };

        let conn = self.store.connection()?;
        let deleted = store::delete(conn, TABLE_MOVIE, Some(selection), args)?;
        if selection == MATCH_ALL {
            log::info!("Cleared {} row(s) from {}", deleted, target);
        }
        if deleted > 0 {
            self.notifier.notify_change(&target);
        }
        Ok(deleted)
    }

    /// Default batch path for targets without a transactional bulk insert.
    fn insert_each(&self, uri: &str, rows: &[ContentValues]) -> Result<usize, ProviderError> {
        for values in rows {
            self.insert(uri, values)?;
        }
        Ok(rows.len())
    }
}

fn is_valid_row_id(id: i64) -> bool {
    id > 0
}
