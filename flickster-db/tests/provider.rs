use std::sync::Arc;

use flickster_catalog::contract::*;
use flickster_catalog::{ContentKind, ContentValues, FieldValue, MovieRecord};
use flickster_db::*;

const TODAY: i64 = 1_704_067_200_000;
const DAY: i64 = 20240101;

fn provider() -> (MovieProvider, Arc<ObserverRegistry>) {
    let registry = Arc::new(ObserverRegistry::new());
    let provider = MovieProvider::new(MovieStore::memory())
        .with_notifier(registry.clone())
        .with_clock(FixedDayClock(TODAY));
    (provider, registry)
}

fn movie(id: i64, date: i64, title: &str) -> MovieRecord {
    MovieRecord::new(id, date, title)
}

fn watch(registry: &ObserverRegistry, uri: &str) -> std::sync::mpsc::Receiver<ChangeEvent> {
    registry.register(MovieUri::parse(uri).unwrap(), true)
}

fn ids(rows: &RowSet) -> Vec<i64> {
    rows.records().unwrap().iter().map(|m| m.id).collect()
}

#[test]
fn query_by_date_returns_only_that_day() {
    let (provider, _) = provider();
    let rows = vec![
        movie(1, DAY, "Heat").to_values(),
        movie(2, DAY, "Alien").to_values(),
        movie(3, DAY + 1, "Ran").to_values(),
    ];
    provider.bulk_insert("movie", &rows).unwrap();

    let result = provider
        .query("movie/20240101", &Query::new().order_by("id"))
        .unwrap();
    assert_eq!(ids(&result), vec![1, 2]);

    // A caller selection is ignored for the by-date shape.
    let result = provider
        .query("movie/20240101", &Query::new().filter("id = ?").arg(3i64))
        .unwrap();
    assert_eq!(result.len(), 2);
}

#[test]
fn query_by_date_and_id_returns_at_most_one_row() {
    let (provider, _) = provider();
    provider
        .bulk_insert(
            "movie",
            &[movie(1, DAY, "Heat").to_values(), movie(2, DAY, "Alien").to_values()],
        )
        .unwrap();

    let hit = provider.query("movie/20240101/2", &Query::new()).unwrap();
    assert_eq!(ids(&hit), vec![2]);

    let wrong_day = provider.query("movie/20240102/2", &Query::new()).unwrap();
    assert!(wrong_day.is_empty());
}

#[test]
fn query_sets_notification_uri_and_projection() {
    let (provider, _) = provider();
    provider.insert("movie", &movie(1, DAY, "Heat").to_values()).unwrap();

    let rows = provider
        .query("movie/20240101", &Query::new().columns([COLUMN_ID, COLUMN_TITLE]))
        .unwrap();
    assert_eq!(rows.columns, vec!["id", "title"]);
    assert_eq!(rows.value(0, COLUMN_TITLE), Some(&FieldValue::Text("Heat".into())));
    assert_eq!(
        rows.notification_uri,
        Some(MovieUri::parse("movie/20240101").unwrap())
    );
}

#[test]
fn insert_replaces_existing_row_entirely() {
    let (provider, registry) = provider();
    let rx = watch(&registry, "movie");

    let mut original = movie(7, DAY, "Heat");
    original.overview = Some("A heist.".to_string());
    original.popularity = 40.0;
    provider.insert("movie", &original.to_values()).unwrap();

    let replacement = movie(7, DAY, "Heat (1995)");
    let uri = provider.insert("movie", &replacement.to_values()).unwrap();
    assert_eq!(uri.to_string(), movie_with_date_and_id(DAY, 7));

    let rows = provider.query(&uri.to_string(), &Query::new()).unwrap();
    assert_eq!(rows.records().unwrap(), vec![replacement]);
    assert_eq!(rx.try_iter().count(), 2);
}

#[test]
fn insert_without_required_fields_propagates_engine_error() {
    let (provider, registry) = provider();
    let rx = watch(&registry, "movie");
    let values = ContentValues::new().with(COLUMN_ID, 1i64).with(COLUMN_DATE, DAY);

    let err = provider.insert("movie", &values).unwrap_err();
    assert!(matches!(err, ProviderError::Engine(_)));
    assert!(rx.try_recv().is_err());
}

#[test]
fn insert_rejects_empty_values_and_bad_columns() {
    let (provider, _) = provider();
    let err = provider.insert("movie", &ContentValues::new()).unwrap_err();
    assert!(matches!(err, ProviderError::Engine(EngineError::EmptyValues { .. })));

    let values = movie(1, DAY, "Heat").to_values().with("title; --", "x");
    let err = provider.insert("movie", &values).unwrap_err();
    assert!(matches!(err, ProviderError::Engine(EngineError::InvalidColumn(_))));
}

#[test]
fn insert_with_zero_row_id_fails() {
    let (provider, _) = provider();
    let err = provider
        .insert("movie", &movie(0, DAY, "Zero").to_values())
        .unwrap_err();
    assert!(matches!(err, ProviderError::InsertFailed { .. }));
    assert!(provider.query("movie", &Query::new()).unwrap().is_empty());
}

#[test]
fn insert_with_non_integer_date_leaves_no_row_behind() {
    let (provider, registry) = provider();
    let rx = watch(&registry, "movie");
    let values = ContentValues::new()
        .with("id", 5_i64)
        .with("date", "today")
        .with("title", "Heat");

    let err = provider.insert("movie", &values).unwrap_err();
    assert!(matches!(err, ProviderError::Engine(EngineError::Sqlite(_))));
    assert!(provider.query("movie", &Query::new()).unwrap().is_empty());
    assert!(rx.try_recv().is_err());
}

#[test]
fn bulk_insert_counts_rows_and_notifies_once() {
    let (provider, registry) = provider();
    let rx = watch(&registry, "movie");
    let rows: Vec<ContentValues> = (1..=5)
        .map(|id| movie(id, DAY, &format!("Movie {id}")).to_values())
        .collect();

    assert_eq!(provider.bulk_insert("movie", &rows).unwrap(), 5);
    assert_eq!(provider.query("movie", &Query::new()).unwrap().len(), 5);
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn bulk_insert_skips_invalid_row_ids_in_count() {
    let (provider, _) = provider();
    let rows = vec![
        movie(0, DAY, "Zero").to_values(),
        movie(1, DAY, "One").to_values(),
    ];
    assert_eq!(provider.bulk_insert("movie", &rows).unwrap(), 1);
}

#[test]
fn bulk_insert_of_nothing_is_silent() {
    let (provider, registry) = provider();
    let rx = watch(&registry, "movie");
    assert_eq!(provider.bulk_insert("movie", &[]).unwrap(), 0);
    assert!(rx.try_recv().is_err());
}

#[test]
fn bulk_insert_rolls_back_whole_batch_on_failure() {
    let (provider, registry) = provider();
    provider.insert("movie", &movie(100, DAY, "Existing").to_values()).unwrap();
    let rx = watch(&registry, "movie");

    let broken = ContentValues::new().with(COLUMN_ID, 3i64).with(COLUMN_DATE, DAY);
    let rows = vec![
        movie(1, DAY, "One").to_values(),
        movie(2, DAY, "Two").to_values(),
        broken,
        movie(4, DAY, "Four").to_values(),
    ];
    assert!(provider.bulk_insert("movie", &rows).is_err());

    let all = provider.query("movie", &Query::new()).unwrap();
    assert_eq!(ids(&all), vec![100]);
    assert!(rx.try_recv().is_err());
}

#[test]
fn bulk_insert_on_other_shapes_uses_single_inserts() {
    let (provider, _) = provider();
    let err = provider
        .bulk_insert("movie/20240101", &[movie(1, DAY, "Heat").to_values()])
        .unwrap_err();
    assert!(err.is_unsupported());

    // The per-row fallback has nothing to reject in an empty batch.
    assert_eq!(provider.bulk_insert("movie/popular", &[]).unwrap(), 0);
}

#[test]
fn filters_sort_by_their_scores() {
    let (provider, _) = provider();
    let mut rows = Vec::new();
    for (id, popularity, rating) in [(1, 10.0, 9.0), (2, 30.0, 5.0), (3, 20.0, 7.0)] {
        let mut m = movie(id, TODAY, &format!("Movie {id}"));
        m.popular = true;
        m.top_rated = true;
        m.popularity = popularity;
        m.user_rating = rating;
        rows.push(m.to_values());
    }
    // Popular on another day; must not show up.
    let mut stale = movie(9, TODAY - 86_400_000, "Yesterday");
    stale.popular = true;
    stale.popularity = 99.0;
    rows.push(stale.to_values());
    // Today but not flagged.
    rows.push(movie(10, TODAY, "Unflagged").to_values());
    provider.bulk_insert("movie", &rows).unwrap();

    let popular = provider.query("movie/popular", &Query::new()).unwrap();
    assert_eq!(ids(&popular), vec![2, 3, 1]);

    let top = provider.query("movie/top_rated", &Query::new()).unwrap();
    assert_eq!(ids(&top), vec![1, 3, 2]);

    let overridden = provider
        .query("movie/popular", &Query::new().order_by("id ASC"))
        .unwrap();
    assert_eq!(ids(&overridden), vec![1, 2, 3]);
}

#[test]
fn unknown_filter_serves_the_popular_rows() {
    let (provider, _) = provider();
    let mut popular = movie(1, TODAY, "Popular");
    popular.popular = true;
    let mut top = movie(2, TODAY, "Top");
    top.top_rated = true;
    provider
        .bulk_insert("movie", &[popular.to_values(), top.to_values()])
        .unwrap();

    let rows = provider.query("movie/upcoming", &Query::new()).unwrap();
    assert_eq!(ids(&rows), vec![1]);
}

#[test]
fn update_only_applies_to_the_collection() {
    let (provider, registry) = provider();
    provider.insert("movie", &movie(1, DAY, "Heat").to_values()).unwrap();
    let rx = watch(&registry, "movie");
    let values = ContentValues::new().with(COLUMN_USER_RATING, 8.3);

    let err = provider
        .update("movie/20240101", &values, None, &[])
        .unwrap_err();
    assert!(err.is_unsupported());

    let none = provider
        .update("movie", &values, Some("id = ?"), &[FieldValue::Integer(42)])
        .unwrap();
    assert_eq!(none, 0);
    assert!(rx.try_recv().is_err());

    let one = provider
        .update("movie", &values, Some("id = ?"), &[FieldValue::Integer(1)])
        .unwrap();
    assert_eq!(one, 1);
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn delete_without_predicate_wipes_and_counts() {
    let (provider, registry) = provider();
    let rows: Vec<_> = (1..=4).map(|id| movie(id, DAY, "M").to_values()).collect();
    provider.bulk_insert("movie", &rows).unwrap();
    let rx = watch(&registry, "movie");

    assert_eq!(provider.delete("movie", None, &[]).unwrap(), 4);
    assert!(provider.query("movie", &Query::new()).unwrap().is_empty());
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn delete_matching_nothing_is_silent() {
    let (provider, registry) = provider();
    provider.insert("movie", &movie(1, DAY, "Heat").to_values()).unwrap();
    let rx = watch(&registry, "movie");

    let deleted = provider
        .delete("movie", Some("date = ?"), &[FieldValue::Integer(1)])
        .unwrap();
    assert_eq!(deleted, 0);
    assert!(rx.try_recv().is_err());
}

#[test]
fn out_of_shape_identifiers_fail_everywhere() {
    let (provider, _) = provider();
    let values = movie(1, DAY, "Heat").to_values();
    for bad in ["movie/a/b/c", "movie/20240101/abc", "shows"] {
        assert!(provider.get_type(bad).unwrap_err().is_unsupported());
        assert!(provider.query(bad, &Query::new()).unwrap_err().is_unsupported());
        assert!(provider.insert(bad, &values).unwrap_err().is_unsupported());
        assert!(provider
            .bulk_insert(bad, std::slice::from_ref(&values))
            .unwrap_err()
            .is_unsupported());
        assert!(provider.update(bad, &values, None, &[]).unwrap_err().is_unsupported());
        assert!(provider.delete(bad, None, &[]).unwrap_err().is_unsupported());
    }
    // Routing failures never open the database.
    assert!(!provider.store().is_open());
}

#[test]
fn mutations_on_non_collection_shapes_are_unsupported() {
    let (provider, _) = provider();
    let values = movie(1, DAY, "Heat").to_values();
    for target in ["movie/20240101", "movie/popular", "movie/20240101/1"] {
        assert!(provider.insert(target, &values).unwrap_err().is_unsupported());
        assert!(provider.delete(target, None, &[]).unwrap_err().is_unsupported());
    }
}

#[test]
fn get_type_reports_kinds() {
    let (provider, _) = provider();
    assert_eq!(provider.get_type("movie").unwrap(), ContentKind::Collection);
    assert_eq!(provider.get_type("movie/20240101").unwrap(), ContentKind::Collection);
    assert_eq!(provider.get_type("movie/top_rated").unwrap(), ContentKind::Collection);
    assert_eq!(provider.get_type("movie/20240101/3").unwrap(), ContentKind::Item);
}

#[test]
fn observers_of_a_day_hear_collection_changes() {
    let (provider, registry) = provider();
    let rx = registry.register(MovieUri::parse("movie/20240101").unwrap(), false);
    provider.insert("movie", &movie(1, DAY, "Heat").to_values()).unwrap();
    assert_eq!(rx.try_recv().unwrap().uri, MovieUri::parse("movie").unwrap());
}

#[test]
fn refresh_scenario() {
    let (provider, _) = provider();
    let rows: Vec<_> = [(1, "Heat"), (2, "Alien"), (3, "Ran")]
        .iter()
        .map(|(id, title)| movie(*id, DAY, title).to_values())
        .collect();
    assert_eq!(provider.bulk_insert("movie", &rows).unwrap(), 3);

    assert_eq!(provider.query("movie/20240101", &Query::new()).unwrap().len(), 3);

    let rating = ContentValues::new().with(COLUMN_USER_RATING, 9.1);
    let updated = provider
        .update("movie", &rating, Some("id = ?"), &[FieldValue::Integer(2)])
        .unwrap();
    assert_eq!(updated, 1);

    let row = provider.query("movie/20240101/2", &Query::new()).unwrap();
    let records = row.records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_rating, 9.1);
    assert_eq!(records[0].title, "Alien");

    assert_eq!(provider.delete("movie", None, &[]).unwrap(), 3);
    assert!(provider.query("movie", &Query::new()).unwrap().is_empty());
}

#[test]
fn file_backed_provider_persists_between_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.db");
    {
        let provider = MovieProvider::new(MovieStore::file(&path));
        provider.insert("movie", &movie(1, DAY, "Heat").to_values()).unwrap();
    }
    let provider = MovieProvider::new(MovieStore::file(&path));
    assert_eq!(provider.query("movie", &Query::new()).unwrap().len(), 1);
}
