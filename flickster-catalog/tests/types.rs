use flickster_catalog::contract::*;
use flickster_catalog::*;

fn test_movie() -> MovieRecord {
    MovieRecord {
        id: 550,
        date: 1_704_067_200_000,
        popular: true,
        top_rated: true,
        popularity: 61.4,
        user_rating: 8.4,
        title: "Fight Club".to_string(),
        original_title: Some("Fight Club".to_string()),
        overview: None,
        poster_path: Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg".to_string()),
        backdrop_path: None,
        release_date: Some("1999-10-15".to_string()),
    }
}

#[test]
fn to_values_writes_every_column() {
    let values = test_movie().to_values();
    assert_eq!(values.len(), MOVIE_COLUMNS.len());
    for column in MOVIE_COLUMNS {
        assert!(values.contains(column), "missing column '{}'", column);
    }
    assert_eq!(values.get(COLUMN_POPULAR), Some(&FieldValue::Integer(1)));
    assert_eq!(values.get(COLUMN_OVERVIEW), Some(&FieldValue::Null));
}

#[test]
fn from_values_reads_back_the_same_record() {
    let movie = test_movie();
    let back = MovieRecord::from_values(&movie.to_values()).unwrap();
    assert_eq!(back, movie);
}

#[test]
fn from_values_accepts_integer_scores() {
    let values = test_movie()
        .to_values()
        .with(COLUMN_POPULARITY, 12i64)
        .with(COLUMN_USER_RATING, 7i64);
    let movie = MovieRecord::from_values(&values).unwrap();
    assert_eq!(movie.popularity, 12.0);
    assert_eq!(movie.user_rating, 7.0);
}

#[test]
fn from_values_reports_missing_and_mistyped_fields() {
    let mut values = test_movie().to_values();
    values.remove(COLUMN_DATE);
    assert_eq!(
        MovieRecord::from_values(&values),
        Err(RecordError::MissingField(COLUMN_DATE))
    );

    let values = test_movie().to_values().with(COLUMN_TITLE, 5i64);
    assert!(matches!(
        MovieRecord::from_values(&values),
        Err(RecordError::WrongType { field: "title", .. })
    ));
}

#[test]
fn parse_loose_picks_the_narrowest_type() {
    assert_eq!(FieldValue::parse_loose("42"), FieldValue::Integer(42));
    assert_eq!(FieldValue::parse_loose("7.5"), FieldValue::Real(7.5));
    assert_eq!(FieldValue::parse_loose("NULL"), FieldValue::Null);
    assert_eq!(
        FieldValue::parse_loose("top_rated"),
        FieldValue::Text("top_rated".to_string())
    );
}

#[test]
fn movie_json_uses_defaults_for_optional_fields() {
    let movie: MovieRecord =
        serde_json::from_str(r#"{"id": 1, "date": 20240101, "title": "Heat"}"#).unwrap();
    assert_eq!(movie, MovieRecord::new(1, 20240101, "Heat"));
}

#[test]
fn content_values_serialize_as_a_flat_object() {
    let values = ContentValues::new()
        .with(COLUMN_ID, 3i64)
        .with(COLUMN_TITLE, "Alien")
        .with(COLUMN_OVERVIEW, None::<String>);
    let json = serde_json::to_string(&values).unwrap();
    assert_eq!(json, r#"{"id":3,"overview":null,"title":"Alien"}"#);
}
