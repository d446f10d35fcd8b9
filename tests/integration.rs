use std::io::Write;

use csv_search::{
    OtherColumns, ProcessorError, QueryCache, SearchOutcome, StarTransform, Table, TableOptions,
};
use tempfile::NamedTempFile;

const CENSUS: &str = "ID Race,Race,ID Year,Year,Household Income by Race,Household Income by Race Moe,Geography,ID Geography,Slug Geography
0,Total,2020,2020,85413,6122,\"Bristol County, RI\",05000US44001,bristol-county-ri
0,Total,2020,2020,75857,2022,\"Kent County, RI\",05000US44003,kent-county-ri
1,White,2020,2020,90438,6418,\"Bristol County, RI\",05000US44001,bristol-county-ri
2,Black,2020,2020,60543,14034,\"Kent County, RI\",05000US44003,kent-county-ri
";

const STARS: &str = "StarID,ProperName,X,Y,Z
0,Sol,0,0,0
1,,282.43485,0.00449,5.36884
70667,Proxima Centauri,-0.47175,-0.36132,-1.15037
";

fn write_tmp(csv: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{}", csv).unwrap();
    tmp
}

#[test]
fn test_census_load_keeps_quoted_geography() {
    let tmp = write_tmp(CENSUS);
    let table = Table::load_csv(tmp.path(), TableOptions::with_header()).unwrap();

    assert_eq!(table.row_count(), 4);
    assert_eq!(table.rows()[0][4], "85413");
    assert_eq!(table.rows()[1][6], "\"Kent County, RI\"");
    assert_eq!(table.columns().position("Race"), Some(1));
    assert_eq!(table.columns().position("Name"), None);
    assert!(table.summary().ragged_rows.is_empty());
}

#[test]
fn test_name_and_index_selectors_agree() {
    let tmp = write_tmp(CENSUS);
    let table = Table::load_csv(tmp.path(), TableOptions::with_header()).unwrap();

    let by_slug = table.search("bristol-county-ri", None).unwrap();
    let by_index = table.search("bristol-county-ri", Some("8")).unwrap();
    let by_name = table.search("bristol-county-ri", Some("Slug Geography")).unwrap();

    assert_eq!(by_slug.match_count(), 2);
    assert_eq!(by_slug, by_index);
    assert_eq!(by_index, by_name);
}

#[test]
fn test_total_by_race() {
    let tmp = write_tmp(CENSUS);
    let table = Table::load_csv(tmp.path(), TableOptions::with_header()).unwrap();

    let outcome = table.search("Total", Some("Race")).unwrap();
    assert_eq!(outcome.match_count(), 2);
    assert_eq!(outcome.display_rows()[0][0], "ID Race");
    assert_eq!(outcome, table.search("Total", None).unwrap());
}

#[test]
fn test_quoted_geography_word_match() {
    let tmp = write_tmp(CENSUS);
    let table = Table::load_csv(tmp.path(), TableOptions::with_header()).unwrap();

    // the quotes are part of the cell, but words inside still match
    let outcome = table.search("Kent County", Some("Geography")).unwrap();
    assert_eq!(outcome.match_count(), 2);
}

#[test]
fn test_value_in_other_column_by_name() {
    let tmp = write_tmp(CENSUS);
    let table = Table::load_csv(tmp.path(), TableOptions::with_header()).unwrap();

    let outcome = table.search("Total", Some("Year")).unwrap();
    assert_eq!(
        outcome,
        SearchOutcome::FoundElsewhere(OtherColumns::Names(vec!["Race".into()]))
    );
    assert_eq!(
        outcome.display_rows().len(),
        0,
        "elsewhere outcomes carry no rows"
    );
}

#[test]
fn test_value_in_other_column_by_index() {
    let tmp = write_tmp(CENSUS);
    let table = Table::load_csv(tmp.path(), TableOptions::with_header()).unwrap();

    match table.search("2020", Some("0")).unwrap() {
        SearchOutcome::FoundElsewhere(other) => {
            assert_eq!(other, OtherColumns::Indices(vec![2, 3]));
            assert!(other.to_string().contains("[2, 3]"));
        }
        other => panic!("expected FoundElsewhere, got {other:?}"),
    }
}

#[test]
fn test_invalid_selector_message() {
    let table = Table::parse_str(
        "State,Race,Income\nRI,White,1058.47\n",
        TableOptions::with_header(),
    )
    .unwrap();

    let err = table.search("RI", Some("9999")).unwrap_err();
    assert!(matches!(err, ProcessorError::InvalidSelector { .. }));
    assert_eq!(
        err.to_string(),
        "You provided an invalid column to search on: 9999. These are the available columns: [\"State\", \"Race\", \"Income\"]"
    );
}

#[test]
fn test_headerless_scan() {
    let table = Table::parse_str(
        "RI,White,\" $1,058.47 \",395773.6521, $1.00 ,75%\nRI,Black, $770.26 ,30424.80376, $0.73 ,6%\n",
        TableOptions::without_header(),
    )
    .unwrap();

    assert_eq!(table.rows()[0].len(), 6);
    let outcome = table.search("RI", None).unwrap();
    assert_eq!(outcome.match_count(), 2);
    assert_eq!(outcome.display_rows()[1][1], "Black");

    let outcome = table.search("$1,058.47", None).unwrap();
    assert_eq!(outcome.match_count(), 1);
}

#[test]
fn test_duplicate_header_file_rejected() {
    let tmp = write_tmp("Race,Race\nWhite,Black\n");
    let err = Table::load_csv(tmp.path(), TableOptions::with_header()).unwrap_err();
    assert!(err.to_string().contains("\"Race\" is repeated"));
}

#[test]
fn test_invalid_utf8_file() {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(b"a,b\n\xff\xfe,c\n").unwrap();
    let err = Table::load_csv(tmp.path(), TableOptions::with_header()).unwrap_err();
    assert!(matches!(err, ProcessorError::Utf8(_)));
}

#[test]
fn test_empty_file_boundaries() {
    let tmp = write_tmp("");
    let with_header = Table::load_csv(tmp.path(), TableOptions::with_header()).unwrap();
    assert!(matches!(
        with_header.search("RI", None),
        Err(ProcessorError::EmptyTable)
    ));

    let tmp = write_tmp("\n\n");
    let without_header = Table::load_csv(tmp.path(), TableOptions::without_header()).unwrap();
    assert_eq!(without_header.row_count(), 0);
    assert_eq!(
        without_header.search("RI", None).unwrap(),
        SearchOutcome::NoMatch
    );
}

#[test]
fn test_star_rows() {
    let tmp = write_tmp(STARS);
    let stars = Table::load_csv_with(tmp.path(), TableOptions::with_header(), &StarTransform)
        .unwrap();

    assert_eq!(stars.row_count(), 3);
    assert_eq!(stars.rows()[2].id, 70667);
    assert_eq!(stars.rows()[1].name, "");
    assert_eq!(stars.columns().position("ProperName"), Some(1));
}

#[test]
fn test_bad_star_row_aborts_load() {
    let tmp = write_tmp("StarID,ProperName,X,Y,Z\n0,Sol,0,0,0\n1,Bad,north,0,0\n");
    let err = Table::load_csv_with(tmp.path(), TableOptions::with_header(), &StarTransform)
        .unwrap_err();

    match err {
        ProcessorError::RowTransform { line, source } => {
            assert_eq!(line, 3);
            assert_eq!(source.row, vec!["1", "Bad", "north", "0", "0"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_cached_query() {
    let tmp = write_tmp(CENSUS);
    let table = Table::load_csv(tmp.path(), TableOptions::with_header()).unwrap();
    let cache = QueryCache::new();

    let first = table
        .query("kent-county-ri")
        .column("Slug Geography")
        .with_cache(&cache)
        .execute()
        .unwrap();
    let second = table
        .query("kent-county-ri")
        .column("Slug Geography")
        .with_cache(&cache)
        .execute()
        .unwrap(); // from cache

    assert_eq!(first, second);
    assert_eq!(first.match_count(), 2);
}

#[test]
fn test_cache_shared_between_files() {
    let census = Table::load_csv(write_tmp(CENSUS).path(), TableOptions::with_header()).unwrap();
    let stars = Table::load_csv(write_tmp(STARS).path(), TableOptions::with_header()).unwrap();
    let cache = QueryCache::new();

    let in_census = census.query("Total").with_cache(&cache).execute().unwrap();
    let in_stars = stars.query("Total").with_cache(&cache).execute().unwrap();

    assert_eq!(in_census.match_count(), 2);
    assert_eq!(in_stars, SearchOutcome::NoMatch);
    assert_eq!(in_stars, stars.search("Total", None).unwrap());
}
