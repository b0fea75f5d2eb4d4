mod common;

use assert2::{check, let_assert};
use common::{CatalogDir, catalog_dir, mon, pokedex};
use poke_suggest::CatalogEntry;
use poke_suggest::config::Config;
use poke_suggest::state::SuggestState;
use poke_suggest::tools::{
    GetRequest, ListRequest, SuggestRequest, handle_get, handle_list, handle_refresh, handle_suggest,
};
use rstest::rstest;
use serde_json::Value;

async fn load_state(dir: &CatalogDir) -> SuggestState {
    let config = Config {
        catalog_path: dir.path().to_path_buf(),
        ..Config::default()
    };
    SuggestState::load(&config).await.unwrap()
}

fn suggest_request(query: &str) -> SuggestRequest {
    SuggestRequest {
        query: query.to_string(),
        limit: None,
        entry_type: None,
        ability: None,
    }
}

fn list_request(page: usize, page_size: usize) -> ListRequest {
    ListRequest {
        entry_type: None,
        ability: None,
        page,
        page_size,
    }
}

/// Test: Suggestions render as a camelCase JSON array.
#[rstest]
#[tokio::test]
async fn suggest_returns_json(catalog_dir: CatalogDir) {
    let state = load_state(&catalog_dir).await;

    let output = handle_suggest(&state, suggest_request("char")).await.unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    let_assert!(Some(results) = value.as_array());
    check!(results.len() == 3);
    check!(results[0]["name"] == "charizard");
    check!(results[0]["imageUrl"] == "https://img.example/6.png");
    check!(results[0]["types"] == serde_json::json!(["fire", "flying"]));
    check!(results[0]["score"].is_f64());
}

/// Test: Short queries yield an empty array rather than an error.
#[rstest]
#[tokio::test]
async fn suggest_short_query_is_empty(catalog_dir: CatalogDir) {
    let state = load_state(&catalog_dir).await;
    let output = handle_suggest(&state, suggest_request("c")).await.unwrap();
    check!(output.trim() == "[]");
    check!(!state.engine.is_initialized());
}

/// Test: Filters pass through to ranking.
#[rstest]
#[tokio::test]
async fn suggest_applies_filters(catalog_dir: CatalogDir) {
    let state = load_state(&catalog_dir).await;
    let request = SuggestRequest {
        limit: Some(2),
        entry_type: Some("Psychic".to_string()),
        ..suggest_request("mew")
    };

    let value: Value = serde_json::from_str(&handle_suggest(&state, request).await.unwrap()).unwrap();
    let_assert!(Some(results) = value.as_array());
    check!(results.len() == 2);
    check!(results.iter().all(|r| r["types"] == serde_json::json!(["psychic"])));
}

/// Test: Listing pages through the catalog in id order.
#[rstest]
#[case(1, 4, 4, 1)]
#[case(2, 4, 4, 7)]
#[case(4, 4, 3, 150)]
#[case(5, 4, 0, 0)]
#[tokio::test]
async fn list_pages_in_id_order(
    catalog_dir: CatalogDir,
    #[case] page: usize,
    #[case] page_size: usize,
    #[case] expected_len: usize,
    #[case] first_id: u64,
) {
    let state = load_state(&catalog_dir).await;

    let output = handle_list(&state, list_request(page, page_size)).await.unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    check!(value["totalCount"] == 15);
    check!(value["page"] == page);
    check!(value["pageSize"] == page_size);
    let_assert!(Some(items) = value["items"].as_array());
    check!(items.len() == expected_len);
    if let Some(first) = items.first() {
        check!(first["id"] == first_id);
    }
}

/// Test: Listing filters by type and ability together.
#[rstest]
#[tokio::test]
async fn list_filters_by_type_and_ability(catalog_dir: CatalogDir) {
    let state = load_state(&catalog_dir).await;
    let request = ListRequest {
        entry_type: Some("ELECTRIC".to_string()),
        ability: Some("static".to_string()),
        ..list_request(1, 20)
    };

    let value: Value = serde_json::from_str(&handle_list(&state, request).await.unwrap()).unwrap();
    check!(value["totalCount"] == 3);
    let_assert!(Some(items) = value["items"].as_array());
    let names: Vec<_> = items.iter().map(|i| i["name"].as_str().unwrap()).collect();
    check!(names == ["pikachu", "raichu", "pichu"]);
}

/// Test: Each lookup counts a view; unknown ids are reported.
#[rstest]
#[tokio::test]
async fn get_counts_views(catalog_dir: CatalogDir) {
    let state = load_state(&catalog_dir).await;

    let first: Value = serde_json::from_str(&handle_get(&state, GetRequest { id: 151 }).await.unwrap()).unwrap();
    check!(first["name"] == "mew");
    check!(first["popularity"] == 81);

    handle_get(&state, GetRequest { id: 151 }).await.unwrap();
    let_assert!(Some(mew) = state.store.get(151).await);
    check!(mew.popularity == 82);

    let_assert!(Err(message) = handle_get(&state, GetRequest { id: 9999 }).await);
    check!(message == "Pokémon 9999 not found");
}

/// Test: Refresh re-reads the catalog file and rebuilds the index.
#[rstest]
#[tokio::test]
async fn refresh_rereads_catalog_file(catalog_dir: CatalogDir) {
    let state = load_state(&catalog_dir).await;
    let before: Value =
        serde_json::from_str(&handle_suggest(&state, suggest_request("bulba")).await.unwrap()).unwrap();
    check!(before[0]["name"] == "bulbasaur");
    check!(before.as_array().unwrap().iter().all(|r| r["name"] != "ivysaur"));

    catalog_dir.write(&[
        mon(1, "bulbasaur", &["grass", "poison"], &["overgrow"], 40),
        mon(2, "ivysaur", &["grass", "poison"], &["overgrow"], 35),
    ]);

    let message = handle_refresh(&state).await.unwrap();
    check!(message.starts_with("Catalog refreshed from"));
    check!(message.ends_with(": 2 entries"));

    let after: Value =
        serde_json::from_str(&handle_suggest(&state, suggest_request("saur")).await.unwrap()).unwrap();
    let names: Vec<_> = after
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    check!(names == ["bulbasaur", "ivysaur"]);
}

/// Test: A broken catalog file fails the refresh and keeps the old index.
#[rstest]
#[tokio::test]
async fn refresh_with_broken_file_keeps_index(catalog_dir: CatalogDir) {
    let state = load_state(&catalog_dir).await;
    handle_suggest(&state, suggest_request("pika")).await.unwrap();

    std::fs::write(catalog_dir.path(), "{ not json").unwrap();

    let_assert!(Err(message) = handle_refresh(&state).await);
    check!(message.starts_with("Failed to refresh catalog"));
    check!(state.engine.snapshot_len().await == Some(15));
    check!(state.store.len().await == 15);
}

/// Test: A catalog file with an unusable entry is rejected before the store
/// changes, so listing and suggestions agree on the old catalog.
#[rstest]
#[case(vec![CatalogEntry::new(0, "missingno"), mon(2, "ivysaur", &["grass"], &[], 35)])]
#[case(vec![CatalogEntry::new(2, "   "), mon(3, "venusaur", &["grass"], &[], 30)])]
#[case(vec![mon(2, "ivysaur", &["grass"], &[], 35), mon(2, "venusaur", &["grass"], &[], 30)])]
#[tokio::test]
async fn refresh_with_invalid_entries_changes_nothing(
    catalog_dir: CatalogDir,
    #[case] replacement: Vec<CatalogEntry>,
) {
    let state = load_state(&catalog_dir).await;
    handle_suggest(&state, suggest_request("pika")).await.unwrap();
    handle_get(&state, GetRequest { id: 151 }).await.unwrap();

    catalog_dir.write(&replacement);

    let_assert!(Err(message) = handle_refresh(&state).await);
    check!(message.contains("invalid catalog"));
    check!(state.store.len().await == 15);
    check!(state.engine.snapshot_len().await == Some(15));
    let_assert!(Some(mew) = state.store.get(151).await);
    check!(mew.popularity == 81);

    let listing: Value = serde_json::from_str(&handle_list(&state, list_request(1, 20)).await.unwrap()).unwrap();
    check!(listing["totalCount"] == 15);
}

/// Test: A catalog file with a repeated id fails to load instead of dropping a record.
#[rstest]
#[tokio::test]
async fn load_rejects_duplicate_ids(mut pokedex: Vec<CatalogEntry>) {
    pokedex.push(mon(25, "raichu", &["electric"], &["static"], 60));
    let dir = CatalogDir::new(&pokedex);
    let config = Config {
        catalog_path: dir.path().to_path_buf(),
        ..Config::default()
    };

    let_assert!(Err(err) = SuggestState::load(&config).await);
    check!(format!("{:#}", err).contains("duplicate id 25"));
}
