use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use cookable_api::{create_router, AppState, Config};

fn test_config() -> Config {
    Config {
        recipes_csv_path: concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample_recipes.csv")
            .to_string(),
        ..Config::default()
    }
}

fn create_test_server_with(config: Config) -> TestServer {
    let state = AppState::from_config(&config).unwrap();
    let app = create_router(Arc::new(state));
    TestServer::new(app).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(test_config())
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn test_list_ingredients() {
    let server = create_test_server();
    let response = server.get("/api/v1/ingredients").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["ingredients"].as_array().unwrap().len(), 25);
    assert_eq!(body["ingredients"][0]["name"], "Eggs");
    assert!(body["pantry_staples"]
        .as_array()
        .unwrap()
        .contains(&json!("Salt")));
}

#[tokio::test]
async fn test_list_and_get_recipes() {
    let server = create_test_server();

    let response = server.get("/api/v1/recipes").await;
    response.assert_status_ok();
    let recipes: Vec<Value> = response.json();
    assert_eq!(recipes.len(), 25);

    let response = server.get("/api/v1/recipes/Greek%20Salad").await;
    response.assert_status_ok();
    let recipe: Value = response.json();
    assert_eq!(recipe["name"], "Greek Salad");
    assert_eq!(recipe["difficulty"], "easy");
    assert_eq!(recipe["cooking_time"], 10);
}

#[tokio::test]
async fn test_unknown_recipe_is_not_found() {
    let server = create_test_server();
    let response = server.get("/api/v1/recipes/Beef%20Wellington").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Beef Wellington"));
}

#[tokio::test]
async fn test_recommendations_flow() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "ingredients": ["Eggs", "Flour", "Milk", "Banana"]
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert!(!recommendations.is_empty());
    assert!(recommendations.len() <= 5);

    for recipe in recommendations {
        assert!(recipe["num_missing"].as_u64().unwrap() <= 2);
        assert!(recipe["cluster_id"].is_u64());
    }

    let names: Vec<&str> = recommendations
        .iter()
        .map(|r| r["recipe_name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Banana Pancakes"));
}

#[tokio::test]
async fn test_recommendations_respect_overrides() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "ingredients": ["Eggs"],
            "max_missing": 3,
            "top_n": 2
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert!(recommendations.len() <= 2);
    assert!(body["feasible_count"].as_u64().unwrap() >= recommendations.len() as u64);
    for recipe in recommendations {
        assert!(recipe["num_missing"].as_u64().unwrap() <= 3);
    }
}

#[tokio::test]
async fn test_recommendations_with_no_match_is_empty() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "ingredients": ["Lemon"],
            "max_missing": 0
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["feasible_count"], 0);
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recommendations_without_ingredients_is_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "ingredients": [] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cluster_summary_and_detail() {
    let server = create_test_server();

    let response = server.get("/api/v1/clusters").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["n_clusters"], 5);

    let clusters = body["clusters"].as_array().unwrap();
    assert_eq!(clusters.len(), 5);
    let total: u64 = clusters
        .iter()
        .map(|c| c["num_recipes"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 25);

    let response = server.get("/api/v1/clusters/0").await;
    response.assert_status_ok();
    let cluster: Value = response.json();
    assert_eq!(cluster["cluster_id"], 0);
    assert_eq!(
        cluster["recipes"].as_array().unwrap().len() as u64,
        clusters[0]["num_recipes"].as_u64().unwrap()
    );

    let response = server.get("/api/v1/clusters/5").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clustering_disabled() {
    let server = create_test_server_with(Config {
        clustering_enabled: false,
        ..test_config()
    });

    let response = server.get("/api/v1/clusters").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "ingredients": ["Pasta", "Tomatoes", "Garlic"] }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    for recipe in body["recommendations"].as_array().unwrap() {
        assert!(recipe["cluster_id"].is_null());
        assert_eq!(recipe["cluster_boost"], 0.0);
    }
}

#[test]
fn test_missing_dataset_aborts_startup() {
    let config = Config {
        recipes_csv_path: "missing/recipes.csv".to_string(),
        ..Config::default()
    };
    let err = AppState::from_config(&config).err().unwrap();
    assert!(err.to_string().contains("missing/recipes.csv"));
}
