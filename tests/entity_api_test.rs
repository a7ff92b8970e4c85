mod common;

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use carshop_api::{
    dto::{CreateCarInput, CreateSellerInput, UpdateStockInput},
    errors::{EntityKind, ServiceError},
};
use common::{read_json, test_address, TestApp};
use serde_json::json;

#[tokio::test]
async fn duplicate_cpf_is_a_conflict_and_keeps_the_first_seller() {
    let app = TestApp::new().await;
    let first = app.seed_seller("João da Silva", "69285717640").await;

    let err = app
        .state
        .services
        .sellers
        .create(CreateSellerInput {
            name: "Maria Souza".to_string(),
            cpf: "69285717640".to_string(),
            phone: "1188887777".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::AlreadyExists { entity: EntityKind::Seller, field: "cpf", ref value }
            if value == "69285717640"
    );

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/sellers",
            Some(json!({ "name": "Maria Souza", "cpf": "69285717640", "phone": "1188887777" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let stored = app.state.services.sellers.get(first.id).await.unwrap();
    assert_eq!(stored, first);
    assert_eq!(app.state.services.sellers.list(0, 10).await.unwrap().total, 1);
}

#[tokio::test]
async fn seller_lookup_by_cpf() {
    let app = TestApp::new().await;
    let seller = app.seed_seller("João da Silva", "69285717640").await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/sellers/by-cpf/69285717640", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["id"], seller.id);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/sellers/by-cpf/00000000000", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn buyer_phone_is_unique() {
    let app = TestApp::new().await;
    app.seed_buyer("Bruce Lee", "12996651234").await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/buyers",
            Some(json!({
                "name": "Brandon Lee",
                "phone": "12996651234",
                "address": test_address(),
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn buyer_round_trips_its_address() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/buyers",
            Some(json!({
                "name": "Bruce Lee",
                "phone": "12996651234",
                "address": test_address(),
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;

    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/buyers/{}", created["id"]),
            Some(json!({ "address": { "city": "Brasilia" } })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["address"]["city"], "Brasilia");
    assert_eq!(updated["address"]["cep"], "73770-000");
    assert_eq!(updated["name"], "Bruce Lee");

    let response = app
        .request_authenticated(Method::GET, "/api/v1/buyers/search?name=bruce", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn car_identity_is_unique_but_parts_may_repeat() {
    let app = TestApp::new().await;
    app.seed_car("Uno", 2012, "Fiat").await;

    let same_name_other_year = app
        .state
        .services
        .cars
        .create(CreateCarInput {
            name: "Uno".to_string(),
            year: 2013,
            brand: "Fiat".to_string(),
        })
        .await;
    assert!(same_name_other_year.is_ok());

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/cars",
            Some(json!({ "name": "Uno", "year": 2012, "brand": "Fiat" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn car_update_cannot_collide_with_another_car() {
    let app = TestApp::new().await;
    app.seed_car("Uno", 2012, "Fiat").await;
    let civic = app.seed_car("Civic", 2018, "Honda").await;

    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/cars/{}", civic.id),
            Some(json!({ "name": "Uno", "year": 2012, "brand": "Fiat" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/cars/{}", civic.id),
            Some(json!({ "year": 2019 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["year"], 2019);
    assert_eq!(body["name"], "Civic");
}

#[tokio::test]
async fn missing_entities_are_not_found() {
    let app = TestApp::new().await;

    for uri in [
        "/api/v1/cars/42",
        "/api/v1/buyers/42",
        "/api/v1/sellers/42",
        "/api/v1/stocks/42",
        "/api/v1/sales/42",
        "/api/v1/stocks/by-car/42",
    ] {
        let response = app.request_authenticated(Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", uri);
    }

    let response = app
        .request_authenticated(Method::DELETE, "/api/v1/cars/42", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/sellers/42",
            Some(json!({ "name": "Nobody" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stock_requires_an_existing_car_and_is_one_per_car() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/stocks",
            Some(json!({ "car_id": 7, "quantity": 3 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let car = app.seed_car("Ram 3", 2020, "Dodge").await;
    app.seed_stock(car.id, 3).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/stocks",
            Some(json!({ "car_id": car.id, "quantity": 4 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.stock_quantity(car.id).await, 3);
}

#[tokio::test]
async fn stock_quantity_cannot_go_negative() {
    let app = TestApp::new().await;
    let car = app.seed_car("Ram 3", 2020, "Dodge").await;
    let stock = app.seed_stock(car.id, 3).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/stocks",
            Some(json!({ "car_id": car.id, "quantity": -1 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let err = app
        .state
        .services
        .stocks
        .update(
            stock.id,
            UpdateStockInput {
                quantity: Some(-5),
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
    assert_eq!(app.stock_quantity(car.id).await, 3);
}

#[tokio::test]
async fn low_and_available_stock_views() {
    let app = TestApp::new().await;
    let ram = app.seed_car("Ram 3", 2020, "Dodge").await;
    let uno = app.seed_car("Uno", 2012, "Fiat").await;
    let civic = app.seed_car("Civic", 2018, "Honda").await;
    app.seed_stock(ram.id, 10).await;
    app.seed_stock(uno.id, 3).await;
    app.seed_stock(civic.id, 0).await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/stocks/low?threshold=3", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let low = read_json(response).await;
    let low_cars: Vec<&str> = low
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["car"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(low_cars.len(), 2);
    assert!(low_cars.contains(&"Uno"));
    assert!(low_cars.contains(&"Civic"));

    let available = app.state.services.stocks.available(0, 10).await.unwrap();
    let mut names: Vec<&str> = available.iter().map(|s| s.car.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Ram 3", "Uno"]);
}

#[tokio::test]
async fn car_with_stock_cannot_be_deleted() {
    let app = TestApp::new().await;
    let car = app.seed_car("Ram 3", 2020, "Dodge").await;
    app.seed_stock(car.id, 1).await;

    let err = app.state.services.cars.delete(car.id).await.unwrap_err();
    assert_matches!(err, ServiceError::DatabaseError(_));
    assert!(app.state.services.cars.get(car.id).await.is_ok());
}

#[tokio::test]
async fn invalid_payloads_are_bad_requests() {
    let app = TestApp::new().await;

    let cases = [
        ("/api/v1/cars", json!({ "name": "", "year": 2020, "brand": "Dodge" })),
        ("/api/v1/cars", json!({ "name": "T", "year": 1500, "brand": "Ford" })),
        (
            "/api/v1/sellers",
            json!({ "name": "Ana", "cpf": "1234", "phone": "1188887777" }),
        ),
        (
            "/api/v1/sellers",
            json!({ "name": "Ana", "cpf": "6928571764x", "phone": "1188887777" }),
        ),
        (
            "/api/v1/buyers",
            json!({ "name": "Ana", "phone": "phone-number", "address": test_address() }),
        ),
    ];

    for (uri, body) in cases {
        let response = app
            .request_authenticated(Method::POST, uri, Some(body.clone()))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", uri, body);
    }
}

#[tokio::test]
async fn cars_are_paged_in_id_order() {
    let app = TestApp::new().await;
    for year in 2000..2007 {
        app.seed_car("Gol", year, "Volkswagen").await;
    }

    let response = app
        .request_authenticated(Method::GET, "/api/v1/cars?page=2&per_page=3", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;

    let years: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["year"].as_i64().unwrap())
        .collect();
    assert_eq!(years, vec![2003, 2004, 2005]);
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["per_page"], 3);
    assert_eq!(body["pagination"]["total"], 7);
    assert_eq!(body["pagination"]["total_pages"], 3);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/cars?skip=6&limit=10", None)
        .await;
    let body = read_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["year"], 2006);

    let response = app
        .request_authenticated(Method::GET, "/api/v1/cars?skip=50", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["data"], json!([]));
}

#[tokio::test]
async fn out_of_range_offsets_return_an_empty_page() {
    let app = TestApp::new().await;
    app.seed_car("Gol", 2000, "Volkswagen").await;
    let car = app.seed_car("Uno", 2012, "Fiat").await;
    app.seed_stock(car.id, 2).await;

    for uri in [
        "/api/v1/cars?skip=18446744073709551615&limit=1",
        "/api/v1/cars?page=18446744073709551615&per_page=1",
        "/api/v1/stocks/available?skip=18446744073709551615",
        "/api/v1/buyers/search?name=a&skip=18446744073709551615",
    ] {
        let response = app.request_authenticated(Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        let body = read_json(response).await;
        let rows = body.get("data").unwrap_or(&body);
        assert_eq!(rows, &json!([]), "GET {}", uri);
    }

    let response = app
        .request_authenticated(Method::GET, "/api/v1/cars?skip=18446744073709551615", None)
        .await;
    let body = read_json(response).await;
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["pagination"]["offset"], i64::MAX);
}
