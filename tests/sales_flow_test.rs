mod common;

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use carshop_api::{
    dto::CreateSaleInput,
    errors::{SaleViolation, ServiceError},
    repositories::SaleFilter,
};
use common::{read_json, TestApp};
use sea_orm::ConnectionTrait;
use serde_json::json;

#[tokio::test]
async fn sale_takes_one_unit_of_stock() {
    let app = TestApp::new().await;
    let (car_id, buyer_id, seller_id) = app.seed_showroom(10).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/sales",
            Some(json!({ "car_id": car_id, "buyer_id": buyer_id, "seller_id": seller_id })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["car"]["name"], "Galardo");
    assert_eq!(body["buyer"]["name"], "Bruce Lee");
    assert_eq!(body["seller"]["cpf"], "69285717640");
    assert!(body["created_at"].is_string());

    assert_eq!(app.stock_quantity(car_id).await, 9);
}

#[tokio::test]
async fn empty_stock_is_rejected_without_writing() {
    let app = TestApp::new().await;
    let (car_id, buyer_id, seller_id) = app.seed_showroom(0).await;

    let err = app
        .state
        .services
        .sales
        .create_sale(CreateSaleInput {
            car_id,
            buyer_id,
            seller_id,
        })
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::InsufficientStock {
            requested: 1,
            available: 0,
            ..
        }
    );

    assert_eq!(app.stock_quantity(car_id).await, 0);
    let sales = app
        .state
        .services
        .sales
        .list(SaleFilter::default(), 0, 10)
        .await
        .unwrap();
    assert_eq!(sales.total, 0);
}

#[tokio::test]
async fn empty_stock_maps_to_unprocessable_entity() {
    let app = TestApp::new().await;
    let (car_id, buyer_id, seller_id) = app.seed_showroom(0).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/sales",
            Some(json!({ "car_id": car_id, "buyer_id": buyer_id, "seller_id": seller_id })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Insufficient stock"));
}

#[tokio::test]
async fn unknown_car_is_rejected_and_nothing_changes() {
    let app = TestApp::new().await;
    let (car_id, buyer_id, seller_id) = app.seed_showroom(5).await;

    let err = app
        .state
        .services
        .sales
        .create_sale(CreateSaleInput {
            car_id: 99,
            buyer_id,
            seller_id,
        })
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::SaleRejected(ref violations)
            if violations == &vec![SaleViolation::CarNotFound(99), SaleViolation::StockNotFound(99)]
    );

    assert_eq!(app.stock_quantity(car_id).await, 5);
    let sales = app
        .state
        .services
        .sales
        .list(SaleFilter::default(), 0, 10)
        .await
        .unwrap();
    assert_eq!(sales.total, 0);
}

#[tokio::test]
async fn every_missing_reference_is_reported() {
    let app = TestApp::new().await;
    let (_, _, seller_id) = app.seed_showroom(5).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/sales",
            Some(json!({ "car_id": 99, "buyer_id": 98, "seller_id": seller_id })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = read_json(response).await;
    let errors: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors list")
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert_eq!(
        errors,
        vec![
            "car 99 does not exist",
            "buyer 98 does not exist",
            "stock for car 99 does not exist",
        ]
    );
}

#[tokio::test]
async fn car_without_stock_record_is_rejected() {
    let app = TestApp::new().await;
    let car = app.seed_car("Uno", 2012, "Fiat").await;
    let buyer = app.seed_buyer("Bruce Lee", "12996651234").await;
    let seller = app.seed_seller("João da Silva", "69285717640").await;

    let err = app
        .state
        .services
        .sales
        .create_sale(CreateSaleInput {
            car_id: car.id,
            buyer_id: buyer.id,
            seller_id: seller.id,
        })
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::SaleRejected(ref violations)
            if violations == &vec![SaleViolation::StockNotFound(car.id)]
    );
}

#[tokio::test]
async fn listing_without_sales_returns_empty_page() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(Method::GET, "/api/v1/sales", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["pagination"]["total_pages"], 0);
}

#[tokio::test]
async fn failed_insert_rolls_back_the_decrement() {
    let app = TestApp::new().await;
    let (car_id, buyer_id, seller_id) = app.seed_showroom(3).await;

    app.state
        .db
        .execute_unprepared("DROP TABLE sales")
        .await
        .expect("drop sales table");

    let err = app
        .state
        .services
        .sales
        .create_sale(CreateSaleInput {
            car_id,
            buyer_id,
            seller_id,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::DatabaseError(_));

    assert_eq!(app.stock_quantity(car_id).await, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn last_unit_is_sold_exactly_once() {
    let app = TestApp::new().await;
    let (car_id, buyer_id, seller_id) = app.seed_showroom(1).await;

    let attempts = 8;
    let handles: Vec<_> = (0..attempts)
        .map(|_| {
            let sales = app.state.services.sales.clone();
            tokio::spawn(async move {
                sales
                    .create_sale(CreateSaleInput {
                        car_id,
                        buyer_id,
                        seller_id,
                    })
                    .await
            })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    let mut sold = 0;
    for result in results {
        match result.expect("task panicked") {
            Ok(_) => sold += 1,
            Err(err) => assert_matches!(err, ServiceError::InsufficientStock { .. }),
        }
    }

    assert_eq!(sold, 1);
    assert_eq!(app.stock_quantity(car_id).await, 0);
}

#[tokio::test]
async fn deleting_a_sale_keeps_stock_as_is() {
    let app = TestApp::new().await;
    let (car_id, buyer_id, seller_id) = app.seed_showroom(2).await;

    let sale = app
        .state
        .services
        .sales
        .create_sale(CreateSaleInput {
            car_id,
            buyer_id,
            seller_id,
        })
        .await
        .unwrap();

    let response = app
        .request_authenticated(Method::DELETE, &format!("/api/v1/sales/{}", sale.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request_authenticated(Method::GET, &format!("/api/v1/sales/{}", sale.id), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(app.stock_quantity(car_id).await, 1);
}

#[tokio::test]
async fn sales_can_be_filtered_by_reference() {
    let app = TestApp::new().await;
    let (car_id, buyer_id, seller_id) = app.seed_showroom(5).await;
    let other_buyer = app.seed_buyer("Chuck Norris", "11912341234").await;

    for buyer in [buyer_id, buyer_id, other_buyer.id] {
        app.state
            .services
            .sales
            .create_sale(CreateSaleInput {
                car_id,
                buyer_id: buyer,
                seller_id,
            })
            .await
            .unwrap();
    }

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/sales?buyer_id={}", other_buyer.id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["buyer"]["name"], "Chuck Norris");

    let by_car = app.state.services.sales.list_by_car(car_id).await.unwrap();
    assert_eq!(by_car.len(), 3);
    let ids: Vec<i32> = by_car.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let by_seller = app
        .state
        .services
        .sales
        .list_by_seller(seller_id)
        .await
        .unwrap();
    assert_eq!(by_seller.len(), 3);

    let by_buyer = app.state.services.sales.list_by_buyer(buyer_id).await.unwrap();
    assert_eq!(by_buyer.len(), 2);
    assert_eq!(app.stock_quantity(car_id).await, 2);
}
