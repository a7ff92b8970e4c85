mod common;

use assert_matches::assert_matches;
use carshop_api::{
    dto::{SalePatch, UpdateCarInput},
    errors::{EntityKind, ServiceError},
    repositories::{
        BuyerRepository, CarRepository, CrudRepository, SaleFilter, SaleRepository,
        SellerRepository, StockRepository,
    },
};
use chrono::Utc;
use common::TestApp;
use rstest::rstest;

#[rstest]
#[case(3, 1, true, 2)]
#[case(1, 1, true, 0)]
#[case(0, 1, false, 0)]
#[case(2, 3, false, 2)]
#[tokio::test]
async fn decrement_never_goes_below_zero(
    #[case] initial: i32,
    #[case] amount: i32,
    #[case] applied: bool,
    #[case] remaining: i32,
) {
    let app = TestApp::new().await;
    let car = app.seed_car("Ram 3", 2020, "Dodge").await;
    app.seed_stock(car.id, initial).await;

    let db = &*app.state.db;
    let stocks = StockRepository;
    assert_eq!(stocks.decrement(db, car.id, amount).await.unwrap(), applied);

    let stock = stocks.get_by_car_id(db, car.id).await.unwrap().unwrap();
    assert_eq!(stock.quantity, remaining);
}

#[tokio::test]
async fn decrement_without_stock_row_is_a_no_op() {
    let app = TestApp::new().await;
    let db = &*app.state.db;
    assert!(!StockRepository.decrement(db, 1234, 1).await.unwrap());
}

#[tokio::test]
async fn absence_is_none_for_reads_and_not_found_for_writes() {
    let app = TestApp::new().await;
    let db = &*app.state.db;

    assert!(CarRepository.get_by_id(db, 5).await.unwrap().is_none());
    assert!(BuyerRepository.get_by_id(db, 5).await.unwrap().is_none());
    assert!(SellerRepository.get_by_id(db, 5).await.unwrap().is_none());

    let err = CarRepository
        .update(db, 5, UpdateCarInput::default())
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound { entity: EntityKind::Car, id: 5 });

    let err = SellerRepository.delete(db, 5).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound { entity: EntityKind::Seller, id: 5 });

    let err = SaleRepository.require(db, 5).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound { entity: EntityKind::Sale, id: 5 });
}

#[tokio::test]
async fn sale_references_can_be_reassigned_but_not_its_timestamp() {
    let app = TestApp::new().await;
    let (car_id, buyer_id, seller_id) = app.seed_showroom(2).await;
    let other_seller = app.seed_seller("Maria Souza", "11144477735").await;
    let db = &*app.state.db;
    let sales = SaleRepository;

    let created = sales
        .create(
            db,
            carshop_api::dto::NewSale {
                car_id,
                buyer_id,
                seller_id,
                created_at: Utc::now(),
            },
        )
        .await
        .unwrap();

    let updated = sales
        .update(
            db,
            created.id,
            SalePatch {
                seller_id: Some(other_seller.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.seller_id, other_seller.id);
    assert_eq!(updated.car_id, car_id);
    assert_eq!(updated.created_at, created.created_at);

    let filtered = sales
        .list_filtered(
            db,
            SaleFilter {
                seller_id: Some(seller_id),
                ..Default::default()
            },
            0,
            10,
        )
        .await
        .unwrap();
    assert_eq!(filtered, (vec![], 0));
}

#[tokio::test]
async fn get_many_skips_unknown_ids() {
    let app = TestApp::new().await;
    let uno = app.seed_car("Uno", 2012, "Fiat").await;
    let civic = app.seed_car("Civic", 2018, "Honda").await;
    let db = &*app.state.db;

    let cars = CarRepository
        .get_many(db, &[civic.id, 77, uno.id])
        .await
        .unwrap();
    let mut ids: Vec<i32> = cars.iter().map(|c| c.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![uno.id, civic.id]);

    assert!(CarRepository.get_many(db, &[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn repeated_reads_without_writes_agree() {
    let app = TestApp::new().await;
    let (car_id, buyer_id, _) = app.seed_showroom(4).await;
    let db = &*app.state.db;

    let first = CarRepository.get_by_id(db, car_id).await.unwrap();
    let second = CarRepository.get_by_id(db, car_id).await.unwrap();
    assert!(first.is_some());
    assert_eq!(first, second);

    let first = BuyerRepository.get_by_id(db, buyer_id).await.unwrap();
    let second = BuyerRepository.get_by_id(db, buyer_id).await.unwrap();
    assert_eq!(first, second);

    let first = StockRepository.get_by_car_id(db, car_id).await.unwrap();
    let second = StockRepository.get_by_car_id(db, car_id).await.unwrap();
    assert_eq!(first, second);

    assert_eq!(
        CarRepository.get_by_id(db, 404).await.unwrap(),
        CarRepository.get_by_id(db, 404).await.unwrap()
    );
}
