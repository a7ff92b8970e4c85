use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Carshop API",
        version = "1.0.0",
        description = r#"
# Carshop API

Back office for a car dealership: cars, the stock of each car, buyers,
sellers, and the sales that tie them together.

## Authentication

Entity endpoints require a bearer token from `POST /auth/login`:

```
Authorization: Bearer <your-jwt-token>
```

`POST /api/v1/users` is open so the first account can be registered.

## Sales

`POST /api/v1/sales` takes one unit from the car's stock. If the car,
buyer, seller, or stock record is missing, every missing reference is
listed in `errors` and nothing is written. An empty stock is rejected
with 422.

## Pagination

List endpoints accept `skip`/`limit` or `page`/`per_page` and answer with
`{data, pagination}`.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "cars", description = "Car catalogue"),
        (name = "buyers", description = "Buyers and their addresses"),
        (name = "sellers", description = "Sales staff"),
        (name = "stocks", description = "Units on hand per car"),
        (name = "sales", description = "Recording and querying sales"),
        (name = "users", description = "API accounts"),
        (name = "auth", description = "Token issuance")
    ),
    paths(
        crate::handlers::auth::login,
        crate::handlers::auth::me,

        crate::handlers::cars::list_cars,
        crate::handlers::cars::get_car,
        crate::handlers::cars::create_car,
        crate::handlers::cars::update_car,
        crate::handlers::cars::delete_car,

        crate::handlers::buyers::list_buyers,
        crate::handlers::buyers::get_buyer,
        crate::handlers::buyers::get_buyer_by_phone,
        crate::handlers::buyers::search_buyers,
        crate::handlers::buyers::create_buyer,
        crate::handlers::buyers::update_buyer,
        crate::handlers::buyers::delete_buyer,

        crate::handlers::sellers::list_sellers,
        crate::handlers::sellers::get_seller,
        crate::handlers::sellers::get_seller_by_cpf,
        crate::handlers::sellers::create_seller,
        crate::handlers::sellers::update_seller,
        crate::handlers::sellers::delete_seller,

        crate::handlers::stocks::list_stocks,
        crate::handlers::stocks::get_stock,
        crate::handlers::stocks::get_stock_by_car,
        crate::handlers::stocks::low_stock,
        crate::handlers::stocks::available_stock,
        crate::handlers::stocks::create_stock,
        crate::handlers::stocks::update_stock,
        crate::handlers::stocks::delete_stock,

        crate::handlers::sales::list_sales,
        crate::handlers::sales::get_sale,
        crate::handlers::sales::create_sale,
        crate::handlers::sales::delete_sale,

        crate::handlers::users::list_users,
        crate::handlers::users::list_active_users,
        crate::handlers::users::get_user,
        crate::handlers::users::create_user,
        crate::handlers::users::update_user,
        crate::handlers::users::deactivate_user,
        crate::handlers::users::delete_user,
    ),
    components(
        schemas(
            crate::handlers::common::PaginationMeta,

            crate::dto::CarResponse,
            crate::dto::CreateCarInput,
            crate::dto::UpdateCarInput,

            crate::dto::Address,
            crate::dto::AddressPatch,
            crate::dto::BuyerResponse,
            crate::dto::CreateBuyerInput,
            crate::dto::UpdateBuyerInput,

            crate::dto::SellerResponse,
            crate::dto::CreateSellerInput,
            crate::dto::UpdateSellerInput,

            crate::dto::StockResponse,
            crate::dto::CreateStockInput,
            crate::dto::UpdateStockInput,

            crate::dto::SaleDetail,
            crate::dto::CreateSaleInput,

            crate::dto::UserResponse,
            crate::dto::CreateUserInput,
            crate::dto::UpdateUserInput,

            crate::auth::LoginRequest,
            crate::auth::TokenResponse,

            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_every_resource() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Carshop API"));
        for path in [
            "/api/v1/cars",
            "/api/v1/buyers/by-phone/{phone}",
            "/api/v1/sellers/by-cpf/{cpf}",
            "/api/v1/stocks/low",
            "/api/v1/sales",
            "/api/v1/users/{id}/deactivate",
            "/auth/login",
        ] {
            assert!(json.contains(path), "missing {}", path);
        }
        assert!(json.contains("bearer_auth"));
    }
}
