//! Business services. Each one is built once at startup, owns the pool
//! handle, and enforces the rules its repository does not.

pub mod buyers;
pub mod cars;
pub mod sales;
pub mod sellers;
pub mod stocks;
pub mod users;

pub use buyers::BuyerService;
pub use cars::CarService;
pub use sales::SaleService;
pub use sellers::SellerService;
pub use stocks::StockService;
pub use users::UserService;

use sea_orm::SqlErr;

use crate::errors::ServiceError;

/// One page of a listing together with the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Turns a unique-index violation into the conflict the pre-check would have
/// reported. Two concurrent creates can both pass the pre-check; the index
/// decides which one wins.
pub(crate) fn unique_violation_as(
    err: ServiceError,
    conflict: impl FnOnce() -> ServiceError,
) -> ServiceError {
    match &err {
        ServiceError::DatabaseError(db_err)
            if matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
        {
            conflict()
        }
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EntityKind;
    use sea_orm::DbErr;

    #[test]
    fn page_map_keeps_total() {
        let page = Page::new(vec![1, 2, 3], 10).map(|n| n * 2);
        assert_eq!(page.items, vec![2, 4, 6]);
        assert_eq!(page.total, 10);
    }

    #[test]
    fn non_unique_errors_pass_through() {
        let err = unique_violation_as(ServiceError::DatabaseError(DbErr::Custom("x".into())), || {
            ServiceError::already_exists(EntityKind::Car, "name", "x")
        });
        assert!(matches!(err, ServiceError::DatabaseError(_)));
    }
}
