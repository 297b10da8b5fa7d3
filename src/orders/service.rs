use std::sync::Arc;
use uuid::Uuid;

use super::error::OrderError;
use super::models::Order;
use super::repository::OrderStore;
use crate::luhn;

/// Order submission and listing.
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Submit an order number for accrual.
    ///
    /// Resubmission by the owner returns [`OrderError::AlreadyUploaded`];
    /// a number held by someone else returns
    /// [`OrderError::OwnedByAnotherUser`]. When two submissions of the
    /// same number race, the uniqueness constraint picks the winner and
    /// the loser re-reads ownership to report the same outcomes.
    pub async fn submit(&self, user_id: Uuid, raw_number: &str) -> Result<(), OrderError> {
        let number = raw_number.trim();
        if number.is_empty() || !luhn::valid(number) {
            return Err(OrderError::InvalidNumber);
        }

        match self.orders.get_by_number(number).await {
            Ok(existing) => {
                return Err(ownership_outcome(&existing, user_id));
            }
            Err(OrderError::NotFound) => {}
            Err(e) => return Err(e),
        }

        match self.orders.create(user_id, number).await {
            Ok(_) => Ok(()),
            Err(OrderError::AlreadyExists) => {
                // Lost the insert race: ownership decides the reply.
                let existing = self.orders.get_by_number(number).await?;
                Err(ownership_outcome(&existing, user_id))
            }
            Err(e) => Err(e),
        }
    }

    /// All orders of the user, newest first.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Order>, OrderError> {
        self.orders.get_by_user(user_id).await
    }
}

fn ownership_outcome(existing: &Order, user_id: Uuid) -> OrderError {
    if existing.user_id == user_id {
        OrderError::AlreadyUploaded
    } else {
        OrderError::OwnedByAnotherUser
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::models::OrderStatus;
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store; `race_with` makes the next create lose the
    /// insert race to the given user, whose row appears mid-flight.
    #[derive(Default)]
    struct InMemoryOrderStore {
        orders: Mutex<HashMap<String, Order>>,
        race_with: Mutex<Option<Uuid>>,
    }

    impl InMemoryOrderStore {
        fn insert_for(&self, user_id: Uuid, number: &str) {
            let now = Utc::now();
            self.orders.lock().unwrap().insert(
                number.to_string(),
                Order {
                    id: Uuid::new_v4(),
                    user_id,
                    number: number.to_string(),
                    status: OrderStatus::New,
                    accrual: None,
                    uploaded_at: now,
                    updated_at: now,
                },
            );
        }
    }

    #[async_trait]
    impl OrderStore for InMemoryOrderStore {
        async fn create(&self, user_id: Uuid, number: &str) -> Result<Order, OrderError> {
            if let Some(rival) = self.race_with.lock().unwrap().take() {
                self.insert_for(rival, number);
                return Err(OrderError::AlreadyExists);
            }
            let mut orders = self.orders.lock().unwrap();
            if orders.contains_key(number) {
                return Err(OrderError::AlreadyExists);
            }
            let now = Utc::now();
            let order = Order {
                id: Uuid::new_v4(),
                user_id,
                number: number.to_string(),
                status: OrderStatus::New,
                accrual: None,
                uploaded_at: now,
                updated_at: now,
            };
            orders.insert(number.to_string(), order.clone());
            Ok(order)
        }

        async fn get_by_number(&self, number: &str) -> Result<Order, OrderError> {
            self.orders
                .lock()
                .unwrap()
                .get(number)
                .cloned()
                .ok_or(OrderError::NotFound)
        }

        async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, OrderError> {
            let mut orders: Vec<Order> = self
                .orders
                .lock()
                .unwrap()
                .values()
                .filter(|o| o.user_id == user_id)
                .cloned()
                .collect();
            orders.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
            Ok(orders)
        }

        async fn get_pending(&self) -> Result<Vec<Order>, OrderError> {
            let mut orders: Vec<Order> = self
                .orders
                .lock()
                .unwrap()
                .values()
                .filter(|o| !o.status.is_terminal())
                .cloned()
                .collect();
            orders.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at));
            Ok(orders)
        }

        async fn update_status(
            &self,
            number: &str,
            status: OrderStatus,
            accrual: Option<Decimal>,
        ) -> Result<(), OrderError> {
            let mut orders = self.orders.lock().unwrap();
            let order = orders.get_mut(number).ok_or(OrderError::NotFound)?;
            order.status = status;
            order.accrual = accrual;
            order.updated_at = Utc::now();
            Ok(())
        }
    }

    const NUMBER: &str = "79927398713";

    fn service() -> (OrderService, Arc<InMemoryOrderStore>) {
        let store = Arc::new(InMemoryOrderStore::default());
        (OrderService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn submit_creates_new_order() {
        let (svc, store) = service();
        let user = Uuid::new_v4();

        svc.submit(user, NUMBER).await.expect("submit");

        let order = store.get_by_number(NUMBER).await.expect("stored");
        assert_eq!(order.user_id, user);
        assert_eq!(order.status, OrderStatus::New);
    }

    #[tokio::test]
    async fn submit_trims_whitespace() {
        let (svc, store) = service();
        svc.submit(Uuid::new_v4(), "  79927398713\n")
            .await
            .expect("submit");
        assert!(store.get_by_number(NUMBER).await.is_ok());
    }

    #[tokio::test]
    async fn submit_rejects_invalid_numbers() {
        let (svc, _store) = service();
        let user = Uuid::new_v4();

        for bad in ["", "   ", "79927398714", "12a45"] {
            assert!(
                matches!(svc.submit(user, bad).await, Err(OrderError::InvalidNumber)),
                "input: {bad:?}"
            );
        }
    }

    #[tokio::test]
    async fn resubmission_by_owner_is_reported() {
        let (svc, _store) = service();
        let user = Uuid::new_v4();

        svc.submit(user, NUMBER).await.expect("first");
        assert!(matches!(
            svc.submit(user, NUMBER).await,
            Err(OrderError::AlreadyUploaded)
        ));
    }

    #[tokio::test]
    async fn submission_of_foreign_number_conflicts() {
        let (svc, store) = service();
        store.insert_for(Uuid::new_v4(), NUMBER);

        assert!(matches!(
            svc.submit(Uuid::new_v4(), NUMBER).await,
            Err(OrderError::OwnedByAnotherUser)
        ));
    }

    #[tokio::test]
    async fn lost_race_resolves_to_owner_outcome() {
        let (svc, store) = service();
        let user = Uuid::new_v4();
        let rival = Uuid::new_v4();

        // The rival's insert lands between our lookup and our insert.
        *store.race_with.lock().unwrap() = Some(rival);
        assert!(matches!(
            svc.submit(user, NUMBER).await,
            Err(OrderError::OwnedByAnotherUser)
        ));

        // Same race, but the winning insert was our own earlier request.
        store.orders.lock().unwrap().clear();
        *store.race_with.lock().unwrap() = Some(user);
        assert!(matches!(
            svc.submit(user, NUMBER).await,
            Err(OrderError::AlreadyUploaded)
        ));
    }
}
