//! Integration tests for the application services over the in-memory store.
//!
//! These exercise the full orchestration paths: DTO mapping, repository
//! round-trips, the order lifecycle, and the error contract (absence is
//! `false`/`None`, domain rejections are hard errors).

use application::{
    CreateCustomerRequest, CreateOrderItemRequest, CreateOrderRequest, CreateProductRequest,
    CustomerService, OrderService, ProductService, ServiceError, UpdateCustomerRequest,
};
use common::{CustomerId, OrderId, ProductId};
use domain::{DomainError, Money, OrderStatus};
use storage::InMemoryStore;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("application=debug,storage=debug,info")
        .try_init()
        .ok();
}

fn order_service() -> OrderService<InMemoryStore, InMemoryStore> {
    init_tracing();
    let store = InMemoryStore::new();
    OrderService::new(store.clone(), store)
}

fn order_request(customer_id: i64, items: Vec<(i64, u32, i64)>) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id: CustomerId::new(customer_id),
        items: items
            .into_iter()
            .map(|(product_id, quantity, cents)| CreateOrderItemRequest {
                product_id: ProductId::new(product_id),
                quantity,
                unit_price: Money::from_cents(cents),
            })
            .collect(),
    }
}

mod customer_services {
    use super::*;

    #[tokio::test]
    async fn create_get_update_delete_cycle() {
        init_tracing();
        let service = CustomerService::new(InMemoryStore::new());

        let id = service
            .create(CreateCustomerRequest {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
            })
            .await
            .unwrap();

        let fetched = service.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Jane Doe");

        assert!(
            service
                .update(
                    id,
                    UpdateCustomerRequest {
                        name: "Jane Smith".to_string(),
                        email: "jane.smith@example.com".to_string(),
                    },
                )
                .await
                .unwrap()
        );

        let by_email = service
            .get_by_email("jane.smith@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, id);

        assert!(service.delete(id).await.unwrap());
        assert!(service.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_update_propagates_validation() {
        init_tracing();
        let service = CustomerService::new(InMemoryStore::new());
        let id = service
            .create(CreateCustomerRequest {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
            })
            .await
            .unwrap();

        let err = service
            .update(
                id,
                UpdateCustomerRequest {
                    name: "".to_string(),
                    email: "jane@example.com".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Name cannot be empty");
    }

    #[tokio::test]
    async fn paging_exposes_metadata() {
        init_tracing();
        let service = CustomerService::new(InMemoryStore::new());
        for i in 0..7 {
            service
                .create(CreateCustomerRequest {
                    name: format!("Customer {i}"),
                    email: format!("customer{i}@example.com"),
                })
                .await
                .unwrap();
        }

        let page = service.get_paged(3, 3).await.unwrap();
        assert_eq!(page.total_count(), 7);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.items().len(), 1);
        assert!(page.has_previous_page());
        assert!(!page.has_next_page());
    }
}

mod product_services {
    use super::*;

    #[tokio::test]
    async fn round_trips_valid_updates_exactly() {
        init_tracing();
        let service = ProductService::new(InMemoryStore::new());
        let id = service
            .create(CreateProductRequest {
                name: "Widget".to_string(),
                price: Money::from_cents(1050),
            })
            .await
            .unwrap();

        let dto = service.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(dto.price, Money::from_cents(1050));

        assert!(service.delete(id).await.unwrap());
        assert!(!service.delete(id).await.unwrap());
    }
}

mod order_lifecycle {
    use super::*;

    #[tokio::test]
    async fn full_lifecycle_pending_to_delivered() {
        let service = order_service();
        let id = service
            .create(order_request(1, vec![(1, 3, 5000)]))
            .await
            .unwrap();

        let created = service.get_by_id_with_items(id).await.unwrap().unwrap();
        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.total_amount, Money::from_dollars(150));

        assert!(service.mark_as_paid(id).await.unwrap());
        assert_eq!(
            service.get_by_id(id).await.unwrap().unwrap().status,
            OrderStatus::Paid
        );

        assert!(service.ship(id).await.unwrap());
        assert_eq!(
            service.get_by_id(id).await.unwrap().unwrap().status,
            OrderStatus::Shipped
        );

        assert!(service.deliver(id).await.unwrap());
        assert_eq!(
            service.get_by_id(id).await.unwrap().unwrap().status,
            OrderStatus::Delivered
        );

        let err = service.cancel(id).await.unwrap_err();
        assert!(
            err.to_string()
                .contains("Cannot cancel shipped or delivered orders")
        );
    }

    #[tokio::test]
    async fn cancel_from_pending_and_paid() {
        let service = order_service();

        let pending = service.create(order_request(1, vec![])).await.unwrap();
        assert!(service.cancel(pending).await.unwrap());
        assert_eq!(
            service.get_by_id(pending).await.unwrap().unwrap().status,
            OrderStatus::Cancelled
        );

        let paid = service.create(order_request(1, vec![])).await.unwrap();
        service.mark_as_paid(paid).await.unwrap();
        assert!(service.cancel(paid).await.unwrap());
    }

    #[tokio::test]
    async fn transitions_out_of_order_fail_hard() {
        let service = order_service();
        let id = service.create(order_request(1, vec![])).await.unwrap();

        let err = service.deliver(id).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::InvalidState(_))
        ));
        assert_eq!(err.to_string(), "Only shipped orders can be delivered");

        service.mark_as_paid(id).await.unwrap();
        let err = service.mark_as_paid(id).await.unwrap_err();
        assert_eq!(err.to_string(), "Only pending orders can be paid");
    }

    #[tokio::test]
    async fn item_validation_rejects_bad_lines() {
        let service = order_service();

        let err = service
            .create(order_request(1, vec![(1, 0, 1000)]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be positive");

        let err = service
            .create(order_request(1, vec![(1, 1, 0)]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "UnitPrice must be positive");
    }

    #[tokio::test]
    async fn failed_item_write_leaves_parent_behind() {
        // Creation is two repository steps with no transaction spanning
        // them; the parent survives when a later line is rejected.
        let service = order_service();
        let err = service
            .create(order_request(1, vec![(1, 2, 1000), (-1, 1, 500)]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "ProductId must be positive");

        let orphaned = service
            .get_by_customer_id(CustomerId::new(1))
            .await
            .unwrap();
        assert_eq!(orphaned.len(), 1);
        let with_items = service
            .get_by_id_with_items(orphaned[0].id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(with_items.items.len(), 1);
    }

    #[tokio::test]
    async fn listings_group_by_customer() {
        let service = order_service();
        service.create(order_request(1, vec![])).await.unwrap();
        service.create(order_request(2, vec![])).await.unwrap();
        service.create(order_request(1, vec![])).await.unwrap();

        assert_eq!(service.get_all().await.unwrap().len(), 3);
        assert_eq!(
            service
                .get_by_customer_id(CustomerId::new(1))
                .await
                .unwrap()
                .len(),
            2
        );

        let page = service.get_paged(1, 2).await.unwrap();
        assert_eq!(page.items().len(), 2);
        assert_eq!(page.total_count(), 3);
    }

    #[tokio::test]
    async fn delete_cascades_then_reports_absence() {
        let service = order_service();
        let id = service
            .create(order_request(1, vec![(1, 1, 100), (2, 2, 200)]))
            .await
            .unwrap();

        assert!(service.delete(id).await.unwrap());
        assert!(service.get_by_id(id).await.unwrap().is_none());
        assert!(!service.delete(OrderId::new(999)).await.unwrap());
    }
}
