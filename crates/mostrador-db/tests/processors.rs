//! Order, purchase and register scenarios, run against both storage
//! backends.

use std::sync::Arc;

use mostrador_core::catalog::{ProductPatch, SupplierInput};
use mostrador_core::order::{CartLine, NewOrder};
use mostrador_core::purchase::{NewPurchase, NewPurchaseLine};
use mostrador_core::{
    CashRegister, Client, ClosedRegisterPolicy, CoreError, Money, PaymentMethod, Product,
    StockPolicy, TransactionKind, ValidationError, MAX_STOCK,
};
use mostrador_db::{
    open_store, DbConfig, MemoryStore, PosError, PosServices, ProcessorPolicy, StorageBackend,
    Store,
};

// =============================================================================
// Fixtures
// =============================================================================

async fn memory_store() -> Arc<dyn Store> {
    Arc::new(MemoryStore::new())
}

async fn sqlite_store() -> Arc<dyn Store> {
    open_store(StorageBackend::Sqlite, DbConfig::in_memory())
        .await
        .unwrap()
}

fn product(id: &str, name: &str, price_cents: i64, stock: i64) -> Product {
    let now = chrono::Utc::now();
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: "Platos Fuertes".to_string(),
        price_cents,
        cost_cents: price_cents / 2,
        stock,
        unit: "unidad".to_string(),
        sku: String::new(),
        image: None,
        created_at: now,
        updated_at: now,
    }
}

/// Burger (stock 50), fries (stock 2), one regular client, one supplier.
async fn setup(store: Arc<dyn Store>, policy: ProcessorPolicy, open_register: bool) -> PosServices {
    store
        .upsert_product(product("burger", "Hamburguesa Clásica", 1250, 50))
        .await
        .unwrap();
    store
        .upsert_product(product("fries", "Papas Fritas", 450, 2))
        .await
        .unwrap();
    store
        .upsert_client(Client {
            id: "juan".to_string(),
            name: "Juan Pérez".to_string(),
            phone: "555-0101".to_string(),
            email: "juan@example.com".to_string(),
            total_spent_cents: 15_000,
            visits: 5,
        })
        .await
        .unwrap();

    let services = PosServices::new(store, policy);
    services
        .catalog
        .save_supplier(SupplierInput {
            id: Some("distri".to_string()),
            name: "Distribuidora Alimentos SA".to_string(),
            contact: "Carlos Ruiz".to_string(),
            email: "ventas@distri.com".to_string(),
            category: "Insumos Generales".to_string(),
        })
        .await
        .unwrap();

    if open_register {
        services.register.open(Money::from_cents(10_000)).await.unwrap();
    }
    services
}

async fn default_setup(store: Arc<dyn Store>) -> PosServices {
    setup(store, ProcessorPolicy::default(), true).await
}

fn line(product_id: &str, unit_price_cents: i64, quantity: i64) -> CartLine {
    CartLine {
        product_id: product_id.to_string(),
        name: product_id.to_string(),
        unit_price_cents,
        quantity,
    }
}

fn order(items: Vec<CartLine>, payment_method: PaymentMethod) -> NewOrder {
    let total_cents = items.iter().map(|l| l.unit_price_cents * l.quantity).sum();
    NewOrder {
        items,
        payment_method,
        total_cents,
        client_id: None,
        table: None,
    }
}

fn purchase(items: Vec<(&str, i64, i64)>) -> NewPurchase {
    let items: Vec<NewPurchaseLine> = items
        .into_iter()
        .map(|(product_id, quantity, unit_cost_cents)| NewPurchaseLine {
            product_id: product_id.to_string(),
            product_name: product_id.to_string(),
            quantity,
            unit_cost_cents,
            line_total_cents: quantity * unit_cost_cents,
        })
        .collect();
    NewPurchase {
        date: None,
        supplier_id: "distri".to_string(),
        supplier_name: "Distribuidora Alimentos SA".to_string(),
        total_cents: items.iter().map(|l| l.line_total_cents).sum(),
        items,
        notes: None,
    }
}

async fn stock_of(services: &PosServices, id: &str) -> i64 {
    services.catalog.get_product(id).await.unwrap().stock
}

async fn expected_cash(services: &PosServices) -> i64 {
    services
        .register
        .current()
        .await
        .unwrap()
        .unwrap()
        .expected_amount_cents
}

/// Nothing was recorded: no documents, no ledger entries, stock untouched.
async fn assert_untouched(services: &PosServices) {
    assert!(services.list_orders().await.unwrap().is_empty());
    assert!(services.list_transactions().await.unwrap().is_empty());
    assert_eq!(stock_of(services, "burger").await, 50);
    assert_eq!(stock_of(services, "fries").await, 2);
    assert_eq!(
        services.catalog.get_client("juan").await.unwrap().visits,
        5
    );
}

// =============================================================================
// Orders
// =============================================================================

async fn order_then_purchase_moves_stock_and_cost(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let recorded = services
        .orders
        .create_order(order(vec![line("burger", 1250, 3)], PaymentMethod::Card))
        .await
        .unwrap();
    assert_eq!(recorded.total_cents, 3750);
    assert_eq!(stock_of(&services, "burger").await, 47);

    services
        .purchases
        .create_purchase(purchase(vec![("burger", 10, 225)]))
        .await
        .unwrap();

    let burger = services.catalog.get_product("burger").await.unwrap();
    assert_eq!(burger.stock, 57);
    assert_eq!(burger.cost_cents, 225);
}

async fn order_books_exactly_one_income_entry(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let recorded = services
        .orders
        .create_order(order(
            vec![line("burger", 1250, 2), line("fries", 450, 1)],
            PaymentMethod::Transfer,
        ))
        .await
        .unwrap();

    let entries = services.list_transactions().await.unwrap();
    assert_eq!(entries.len(), 1);

    let entry = &entries[0];
    assert_eq!(entry.kind, TransactionKind::Income);
    assert_eq!(entry.category, "Venta");
    assert_eq!(entry.amount_cents, 2950);
    assert_eq!(entry.description, format!("Venta #{}", recorded.id));
    assert_eq!(entry.reference_id.as_deref(), Some(recorded.id.as_str()));

    let stored = services.get_order(&recorded.id).await.unwrap();
    assert_eq!(stored.items.len(), 2);
    assert_eq!(stored.unit_count(), 3);
}

async fn order_updates_client_statistics(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let mut request = order(vec![line("burger", 1000, 2)], PaymentMethod::Card);
    request.client_id = Some("juan".to_string());
    services.orders.create_order(request).await.unwrap();

    let juan = services.catalog.get_client("juan").await.unwrap();
    assert_eq!(juan.total_spent_cents, 17_000);
    assert_eq!(juan.visits, 6);
}

async fn cash_orders_credit_the_register(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    services
        .orders
        .create_order(order(vec![line("burger", 1275, 2)], PaymentMethod::Cash))
        .await
        .unwrap();

    let register = services.register.current().await.unwrap().unwrap();
    assert_eq!(register.current_amount_cents, 12_550);
    assert_eq!(register.expected_amount_cents, 12_550);
    assert_eq!(register.initial_amount_cents, 10_000);

    services
        .orders
        .create_order(order(vec![line("burger", 1000, 1)], PaymentMethod::Card))
        .await
        .unwrap();
    assert_eq!(expected_cash(&services).await, 12_550);
}

async fn empty_cart_changes_nothing(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let err = services
        .orders
        .create_order(order(vec![], PaymentMethod::Cash))
        .await
        .unwrap_err();
    assert!(matches!(err, PosError::Core(CoreError::Validation(_))));

    assert_untouched(&services).await;
    assert_eq!(expected_cash(&services).await, 10_000);
}

async fn total_mismatch_is_rejected(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let mut request = order(vec![line("burger", 1250, 2)], PaymentMethod::Cash);
    request.total_cents = 2000;
    let err = services.orders.create_order(request).await.unwrap_err();
    assert!(matches!(err, PosError::Core(CoreError::Validation(_))));

    assert_untouched(&services).await;
}

async fn insufficient_stock_rolls_back(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let err = services
        .orders
        .create_order(order(
            vec![line("burger", 1250, 3), line("fries", 450, 5)],
            PaymentMethod::Cash,
        ))
        .await
        .unwrap_err();

    match err {
        PosError::Core(CoreError::InsufficientStock {
            product_id,
            available,
            requested,
        }) => {
            assert_eq!(product_id, "fries");
            assert_eq!(available, 2);
            assert_eq!(requested, 5);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    assert_untouched(&services).await;
    assert_eq!(expected_cash(&services).await, 10_000);
}

async fn unknown_client_rolls_back(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let mut request = order(vec![line("burger", 1250, 1)], PaymentMethod::Cash);
    request.client_id = Some("nobody".to_string());
    let err = services.orders.create_order(request).await.unwrap_err();
    assert!(err.is_not_found());

    assert_untouched(&services).await;
    assert_eq!(expected_cash(&services).await, 10_000);
}

async fn unknown_product_rolls_back(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let err = services
        .orders
        .create_order(order(
            vec![line("burger", 1250, 1), line("ghost", 100, 1)],
            PaymentMethod::Card,
        ))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    assert_untouched(&services).await;
}

async fn cash_sale_with_closed_register_is_rejected(store: Arc<dyn Store>) {
    let services = setup(store, ProcessorPolicy::default(), false).await;

    let err = services
        .orders
        .create_order(order(vec![line("burger", 1250, 1)], PaymentMethod::Cash))
        .await
        .unwrap_err();
    assert!(matches!(err, PosError::Core(CoreError::RegisterClosed)));
    assert_untouched(&services).await;

    // Non-cash sales never need the register
    services
        .orders
        .create_order(order(vec![line("burger", 1250, 1)], PaymentMethod::Card))
        .await
        .unwrap();
    assert_eq!(stock_of(&services, "burger").await, 49);
}

async fn cash_sale_with_closed_register_can_be_ignored(store: Arc<dyn Store>) {
    let policy = ProcessorPolicy {
        closed_register: ClosedRegisterPolicy::Ignore,
        ..ProcessorPolicy::default()
    };
    let services = setup(store, policy, false).await;

    services
        .orders
        .create_order(order(vec![line("burger", 1250, 1)], PaymentMethod::Cash))
        .await
        .unwrap();

    assert_eq!(stock_of(&services, "burger").await, 49);
    assert_eq!(services.list_transactions().await.unwrap().len(), 1);
    assert!(services.register.current().await.unwrap().is_none());
}

async fn clamp_policy_floors_stock_at_zero(store: Arc<dyn Store>) {
    let policy = ProcessorPolicy {
        stock: StockPolicy::Clamp,
        ..ProcessorPolicy::default()
    };
    let services = setup(store, policy, true).await;

    services
        .orders
        .create_order(order(vec![line("fries", 450, 5)], PaymentMethod::Card))
        .await
        .unwrap();
    assert_eq!(stock_of(&services, "fries").await, 0);
}

async fn allow_policy_lets_stock_go_negative(store: Arc<dyn Store>) {
    let policy = ProcessorPolicy {
        stock: StockPolicy::Allow,
        ..ProcessorPolicy::default()
    };
    let services = setup(store, policy, true).await;

    services
        .orders
        .create_order(order(vec![line("fries", 450, 5)], PaymentMethod::Card))
        .await
        .unwrap();
    assert_eq!(stock_of(&services, "fries").await, -3);
}

async fn concurrent_orders_never_oversell(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    // 50 burgers, 60 buyers of one each
    let mut handles = Vec::new();
    for _ in 0..60 {
        let services = services.clone();
        handles.push(tokio::spawn(async move {
            services
                .orders
                .create_order(order(vec![line("burger", 1250, 1)], PaymentMethod::Cash))
                .await
        }));
    }

    let mut sold = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => sold += 1,
            Err(PosError::Core(CoreError::InsufficientStock { .. })) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(sold, 50);
    assert_eq!(stock_of(&services, "burger").await, 0);
    assert_eq!(expected_cash(&services).await, 10_000 + 50 * 1250);
    assert_eq!(services.list_orders().await.unwrap().len(), 50);
}

async fn orders_are_listed_newest_first(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let first = services
        .orders
        .create_order(order(vec![line("burger", 1250, 1)], PaymentMethod::Card))
        .await
        .unwrap();
    let second = services
        .orders
        .create_order(order(vec![line("fries", 450, 1)], PaymentMethod::Card))
        .await
        .unwrap();

    let listed = services.list_orders().await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    assert_eq!(listed[1].items[0].product_id, "burger");
}

// =============================================================================
// Purchases
// =============================================================================

async fn purchase_books_expense_and_restocks(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let recorded = services
        .purchases
        .create_purchase(purchase(vec![("burger", 10, 225), ("fries", 20, 100)]))
        .await
        .unwrap();
    assert_eq!(recorded.total_cents, 4250);

    assert_eq!(stock_of(&services, "burger").await, 60);
    assert_eq!(stock_of(&services, "fries").await, 22);

    let entries = services.list_transactions().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, TransactionKind::Expense);
    assert_eq!(entries[0].category, "Compra de Inventario");
    assert_eq!(entries[0].description, "Compra a Distribuidora Alimentos SA");
    assert_eq!(entries[0].amount_cents, 4250);

    // Purchases never touch the drawer
    assert_eq!(expected_cash(&services).await, 10_000);
    assert_eq!(services.list_purchases().await.unwrap().len(), 1);
}

async fn purchase_from_unknown_supplier_is_rejected(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let mut request = purchase(vec![("burger", 10, 225)]);
    request.supplier_id = "nobody".to_string();
    let err = services.purchases.create_purchase(request).await.unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(stock_of(&services, "burger").await, 50);
    assert!(services.list_purchases().await.unwrap().is_empty());
}

async fn purchase_of_unknown_product_rolls_back(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let err = services
        .purchases
        .create_purchase(purchase(vec![("burger", 10, 225), ("ghost", 1, 100)]))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let burger = services.catalog.get_product("burger").await.unwrap();
    assert_eq!(burger.stock, 50);
    assert_eq!(burger.cost_cents, 625);
    assert!(services.list_transactions().await.unwrap().is_empty());
}

async fn ledger_summary_nets_income_and_expense(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    services
        .orders
        .create_order(order(vec![line("burger", 1250, 3)], PaymentMethod::Cash))
        .await
        .unwrap();
    services
        .purchases
        .create_purchase(purchase(vec![("burger", 10, 225)]))
        .await
        .unwrap();

    let summary = services.ledger_summary().await.unwrap();
    assert_eq!(summary.income_cents, 3750);
    assert_eq!(summary.expense_cents, 2250);
    assert_eq!(summary.balance_cents, 1500);
    assert_eq!(summary.entry_count, 2);
}

// =============================================================================
// Cash register
// =============================================================================

async fn register_cannot_be_opened_twice(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let err = services
        .register
        .open(Money::from_cents(5_000))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PosError::Core(CoreError::RegisterAlreadyOpen { .. })
    ));
    assert_eq!(expected_cash(&services).await, 10_000);
}

async fn closing_records_the_variance(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    services
        .orders
        .create_order(order(vec![line("burger", 1275, 2)], PaymentMethod::Cash))
        .await
        .unwrap();

    let closed = services
        .register
        .close(Money::from_cents(12_000))
        .await
        .unwrap();
    assert!(!closed.is_open);
    assert_eq!(closed.counted_amount_cents, Some(12_000));
    assert_eq!(closed.variance_cents, Some(-550));
    assert!(closed.closed_at.is_some());

    let latest = services.register.current().await.unwrap().unwrap();
    assert_eq!(latest.id, closed.id);
    assert!(!latest.is_open);
    assert_eq!(latest.variance_cents, Some(-550));

    let err = services
        .register
        .close(Money::from_cents(0))
        .await
        .unwrap_err();
    assert!(matches!(err, PosError::Core(CoreError::RegisterClosed)));

    // A new session starts from its own float
    let reopened = services
        .register
        .open(Money::from_cents(20_000))
        .await
        .unwrap();
    assert_ne!(reopened.id, closed.id);
    assert_eq!(expected_cash(&services).await, 20_000);
}

async fn toggle_opens_and_closes(store: Arc<dyn Store>) {
    let services = setup(store, ProcessorPolicy::default(), false).await;

    let opened = services
        .register
        .open_or_close(Money::from_cents(10_000), true)
        .await
        .unwrap();
    assert!(opened.is_open);
    assert_eq!(opened.current_amount_cents, 10_000);

    let closed = services
        .register
        .open_or_close(Money::from_cents(10_000), false)
        .await
        .unwrap();
    assert!(!closed.is_open);
    assert_eq!(closed.variance_cents, Some(0));
}

async fn reconcile_previews_without_closing(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    services
        .orders
        .create_order(order(vec![line("burger", 1275, 2)], PaymentMethod::Cash))
        .await
        .unwrap();

    let preview = services
        .register
        .reconcile(Money::from_cents(13_000))
        .await
        .unwrap();
    assert_eq!(preview.expected_cents, 12_550);
    assert_eq!(preview.variance_cents, 450);
    assert!(!preview.is_balanced());

    assert!(services.register.current().await.unwrap().unwrap().is_open);
}

// =============================================================================
// Catalog
// =============================================================================

async fn patch_and_delete_keep_history(store: Arc<dyn Store>) {
    let services = default_setup(store).await;

    let recorded = services
        .orders
        .create_order(order(vec![line("burger", 1250, 1)], PaymentMethod::Card))
        .await
        .unwrap();

    let patched = services
        .catalog
        .patch_product(
            "burger",
            ProductPatch {
                price_cents: Some(1400),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.price_cents, 1400);
    assert_eq!(patched.stock, 49);
    assert_eq!(patched.name, "Hamburguesa Clásica");

    assert!(services.catalog.delete_product("burger").await.unwrap());
    assert!(!services.catalog.delete_product("burger").await.unwrap());

    let stored = services.get_order(&recorded.id).await.unwrap();
    assert_eq!(stored.items[0].unit_price_cents, 1250);

    let err = services
        .catalog
        .patch_product(
            "burger",
            ProductPatch {
                stock: Some(5),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// =============================================================================
// Overflow
// =============================================================================

fn is_overflow(err: &PosError) -> bool {
    matches!(
        err,
        PosError::Core(CoreError::Validation(ValidationError::Overflow { .. }))
    )
}

async fn register_float_above_ceiling_is_rejected(store: Arc<dyn Store>) {
    let services = setup(store, ProcessorPolicy::default(), false).await;

    let err = services
        .register
        .open(Money::from_cents(i64::MAX))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PosError::Core(CoreError::Validation(ValidationError::OutOfRange { .. }))
    ));
    assert!(services.register.current().await.unwrap().is_none());
}

async fn register_overflow_rolls_back_the_sale(store: Arc<dyn Store>) {
    let services = setup(store, ProcessorPolicy::default(), false).await;

    // Written straight to storage: the service never opens with this much
    let mut drawer = CashRegister::open(Money::zero(), chrono::Utc::now()).unwrap();
    drawer.current_amount_cents = i64::MAX - 50;
    drawer.expected_amount_cents = i64::MAX - 50;
    let mut uow = services.store().begin().await.unwrap();
    uow.insert_register(&drawer).await.unwrap();
    uow.commit().await.unwrap();

    let err = services
        .orders
        .create_order(order(vec![line("burger", 1250, 1)], PaymentMethod::Cash))
        .await
        .unwrap_err();
    assert!(is_overflow(&err), "unexpected error: {err:?}");

    assert_untouched(&services).await;
    assert_eq!(expected_cash(&services).await, i64::MAX - 50);
}

async fn client_statistics_overflow_rolls_back(store: Arc<dyn Store>) {
    let services = default_setup(store).await;
    services
        .store()
        .upsert_client(Client {
            id: "regular".to_string(),
            name: "Cliente Frecuente".to_string(),
            phone: String::new(),
            email: String::new(),
            total_spent_cents: i64::MAX - 10,
            visits: 900,
        })
        .await
        .unwrap();

    let mut request = order(vec![line("burger", 1250, 1)], PaymentMethod::Cash);
    request.client_id = Some("regular".to_string());
    let err = services.orders.create_order(request).await.unwrap_err();
    assert!(is_overflow(&err), "unexpected error: {err:?}");

    assert_untouched(&services).await;
    assert_eq!(expected_cash(&services).await, 10_000);
    let regular = services.catalog.get_client("regular").await.unwrap();
    assert_eq!(regular.total_spent_cents, i64::MAX - 10);
    assert_eq!(regular.visits, 900);
}

async fn restock_past_max_stock_rolls_back(store: Arc<dyn Store>) {
    let services = default_setup(store).await;
    services
        .store()
        .upsert_product(product("water", "Agua Mineral", 150, MAX_STOCK - 5))
        .await
        .unwrap();

    let err = services
        .purchases
        .create_purchase(purchase(vec![("burger", 10, 225), ("water", 10, 60)]))
        .await
        .unwrap_err();
    assert!(is_overflow(&err), "unexpected error: {err:?}");

    assert!(services.list_purchases().await.unwrap().is_empty());
    assert!(services.list_transactions().await.unwrap().is_empty());
    let burger = services.catalog.get_product("burger").await.unwrap();
    assert_eq!(burger.stock, 50);
    assert_eq!(burger.cost_cents, 625);
    let water = services.catalog.get_product("water").await.unwrap();
    assert_eq!(water.stock, MAX_STOCK - 5);
    assert_eq!(water.cost_cents, 75);
}

// =============================================================================
// Both backends
// =============================================================================

macro_rules! on_both_backends {
    ($($scenario:ident),* $(,)?) => {
        mod memory {
            $(
                #[tokio::test]
                async fn $scenario() {
                    super::$scenario(super::memory_store().await).await;
                }
            )*
        }

        mod sqlite {
            $(
                #[tokio::test]
                async fn $scenario() {
                    super::$scenario(super::sqlite_store().await).await;
                }
            )*
        }
    };
}

on_both_backends!(
    order_then_purchase_moves_stock_and_cost,
    order_books_exactly_one_income_entry,
    order_updates_client_statistics,
    cash_orders_credit_the_register,
    empty_cart_changes_nothing,
    total_mismatch_is_rejected,
    insufficient_stock_rolls_back,
    unknown_client_rolls_back,
    unknown_product_rolls_back,
    cash_sale_with_closed_register_is_rejected,
    cash_sale_with_closed_register_can_be_ignored,
    clamp_policy_floors_stock_at_zero,
    allow_policy_lets_stock_go_negative,
    concurrent_orders_never_oversell,
    orders_are_listed_newest_first,
    purchase_books_expense_and_restocks,
    purchase_from_unknown_supplier_is_rejected,
    purchase_of_unknown_product_rolls_back,
    ledger_summary_nets_income_and_expense,
    register_cannot_be_opened_twice,
    closing_records_the_variance,
    toggle_opens_and_closes,
    reconcile_previews_without_closing,
    patch_and_delete_keep_history,
    register_float_above_ceiling_is_rejected,
    register_overflow_rolls_back_the_sale,
    client_statistics_overflow_rolls_back,
    restock_past_max_stock_rolls_back,
);
