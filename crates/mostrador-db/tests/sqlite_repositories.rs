//! SQLite-only behaviour: migrations, upsert rules, repository readers and
//! concurrent writers on a real database file.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Utc};
use mostrador_core::order::{CartLine, NewOrder};
use mostrador_core::{Client, CoreError, Money, PaymentMethod, Product};
use mostrador_db::migrations::migration_status;
use mostrador_db::{Database, DbConfig, PosError, PosServices, ProcessorPolicy, SqliteStore};

fn product(id: &str, stock: i64) -> Product {
    let now = Utc::now();
    Product {
        id: id.to_string(),
        name: "Coca Cola".to_string(),
        category: "Bebidas".to_string(),
        price_cents: 200,
        cost_cents: 100,
        stock,
        unit: "botella".to_string(),
        sku: "BEB-001".to_string(),
        image: None,
        created_at: now,
        updated_at: now,
    }
}

fn cola_order() -> NewOrder {
    NewOrder {
        items: vec![CartLine {
            product_id: "cola".to_string(),
            name: "Coca Cola".to_string(),
            unit_price_cents: 200,
            quantity: 1,
        }],
        payment_method: PaymentMethod::Cash,
        total_cents: 200,
        client_id: None,
        table: None,
    }
}

#[tokio::test]
async fn test_migrations_applied() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let (total, applied) = migration_status(db.pool()).await.unwrap();
    assert!(total > 0);
    assert_eq!(total, applied);
    assert!(db.health_check().await);
}

#[tokio::test]
async fn test_product_upsert_keeps_created_at() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let products = db.products();

    let mut cola = product("cola", 10);
    cola.created_at = Utc::now() - Duration::days(3);
    let first = products.upsert(&cola).await.unwrap();

    let mut edited = product("cola", 99);
    edited.name = "Coca Cola 500ml".to_string();
    let second = products.upsert(&edited).await.unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.name, "Coca Cola 500ml");
    assert_eq!(second.stock, 99);
    assert_eq!(products.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_client_upsert_keeps_statistics() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let clients = db.clients();

    let juan = Client {
        id: "juan".to_string(),
        name: "Juan Pérez".to_string(),
        phone: "555-0101".to_string(),
        email: "juan@example.com".to_string(),
        total_spent_cents: 15_000,
        visits: 5,
    };
    clients.upsert(&juan).await.unwrap();

    let edited = Client {
        name: "Juan P.".to_string(),
        total_spent_cents: 0,
        visits: 0,
        ..juan
    };
    let stored = clients.upsert(&edited).await.unwrap();

    assert_eq!(stored.name, "Juan P.");
    assert_eq!(stored.total_spent_cents, 15_000);
    assert_eq!(stored.visits, 5);
}

#[tokio::test]
async fn test_ledger_and_register_readers() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    db.products().upsert(&product("cola", 10)).await.unwrap();

    let store = Arc::new(SqliteStore::new(db.clone()));
    let services = PosServices::new(store, ProcessorPolicy::default());
    services.register.open(Money::from_cents(1_000)).await.unwrap();
    let order = services.orders.create_order(cola_order()).await.unwrap();
    services.register.close(Money::from_cents(1_200)).await.unwrap();
    services.register.open(Money::from_cents(500)).await.unwrap();

    let entries = db.ledger().by_reference(&order.id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].amount_cents, 200);

    assert_eq!(db.orders().count().await.unwrap(), 1);

    let history = db.registers().history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].is_open);
    assert_eq!(history[0].initial_amount_cents, 500);
    assert_eq!(history[1].variance_cents, Some(0));
}

#[tokio::test]
async fn test_concurrent_writers_on_file_database() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "mostrador-concurrency-{}-{}.db",
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));

    {
        let db = Database::new(DbConfig::new(&path).max_connections(4))
            .await
            .unwrap();
        db.products().upsert(&product("cola", 10)).await.unwrap();

        let store = Arc::new(SqliteStore::new(db.clone()));
        let services = PosServices::new(store, ProcessorPolicy::default());
        services.register.open(Money::from_cents(0)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..25 {
            let services = services.clone();
            handles.push(tokio::spawn(async move {
                services.orders.create_order(cola_order()).await
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

        assert_eq!(sold, 10);
        let cola = db.products().get_by_id("cola").await.unwrap().unwrap();
        assert_eq!(cola.stock, 0);

        let register = db.registers().latest().await.unwrap().unwrap();
        assert_eq!(register.expected_amount_cents, 2_000);
        assert_eq!(register.current_amount_cents, 2_000);

        db.close().await;
    }

    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
