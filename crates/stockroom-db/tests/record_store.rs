//! Behaviour shared by both record store backends.
//!
//! Every scenario runs once against a temporary inventory file and once
//! against an in-memory SQLite table.

use std::path::PathBuf;

use stockroom_core::{Product, SortOrder, ValidationError};
use stockroom_db::{Backend, BackendKind, DbError, Inventory, RecordStore};
use uuid::Uuid;

struct Fixture {
    backend: Backend,
    file: Option<PathBuf>,
}

impl Fixture {
    async fn file() -> Self {
        let path = std::env::temp_dir().join(format!("stockroom-it-{}.txt", Uuid::new_v4()));
        let backend = Backend::open(BackendKind::File, &path).await.unwrap();
        Fixture {
            backend,
            file: Some(path),
        }
    }

    async fn table() -> Self {
        let backend = Backend::open(BackendKind::Table, ":memory:").await.unwrap();
        Fixture {
            backend,
            file: None,
        }
    }

    async fn both() -> Vec<Fixture> {
        vec![Fixture::file().await, Fixture::table().await]
    }

    async fn finish(self) {
        self.backend.close().await;
        if let Some(path) = self.file {
            let _ = tokio::fs::remove_file(path).await;
        }
    }
}

fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::test]
async fn test_never_written_store_is_empty() {
    for fixture in Fixture::both().await {
        assert!(fixture.backend.read_all().await.unwrap().is_empty());
        assert!(fixture
            .backend
            .sorted_by_name(SortOrder::Descending)
            .await
            .unwrap()
            .is_empty());
        assert!(fixture.backend.find_by_name("x").await.unwrap().is_none());
        fixture.finish().await;
    }
}

#[tokio::test]
async fn test_append_then_read_ends_with_record() {
    for fixture in Fixture::both().await {
        let store = &fixture.backend;
        store.append(&Product::new("apple", 1, 2)).await.unwrap();

        let record = Product::new("dell xps", 1, 2100);
        store.append(&record).await.unwrap();

        let products = store.read_all().await.unwrap();
        assert_eq!(products.last(), Some(&record));
        assert_eq!(names(&products), vec!["apple", "dell xps"]);
        fixture.finish().await;
    }
}

#[tokio::test]
async fn test_second_add_with_same_name_is_rejected() {
    for fixture in Fixture::both().await {
        let inventory = Inventory::new(fixture.backend);
        inventory.add("x", 1, 1).await.unwrap();

        let err = inventory.add("x", 99, 42).await.unwrap_err();
        assert!(err.is_already_exists(), "{:?}", err);
        assert_eq!(inventory.list().await.unwrap().len(), 1);

        Fixture {
            backend: inventory.into_store(),
            file: fixture.file,
        }
        .finish()
        .await;
    }
}

#[tokio::test]
async fn test_removed_record_is_gone() {
    for fixture in Fixture::both().await {
        let inventory = Inventory::new(fixture.backend);
        inventory.add("keep", 1, 1).await.unwrap();
        inventory.add("x", 2, 3).await.unwrap();
        inventory.add("also keep", 3, 1).await.unwrap();

        inventory.remove("x").await.unwrap();

        assert!(inventory.search("x").await.unwrap_err().is_not_found());
        let products = inventory.list().await.unwrap();
        assert_eq!(names(&products), vec!["keep", "also keep"]);

        Fixture {
            backend: inventory.into_store(),
            file: fixture.file,
        }
        .finish()
        .await;
    }
}

#[tokio::test]
async fn test_totals_hold_after_add() {
    for fixture in Fixture::both().await {
        let inventory = Inventory::new(fixture.backend);
        inventory.add("iphone", 2, 1350).await.unwrap();
        inventory.add("pen", 0, 3).await.unwrap();
        inventory.add("gift", 5, 0).await.unwrap();

        for product in inventory.list().await.unwrap() {
            assert_eq!(product.total_price, product.quantity * product.unit_price);
        }

        Fixture {
            backend: inventory.into_store(),
            file: fixture.file,
        }
        .finish()
        .await;
    }
}

#[tokio::test]
async fn test_line_break_in_name_is_rejected() {
    for fixture in Fixture::both().await {
        let inventory = Inventory::new(fixture.backend);
        inventory.add("b", 1, 1).await.unwrap();

        let err = inventory.add("x\nb", 9, 9).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::ControlCharacter { .. })
        ));
        assert_eq!(inventory.list().await.unwrap(), vec![Product::new("b", 1, 1)]);

        Fixture {
            backend: inventory.into_store(),
            file: fixture.file,
        }
        .finish()
        .await;
    }
}

#[tokio::test]
async fn test_overflowing_total_is_rejected() {
    for fixture in Fixture::both().await {
        let inventory = Inventory::new(fixture.backend);
        inventory.add("pen", 1, 3).await.unwrap();

        let err = inventory.add("big", i64::MAX, 2).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::TooLarge { .. })
        ));

        let largest = inventory.add("largest", i64::MAX, 1).await.unwrap();
        assert_eq!(largest.total_price, i64::MAX);

        let products = inventory.list().await.unwrap();
        assert_eq!(names(&products), vec!["pen", "largest"]);
        assert!(products.iter().all(Product::has_consistent_total));
        inventory.remove("largest").await.unwrap();
        assert_eq!(names(&inventory.list().await.unwrap()), vec!["pen"]);

        Fixture {
            backend: inventory.into_store(),
            file: fixture.file,
        }
        .finish()
        .await;
    }
}

#[tokio::test]
async fn test_sort_by_name_both_directions() {
    for fixture in Fixture::both().await {
        let inventory = Inventory::new(fixture.backend);
        for name in ["banana", "apple", "cherry"] {
            inventory.add(name, 1, 1).await.unwrap();
        }

        let asc = inventory.sorted(SortOrder::Ascending).await.unwrap();
        assert_eq!(names(&asc), vec!["apple", "banana", "cherry"]);

        let desc = inventory.sorted(SortOrder::Descending).await.unwrap();
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);

        // Sorting is a query; storage order is unchanged.
        let stored = inventory.list().await.unwrap();
        assert_eq!(names(&stored), vec!["banana", "apple", "cherry"]);

        Fixture {
            backend: inventory.into_store(),
            file: fixture.file,
        }
        .finish()
        .await;
    }
}

#[tokio::test]
async fn test_widget_scenario() {
    for fixture in Fixture::both().await {
        let inventory = Inventory::new(fixture.backend);

        let widget = inventory.add("widget", 4, 10).await.unwrap();
        assert_eq!(widget.total_price, 40);

        assert!(matches!(
            inventory.add("widget", 1, 1).await,
            Err(DbError::AlreadyExists { .. })
        ));

        inventory.remove("widget").await.unwrap();

        assert!(matches!(
            inventory.search("widget").await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            inventory.remove("widget").await,
            Err(DbError::NotFound { .. })
        ));

        Fixture {
            backend: inventory.into_store(),
            file: fixture.file,
        }
        .finish()
        .await;
    }
}

#[tokio::test]
async fn test_file_backend_survives_reopen() {
    let path = std::env::temp_dir().join(format!("stockroom-it-{}.txt", Uuid::new_v4()));

    let first = Inventory::new(Backend::open(BackendKind::File, &path).await.unwrap());
    first.add("apple", 3, 2).await.unwrap();
    drop(first);

    let second = Inventory::new(Backend::open(BackendKind::File, &path).await.unwrap());
    assert_eq!(second.search("apple").await.unwrap(), Product::new("apple", 3, 2));

    let _ = tokio::fs::remove_file(path).await;
}

#[tokio::test]
async fn test_table_backend_survives_reopen() {
    let path = std::env::temp_dir().join(format!("stockroom-it-{}.db", Uuid::new_v4()));

    let first = Backend::open(BackendKind::Table, &path).await.unwrap();
    first.append(&Product::new("apple", 3, 2)).await.unwrap();
    first.close().await;

    let second = Backend::open(BackendKind::Table, &path).await.unwrap();
    assert_eq!(second.read_all().await.unwrap(), vec![Product::new("apple", 3, 2)]);
    second.close().await;

    for suffix in ["", "-wal", "-shm"] {
        let _ = tokio::fs::remove_file(format!("{}{}", path.display(), suffix)).await;
    }
}
