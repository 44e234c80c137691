#![allow(unused_macros)]

use std::{any::Any, marker::PhantomData};

use feed_core::ports::CatalogRepository;
use feed_local::{FileDb, MemoryDb};
use feed_sqlite::{Db, config::SqliteConfig};
use rstest_reuse::template;

pub async fn launch_memory_backend() -> (impl CatalogRepository + 'static, Box<dyn Any>) {
    (MemoryDb::new(), Box::new(PhantomData::<()>))
}

// The temporary directory must outlive the test, so it rides along as the guard
pub async fn launch_file_backend() -> (impl CatalogRepository + 'static, Box<dyn Any>) {
    let dir = tempfile::tempdir().expect("could not create temporary directory");
    let db = FileDb::open(dir.path().join("products.json")).await;
    (db, Box::new(dir))
}

pub async fn launch_sqlite_backend() -> (impl CatalogRepository + 'static, Box<dyn Any>) {
    let db = Db::open(&SqliteConfig::default())
        .await
        .expect("could not open in-memory db");
    (db, Box::new(PhantomData::<()>))
}

// This creates a testing "template" to allow for the injection of each backend
// implementation

#[template]
#[rstest]
#[case::memory(launch_memory_backend())]
#[case::file(launch_file_backend())]
#[case::sqlite(launch_sqlite_backend())]
#[tokio::test]
pub async fn all_backends(
    #[case] backend: impl Future<Output = (impl CatalogRepository + 'static, Box<dyn Any>)>,
) -> () {
}
