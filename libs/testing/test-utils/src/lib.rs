//! Shared test utilities for the inventory crates
//!
//! - `TestDatabase`: migrated SQLite in-memory database, or a PostgreSQL container
//! - `TestDataBuilder`: deterministic test data
//! - `MultipartBody`: hand-built `multipart/form-data` request bodies
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!     let name = builder.name("item", "main");
//! }
//! ```

mod database;
mod multipart;

pub use database::TestDatabase;
pub use multipart::MultipartBody;

/// Builder for test data with deterministic values
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds the builder from the test name so reruns produce the same data.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_item");
    /// assert_eq!(builder.price(), TestDataBuilder::from_test_name("test_create_item").price());
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `test-<prefix>-<seed>-<suffix>`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A price between 0.01 and 100.00 with two decimals
    pub fn price(&self) -> f64 {
        ((self.seed % 10_000) + 1) as f64 / 100.0
    }

    /// A stock level between 0 and 499
    pub fn stock(&self) -> i32 {
        (self.seed % 500) as i32
    }

    pub fn category(&self) -> String {
        const CATEGORIES: [&str; 4] = ["Bakery", "Dairy", "Produce", "Pantry"];
        CATEGORIES[(self.seed % CATEGORIES.len() as u64) as usize].to_string()
    }
}
