//! # Repository Module
//!
//! Database repository implementations for the catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Calling application                                                   │
//! │       │                                                                 │
//! │       │  db.products().list(20, 0, "price", "in_stock", "asc")         │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list / list_with      (read pool)                                 │
//! │  ├── get_by_id             (read pool)                                 │
//! │  ├── search                (read pool)                                 │
//! │  ├── update                (write pool, then read pool)                │
//! │  ├── update_inventory      (write pool)                                │
//! │  └── delete                (write pool)                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  PostgreSQL                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product listing, updates and search

pub mod product;
