//! # AutoValue Realm
//!
//! Generates Realm storage records for immutable AutoValue models, together with the glue that
//! converts between the two.
//!
//! For every model class that declares a `toRealmObject()` accessor the generator emits:
//!
//! - **`$Realm<Chain>`**: a mutable storage record extending `io.realm.RealmObject`, one private
//!   field and one public setter per property, plus `toModel()`.
//! - **`AutoValue_<Chain>`**: the generated model implementation, with a constructor forwarding
//!   to the extension chain and `toRealmObject()`.
//!
//! Nested models are stored as their own records and lists of models as `RealmList`s of records.
//!
//! ## Quick Start
//!
//! ```rust
//! use auto_value_realm::prelude::*;
//!
//! let schema = parse_schema_str(
//!     r#"
//! package = "com.example"
//!
//! [[model]]
//! name = "User"
//!
//! [[model.property]]
//! accessor = "getId"
//! type = "long"
//! primary_key = true
//!
//! [[model.property]]
//! accessor = "toRealmObject"
//! type = "com.example.$RealmUser"
//! "#,
//! )?;
//!
//! let config = GeneratorConfig::default();
//! let batch = schema.into_batch(&config)?;
//!
//! let mut sink = MemorySink::new();
//! let report = Generator::new(config).run(&batch, &mut sink);
//! assert!(report.is_success());
//!
//! let record = sink.source("com.example.$RealmUser").unwrap();
//! assert!(record.contains("@PrimaryKey\n  private long id;"));
//! # Ok::<(), CodegenError>(())
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod sink;
