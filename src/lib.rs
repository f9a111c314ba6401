//! # zakat-engine
//!
//! Hanafi Zakat calculation: derive selling prices from raw gold and silver
//! quotes, resolve the Nisab threshold, and assess declared wealth against it.
//!
//! ```rust
//! use zakat_engine::prelude::*;
//!
//! let request = ZakatRequest::new(
//!     MetalPrices::new(11761, 223).unwrap(),
//!     AssetBundle::new().cash(100_000).bank_balance(50_000),
//!     LiabilityBundle::new().necessary_loans(20_000),
//! );
//! let response = calculate(&request).unwrap();
//!
//! assert!(response.assessment.is_obligatory);
//! assert_eq!(response.assessment.zakat_due.to_string(), "3250");
//! ```
//!
//! The three stages ([`pricing::normalize`], [`nisab::resolve_nisab`],
//! [`assessment::assess`]) are pure and can be called on their own.
//! [`calculator::calculate`] is the validating entry point.

pub mod assessment;
pub mod calculator;
pub mod config;
pub mod inputs;
pub mod madhab;
pub mod math;
pub mod nisab;
pub mod prelude;
pub mod presentation;
pub mod pricing;
pub mod providers;
pub mod record;
pub mod schema;
pub mod types;

pub use assessment::{AssetBundle, LiabilityBundle, ZakatAssessment, assess};
pub use calculator::{ZakatRequest, ZakatResponse, calculate};
pub use config::PricingConfig;
pub use nisab::{NisabThreshold, resolve_nisab};
pub use pricing::{DerivedPrices, MetalPrices, normalize};
pub use types::ZakatError;
