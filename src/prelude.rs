//! Prelude module for zakat-engine
//!
//! Re-exports the types needed for a typical calculation.
//!
//! ```rust
//! use zakat_engine::prelude::*;
//! ```

pub use crate::assessment::{AssetBundle, LiabilityBundle, ZakatAssessment, assess};
pub use crate::calculator::{MAX_INPUT_AMOUNT, ZakatRequest, ZakatResponse, calculate};
pub use crate::config::PricingConfig;
pub use crate::inputs::IntoZakatDecimal;
pub use crate::madhab::{NisabBasis, ZAKAT_RATE};
pub use crate::nisab::{NisabThreshold, resolve_nisab};
pub use crate::presentation::Region;
pub use crate::pricing::{DerivedPrices, MetalPrices, grams_to_vori, holding_value, normalize, vori_to_grams};
pub use crate::providers::{
    FallbackPriceTable, PriceFreshness, PriceQuote, StaleAction, StalenessPolicy, StaticPriceProvider,
};
#[cfg(feature = "async")]
pub use crate::providers::{BestEffortPriceProvider, CachedPriceProvider, PriceProvider, fetch_checked};
pub use crate::record::AssessmentRecord;
pub use crate::types::{CalculationStep, Operation, ZakatError};
