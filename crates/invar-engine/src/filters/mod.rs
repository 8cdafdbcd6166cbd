//! Reporting filters: the ordered chain that decides which justified
//! candidates are shown.

pub mod chain;
pub mod controlled;
pub mod obvious;
pub mod only_constant;
pub mod redundant;
pub mod suppression;

pub use chain::{FilterChain, FilterContext, FilterOutcome, InvariantFilter};
pub use controlled::ControlledFilter;
pub use obvious::ObviousFilter;
pub use only_constant::OnlyConstantVariablesFilter;
pub use redundant::RedundancyFilter;
pub use suppression::SuppressionFilter;
