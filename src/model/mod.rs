//! Types that represent the core data model, such as `Dataset`, `Amount` and `BudgetTree`.
mod amount;
mod dataset;
mod mapping;
mod tree;

pub use amount::{Amount, AmountError, THOUSAND};
pub use dataset::Dataset;
pub use mapping::{resolve_amount_column, Header, Mapping};
pub use tree::{Branch, BudgetTree, Node};
