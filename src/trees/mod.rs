pub mod criterion;
pub mod hoeffding;
pub mod leaf;
pub mod node;
pub mod params;

pub use criterion::Criterion;
pub use hoeffding::{HoeffdingTree, HoeffdingTreeRegressor};
pub use leaf::{hoeffding_bound, Leaf};
pub use node::{Branch, Node};
pub use params::TreeParams;
