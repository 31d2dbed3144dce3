// Domain layer: the order record and the registry that loads orders from CSV.

pub mod order;
pub mod registry;
