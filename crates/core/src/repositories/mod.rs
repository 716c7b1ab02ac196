//! Services that combine the store and the generators into the project operations.

pub mod compliance;
pub mod projects;

#[cfg(test)]
pub(crate) mod test_support;
