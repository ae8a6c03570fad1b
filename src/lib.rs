pub mod auction;
pub mod client;
pub mod config;
pub mod error;
pub mod overlay;
pub mod reconcile;
pub mod session;
pub mod storage;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
