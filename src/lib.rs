pub mod apis;
pub mod arguments;
pub mod collections;
pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod formatting;
pub mod license;
pub mod logger;
pub mod monetization;
pub mod paths;
pub mod protection;
pub mod telegram;

#[cfg(test)]
pub(crate) mod test_support;
