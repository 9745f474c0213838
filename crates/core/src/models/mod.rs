pub mod assessment;
pub mod cash;
pub mod exchange_rate;
pub mod layout;
pub mod merge;
pub mod portfolio;
pub mod settings;
pub mod stock;
pub mod summary;
