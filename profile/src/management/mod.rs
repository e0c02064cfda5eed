pub mod clients;

pub use clients::{ResourceSubscriptionClient, SubscriptionClient};
