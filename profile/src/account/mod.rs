//! Account login orchestration and the normalized subscription model.
//!
//! [`add_account`] exchanges user or service-principal credentials for the
//! list of [`Subscription`]s visible to them, fanning out across directory
//! tenants through the supplied collaborators.

pub mod login;
pub mod subscription;

pub use login::{
    ArmSubscriptionSource, LoginCredentials, SubscriptionSource, acquire_token, add_account,
    normalize_user_name,
};
pub use subscription::{RawSubscription, Subscription, SubscriptionUser, UserKind};
