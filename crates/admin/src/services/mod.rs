//! Background services for the admin binary.

pub mod notifier;
pub mod order_watcher;

pub use notifier::OrderNotifier;
