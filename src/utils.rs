pub mod notifier;
pub mod test_setup;
