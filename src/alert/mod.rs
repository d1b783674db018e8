pub mod notifier;
pub mod sink;

pub use notifier::AlertNotifier;
pub use sink::{AlertError, AlertSettings, AlertSink, LogSink};
