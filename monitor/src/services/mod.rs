// Operator-facing collaborators: outbound notifications and the /start listener

pub mod command_listener;
pub mod telegram;

pub use command_listener::CommandListener;
pub use telegram::TelegramNotifier;
