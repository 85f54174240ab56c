mod handlers;
mod queue;

pub use handlers::{HandlerRegistry, NoticeHandler};
pub use queue::{DispatchQueue, DispatchSender, Dispatched};
