// Course read model, enrollment progress, and the content write path.

pub mod handlers;
pub mod progress;
pub mod store;
