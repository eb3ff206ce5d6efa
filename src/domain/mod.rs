pub mod catalog;
pub mod payload;
pub mod session;
pub mod task;

pub use catalog::{Cursor, TaskCatalog, TaskListMode};
pub use payload::CatalogPayload;
pub use session::{PromptContext, SessionContext, SessionTask};
pub use task::{screen_name, Project, Subtask, Task};
