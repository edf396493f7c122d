pub mod task_parser;
pub mod task_serializer;

pub use task_parser::{parse_task_bytes, parse_task_line, parse_tasks};
pub use task_serializer::{serialize_task, serialize_tasks};
