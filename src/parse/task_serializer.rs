use crate::model::task::{Priority, Task};

/// Serialize tasks to the on-disk format, one line per task, each line
/// terminated by `\n`.
pub fn serialize_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&serialize_task(task));
        out.push('\n');
    }
    out
}

/// Serialize a single task: `[x] !! Text`
pub fn serialize_task(task: &Task) -> String {
    let mut line = format!("[{}] ", task.checkbox_char());
    if task.priority != Priority::None {
        line.push_str(task.priority.marker());
        line.push(' ');
    }
    line.push_str(&task.text);
    line
}
