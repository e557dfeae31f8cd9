use chrono::Utc;
use tabboard::todo::{render, Control, Counters, Filter, Task, TaskId};

fn sample() -> Vec<Task> {
    let now = Utc::now();
    vec![
        Task::new(TaskId::from("a"), "A", now).expect("task"),
        Task::new(TaskId::from("b"), "B", now)
            .expect("task")
            .with_completed(true),
        Task::new(TaskId::from("c"), "C", now).expect("task"),
    ]
}

fn texts(tasks: &[Task], filter: Filter) -> Vec<String> {
    render(tasks, filter)
        .items
        .iter()
        .map(|item| item.task.text().to_string())
        .collect()
}

#[test]
fn filters_restrict_items() {
    let tasks = sample();
    assert_eq!(texts(&tasks, Filter::All), ["A", "B", "C"]);
    assert_eq!(texts(&tasks, Filter::Pending), ["A", "C"]);
    assert_eq!(texts(&tasks, Filter::Completed), ["B"]);
}

#[test]
fn counters_ignore_filter() {
    let tasks = sample();
    let expected = Counters {
        total: 3,
        pending: 2,
        completed: 1,
    };
    for filter in Filter::ALL {
        let view = render(&tasks, filter);
        assert_eq!(view.counters, expected);
        assert_eq!(view.filter, filter);
    }
}

#[test]
fn controls_are_bound_to_ids() {
    let tasks = sample();
    let view = render(&tasks, Filter::Pending);
    let second = view.item(1).expect("row");
    assert_eq!(second.toggle, Control::Toggle(TaskId::from("c")));
    assert_eq!(second.delete, Control::Delete(TaskId::from("c")));
    assert_eq!(view.position("c"), Some(1));
    assert_eq!(view.position("b"), None);
}

#[test]
fn empty_collection_renders_empty_view() {
    let view = render(&[], Filter::Completed);
    assert!(view.is_empty());
    assert_eq!(view.counters, Counters::default());
}

#[test]
fn view_serializes_flat_items() {
    let tasks = sample();
    let value = serde_json::to_value(render(&tasks, Filter::Completed)).expect("json");
    assert_eq!(value["filter"], "completed");
    assert_eq!(value["items"][0]["id"], "b");
    assert_eq!(value["items"][0]["completed"], true);
    assert!(value["items"][0].get("toggle").is_none());
    assert_eq!(value["counters"]["pending"], 2);
}
