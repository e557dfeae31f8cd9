//! tabboard todo command implementation

use serde::Serialize;

use crate::error::Result;
use crate::output::{OutputMode, Report};
use crate::storage::FileSlotStore;
use crate::todo::{Control, Counters, Filter, RenderedView, Task, TaskId, TodoEvent, TodoWidget};

use super::Context;

/// Options for `tabboard todo add`
pub struct AddOptions {
    pub text: String,
    pub mode: OutputMode,
}

/// Options for `tabboard todo toggle` and `tabboard todo rm`
pub struct IdOptions {
    pub id: String,
    pub mode: OutputMode,
}

/// Options for `tabboard todo list`
pub struct ListOptions {
    pub filter: Filter,
    pub mode: OutputMode,
}

#[derive(Serialize)]
struct AddReport<'a> {
    added: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<&'a Task>,
    counters: Counters,
    #[serde(skip_serializing_if = "Option::is_none")]
    save_error: Option<&'a str>,
}

#[derive(Serialize)]
struct ChangeReport<'a> {
    id: &'a str,
    matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
    counters: Counters,
    #[serde(skip_serializing_if = "Option::is_none")]
    save_error: Option<&'a str>,
}

fn open_widget(context: &Context) -> TodoWidget<FileSlotStore> {
    TodoWidget::open(context.storage.slots(), &context.config.store.slot)
}

fn push_counters(report: &mut Report, counters: Counters) {
    report.push_summary("total", counters.total.to_string());
    report.push_summary("pending", counters.pending.to_string());
    report.push_summary("completed", counters.completed.to_string());
}

fn push_save_warning(report: &mut Report, save_error: Option<&str>) {
    if let Some(error) = save_error {
        report.push_warning(format!("change kept in memory only: {error}"));
    }
}

pub fn run_add(context: Context, options: AddOptions) -> Result<()> {
    let mut widget = open_widget(&context);
    widget.handle(TodoEvent::Input(options.text));
    let outcome = widget.handle(TodoEvent::Submit);

    let task = outcome
        .task_id
        .as_ref()
        .and_then(|id| widget.repository().get(id.as_str()));
    let save_error = widget.repository().last_save_error();
    let data = AddReport {
        added: outcome.changed,
        task,
        counters: widget.view().counters,
        save_error,
    };

    let mut report = match task {
        Some(task) => {
            let mut report = Report::new("todo add", task.id().as_str());
            report.push_summary("text", task.text());
            report
        }
        None => {
            let mut report = Report::new("todo add", "nothing added");
            report.push_warning("task text is empty");
            report
        }
    };
    push_counters(&mut report, data.counters);
    push_save_warning(&mut report, save_error);
    report.push_next_step("tabboard todo list");

    report.emit(options.mode, &data)
}

pub fn run_toggle(context: Context, options: IdOptions) -> Result<()> {
    run_change(context, options, Control::Toggle)
}

pub fn run_rm(context: Context, options: IdOptions) -> Result<()> {
    run_change(context, options, Control::Delete)
}

fn run_change(
    context: Context,
    options: IdOptions,
    control: fn(TaskId) -> Control,
) -> Result<()> {
    let mut widget = open_widget(&context);
    let id = TaskId::from(options.id.trim());
    let control = control(id.clone());
    let action = match control {
        Control::Toggle(_) => "toggle",
        Control::Delete(_) => "rm",
    };
    let outcome = widget.handle(TodoEvent::Activate(control));

    let completed = match action {
        "toggle" => widget
            .repository()
            .get(id.as_str())
            .map(|task| task.completed()),
        _ => None,
    };
    let save_error = widget.repository().last_save_error();
    let data = ChangeReport {
        id: id.as_str(),
        matched: outcome.changed,
        completed,
        counters: widget.view().counters,
        save_error,
    };

    let mut report = Report::new(format!("todo {action}"), outcome.message);
    if !outcome.changed {
        report.push_warning(format!("no task with id '{id}'"));
        report.push_next_step("tabboard todo list");
    }
    push_counters(&mut report, data.counters);
    push_save_warning(&mut report, save_error);

    report.emit(options.mode, &data)
}

pub fn run_list(context: Context, options: ListOptions) -> Result<()> {
    let mut widget = open_widget(&context);
    widget.handle(TodoEvent::SetFilter(options.filter));
    let view = widget.view();

    let mut report = Report::new(
        "todo list",
        format!("{} shown ({})", view.len(), view.filter),
    );
    push_counters(&mut report, view.counters);
    for line in list_lines(view) {
        report.push_detail(line);
    }
    if view.counters.total == 0 {
        report.push_next_step("tabboard todo add <text>");
    }

    report.emit(options.mode, view)
}

pub fn run_stats(context: Context, mode: OutputMode) -> Result<()> {
    let widget = open_widget(&context);
    let counters = widget.view().counters;

    let mut report = Report::new(
        "todo stats",
        format!("{} of {} completed", counters.completed, counters.total),
    );
    push_counters(&mut report, counters);

    report.emit(mode, &counters)
}

fn list_lines(view: &RenderedView) -> Vec<String> {
    view.items
        .iter()
        .map(|item| {
            let mark = if item.task.completed() { "x" } else { " " };
            format!("[{mark}] {}  {}", item.task.id(), item.task.text())
        })
        .collect()
}
