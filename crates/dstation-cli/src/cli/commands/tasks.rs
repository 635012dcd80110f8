//! `dstation tasks` – list tasks and refresh the cached task list in the state file.

use anyhow::Result;
use dstation_core::api::task::{self, Additional, ListOptions, Task, TaskStatus};
use dstation_core::api::ErrorScope;
use dstation_core::config::DstationConfig;
use dstation_core::state::{State, TaskFetchFailureReason, TaskSortType, VisibleTaskSettings};
use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::cli::session::{expect_success, Session};

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

pub async fn run_tasks(cfg: &DstationConfig, state: &mut State) -> Result<()> {
    state.cached_tasks.record_fetch_started(now_ms());
    if state.settings.connection.base_url().is_none() {
        state
            .cached_tasks
            .record_fetch_failure(TaskFetchFailureReason::missing_config(), now_ms());
        anyhow::bail!("no NAS configured; run `dstation configure --host <name>` first");
    }

    let fetched = fetch(cfg, state).await;
    match fetched {
        Ok(tasks) => {
            let raw = tasks
                .iter()
                .filter_map(|t| serde_json::to_value(t).ok())
                .collect();
            state.cached_tasks.record_fetch_success(raw, now_ms());
            print_tasks(tasks, &state.settings.visible_tasks, state.settings.task_sort_type);
            Ok(())
        }
        Err(err) => {
            state
                .cached_tasks
                .record_fetch_failure(TaskFetchFailureReason::message(format!("{:#}", err)), now_ms());
            Err(err)
        }
    }
}

async fn fetch(cfg: &DstationConfig, state: &State) -> Result<Vec<Task>> {
    let session = Session::open(cfg, state).await?;
    let opts = ListOptions {
        offset: None,
        limit: cfg.task_list_limit,
        additional: vec![Additional::Detail, Additional::Transfer],
        timeout: Some(session.timeout),
    };
    let result = task::list(&session.base_url, &session.sid, &opts).await;
    session.close().await;
    let list = expect_success(result?, ErrorScope::Task, "list")?;
    tracing::debug!(total = list.total, fetched = list.tasks.len(), "fetched tasks");
    Ok(list.tasks)
}

fn print_tasks(mut tasks: Vec<Task>, visible: &VisibleTaskSettings, sort: TaskSortType) {
    tasks.retain(|t| is_visible(t, visible));
    sort_tasks(&mut tasks, sort);
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    println!("{:<12} {:<16} {:>6} {}", "ID", "STATUS", "DONE", "TITLE");
    for t in tasks {
        let done = t
            .progress()
            .map(|p| format!("{:.0}%", p * 100.0))
            .unwrap_or_else(|| "-".to_string());
        let status = serde_json::to_value(&t.status)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());
        println!("{:<12} {:<16} {:>6} {}", t.id, status, done, t.title);
    }
}

fn is_visible(task: &Task, visible: &VisibleTaskSettings) -> bool {
    match task.status {
        TaskStatus::Downloading
        | TaskStatus::Waiting
        | TaskStatus::Finishing
        | TaskStatus::HashChecking
        | TaskStatus::FilehostWaiting => visible.downloading,
        TaskStatus::Seeding => visible.uploading,
        TaskStatus::Finished => visible.completed,
        TaskStatus::Error => visible.errored,
        TaskStatus::Paused | TaskStatus::Extracting | TaskStatus::Unknown => visible.other,
    }
}

fn created(t: &Task) -> Option<i64> {
    t.additional.as_ref()?.detail.as_ref()?.create_time
}

fn completed(t: &Task) -> Option<i64> {
    t.additional.as_ref()?.detail.as_ref()?.completed_time
}

fn by_progress(a: &Task, b: &Task) -> Ordering {
    let pa = a.progress().unwrap_or(0.0);
    let pb = b.progress().unwrap_or(0.0);
    pa.partial_cmp(&pb).unwrap_or(Ordering::Equal)
}

fn sort_tasks(tasks: &mut [Task], sort: TaskSortType) {
    match sort {
        TaskSortType::NameAsc => tasks.sort_by(|a, b| a.title.cmp(&b.title)),
        TaskSortType::NameDesc => tasks.sort_by(|a, b| b.title.cmp(&a.title)),
        TaskSortType::TimestampAddedAsc => tasks.sort_by_key(created),
        TaskSortType::TimestampAddedDesc => tasks.sort_by(|a, b| created(b).cmp(&created(a))),
        TaskSortType::TimestampCompletedAsc => tasks.sort_by_key(completed),
        TaskSortType::TimestampCompletedDesc => {
            tasks.sort_by(|a, b| completed(b).cmp(&completed(a)))
        }
        TaskSortType::CompletedPercentAsc => tasks.sort_by(by_progress),
        TaskSortType::CompletedPercentDesc => tasks.sort_by(|a, b| by_progress(b, a)),
    }
}
