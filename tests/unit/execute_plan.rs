//! Execution behaviour against a recording runner.

#![allow(clippy::expect_used)]

use std::path::Path;

use launchutil::execute::{self, Mode};
use launchutil::output::{OutputContext, OutputSink};
use launchutil::plan::{self, CommandPlan, LifecycleCommand, PlanContext, Verb};
use launchutil::service::{ServiceIdentity, ServicePaths};

use crate::mocks::{RecordingRunner, err_output, ok_output};

fn plan_ctx(home: &Path) -> PlanContext {
    let identity = ServiceIdentity::resolve("com.example.daily");
    let paths = ServicePaths::with_home(&identity, home);
    PlanContext {
        identity,
        paths,
        uid: 501,
    }
}

fn quiet_ctx() -> OutputContext {
    OutputContext::new(true, true)
}

#[tokio::test]
async fn dry_run_spawns_nothing() {
    let runner = RecordingRunner::new(Vec::new());
    let mut sink = OutputSink::Stdout;
    let ctx = quiet_ctx();

    for verb in [
        Verb::Bootstrap,
        Verb::Bootout,
        Verb::Reload { install: false },
        Verb::Enable,
        Verb::Disable,
        Verb::Print,
        Verb::Dir,
    ] {
        let plan = plan::compose(verb, &plan_ctx(Path::new("/Users/me")));
        execute::execute(&plan, Mode::DryRun, &runner, &mut sink, &ctx)
            .await
            .expect("dry-run");
    }

    assert!(runner.argv_log().is_empty());
}

#[tokio::test]
async fn dry_run_mutates_no_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("com.example.daily.plist");
    let dest = dir.path().join("installed.plist");
    std::fs::write(&source, b"<plist/>").expect("write source");

    let plan = CommandPlan::new(vec![LifecycleCommand::CopyFile {
        source: source.clone(),
        dest: dest.clone(),
    }]);
    let runner = RecordingRunner::new(Vec::new());
    let mut sink = OutputSink::Stdout;
    execute::execute(&plan, Mode::DryRun, &runner, &mut sink, &quiet_ctx())
        .await
        .expect("dry-run");

    assert!(!dest.exists());
}

#[tokio::test]
async fn apply_reload_issues_bootout_then_bootstrap() {
    let runner = RecordingRunner::new(Vec::new());
    let mut sink = OutputSink::Stdout;
    let plan = plan::compose(
        Verb::Reload { install: false },
        &plan_ctx(Path::new("/Users/me")),
    );

    execute::execute(&plan, Mode::Apply, &runner, &mut sink, &quiet_ctx())
        .await
        .expect("apply");

    let calls = runner.argv_log();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0][..2], ["launchctl".to_string(), "bootout".to_string()]);
    assert_eq!(
        calls[1][..2],
        ["launchctl".to_string(), "bootstrap".to_string()]
    );
}

#[tokio::test]
async fn apply_continues_after_a_failing_command() {
    // A non-zero exit status from the first command must not stop the plan.
    let runner = RecordingRunner::new(vec![err_output(), ok_output(b"")]);
    let mut sink = OutputSink::Stdout;
    let plan = plan::compose(
        Verb::Reload { install: false },
        &plan_ctx(Path::new("/Users/me")),
    );

    execute::execute(&plan, Mode::Apply, &runner, &mut sink, &quiet_ctx())
        .await
        .expect("apply");

    assert_eq!(runner.argv_log().len(), 2);
}

#[tokio::test]
async fn apply_forwards_stdout_to_the_sink() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_path = dir.path().join("out.txt");
    let spec = out_path.to_string_lossy().into_owned();

    let runner = RecordingRunner::new(vec![ok_output(b"service = com.example.daily\n")]);
    let mut sink = OutputSink::open(&spec).expect("open sink");
    let plan = plan::compose(Verb::Print, &plan_ctx(Path::new("/Users/me")));

    execute::execute(&plan, Mode::Apply, &runner, &mut sink, &quiet_ctx())
        .await
        .expect("apply");
    drop(sink);

    assert_eq!(
        std::fs::read_to_string(&out_path).expect("read sink"),
        "service = com.example.daily\n"
    );
}

#[tokio::test]
async fn apply_copy_produces_an_identical_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("com.example.daily.plist");
    let dest = dir.path().join("installed.plist");
    std::fs::write(&source, b"<plist version=\"1.0\"/>").expect("write source");

    let plan = CommandPlan::new(vec![LifecycleCommand::CopyFile {
        source: source.clone(),
        dest: dest.clone(),
    }]);
    let runner = RecordingRunner::new(Vec::new());
    let mut sink = OutputSink::Stdout;
    execute::execute(&plan, Mode::Apply, &runner, &mut sink, &quiet_ctx())
        .await
        .expect("apply");

    assert_eq!(
        std::fs::read(&source).expect("read source"),
        std::fs::read(&dest).expect("read dest")
    );
}

#[tokio::test]
async fn apply_remove_deletes_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("installed.plist");
    std::fs::write(&path, b"<plist/>").expect("write");

    let plan = CommandPlan::new(vec![LifecycleCommand::RemoveFile { path: path.clone() }]);
    let runner = RecordingRunner::new(Vec::new());
    let mut sink = OutputSink::Stdout;
    execute::execute(&plan, Mode::Apply, &runner, &mut sink, &quiet_ctx())
        .await
        .expect("apply");

    assert!(!path.exists());
}

#[tokio::test]
async fn apply_remove_of_a_missing_file_is_a_noop() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("never-created.plist");

    let plan = CommandPlan::new(vec![LifecycleCommand::RemoveFile { path }]);
    let runner = RecordingRunner::new(Vec::new());
    let mut sink = OutputSink::Stdout;
    execute::execute(&plan, Mode::Apply, &runner, &mut sink, &quiet_ctx())
        .await
        .expect("apply");
}
