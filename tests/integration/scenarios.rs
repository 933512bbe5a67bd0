//! Catalog scenarios against the fake tool
//!
//! Each scenario must pass, run its steps in order, and hand the tool
//! exactly the arguments and working directory it was built with.

use super::harness::{fixtures_dir, OutcomeAssertions, Sandbox};
use scenario_rig::config::{VersionPins, NUGET_ORG};
use scenario_rig::scenario::{catalog, run_scenario, ScenarioOutcome};

fn run(sandbox: &Sandbox, name: &str) -> ScenarioOutcome {
    let scenario = catalog::find(name).expect("scenario exists");
    run_scenario(&sandbox.harness(), scenario)
}

#[test]
fn app_with_args_restores_builds_and_runs() {
    let sandbox = Sandbox::new();
    let outcome = run(&sandbox, "app-with-args");

    outcome.assert_passed();
    outcome.assert_steps(&["restore", "build", "run"]);

    let calls = sandbox.calls();
    let subcommands: Vec<&str> = calls.iter().map(|c| c.subcommand()).collect();
    assert_eq!(subcommands, vec!["restore", "build", "run"]);
    assert!(calls.iter().all(|c| c.cwd == calls[0].cwd));
    assert!(calls[0]
        .cwd
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("rig-"));
}

#[test]
fn library_restore_and_build_arguments() {
    let sandbox = Sandbox::new();
    run(&sandbox, "library").assert_passed();

    let restore = &sandbox.calls_for("restore")[0];
    let packages = sandbox.packages_dir().display().to_string();
    assert_eq!(
        restore.args,
        vec![
            "restore",
            "--no-cache",
            "-v",
            "n",
            "--packages",
            packages.as_str(),
            "--source",
            NUGET_ORG,
            "--source",
            "/feeds/packages to test",
        ]
    );

    let build = &sandbox.calls_for("build")[0];
    assert_eq!(build.args, vec!["build", "-v", "n"]);
    assert!(sandbox.calls_for("run").is_empty());
}

#[test]
fn version_pins_become_property_overrides() {
    let sandbox = Sandbox::new();
    let pins = VersionPins {
        fsharp_sdk: Some("1.0.0-alpha-000123".to_string()),
        fsharp_core: None,
    };
    let harness = sandbox.harness_with(fixtures_dir(), pins);

    run_scenario(&harness, catalog::find("library").unwrap()).assert_passed();

    let restore = &sandbox.calls_for("restore")[0];
    let props: Vec<&String> = restore.args.iter().filter(|a| a.starts_with("/p:")).collect();
    assert_eq!(props, vec!["/p:FSharpNETSdkVersion=1.0.0-alpha-000123"]);
    assert_eq!(restore.args.last().unwrap(), "/p:FSharpNETSdkVersion=1.0.0-alpha-000123");
}

#[test]
fn app_with_library_runs_from_app_dir() {
    let sandbox = Sandbox::new();
    let outcome = run(&sandbox, "app-with-library");

    outcome.assert_passed();
    outcome.assert_steps(&["restore", "build", "run"]);
    for call in sandbox.calls() {
        assert!(call.cwd.ends_with("TestApp"), "unexpected cwd {:?}", call.cwd);
    }
}

#[test]
fn app_without_sibling_library_fails_to_build() {
    let sandbox = Sandbox::new();
    let outcome = run(&sandbox, "app-missing-library");

    // The scenario passes because the build failed as required
    outcome.assert_passed();
    outcome.assert_steps(&["restore", "build"]);
    assert_eq!(outcome.steps[1].exit_code, Some(1));
}

#[test]
fn path_with_blank_arrives_intact() {
    let sandbox = Sandbox::new();
    let outcome = run(&sandbox, "path-with-blank");

    outcome.assert_passed();
    let calls = sandbox.calls();
    assert_eq!(calls.len(), 2);
    for call in &calls {
        assert_eq!(call.cwd.file_name().unwrap(), "path with blank");
    }
    assert!(outcome.steps[0].command_line.contains("--source \"/feeds/packages to test\""));
}

#[test]
fn rid_publish_uses_reported_rid() {
    let sandbox = Sandbox::new();
    let outcome = run(&sandbox, "rid-publish");

    outcome.assert_passed();
    outcome.assert_steps(&["info", "restore", "publish", "run published"]);

    assert_eq!(sandbox.calls_for("--info")[0].args, vec!["--info"]);

    let restore = &sandbox.calls_for("restore")[0];
    assert_eq!(&restore.args[1..3], &["-r", "fake-x64"]);
    assert!(restore.args.contains(&"/p:AssemblyName=noop".to_string()));

    let publish = &sandbox.calls_for("publish")[0];
    assert_eq!(&publish.args[1..3], &["-r", "fake-x64"]);
    assert_eq!(publish.args[3], "-o");
    assert!(publish.args[4].ends_with("/out"));
    assert_eq!(publish.args[5], "/p:AssemblyName=noop");
}

#[test]
fn every_catalog_scenario_passes() {
    let sandbox = Sandbox::new();
    let harness = sandbox.harness();

    for scenario in catalog::all() {
        run_scenario(&harness, scenario).assert_passed();
    }
}
