//! Alternate tool on PATH
//!
//! A failing fake named like the tool is first on PATH. Invoking the real
//! tool by absolute path must still work; invoking by bare name with the
//! same overlay picks up the fake.

use super::harness::{OutcomeAssertions, Sandbox};
use scenario_rig::scenario::{catalog, run_scenario};
use scenario_rig::util::process::{self, prepend_to_path, Invocation};
use std::env;
use std::fs;
use std::path::PathBuf;

#[test]
fn full_path_build_ignores_fake_on_path() {
    let sandbox = Sandbox::new();
    let outcome = run_scenario(&sandbox.harness(), catalog::find("different-tool-in-path").unwrap());

    outcome.assert_passed();
    outcome.assert_steps(&["info", "restore", "publish", "restore", "build", "fake tool"]);

    // Only the real (logging) tool records calls; the build went through it
    let builds = sandbox.calls_for("build");
    assert_eq!(builds.len(), 1);
    assert!(builds[0].cwd.ends_with("TestApp"));

    // The real build ran with the fake's directory first on PATH
    let build_path = &builds[0].path;
    assert!(build_path[0].ends_with("toolsdk"), "PATH was {:?}", build_path);
    let parent_path = env::var_os("PATH").unwrap_or_default();
    let inherited: Vec<PathBuf> = env::split_paths(&parent_path)
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    assert_eq!(&build_path[1..], inherited.as_slice());

    // Steps without the overlay see the parent PATH unchanged
    let unchanged: Vec<PathBuf> = env::split_paths(&parent_path).collect();
    for restore in sandbox.calls_for("restore") {
        assert_eq!(restore.path, unchanged);
    }

    let fake = &outcome.steps[5];
    assert!(fake.command_line.contains("toolsdk/dotnet"));
    assert_eq!(fake.exit_code, Some(1));
}

#[test]
fn fake_is_named_after_the_tool() {
    let sandbox = Sandbox::new();
    let mut harness = sandbox.harness();
    harness.settings.keep_roots = true;

    let outcome = run_scenario(&harness, catalog::find("different-tool-in-path").unwrap());
    outcome.assert_passed();

    let scenario_root = &outcome.kept_roots[0];
    assert!(scenario_root.join("toolsdk/dotnet").is_file());
    assert!(scenario_root.join("TestApp/TestLibrary.fsproj").is_file());

    for root in &outcome.kept_roots {
        fs::remove_dir_all(root).unwrap();
    }
}

#[test]
fn bare_name_lookup_uses_overlay_path() {
    let dir = tempfile::tempdir().unwrap();
    let fake_dir = dir.path().join("toolsdk");
    fs::create_dir_all(&fake_dir).unwrap();
    let fake = fake_dir.join("rig-probe-tool");
    fs::write(&fake, "#!/bin/sh\nexit 7\n").unwrap();
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&fake, fs::Permissions::from_mode(0o755)).unwrap();
    }

    let before = env::var_os("PATH");
    let path = prepend_to_path(&fake_dir).unwrap();
    let inv = Invocation::new("rig-probe-tool", dir.path()).env("PATH", &path);
    let result = process::run(&inv).unwrap();

    assert_eq!(result.exit_code, 7);
    assert_eq!(env::var_os("PATH"), before, "parent PATH was modified");
}
