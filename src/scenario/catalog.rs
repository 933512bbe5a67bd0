//! Named scenarios

use super::context::ScenarioContext;
use super::step::{Expect, Step};
use super::Phase;
use crate::args::PropertyOverrides;
use crate::error::{Result, RigError};
use crate::util::process::prepend_to_path;
use std::fs;

pub const TEST_APP_WITH_ARGS: &str = "TestAppWithArgs";
pub const TEST_LIBRARY: &str = "TestLibrary";
pub const TEST_APP: &str = "TestApp";

/// A named, independent pass/fail unit
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    body: fn(&mut ScenarioContext) -> Result<()>,
}

impl Scenario {
    pub fn run(&self, ctx: &mut ScenarioContext) -> Result<()> {
        (self.body)(ctx)
    }
}

pub static SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "app-with-args",
        description: "Console app: restore, build, run",
        body: app_with_args,
    },
    Scenario {
        name: "library",
        description: "Class library: restore, build",
        body: library,
    },
    Scenario {
        name: "app-with-library",
        description: "App referencing a sibling library: restore, build, run",
        body: app_with_library,
    },
    Scenario {
        name: "app-missing-library",
        description: "App whose referenced library was not copied: build must fail",
        body: app_missing_library,
    },
    Scenario {
        name: "path-with-blank",
        description: "Library under a directory containing a space: restore, build",
        body: path_with_blank,
    },
    Scenario {
        name: "rid-publish",
        description: "Publish for the current runtime identifier and run the artifact",
        body: rid_publish,
    },
    Scenario {
        name: "different-tool-in-path",
        description: "Build via the tool's full path with a failing fake first on PATH",
        body: different_tool_in_path,
    },
];

pub fn all() -> &'static [Scenario] {
    SCENARIOS
}

pub fn find(name: &str) -> Result<&'static Scenario> {
    SCENARIOS
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| RigError::UnknownScenario {
            name: name.to_string(),
        })
}

/// Scenarios by name in the order given; all of them when `names` is empty
pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Vec<&'static Scenario>> {
    if names.is_empty() {
        return Ok(SCENARIOS.iter().collect());
    }
    names.iter().map(|n| find(n.as_ref())).collect()
}

fn app_with_args(ctx: &mut ScenarioContext) -> Result<()> {
    let root = ctx.new_root()?;
    ctx.provision_project(TEST_APP_WITH_ARGS, &root)?;

    ctx.restore(&root, &PropertyOverrides::new())?;
    ctx.build(&root)?;
    ctx.run_app(&root)?;
    Ok(())
}

fn library(ctx: &mut ScenarioContext) -> Result<()> {
    let root = ctx.new_root()?;
    ctx.provision_project(TEST_LIBRARY, &root)?;

    ctx.restore(&root, &PropertyOverrides::new())?;
    ctx.build(&root)?;
    Ok(())
}

fn app_with_library(ctx: &mut ScenarioContext) -> Result<()> {
    let root = ctx.new_root()?;
    for name in [TEST_LIBRARY, TEST_APP] {
        ctx.provision_project(name, &root.join(name))?;
    }

    let app_dir = root.join(TEST_APP);
    ctx.restore(&app_dir, &PropertyOverrides::new())?;
    ctx.build(&app_dir)?;
    ctx.run_app(&app_dir)?;
    Ok(())
}

fn app_missing_library(ctx: &mut ScenarioContext) -> Result<()> {
    let root = ctx.new_root()?;
    let app_dir = root.join(TEST_APP);
    ctx.provision_project(TEST_APP, &app_dir)?;

    // Restore may or may not notice the dangling reference; build must.
    ctx.restore_expecting(&app_dir, &PropertyOverrides::new(), Expect::Any)?;
    let base = ctx.invocation(&app_dir);
    ctx.build_with(base, Expect::Failure)?;
    Ok(())
}

fn path_with_blank(ctx: &mut ScenarioContext) -> Result<()> {
    let root = ctx.new_root()?.join("path with blank");
    ctx.provision_project(TEST_LIBRARY, &root)?;

    ctx.restore(&root, &PropertyOverrides::new())?;
    ctx.build(&root)?;
    Ok(())
}

fn rid_publish(ctx: &mut ScenarioContext) -> Result<()> {
    let root = ctx.new_root()?;
    let out_dir = root.join("out");

    let exe = ctx.create_noop_exe(&out_dir, "noop", false)?;

    let inv = ctx.invocation_of(&exe, &root);
    ctx.step(Phase::Running, Step::new("run published", inv))?;
    Ok(())
}

fn different_tool_in_path(ctx: &mut ScenarioContext) -> Result<()> {
    let root = ctx.new_root()?;

    let fake_dir = root.join("toolsdk");
    fs::create_dir_all(&fake_dir)
        .map_err(|e| RigError::io(format!("Failed to create {}", fake_dir.display()), e))?;
    let stem = ctx.tool_stem();
    let fake = ctx.create_noop_exe(&fake_dir, &stem, true)?;

    let app_dir = root.join(TEST_APP);
    ctx.provision_project(TEST_LIBRARY, &app_dir)?;
    ctx.restore(&app_dir, &PropertyOverrides::new())?;

    // Real tool by absolute path; the fake only wins PATH lookups
    let path = prepend_to_path(&fake_dir)?;
    let base = ctx.invocation(&app_dir).env("PATH", &path);
    ctx.build_with(base, Expect::Success)?;

    // Proves the fake would have failed the build had it been picked
    let probe = ctx.invocation_of(&fake, &app_dir).arg("build");
    ctx.step(
        Phase::Building,
        Step::new("fake tool", probe).expect(Expect::Failure),
    )?;
    Ok(())
}
