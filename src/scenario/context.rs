//! Per-scenario state and the tool operations scenarios are written in

use super::step::{Expect, Step};
use super::Phase;
use crate::args::{publish_args, verbosity_args, PropertyOverrides, RestoreOptions};
use crate::config::{Config, VersionPins};
use crate::error::{Result, RigError};
use crate::fixture::{FixtureStore, TestRoot};
use crate::output::{require_field, RID_MARKER};
use crate::platform;
use crate::util::process::{Invocation, InvocationResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Template holding the do-nothing console app used for fake tools
pub const NOOP_TEMPLATE: &str = "Noop";

#[derive(Debug, Clone, Copy)]
pub struct RunSettings {
    /// Capture child output (false streams it to the terminal)
    pub capture: bool,
    /// Leave test roots on disk after the scenario finishes
    pub keep_roots: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            capture: true,
            keep_roots: false,
        }
    }
}

/// Everything scenarios share: the resolved tool, fixtures and restore defaults
#[derive(Debug, Clone)]
pub struct Harness {
    pub tool: PathBuf,
    pub store: FixtureStore,
    /// Templates copied alongside every project fixture
    pub support: Vec<String>,
    pub restore: RestoreOptions,
    pub settings: RunSettings,
}

impl Harness {
    /// Build from config; resolves the tool to an absolute path up front
    pub fn from_config(config: &Config, pins: &VersionPins) -> Result<Self> {
        let restore = RestoreOptions {
            runtime: None,
            sources: config.restore_sources(),
            packages_dir: config.packages_dir(),
            properties: pins.to_properties(),
        };

        Ok(Self {
            tool: config.tool_path()?,
            store: FixtureStore::new(config.templates_dir()),
            support: config.fixtures.support.clone(),
            restore,
            settings: RunSettings {
                capture: config.run.capture,
                keep_roots: config.run.keep_roots,
            },
        })
    }

    pub fn context(&self) -> ScenarioContext {
        ScenarioContext {
            harness: self.clone(),
            phase: Phase::Provisioning,
            steps: Vec::new(),
            roots: Vec::new(),
            rid: None,
        }
    }
}

/// One executed step, as reported in outcomes
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub label: String,
    pub phase: Phase,
    pub command_line: String,
    pub working_dir: PathBuf,
    pub expected: Expect,
    /// None when the process could not be launched
    pub exit_code: Option<i32>,
}

/// Mutable state of a single scenario run
pub struct ScenarioContext {
    harness: Harness,
    phase: Phase,
    steps: Vec<StepRecord>,
    roots: Vec<TestRoot>,
    rid: Option<String>,
}

impl ScenarioContext {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// File stem of the tool ("dotnet" for /usr/share/dotnet/dotnet)
    pub fn tool_stem(&self) -> String {
        self.harness
            .tool
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "dotnet".to_string())
    }

    /// Fresh isolated root owned by this scenario
    pub fn new_root(&mut self) -> Result<PathBuf> {
        let root = self.harness.store.create_isolated_root()?;
        let path = root.path().to_path_buf();
        self.roots.push(root);
        Ok(path)
    }

    /// Copy a project template plus the support templates into `dest`.
    /// Copies made after the first tool step belong to the current phase.
    pub fn provision_project(&mut self, template: &str, dest: &Path) -> Result<()> {
        self.harness.store.copy_template(template, dest)?;
        self.harness.store.provision(&self.harness.support, dest)
    }

    /// Copy a single template, without support templates
    pub fn provision_template(&mut self, template: &str, dest: &Path) -> Result<()> {
        self.harness.store.copy_template(template, dest)
    }

    /// Invocation of the tool in `dir` honoring the capture setting
    pub fn invocation(&self, dir: &Path) -> Invocation {
        self.invocation_of(&self.harness.tool, dir)
    }

    /// Invocation of an arbitrary program, e.g. a published artifact
    pub fn invocation_of(&self, program: &Path, dir: &Path) -> Invocation {
        Invocation::new(program, dir).capture(self.harness.settings.capture)
    }

    /// Run a step, record it, and advance the phase
    pub fn step(&mut self, phase: Phase, step: Step) -> Result<InvocationResult> {
        self.phase = phase;
        let mut record = StepRecord {
            label: step.label.clone(),
            phase,
            command_line: step.invocation.command_line(),
            working_dir: step.invocation.working_dir().to_path_buf(),
            expected: step.expect,
            exit_code: None,
        };

        let outcome = step.execute();
        record.exit_code = match &outcome {
            Ok(result) => Some(result.exit_code),
            Err(err) => err.step_failure().map(|f| f.exit_code),
        };
        self.steps.push(record);
        outcome
    }

    pub fn restore(&mut self, dir: &Path, extra: &PropertyOverrides) -> Result<InvocationResult> {
        self.restore_expecting(dir, extra, Expect::Success)
    }

    pub fn restore_expecting(
        &mut self,
        dir: &Path,
        extra: &PropertyOverrides,
        expect: Expect,
    ) -> Result<InvocationResult> {
        let options = self.harness.restore.clone().with_properties(extra);
        self.restore_with(dir, &options, expect)
    }

    /// `restore -r <rid>` for a runtime-specific publish
    pub fn restore_for_runtime(
        &mut self,
        dir: &Path,
        rid: &str,
        extra: &PropertyOverrides,
    ) -> Result<InvocationResult> {
        let options = self
            .harness
            .restore
            .clone()
            .with_runtime(rid)
            .with_properties(extra);
        self.restore_with(dir, &options, Expect::Success)
    }

    fn restore_with(
        &mut self,
        dir: &Path,
        options: &RestoreOptions,
        expect: Expect,
    ) -> Result<InvocationResult> {
        let inv = self.invocation(dir).arg("restore").args(options.to_args());
        self.step(Phase::Restoring, Step::new("restore", inv).expect(expect))
    }

    pub fn build(&mut self, dir: &Path) -> Result<InvocationResult> {
        self.build_with(self.invocation(dir), Expect::Success)
    }

    /// `build -v n` from a prepared invocation (custom program or env overlay)
    pub fn build_with(&mut self, base: Invocation, expect: Expect) -> Result<InvocationResult> {
        let inv = base.arg("build").args(verbosity_args());
        self.step(Phase::Building, Step::new("build", inv).expect(expect))
    }

    pub fn run_app(&mut self, dir: &Path) -> Result<InvocationResult> {
        let inv = self.invocation(dir).arg("run").args(verbosity_args());
        self.step(Phase::Running, Step::new("run", inv))
    }

    pub fn publish(
        &mut self,
        dir: &Path,
        rid: &str,
        output_dir: &Path,
        props: &PropertyOverrides,
    ) -> Result<InvocationResult> {
        let inv = self
            .invocation(dir)
            .arg("publish")
            .args(publish_args(rid, output_dir, props));
        self.step(Phase::Publishing, Step::new("publish", inv))
    }

    /// `<tool> --info`, always captured so it can be parsed
    pub fn info(&mut self) -> Result<InvocationResult> {
        let root = self.new_root()?;
        let inv = Invocation::new(&self.harness.tool, root).arg("--info");
        let phase = self.phase;
        self.step(phase, Step::new("info", inv))
    }

    /// Runtime identifier reported by `--info`, queried once per scenario
    pub fn current_rid(&mut self) -> Result<String> {
        if let Some(ref rid) = self.rid {
            return Ok(rid.clone());
        }
        let info = self.info()?;
        let rid = require_field(&info.stdout, RID_MARKER)?;
        tracing::debug!(rid = %rid, "detected runtime identifier");
        self.rid = Some(rid.clone());
        Ok(rid)
    }

    /// Publish the Noop app as a self-contained executable named `name` into
    /// `into_dir`. With `fail`, the executable exits non-zero.
    pub fn create_noop_exe(&mut self, into_dir: &Path, name: &str, fail: bool) -> Result<PathBuf> {
        let root = self.new_root()?;
        self.provision_template(NOOP_TEMPLATE, &root)?;

        let rid = self.current_rid()?;
        let mut props = PropertyOverrides::new().with("AssemblyName", name);
        if fail {
            props.set("Fail", Some("true".to_string()));
        }

        self.restore_for_runtime(&root, &rid, &props)?;
        self.publish(&root, &rid, into_dir, &props)?;

        let exe = platform::published_executable(into_dir, name);
        self.assert_artifact(&exe)?;
        Ok(exe)
    }

    pub fn assert_artifact(&self, path: &Path) -> Result<()> {
        if path.exists() {
            Ok(())
        } else {
            Err(RigError::MissingArtifact {
                path: path.to_path_buf(),
            })
        }
    }

    /// End the run, returning the steps and any roots kept for inspection
    pub fn finish(self) -> (Vec<StepRecord>, Vec<PathBuf>) {
        let kept = if self.harness.settings.keep_roots {
            self.roots.into_iter().map(TestRoot::keep).collect()
        } else {
            Vec::new()
        };
        (self.steps, kept)
    }
}
