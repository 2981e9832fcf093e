//! Cook Use Case
//!
//! Orchestrates one cook run:
//! 1. Validate the engine binary and project path
//! 2. Resolve target platforms
//! 3. Choose full or incremental mode (first run without a base falls back to full)
//! 4. Resolve maps and build the candidate chunk
//! 5. Plan command lines (full map list, or one per group of identical work sets)
//! 6. Run the engine sequentially through the launcher port
//! 7. Export the candidate, scoped to the cooked platforms, as the new base version on success
//!
//! Business rules live in domain services; this type only sequences them.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;

use crate::config::CookConfig;
use crate::domain::entities::{Chunk, ProcessOutcome, ProcessRun, VersionDescriptor, WorkSet};
use crate::domain::ports::{
    AssetEnumerator, CookEvent, CookEventSink, CookMode, CookProcessLauncher, MapEnumerator,
    NoopEventSink, ReleaseExporter, ReleaseSettings, VersionRepository,
};
use crate::domain::services::{compute_work_set, render_command_line, CookCommandLine, OutputLine};
use crate::domain::value_objects::{AssetId, CookState, PlatformId};
use crate::error::{CookError, CookResult};

use super::options::CookOptions;
use super::result::{CookOutcome, CookReport, WorkSetPreview};
use super::state::CookStateMachine;

/// Name of the chunk describing the content of the current run
pub const CANDIDATE_CHUNK: &str = "Default";

/// Cook use case, parameterized by its ports
pub struct CookUseCase<VR, CC, RE, PL>
where
    VR: VersionRepository,
    CC: MapEnumerator + AssetEnumerator,
    RE: ReleaseExporter,
    PL: CookProcessLauncher,
{
    versions: VR,
    content: CC,
    exporter: RE,
    launcher: PL,
    events: Arc<dyn CookEventSink>,
}

/// Decided mode plus the base version an incremental run diffs against
enum Plan {
    Full(CookMode),
    Incremental(VersionDescriptor),
}

impl<VR, CC, RE, PL> CookUseCase<VR, CC, RE, PL>
where
    VR: VersionRepository,
    CC: MapEnumerator + AssetEnumerator,
    RE: ReleaseExporter,
    PL: CookProcessLauncher,
{
    pub fn new(versions: VR, content: CC, exporter: RE, launcher: PL) -> Self {
        Self {
            versions,
            content,
            exporter,
            launcher,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_event_sink(mut self, events: Arc<dyn CookEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Run one cook.
    ///
    /// Process failures are reported in `CookReport::outcome`; `Err` is reserved
    /// for runs that could not be carried out (bad configuration, spawn errors,
    /// unreadable state, failed export).
    pub fn execute(&self, config: &CookConfig, options: &CookOptions) -> CookResult<CookReport> {
        validate_paths(config, true)?;

        let mut machine = CookStateMachine::new(self.events.clone());
        let platforms = resolve_platforms(config, options);
        machine.transition(CookState::PlatformResolved)?;
        self.events.on_event(CookEvent::PlatformsResolved {
            platforms: platforms.clone(),
        });

        let plan = if config.inc_cook && !options.force_full {
            match self.versions.load()? {
                Some(base) => Plan::Incremental(base),
                None => {
                    tracing::info!(
                        location = %self.versions.location().display(),
                        "no base version recorded, falling back to a full cook"
                    );
                    self.events.on_event(CookEvent::BaseVersionMissing {
                        location: self.versions.location().to_path_buf(),
                    });
                    Plan::Full(CookMode::FirstRunFull)
                }
            }
        } else {
            Plan::Full(CookMode::Full)
        };

        if matches!(plan, Plan::Full(_)) && platforms.is_empty() {
            return Err(CookError::invalid_configuration(
                "no cook platforms configured for a full cook",
            ));
        }

        let maps = self.resolve_maps(config)?;
        let candidate = self.build_candidate(config, &maps)?;

        match plan {
            Plan::Full(mode) => {
                machine.transition(CookState::FullCookPending)?;
                let previous = match mode {
                    CookMode::FirstRunFull => None,
                    _ => self.previous_base(),
                };
                let command = CookCommandLine::new(&config.project_path)
                    .platforms(&platforms)
                    .maps(&maps)
                    .extra_params(&config.cook_params);
                let report = Pending {
                    mode,
                    platforms,
                    work_set: None,
                    external_diff: config.external_files_diff,
                    previous,
                };
                self.run_and_export(config, options, machine, vec![command], candidate, report)
            }
            Plan::Incremental(base) => {
                machine.transition(CookState::IncrementalDiffPending)?;
                let external_diff = config.external_files_diff && base.external_diff_enabled();
                let requested: BTreeSet<PlatformId> = platforms.iter().cloned().collect();
                let work_set = compute_work_set(&base, &candidate, &requested, external_diff);

                tracing::info!(
                    base = base.id(),
                    assets = work_set.all_assets().len(),
                    external_files = work_set.external_file_count(),
                    "work set computed"
                );
                self.events.on_event(CookEvent::WorkSetComputed {
                    base_id: base.id().to_string(),
                    assets_per_platform: platforms
                        .iter()
                        .map(|p| (p.clone(), work_set.assets_for(p).map_or(0, |a| a.len())))
                        .collect(),
                    external_files: work_set.external_file_count(),
                });

                let report = Pending {
                    mode: CookMode::Incremental,
                    platforms,
                    work_set: Some(work_set.clone()),
                    external_diff,
                    previous: Some(base),
                };

                if work_set.is_empty() {
                    if !options.dry_run {
                        machine.transition(CookState::PostProcessDone)?;
                    }
                    return Ok(report.finish(
                        if options.dry_run {
                            CookOutcome::DryRun { planned: Vec::new() }
                        } else {
                            CookOutcome::UpToDate
                        },
                        Vec::new(),
                        &machine,
                    ));
                }

                let commands = work_set
                    .cook_groups()
                    .into_iter()
                    .map(|group| {
                        CookCommandLine::new(&config.project_path)
                            .platforms(&group.platforms)
                            .packages(&group.assets)
                            .iterate(true)
                            .extra_params(&config.cook_params)
                    })
                    .collect();
                self.run_and_export(config, options, machine, commands, candidate, report)
            }
        }
    }

    /// Work set of the current content against the persisted base, without cooking.
    ///
    /// `None` when no base version has been recorded yet.
    pub fn preview_work_set(
        &self,
        config: &CookConfig,
        options: &CookOptions,
    ) -> CookResult<Option<WorkSetPreview>> {
        validate_paths(config, false)?;

        let Some(base) = self.versions.load()? else {
            return Ok(None);
        };
        let platforms = resolve_platforms(config, options);
        let maps = self.resolve_maps(config)?;
        let candidate = self.build_candidate(config, &maps)?;

        let external_diff = config.external_files_diff && base.external_diff_enabled();
        let requested: BTreeSet<PlatformId> = platforms.iter().cloned().collect();
        let work_set = compute_work_set(&base, &candidate, &requested, external_diff);
        Ok(Some(WorkSetPreview::new(&base, platforms, work_set)))
    }

    /// Base a full cook merges into; an unreadable one is replaced wholesale
    fn previous_base(&self) -> Option<VersionDescriptor> {
        match self.versions.load() {
            Ok(previous) => previous,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable base version for a full cook");
                None
            }
        }
    }

    fn resolve_maps(&self, config: &CookConfig) -> CookResult<Vec<String>> {
        if config.cook_all_map {
            let maps = self.content.list_available_maps(config.project_dir())?;
            tracing::debug!(count = maps.len(), "maps resolved from project content");
            Ok(maps)
        } else {
            Ok(config.cook_maps.clone())
        }
    }

    /// The chunk describing this run's content: enumerated assets, the cooked
    /// maps and the configured external files, valid on every platform.
    fn build_candidate(&self, config: &CookConfig, maps: &[String]) -> CookResult<Chunk> {
        let assets = self
            .content
            .list_assets(config.project_dir(), &config.asset_include_filters)?;
        let mut chunk = Chunk::new(CANDIDATE_CHUNK)?.with_assets(assets)?;

        for map in maps {
            let id = AssetId::from(map.as_str());
            if !chunk.contains_asset(&id) {
                chunk.insert_asset(id)?;
            }
        }
        for (platform, files) in &config.external_files {
            for file in files {
                chunk.insert_external_file(platform.clone(), file.clone());
            }
        }
        Ok(chunk)
    }

    fn run_and_export(
        &self,
        config: &CookConfig,
        options: &CookOptions,
        mut machine: CookStateMachine,
        commands: Vec<CookCommandLine>,
        candidate: Chunk,
        report: Pending,
    ) -> CookResult<CookReport> {
        if options.dry_run {
            let planned = commands
                .iter()
                .map(|command| {
                    let rendered = render_command_line(&config.engine_bin, &command.args());
                    self.events.on_event(CookEvent::ProcessStarted {
                        executable: config.engine_bin.clone(),
                        command_line: rendered.clone(),
                        dry_run: true,
                    });
                    rendered
                })
                .collect();
            return Ok(report.finish(CookOutcome::DryRun { planned }, Vec::new(), &machine));
        }

        let mut runs: Vec<ProcessRun> = Vec::with_capacity(commands.len());
        if commands.is_empty() {
            // Only external files changed: nothing for the engine to cook.
            machine.transition(CookState::Succeeded)?;
        } else {
            machine.transition(CookState::ProcessRunning)?;
            let detailed = self.events.wants_detailed_events();
            let mut forward = |line: &OutputLine| {
                if detailed || line.level.is_diagnostic() {
                    self.events.on_event(CookEvent::Output(line.clone()));
                }
            };

            for command in &commands {
                let args = command.args();
                self.events.on_event(CookEvent::ProcessStarted {
                    executable: config.engine_bin.clone(),
                    command_line: render_command_line(&config.engine_bin, &args),
                    dry_run: false,
                });

                let completed =
                    self.launcher
                        .run_to_completion(&config.engine_bin, &args, &mut forward)?;
                self.events.on_event(CookEvent::ProcessFinished {
                    outcome: completed.outcome.clone(),
                });
                runs.push(completed.run);

                if let ProcessOutcome::Failed(info) = completed.outcome {
                    machine.transition(CookState::Failed)?;
                    return Ok(report.finish(CookOutcome::Failed(info), runs, &machine));
                }
            }
            machine.transition(CookState::Succeeded)?;
        }

        let cooked: BTreeSet<PlatformId> = report.platforms.iter().cloned().collect();
        let version = VersionDescriptor::record_cook(
            candidate,
            &cooked,
            report.previous.as_ref(),
            report.external_diff,
            Utc::now(),
        );
        let version_id = version.id().to_string();
        let manifest = self.exporter.export_release(&ReleaseSettings {
            version,
            platforms: report.platforms.clone(),
            mode: report.mode,
            project_path: config.project_path.clone(),
        })?;
        tracing::info!(version = %version_id, manifest = %manifest.display(), "release exported");
        self.events.on_event(CookEvent::Exported {
            manifest: manifest.clone(),
            version_id: version_id.clone(),
        });
        machine.transition(CookState::PostProcessDone)?;

        let mut finished = report.finish(CookOutcome::Succeeded, runs, &machine);
        finished.exported_manifest = Some(manifest);
        finished.new_base_id = Some(version_id);
        Ok(finished)
    }
}

/// Report fields fixed before the engine runs
struct Pending {
    mode: CookMode,
    platforms: Vec<PlatformId>,
    work_set: Option<WorkSet>,
    external_diff: bool,
    previous: Option<VersionDescriptor>,
}

impl Pending {
    fn finish(self, outcome: CookOutcome, runs: Vec<ProcessRun>, machine: &CookStateMachine) -> CookReport {
        CookReport {
            mode: self.mode,
            platforms: self.platforms,
            outcome,
            work_set: self.work_set,
            runs,
            exported_manifest: None,
            new_base_id: None,
            final_state: machine.state(),
        }
    }
}

/// Override replaces the configured list; duplicates keep their first position
fn resolve_platforms(config: &CookConfig, options: &CookOptions) -> Vec<PlatformId> {
    let source = options
        .platform_override
        .as_ref()
        .unwrap_or(&config.cook_platforms);
    let mut platforms: Vec<PlatformId> = Vec::with_capacity(source.len());
    for platform in source {
        if !platforms.contains(platform) {
            platforms.push(platform.clone());
        }
    }
    platforms
}

fn validate_paths(config: &CookConfig, needs_engine: bool) -> CookResult<()> {
    if needs_engine && !is_existing_file(&config.engine_bin) {
        return Err(CookError::invalid_configuration(format!(
            "engine binary not found: {}",
            config.engine_bin.display()
        )));
    }
    if !is_existing_file(&config.project_path) {
        return Err(CookError::invalid_configuration(format!(
            "project file not found: {}",
            config.project_path.display()
        )));
    }
    Ok(())
}

fn is_existing_file(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_file()
}
