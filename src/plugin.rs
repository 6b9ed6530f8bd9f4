//! Host pipeline integration
//!
//! A bundler host drives the engine through three hooks:
//!
//! - [`ComponentsPlugin::on_start`] runs the full build
//! - [`ComponentsPlugin::on_artifacts_written`] starts watching, once, after
//!   the host's own output is in place (watch mode only)
//! - [`ComponentsPlugin::on_shutdown`] releases watchers and cancels timers
//!
//! The CLI is one such host.

use std::rc::Rc;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::debug;

use crate::assembler::{BuildReport, ComponentAssembler};
use crate::config::Config;
use crate::domain::ports::change_source::{ChangeSource, WatchStrategy};
use crate::domain::ports::file_system::FileSystem;
use crate::error::ComponentResult;
use crate::infrastructure::compiler::{CommandCompiler, NoCompiler};
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::watch::select_change_source;
use crate::schema::SchemaExtractor;
use crate::style::StyleTransformer;
use crate::tree::TreeResolver;
use crate::watcher::{
    BuildEvent, CoordinatorOptions, RebuildCoordinator, SessionState, TeardownReport,
};

type SourceFactory = Box<dyn FnMut(WatchStrategy) -> Box<dyn ChangeSource>>;

pub struct ComponentsPlugin<F: FileSystem> {
    assembler: ComponentAssembler<F>,
    coordinator: RebuildCoordinator,
    watch_mode: bool,
    strategy: WatchStrategy,
    sources: SourceFactory,
    emit: Rc<dyn Fn(BuildEvent)>,
}

impl ComponentsPlugin<LocalFs> {
    /// Plugin over the local file system, configured from `config`.
    ///
    /// `config` paths are expected to be absolute (see [`Config::resolve_paths`]).
    pub fn from_config(config: &Config) -> Self {
        let resolver = TreeResolver::new(&config.src_dir, &config.output_dir);
        let styles = match CommandCompiler::from_command_line(&config.style.compiler) {
            Some(compiler) => StyleTransformer::new(compiler),
            None => StyleTransformer::new(NoCompiler),
        };
        let assembler = ComponentAssembler::new(
            LocalFs::new(),
            resolver,
            config.assets_dir(),
            styles,
            SchemaExtractor::new(config.schema.evaluate),
        );
        let options = CoordinatorOptions {
            debounce: config.debounce(),
            extensions: config.watch.extensions.clone(),
        };
        Self::new(assembler, options, config.watch_mode, config.watch.strategy)
    }
}

impl<F: FileSystem> ComponentsPlugin<F> {
    pub fn new(
        assembler: ComponentAssembler<F>,
        options: CoordinatorOptions,
        watch_mode: bool,
        strategy: WatchStrategy,
    ) -> Self {
        let coordinator = RebuildCoordinator::new(assembler.resolver(), options);
        Self {
            assembler,
            coordinator,
            watch_mode,
            strategy,
            sources: Box::new(select_change_source),
            emit: Rc::new(|_| {}),
        }
    }

    /// Route build and watch events to `sink`
    pub fn with_events(mut self, sink: impl Fn(BuildEvent) + 'static) -> Self {
        let emit: Rc<dyn Fn(BuildEvent)> = Rc::new(sink);
        let forward = emit.clone();
        self.coordinator = self.coordinator.with_events(move |event| forward(event));
        self.emit = emit;
        self
    }

    /// Replace how change sources are created for a strategy
    pub fn with_change_sources(
        mut self,
        factory: impl FnMut(WatchStrategy) -> Box<dyn ChangeSource> + 'static,
    ) -> Self {
        self.sources = Box::new(factory);
        self
    }

    pub fn assembler(&self) -> &ComponentAssembler<F> {
        &self.assembler
    }

    pub fn session_state(&self) -> SessionState {
        self.coordinator.state()
    }

    /// Full build of every component
    pub fn on_start(&mut self) -> ComponentResult<BuildReport> {
        let emit = self.emit.clone();
        emit(BuildEvent::BuildStarted {
            source: self.assembler.resolver().source_root().display().to_string(),
        });

        let report = match self.assembler.build_all() {
            Ok(report) => report,
            Err(e) => {
                emit(BuildEvent::Error {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        for built in &report.built {
            emit(BuildEvent::ComponentBuilt {
                component: built.identity.name.clone(),
                document: built.document.display().to_string(),
                stylesheet: built.stylesheet.as_ref().map(|p| p.display().to_string()),
            });
        }
        for failed in &report.failed {
            emit(BuildEvent::ComponentFailed {
                component: failed.identity.name.clone(),
                message: failed.error.clone(),
            });
        }
        emit(BuildEvent::BuildComplete {
            built: report.built.len(),
            failed: report.failed.len(),
        });
        Ok(report)
    }

    /// Start watching if watch mode is on and no session is running.
    ///
    /// Returns whether a session was started by this call.
    pub fn on_artifacts_written(&mut self) -> ComponentResult<bool> {
        if !self.watch_mode {
            debug!("watch mode is off");
            return Ok(false);
        }
        if self.coordinator.state() != SessionState::Idle {
            return Ok(false);
        }
        let source = (self.sources)(self.strategy);
        self.coordinator.start(source)
    }

    /// Rebuild on changes until `running` is cleared, then tear down
    pub fn watch_until(&mut self, running: Arc<AtomicBool>) -> ComponentResult<TeardownReport> {
        self.coordinator.run(&mut self.assembler, running)
    }

    pub fn on_shutdown(&mut self) -> TeardownReport {
        self.coordinator.teardown()
    }
}
