use std::{collections::HashMap, sync::Arc};

use crate::{
    animation::{
        Task,
        behavior::{
            Animatable, BehaviorRegistry, DEFAULT_VARIABLE, find_declaration,
        },
        declarative::apply_effect,
        flow::apply_flow,
        registry::StyleRegistry,
        scheduler::Scheduler,
        session::{
            BehaviorSlot, Concern, ElementRuntime, Runtime, SessionId, SwitchConfig, SweepShape,
            ValueRequest,
        },
        switch::apply_switch,
        value::{self, SessionCtx},
    },
    assets::store::{Asset, AssetCache, AssetSource, PLACEHOLDER_SVG},
    classify::{Classification, classify},
    foundation::{
        core::{ContainerId, ElementId, SwitchState},
        error::{SymbolFxError, SymbolFxResult},
    },
    render::{
        config::EngineOpts,
        overrides,
        sweep::{sweep_defs, sweep_groups},
    },
    style::{
        OWNED_ATTR,
        apply::apply as apply_style,
        options::{AnimationKind, IterationCount, RenderOptions},
    },
    svg::{
        document::SvgDocument,
        raster::{Preview, rasterize},
    },
};

type Step = fn(&mut SessionCtx<'_>, Concern, SessionId);

/// A mounted element: the live document plus everything needed to rebuild it.
#[derive(Debug)]
struct Mount {
    container: ContainerId,
    asset: Arc<Asset>,
    // Text the document was actually built from (asset content or the placeholder).
    source: Arc<str>,
    doc: SvgDocument,
    classification: Classification,
    options: RenderOptions,
}

/// Scheduler counters, mostly for auditing that static mode schedules no frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EngineStats {
    /// Virtual time of the last [`Engine::tick`].
    pub now_ms: f64,
    /// Frame callbacks requested since construction.
    pub frames_requested: u64,
    /// Timers scheduled since construction.
    pub timers_scheduled: u64,
    /// Frames waiting for the next tick.
    pub pending_frames: usize,
    /// Timers not yet due.
    pub pending_timers: usize,
    /// Mounted elements.
    pub mounted: usize,
}

/// Result of [`Engine::sweep`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Unreferenced engine-owned definitions removed.
    pub defs_removed: usize,
    /// Empty groups removed.
    pub groups_removed: usize,
    /// Runtime records without a mounted element dropped.
    pub runtime_removed: usize,
}

/// Classification and animation engine for dashboard symbols.
///
/// The engine owns the asset cache, the style registry, the behavior registry, the virtual-time
/// scheduler and one runtime record per mounted element. Hosts mount assets with
/// [`Engine::render`], drive time with [`Engine::tick`] and read results back with
/// [`Engine::to_svg_string`].
///
/// Nothing on the render/animate surface fails: unreadable assets mount the placeholder graphic,
/// unmet animation preconditions log a warning and a behavior that never activates logs an
/// error.
#[derive(Debug)]
pub struct Engine {
    cache: AssetCache,
    styles: StyleRegistry,
    behaviors: BehaviorRegistry,
    scheduler: Scheduler<Task>,
    runtime: Runtime,
    mounts: HashMap<ElementId, Mount>,
    containers: HashMap<ContainerId, ElementId>,
    opts: EngineOpts,
    next_element: u64,
}

impl Engine {
    /// Engine with default [`EngineOpts`].
    pub fn new(source: impl AssetSource + 'static) -> Self {
        Self::build(source, EngineOpts::default())
    }

    /// Engine with explicit options.
    pub fn with_opts(source: impl AssetSource + 'static, opts: EngineOpts) -> SymbolFxResult<Self> {
        opts.validate()?;
        Ok(Self::build(source, opts))
    }

    fn build(source: impl AssetSource + 'static, opts: EngineOpts) -> Self {
        Self {
            cache: AssetCache::new(source),
            styles: StyleRegistry::with_builtins(),
            behaviors: BehaviorRegistry::with_builtins(),
            scheduler: Scheduler::new(),
            runtime: Runtime::default(),
            mounts: HashMap::new(),
            containers: HashMap::new(),
            opts,
            next_element: 0,
        }
    }

    /// Load `asset_key`, mount it into `container` and apply `options`.
    ///
    /// An element already mounted in `container` is unmounted first.
    #[tracing::instrument(skip_all, fields(asset = asset_key))]
    pub fn render(
        &mut self,
        container: impl Into<ContainerId>,
        asset_key: &str,
        options: RenderOptions,
    ) -> ElementId {
        let container = container.into();
        if let Some(old) = self.containers.get(&container).copied() {
            self.unmount(old);
        }

        let asset = self.cache.load(asset_key);
        let (source, doc) = build_document(&asset);

        self.next_element += 1;
        let id = ElementId(self.next_element);
        self.runtime.insert(id);
        self.containers.insert(container.clone(), id);
        self.mounts.insert(
            id,
            Mount {
                container,
                asset,
                source,
                doc,
                classification: Classification::default(),
                options,
            },
        );
        self.decorate(id);
        tracing::debug!(element = %id, "element mounted");
        id
    }

    /// Re-apply `options` to a mounted element, keeping manual paint overrides.
    ///
    /// The element is rebuilt from cached content; its [`ElementId`] stays the same and any
    /// running session is cancelled and restarted from the new options.
    #[tracing::instrument(skip_all, fields(element = %element))]
    pub fn re_render(&mut self, element: ElementId, options: RenderOptions) {
        let Some(mount) = self.mounts.get_mut(&element) else {
            tracing::warn!("re-render of an element that is not mounted");
            return;
        };
        if let Some(rt) = self.runtime.get_mut(element) {
            value::cancel_all(rt, &mut self.scheduler);
        }

        let (source, pristine) = build_document(&mount.asset);
        let snap = overrides::snapshot(&mount.doc, &pristine);
        let mut rebuilt = pristine;
        if !snap.is_empty() {
            let restored = overrides::restore(&mut rebuilt, &snap);
            tracing::debug!(restored, carried = snap.carried.len(), "manual overrides restored");
        }

        mount.source = source;
        mount.doc = rebuilt;
        mount.options = options;
        self.decorate(element);
    }

    /// classify -> style -> behavior activation -> animation.
    fn decorate(&mut self, id: ElementId) {
        let Self {
            mounts,
            runtime,
            scheduler,
            styles,
            opts,
            ..
        } = self;
        let Some(mount) = mounts.get_mut(&id) else {
            return;
        };
        mount.classification = classify(&mount.source, Some(mount.asset.name_hint()));
        let report = apply_style(&mut mount.doc, &mount.classification, &mount.options);
        tracing::debug!(
            element = %id,
            category = ?mount.classification.category,
            themed = report.themed,
            "style applied"
        );

        let session = runtime.new_session();
        let Some(rt) = runtime.get_mut(id) else {
            return;
        };
        activate_behavior(id, &mount.doc, rt, scheduler, opts);

        let options = &mount.options;
        let Some(kind) = options.animation else {
            return;
        };
        if let Some(effect) = kind.effect_name() {
            apply_effect(&mut mount.doc, styles, effect, options);
            return;
        }
        match kind {
            kind if kind.is_value_driven() => {
                let (concern, shape) = match kind {
                    AnimationKind::LiquidDrain => (Concern::Liquid, SweepShape::Fall),
                    AnimationKind::ProgressSlide => (Concern::Progress, SweepShape::Rise),
                    _ => (Concern::Liquid, SweepShape::Rise),
                };
                let request = ValueRequest {
                    shape,
                    target: options.target_value,
                    animated: options.is_animated(),
                    duration_ms: options
                        .requested_duration_ms()
                        .unwrap_or(opts.value_duration_ms),
                    iterations: options.iteration_count.unwrap_or(IterationCount::Finite(1)),
                    on_init: options.on_init.clone(),
                };
                let mut ctx = SessionCtx {
                    element: id,
                    doc: &mut mount.doc,
                    rt,
                    scheduler,
                    opts,
                };
                value::start(&mut ctx, concern, session, request);
            }
            AnimationKind::PipeFlow => {
                apply_flow(&mut mount.doc, styles, options);
            }
            AnimationKind::SwitchToggle => {
                if let Some(cfg) = rt.switch.as_mut() {
                    cfg.refresh(options);
                }
                let cfg = rt
                    .switch
                    .get_or_insert_with(|| SwitchConfig::from_options(options, opts.switch_transition_ms));
                apply_switch(&mut mount.doc, cfg);
            }
            AnimationKind::Unknown => {
                tracing::warn!(element = %id, "unknown animation kind ignored");
            }
            _ => {}
        }
    }

    /// Advance virtual time to `now_ms` and run everything that came due.
    ///
    /// Returns the number of tasks run.
    pub fn tick(&mut self, now_ms: f64) -> usize {
        let tasks = self.scheduler.advance(now_ms);
        let n = tasks.len();
        for task in tasks {
            self.dispatch(task);
        }
        n
    }

    fn dispatch(&mut self, task: Task) {
        let (element, concern, session, step) = match task {
            Task::Activate {
                element,
                generation,
            } => {
                self.finish_activation(element, generation);
                return;
            }
            Task::Frame {
                element,
                concern,
                session,
            } => (element, concern, session, value::on_frame as Step),
            Task::Settle {
                element,
                concern,
                session,
            } => (element, concern, session, value::on_settle as Step),
            Task::Retry {
                element,
                concern,
                session,
            } => (element, concern, session, value::on_retry as Step),
        };
        let (Some(mount), Some(rt)) = (self.mounts.get_mut(&element), self.runtime.get_mut(element))
        else {
            return;
        };
        let mut ctx = SessionCtx {
            element,
            doc: &mut mount.doc,
            rt,
            scheduler: &mut self.scheduler,
            opts: &self.opts,
        };
        step(&mut ctx, concern, session);
    }

    fn finish_activation(&mut self, element: ElementId, generation: u64) {
        let (Some(mount), Some(rt)) = (self.mounts.get(&element), self.runtime.get_mut(element))
        else {
            return;
        };
        if rt.generation != generation {
            return;
        }
        rt.activation = None;
        let BehaviorSlot::Activating { name } = &rt.behavior else {
            return;
        };
        let name = name.clone();
        let created = find_declaration(&mount.doc)
            .and_then(|decl| self.behaviors.create(&name, &mount.doc, decl.script));
        rt.behavior = match created {
            Some(b) => {
                tracing::debug!(element = %element, behavior = %name, "embedded behavior ready");
                BehaviorSlot::Ready(b)
            }
            None => {
                tracing::warn!(
                    element = %element,
                    behavior = %name,
                    "embedded behavior could not be activated"
                );
                BehaviorSlot::Unresolved { name }
            }
        };
    }

    /// Attach a behavior object directly, bypassing declaration and activation.
    ///
    /// The object survives [`Engine::re_render`] unless the asset declares a behavior of its own.
    /// Node ids do not survive a rebuild, so the object should locate parts on every call.
    pub fn attach_behavior(&mut self, element: ElementId, behavior: Box<dyn Animatable>) -> bool {
        let Some(rt) = self.runtime.get_mut(element) else {
            return false;
        };
        if let Some(h) = rt.activation.take() {
            self.scheduler.cancel(h);
        }
        rt.generation += 1;
        rt.behavior = BehaviorSlot::Ready(behavior);
        true
    }

    /// Switch a mounted switch on or off, optionally recoloring it.
    ///
    /// The switch record is created on first use and reused afterwards. Returns `false` when the
    /// element is unknown or lacks the indicator/track parts; no record is left behind then.
    pub fn set_switch_state(
        &mut self,
        element: ElementId,
        state: SwitchState,
        on_color: Option<&str>,
        off_color: Option<&str>,
    ) -> bool {
        let (Some(mount), Some(rt)) = (self.mounts.get_mut(&element), self.runtime.get_mut(element))
        else {
            tracing::warn!(element = %element, "switch state set on an element that is not mounted");
            return false;
        };
        let created = rt.switch.is_none();
        let cfg = rt.switch.get_or_insert_with(|| {
            SwitchConfig::from_options(&mount.options, self.opts.switch_transition_ms)
        });
        cfg.state = state;
        if let Some(c) = on_color {
            cfg.on_color = c.to_owned();
        }
        if let Some(c) = off_color {
            cfg.off_color = c.to_owned();
        }
        let applied = apply_switch(&mut mount.doc, cfg);
        if !applied && created {
            rt.switch = None;
        }
        applied
    }

    /// Cancel everything the element has outstanding and drop its state.
    pub fn unmount(&mut self, element: ElementId) -> bool {
        if let Some(mut rt) = self.runtime.remove(element) {
            value::cancel_all(&mut rt, &mut self.scheduler);
            if let Some(h) = rt.activation.take() {
                self.scheduler.cancel(h);
            }
        }
        let Some(mount) = self.mounts.remove(&element) else {
            return false;
        };
        if self.containers.get(&mount.container) == Some(&element) {
            self.containers.remove(&mount.container);
        }
        tracing::debug!(element = %element, "element unmounted");
        true
    }

    /// Forget every cached asset. Mounted elements keep the content they were built from.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Remove orphaned engine-owned definitions, empty groups and stale runtime records.
    pub fn sweep(&mut self) -> SweepReport {
        let mut report = SweepReport::default();
        for mount in self.mounts.values_mut() {
            report.defs_removed += sweep_defs(&mut mount.doc);
            report.groups_removed += sweep_groups(&mut mount.doc);
        }
        let mounts = &self.mounts;
        report.runtime_removed = self.runtime.retain(|id| mounts.contains_key(&id));
        report
    }

    /// Element mounted in `container`.
    pub fn element_in(&self, container: &ContainerId) -> Option<ElementId> {
        self.containers.get(container).copied()
    }

    /// Live document of a mounted element.
    pub fn document(&self, element: ElementId) -> Option<&SvgDocument> {
        self.mounts.get(&element).map(|m| &m.doc)
    }

    /// Mutable document, for hosts that edit paint by hand.
    pub fn document_mut(&mut self, element: ElementId) -> Option<&mut SvgDocument> {
        self.mounts.get_mut(&element).map(|m| &mut m.doc)
    }

    /// Classification computed by the last render.
    pub fn classification(&self, element: ElementId) -> Option<&Classification> {
        self.mounts.get(&element).map(|m| &m.classification)
    }

    /// Switch record, once the element has been used as a switch.
    pub fn switch_config(&self, element: ElementId) -> Option<&SwitchConfig> {
        self.runtime.get(element)?.switch.as_ref()
    }

    /// Return `true` while a value session of the element is gated or running.
    pub fn is_animating(&self, element: ElementId) -> bool {
        self.runtime
            .get(element)
            .is_some_and(ElementRuntime::is_animating)
    }

    /// Return `true` once the element's declared behavior is active.
    pub fn behavior_ready(&self, element: ElementId) -> bool {
        self.runtime
            .get(element)
            .is_some_and(|rt| matches!(rt.behavior, BehaviorSlot::Ready(_)))
    }

    /// Behavior factories, for registering host behaviors.
    pub fn behaviors_mut(&mut self) -> &mut BehaviorRegistry {
        &mut self.behaviors
    }

    /// Shared stylesheet registry.
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    /// Engine configuration.
    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Scheduler counters.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            now_ms: self.scheduler.now_ms(),
            frames_requested: self.scheduler.frames_requested(),
            timers_scheduled: self.scheduler.timers_scheduled(),
            pending_frames: self.scheduler.pending_frames(),
            pending_timers: self.scheduler.pending_timers(),
            mounted: self.mounts.len(),
        }
    }

    /// Serialize a mounted element with the registered stylesheets embedded.
    pub fn to_svg_string(&self, element: ElementId) -> Option<String> {
        let mount = self.mounts.get(&element)?;
        if self.styles.is_empty() {
            return Some(mount.doc.to_svg_string());
        }
        let mut doc = mount.doc.clone();
        let style = doc.create_element("style");
        doc.set_attr(style, OWNED_ATTR, "true");
        doc.set_text(style, self.styles.stylesheet());
        let root = doc.root();
        doc.prepend_child(root, style);
        Some(doc.to_svg_string())
    }

    /// Rasterize the current state of a mounted element.
    pub fn rasterize(&self, element: ElementId, width: u32, height: u32) -> SymbolFxResult<Preview> {
        let mount = self
            .mounts
            .get(&element)
            .ok_or_else(|| SymbolFxError::validation(format!("{element} is not mounted")))?;
        rasterize(&mount.doc, width, height)
    }
}

/// Parse the asset, falling back to the placeholder graphic.
fn build_document(asset: &Asset) -> (Arc<str>, SvgDocument) {
    match SvgDocument::parse(&asset.content) {
        Ok(doc) => (Arc::clone(&asset.content), doc),
        Err(err) => {
            tracing::warn!(asset = %asset.key, error = %err, "asset is not valid svg, using placeholder");
            let doc = SvgDocument::parse(PLACEHOLDER_SVG).unwrap_or_else(|_| SvgDocument::empty());
            (Arc::from(PLACEHOLDER_SVG), doc)
        }
    }
}

/// Start activation of a declared behavior, or settle on the null object.
///
/// Bumping the generation invalidates activation timers of earlier renders.
fn activate_behavior(
    id: ElementId,
    doc: &SvgDocument,
    rt: &mut ElementRuntime,
    scheduler: &mut Scheduler<Task>,
    opts: &EngineOpts,
) {
    if let Some(h) = rt.activation.take() {
        scheduler.cancel(h);
    }
    rt.generation += 1;
    match find_declaration(doc) {
        Some(decl) => {
            tracing::debug!(element = %id, behavior = %decl.name, "embedded behavior activating");
            rt.variable = decl.variable;
            rt.behavior = BehaviorSlot::Activating { name: decl.name };
            rt.activation = Some(scheduler.set_timeout(
                opts.activation_delay_ms,
                Task::Activate {
                    element: id,
                    generation: rt.generation,
                },
            ));
        }
        None => {
            rt.variable = DEFAULT_VARIABLE.to_owned();
            if !matches!(rt.behavior, BehaviorSlot::Ready(_)) {
                rt.behavior = BehaviorSlot::Absent;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
