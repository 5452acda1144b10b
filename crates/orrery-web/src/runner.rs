use orrery_engine::{
    Game, GameConfig, GameEvent, EngineContext,
    InputEvent, InputQueue, FrameBuffers, FrameClock,
    FrameData, ProtocolLayout, Renderer, TextureId,
    build_frame_buffers, pack_snapshot,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because wasm-bindgen
/// cannot export generic structs directly.
///
/// One `step` is one host frame, in this order: `Game::update` (with the
/// input queued since the last step), tweens, transform propagation, frame
/// buffers.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    buffers: FrameBuffers,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    running: bool,
    /// Contiguous copy of the frame, built on demand.
    snapshot: Vec<f32>,
    /// Surface size last passed to `Renderer::resize`.
    submitted_size: Option<(u32, u32)>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let buffers = FrameBuffers::with_capacity(
            config.max_instances,
            config.max_points,
            config.max_lights,
            config.max_events,
        );

        Self {
            game,
            ctx: EngineContext::new(&config),
            input: InputQueue::new(),
            buffers,
            clock: FrameClock::new(config.max_frame_dt),
            layout,
            config,
            initialized: false,
            running: false,
            snapshot: Vec::new(),
            submitted_size: None,
        }
    }

    /// Initialize the game and build the first frame. Call once.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.ctx.graph.propagate(&mut self.ctx.scene);
        self.rebuild_buffers();
        self.initialized = true;
        self.running = true;
        log::info!(
            "runner: {} entities, {} textures requested",
            self.ctx.scene.len(),
            self.ctx.textures.len()
        );
    }

    /// Queue an input event for the next step.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Advance one frame. Returns `false` if nothing ran (not initialized or
    /// stopped).
    pub fn step(&mut self, dt: f32) -> bool {
        if !self.initialized || !self.running {
            return false;
        }

        self.ctx.clear_frame_data();
        self.ctx.dt = self.clock.tick(dt);

        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();

        let dt = self.ctx.dt;
        let EngineContext { scene, graph, tweens, camera, .. } = &mut self.ctx;
        tweens.tick(dt, scene, graph, camera);
        let completed: Vec<u32> = self.ctx.tweens.drain_completed().collect();
        for kind in completed {
            self.ctx.emit_event(GameEvent::new(kind as f32, 0.0));
        }

        self.ctx.graph.propagate(&mut self.ctx.scene);
        self.rebuild_buffers();
        true
    }

    /// Halt stepping. Queued input is kept for `resume`.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("runner: stopped at frame {}", self.clock.frame());
        }
        self.running = false;
    }

    pub fn resume(&mut self) {
        if self.initialized && !self.running {
            log::info!("runner: resumed");
            self.running = true;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn rebuild_buffers(&mut self) {
        build_frame_buffers(
            self.ctx.scene.iter(),
            &self.ctx.camera,
            &self.ctx.lights,
            &self.ctx.textures,
            &self.ctx.events,
            &mut self.buffers,
        );
    }

    // ---- Textures ----

    /// JSON list of textures the host should load.
    pub fn texture_manifest_json(&self) -> String {
        match self.ctx.textures.manifest().to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("runner: {}", e);
                String::from(r#"{"textures":[]}"#)
            }
        }
    }

    /// Record a texture load result from the host. Bad ids are logged.
    pub fn texture_loaded(&mut self, id: u32, ok: bool) {
        if let Err(e) = self.ctx.textures.mark_loaded(TextureId(id), ok) {
            log::warn!("runner: {}", e);
        }
    }

    // ---- Frame consumers ----

    /// Hand the current frame to a renderer, resizing it first when the
    /// surface changed since the last submit.
    pub fn submit(&mut self, renderer: &mut dyn Renderer) {
        let size = (
            self.ctx.viewport.width().round() as u32,
            self.ctx.viewport.height().round() as u32,
        );
        if self.submitted_size != Some(size) {
            renderer.resize(size.0, size.1);
            self.submitted_size = Some(size);
        }
        renderer.draw(&FrameData {
            camera: &self.buffers.camera,
            instances: &self.buffers.instances,
            transparent_split: self.buffers.transparent_split,
            points: &self.buffers.points,
            lights: &self.buffers.lights,
            ambient: self.buffers.ambient,
            surface_width: self.ctx.viewport.width(),
            surface_height: self.ctx.viewport.height(),
        });
    }

    /// The whole frame packed per `ProtocolLayout`.
    pub fn snapshot(&mut self) -> &[f32] {
        pack_snapshot(&self.buffers, &self.layout, self.clock.frame(), &self.ctx.viewport, &mut self.snapshot);
        &self.snapshot
    }

    // ---- Inspection ----

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frame()
    }

    // ---- Pointer accessors for host reads ----

    pub fn camera_ptr(&self) -> *const f32 {
        self.buffers.camera_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.buffers.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.buffers.instances.len() as u32
    }

    pub fn transparent_split(&self) -> u32 {
        self.buffers.transparent_split
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.buffers.points_ptr()
    }

    pub fn point_count(&self) -> u32 {
        self.buffers.points.len() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.buffers.lights_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.buffers.lights.len() as u32
    }

    pub fn ambient(&self) -> [f32; 4] {
        self.buffers.ambient
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.buffers.events_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.buffers.events.len() as u32
    }

    pub fn surface_width(&self) -> f32 {
        self.ctx.viewport.width()
    }

    pub fn surface_height(&self) -> f32 {
        self.ctx.viewport.height()
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_points(&self) -> u32 {
        self.layout.max_points as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{
        Color, Easing, Entity, Material, Mesh, PointLight, Tween, TweenSubject,
    };
    use glam::Vec3;

    /// Spins one sphere and counts what it saw.
    #[derive(Default)]
    struct Spinner {
        updates: u32,
        clicks: u32,
        resized: bool,
    }

    impl Game for Spinner {
        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.spawn(
                Entity::new(id)
                    .with_mesh(Mesh::sphere(1.0, 16))
                    .with_material(Material::standard(Color::WHITE)),
                None,
            );
            ctx.lights.add(PointLight::new(Vec3::ZERO, Color::WHITE, 2.0, 300.0));
            ctx.textures.request("textures/a.jpg");
            ctx.tweens.add(
                TweenSubject::Entity(id),
                Tween::scale(1.0, 2.0, 0.05, Easing::Linear).with_on_complete(9),
            );
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            for event in input.iter() {
                match *event {
                    InputEvent::Click { .. } => self.clicks += 1,
                    InputEvent::Resize { width, height } => self.resized = ctx.resize(width, height),
                    _ => {}
                }
            }
            if let Some(e) = ctx.scene.iter_mut().next() {
                e.rotation.y += 0.1;
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        draws: u32,
        resizes: Vec<(u32, u32)>,
        last_instances: usize,
    }

    impl Renderer for Recorder {
        fn backend(&self) -> &'static str {
            "headless"
        }

        fn draw(&mut self, frame: &FrameData) {
            self.draws += 1;
            self.last_instances = frame.instances.len();
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.resizes.push((width, height));
        }
    }

    fn runner() -> GameRunner<Spinner> {
        let mut r = GameRunner::new(Spinner::default());
        r.init();
        r
    }

    #[test]
    fn step_before_init_does_nothing() {
        let mut r = GameRunner::new(Spinner::default());
        assert!(!r.step(1.0 / 60.0));
        assert_eq!(r.game().updates, 0);
    }

    #[test]
    fn init_builds_first_frame() {
        let r = runner();
        assert!(r.is_running());
        assert_eq!(r.instance_count(), 1);
        assert_eq!(r.light_count(), 1);
    }

    #[test]
    fn stop_halts_and_resume_restarts() {
        let mut r = runner();
        assert!(r.step(1.0 / 60.0));
        r.stop();
        assert!(!r.is_running());
        assert!(!r.step(1.0 / 60.0));
        assert_eq!(r.game().updates, 1);

        r.resume();
        assert!(r.step(1.0 / 60.0));
        assert_eq!(r.game().updates, 2);
        assert_eq!(r.frame_count(), 2);
    }

    #[test]
    fn input_is_seen_once() {
        let mut r = runner();
        r.push_input(InputEvent::Click { x: 1.0, y: 1.0 });
        r.step(1.0 / 60.0);
        r.step(1.0 / 60.0);
        assert_eq!(r.game().clicks, 1);
    }

    #[test]
    fn world_matrices_follow_update() {
        let mut r = runner();
        r.step(1.0 / 60.0);
        let e = r.ctx().scene.iter().next().unwrap();
        assert_eq!(e.world, e.local_matrix());
    }

    #[test]
    fn tween_completion_becomes_game_event() {
        let mut r = runner();
        r.step(0.1);
        assert_eq!(r.game_events_len(), 1);
        assert_eq!(r.buffers().events[0].kind, 9.0);
        r.step(0.1);
        assert_eq!(r.game_events_len(), 0);
    }

    #[test]
    fn submit_resizes_only_on_change() {
        let mut r = runner();
        let mut rec = Recorder::default();
        r.submit(&mut rec);
        r.step(1.0 / 60.0);
        r.submit(&mut rec);
        assert_eq!(rec.resizes, vec![(1280, 720)]);

        r.push_input(InputEvent::Resize { width: 800.0, height: 600.0 });
        r.step(1.0 / 60.0);
        r.submit(&mut rec);
        assert!(r.game().resized);
        assert_eq!(rec.resizes, vec![(1280, 720), (800, 600)]);
        assert_eq!(rec.draws, 3);
        assert_eq!(rec.last_instances, 1);
    }

    #[test]
    fn texture_results_are_tracked() {
        let mut r = runner();
        assert_eq!(
            r.texture_manifest_json(),
            r#"{"textures":[{"id":0,"path":"textures/a.jpg"}]}"#
        );
        r.texture_loaded(0, true);
        r.texture_loaded(5, true);
        assert_eq!(
            r.ctx().textures.state(TextureId(0)),
            Some(orrery_engine::TextureState::Ready)
        );
    }

    #[test]
    fn snapshot_matches_layout() {
        let mut r = runner();
        r.step(1.0 / 60.0);
        let total = r.buffer_total_floats() as usize;
        assert_eq!(r.snapshot().len(), total);
    }
}
