use gasket::{linalg, presentation, GasketError, Renderable, SceneConfig, Show};

#[derive(Debug, Default)]
struct Recorder {
    positions: Vec<f32>,
    colours: Vec<f32>,
    uploads: usize,
    mvps: Vec<[f32; 16]>,
    draws: Vec<usize>,
}

impl Renderable for Recorder {
    fn upload(&mut self, positions: &[f32], colours: &[f32]) {
        self.positions = positions.to_vec();
        self.colours = colours.to_vec();
        self.uploads += 1;
    }

    fn set_mvp(&mut self, mvp: &[f32; 16]) {
        self.mvps.push(*mvp);
    }

    fn draw(&mut self, vertex_count: usize) {
        self.draws.push(vertex_count);
    }
}

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn present_uploads_once_and_draws_every_vertex() {
    init();
    let config = SceneConfig::default();
    let recorder = presentation::present(&config, Recorder::default()).unwrap();

    assert_eq!(recorder.uploads, 1);
    assert_eq!(recorder.positions.len(), 3 * 12 * 256);
    assert_eq!(recorder.colours.len(), recorder.positions.len());
    assert_eq!(recorder.draws, vec![recorder.positions.len() / 3]);

    let expected = linalg::flatten(&config.compute_mvp().unwrap());
    assert_eq!(recorder.mvps, vec![expected]);
}

#[test]
fn invalid_config_reaches_no_renderer() {
    init();
    let config = SceneConfig { depth: -1, ..SceneConfig::default() };
    let err = Show::new(&config, Recorder::default()).err().unwrap();
    assert_eq!(err, GasketError::InvalidDepth(-1));

    let config = SceneConfig { near: 0.0, ..SceneConfig::default() };
    let err = presentation::present(&config, Recorder::default()).err().unwrap();
    assert!(matches!(err, GasketError::DegenerateProjection { .. }));
}

#[test]
fn rebuild_replaces_geometry() {
    init();
    let config = SceneConfig { depth: 1, ..SceneConfig::default() };
    let mut show = Show::new(&config, Recorder::default()).unwrap();
    assert_eq!(show.vertex_count(), 48);

    show.rebuild(2).unwrap();
    assert_eq!(show.vertex_count(), 192);
    assert_eq!(show.renderer().positions.len(), 3 * 192);
    assert_eq!(show.renderer().uploads, 2);

    assert!(show.rebuild(-2).is_err());
    assert_eq!(show.vertex_count(), 192);
    assert_eq!(show.renderer().uploads, 2);

    show.present_frame();
    assert_eq!(show.renderer().draws, vec![192]);
}

#[test]
fn resize_changes_the_next_frame() {
    init();
    let mut show = Show::new(&SceneConfig::default(), Recorder::default()).unwrap();
    show.present_frame();
    show.resize(1024, 512).unwrap();
    show.present_frame();
    assert!(show.resize(0, 512).is_err());
    show.present_frame();

    let mvps = &show.renderer().mvps;
    assert_eq!(mvps.len(), 3);
    assert_ne!(mvps[0], mvps[1]);
    assert_eq!(mvps[1], mvps[2]);

    let wide = SceneConfig { width: 1024, height: 512, ..SceneConfig::default() };
    assert_eq!(mvps[1], linalg::flatten(&wide.compute_mvp().unwrap()));
}
