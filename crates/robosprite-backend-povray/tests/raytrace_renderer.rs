//! Integration tests for the ray-traced renderer with fake POV-Ray and
//! ImageMagick processes.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use robosprite_backend_povray::{PovrayError, RaytraceRenderer, RaytraceTools, SceneConfig};
use robosprite_core::{
    robot_catalog, BackendError, FrameRenderer, FrameSlot, Generator, Manifest, ManifestFormat,
    PipelineError, RobotPose,
};
use robosprite_tool::{CommandRunner, Invocation, ToolOutput, ToolResult};

#[derive(Default)]
struct FakeTools {
    /// Exit code POV-Ray returns on the nth call (0-based), if failing.
    fail_trace_at: Option<usize>,
    /// Skip writing the composited frame.
    convert_writes_nothing: bool,
    /// Write a partial frame, then exit non-zero.
    fail_convert: bool,
    calls: RefCell<Vec<Invocation>>,
    options_seen: RefCell<Vec<String>>,
}

impl FakeTools {
    fn trace_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.tool == "povray")
            .count()
    }
}

impl CommandRunner for FakeTools {
    fn run(&self, invocation: &Invocation) -> ToolResult<ToolOutput> {
        let args = invocation.args_lossy();
        let index = self.trace_calls();
        self.calls.borrow_mut().push(invocation.clone());

        match invocation.tool.as_str() {
            "povray" => {
                let cwd = invocation.current_dir.clone().expect("povray runs in the scene dir");
                let scene = args[4].strip_prefix("+I").unwrap();
                assert!(cwd.join(scene).is_file());
                let options = fs::read_to_string(cwd.join("robot_options.inc"))
                    .expect("options file exists while tracing");
                self.options_seen.borrow_mut().push(options);

                let stem = args[1].strip_prefix("+O").unwrap();
                if self.fail_trace_at == Some(index) {
                    fs::write(format!("{}.png", stem), b"partial").unwrap();
                    return Ok(ToolOutput::failure("povray", 2, "Parse Error: No matching } in {"));
                }
                fs::write(format!("{}.png", stem), b"traced").unwrap();
                Ok(ToolOutput::success("povray"))
            }
            "convert" => {
                assert!(Path::new(&args[0]).is_file(), "traced frame exists");
                assert_eq!(args[1], "-transparent");
                if self.fail_convert {
                    fs::write(&args[3], b"partial").unwrap();
                    return Ok(ToolOutput::failure("convert", 1, "unable to open image"));
                }
                if !self.convert_writes_nothing {
                    fs::write(&args[3], b"keyed").unwrap();
                }
                Ok(ToolOutput::success("convert"))
            }
            other => panic!("unexpected tool {other}"),
        }
    }
}

fn tools() -> RaytraceTools {
    RaytraceTools {
        povray: PathBuf::from("povray"),
        convert: PathBuf::from("convert"),
    }
}

fn scene_in(dir: &Path) -> SceneConfig {
    let scene = dir.join("robot.pov");
    fs::write(&scene, "#include \"robot_options.inc\"\n").unwrap();
    SceneConfig::new(scene)
}

fn slot(global_index: usize) -> FrameSlot {
    FrameSlot {
        mode: "walk_d".to_string(),
        local_index: global_index,
        global_index,
    }
}

#[test]
fn renders_frame_and_cleans_intermediates() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeTools::default();
    let mut renderer = RaytraceRenderer::new(scene_in(dir.path()), tools(), &fake, dir.path());
    renderer.prepare().unwrap();

    let pose = RobotPose::new(-90.0, 20.0, -20.0, -24.0, 24.0);
    let frame = renderer.render(&slot(7), &pose).unwrap();

    assert_eq!(frame.rel_path, "robot/frame007.png");
    assert_eq!(fs::read(&frame.path).unwrap(), b"keyed");
    assert!(!dir.path().join("robot/frame007-tmp.png").exists());
    assert!(!dir.path().join("robot_options.inc").exists());

    let options = &fake.options_seen.borrow()[0];
    assert!(options.contains("#declare BODY_ANGLE      = -90.000000;"));
    assert!(options.contains("#declare RIGHT_LEG_ANGLE = 24.000000;"));
}

#[test]
fn missing_scene_is_fatal_before_any_frame() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeTools::default();
    let renderer = RaytraceRenderer::new(
        SceneConfig::new(dir.path().join("robot.pov")),
        tools(),
        &fake,
        dir.path(),
    );

    let err = Generator::new(renderer).run(&robot_catalog()).unwrap_err();
    match err {
        PipelineError::Prepare { code, .. } => assert_eq!(code, "POVRAY_001"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(fake.calls.borrow().is_empty());
    assert!(!dir.path().join("robot").exists());
}

#[test]
fn ray_tracer_failure_is_surfaced() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeTools {
        fail_trace_at: Some(0),
        ..Default::default()
    };
    let mut renderer = RaytraceRenderer::new(scene_in(dir.path()), tools(), &fake, dir.path());
    renderer.prepare().unwrap();

    let err = renderer
        .render(&slot(0), &RobotPose::new(0.0, 0.0, 0.0, 0.0, 0.0))
        .unwrap_err();
    assert_eq!(err.code(), "TOOL_005");
    assert!(err.to_string().contains("Parse Error"));
    assert!(!dir.path().join("robot_options.inc").exists());
    assert!(!dir.path().join("robot/frame000-tmp.png").exists());
    assert!(!dir.path().join("robot/frame000.png").exists());
}

#[test]
fn compositor_failure_removes_partial_frame() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeTools {
        fail_convert: true,
        ..Default::default()
    };
    let mut renderer = RaytraceRenderer::new(scene_in(dir.path()), tools(), &fake, dir.path());
    renderer.prepare().unwrap();

    let err = renderer
        .render(&slot(3), &RobotPose::new(0.0, 0.0, 0.0, 0.0, 0.0))
        .unwrap_err();
    assert_eq!(err.code(), "TOOL_005");
    assert!(err.to_string().contains("unable to open image"));
    assert!(!dir.path().join("robot/frame003.png").exists());
    assert!(!dir.path().join("robot/frame003-tmp.png").exists());
}

#[test]
fn missing_composite_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeTools {
        convert_writes_nothing: true,
        ..Default::default()
    };
    let mut renderer = RaytraceRenderer::new(scene_in(dir.path()), tools(), &fake, dir.path());
    renderer.prepare().unwrap();

    let err = renderer
        .render(&slot(0), &RobotPose::new(0.0, 0.0, 0.0, 0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, PovrayError::OutputNotFound { .. }));
    assert!(!dir.path().join("robot/frame000-tmp.png").exists());
}

#[test]
fn custom_size_and_background_reach_the_tools() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeTools::default();
    let mut scene = scene_in(dir.path());
    scene.width = 128;
    scene.height = 96;
    scene.background = "#000000".to_string();
    let mut renderer = RaytraceRenderer::new(scene, tools(), &fake, dir.path());
    renderer.prepare().unwrap();
    renderer
        .render(&slot(0), &RobotPose::new(0.0, 0.0, 0.0, 0.0, 0.0))
        .unwrap();

    let calls = fake.calls.borrow();
    assert_eq!(calls[0].args_lossy()[2..4].to_vec(), vec!["+H96", "+W128"]);
    assert_eq!(calls[1].args_lossy()[2], "#000000");
}

#[test]
fn full_robot_run_produces_matching_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeTools::default();
    let renderer = RaytraceRenderer::new(scene_in(dir.path()), tools(), &fake, dir.path());

    let manifest_path = dir.path().join("robot.xml");
    let file = fs::File::create(&manifest_path).unwrap();
    let writer = ManifestFormat::Xml.writer(file, "robot.pov").unwrap();
    let report = Generator::new(renderer)
        .with_manifest(writer)
        .run(&robot_catalog())
        .unwrap();

    assert_eq!(report.frames_rendered, 216);
    assert_eq!(fake.trace_calls(), 216);

    let parsed = Manifest::from_file(&manifest_path).unwrap();
    assert_eq!(parsed, report.manifest);
    for mode in parsed.modes() {
        for frame in &mode.frames {
            assert!(dir.path().join(frame).is_file(), "{} missing", frame);
        }
    }

    let leftovers: Vec<_> = fs::read_dir(dir.path().join("robot"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains("-tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn check_sweep_reaches_ninety_degrees() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeTools::default();
    let renderer = RaytraceRenderer::new(scene_in(dir.path()), tools(), &fake, dir.path());

    let catalog: Vec<_> = robot_catalog()
        .into_iter()
        .filter(|m| m.name == "check_d")
        .collect();
    Generator::new(renderer).run(&catalog).unwrap();

    let seen = fake.options_seen.borrow();
    assert_eq!(seen.len(), 19);
    assert!(seen[9].contains("#declare RIGHT_ARM_ANGLE = 90.000000;"));
    assert!(seen[18].contains("#declare RIGHT_ARM_ANGLE = 0.000000;"));
}
