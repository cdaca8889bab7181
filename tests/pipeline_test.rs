// tests/pipeline_test.rs

use std::cell::RefCell;
use std::rc::Rc;

use ndarray::Array3;

use srw_image_tools::config::ProfileSettings;
use srw_image_tools::data_output::text_io::load_dat;
use srw_image_tools::plot_framework::Figure;
use srw_image_tools::plot_functions::plot_profile::ProfileOptions;
use srw_image_tools::{
    plot_eiger_for_srw, CropRect, FigureViewer, InMemorySource, PlotSettings, RenderContext,
    Result,
};

struct NameLog(Rc<RefCell<Vec<String>>>);

impl FigureViewer for NameLog {
    fn show(&mut self, figure: &Figure) -> Result<()> {
        self.0.borrow_mut().push(figure.name().to_string());
        Ok(())
    }
}

fn small_settings() -> PlotSettings {
    PlotSettings {
        crop: CropRect::new(8, 40, 4, 36),
        profile: ProfileSettings {
            horizontal: ProfileOptions::at(20),
            vertical: ProfileOptions::at(10),
        },
        ..Default::default()
    }
}

fn source_with_two_events() -> (InMemorySource, Vec<Array3<f64>>) {
    let first = Array3::from_shape_fn((2, 48, 64), |(f, r, c)| 1.0 + (f * 10 + r + c) as f64);
    let second = first.mapv(|v| v * 2.0);
    let mut source = InMemorySource::new();
    source.insert("scan42", "eiger4m_single_image", vec![first.clone(), second.clone()]);
    (source, vec![first, second])
}

#[test]
fn test_pipeline_writes_every_output() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let (source, events) = source_with_two_events();
    let mut ctx = RenderContext::new(dir.path());

    let returned = plot_eiger_for_srw(&source, &mut ctx, "scan42", &small_settings()).unwrap();
    assert_eq!(returned, events);

    for name in [
        "scan42.tif",
        "scan42_cropped.tif",
        "scan42_profile_horiz_image.tif",
        "scan42_profile_horiz_intensity.tif",
        "scan42_profile_vert_image.tif",
        "scan42_profile_vert_intensity.tif",
        "scan42.dat",
    ] {
        assert!(dir.path().join(name).is_file(), "missing {name}");
    }

    let dat = load_dat(dir.path().join("scan42.dat")).unwrap();
    assert_eq!(dat, events[0].index_axis(ndarray::Axis(0), 0).to_owned());
}

#[test]
fn test_pipeline_mean_writes_mean_frame() {
    let dir = tempfile::tempdir().unwrap();
    let (source, events) = source_with_two_events();
    let mut ctx = RenderContext::new(dir.path());
    let settings = PlotSettings {
        mean: true,
        ..small_settings()
    };

    plot_eiger_for_srw(&source, &mut ctx, "scan42", &settings).unwrap();

    let dat = load_dat(dir.path().join("scan42.dat")).unwrap();
    let expected = events[0].mean_axis(ndarray::Axis(0)).unwrap();
    assert_eq!(dat.dim(), expected.dim());
    for (a, b) in dat.iter().zip(expected.iter()) {
        approx::assert_relative_eq!(*a, *b, max_relative = 1e-15);
    }
}

#[test]
fn test_mean_display_profiles_the_chosen_event() {
    let dir = tempfile::tempdir().unwrap();
    let first = Array3::from_shape_fn((2, 48, 64), |(f, r, c)| 1.0 + (f * 10 + r + c) as f64);
    let second = Array3::from_shape_fn((3, 48, 64), |(f, r, c)| 5.0 + (f + r * c) as f64);
    let mut source = InMemorySource::new();
    source.insert("scan42", "eiger4m_single_image", vec![first.clone(), second]);
    let shown = Rc::new(RefCell::new(Vec::new()));
    let mut ctx = RenderContext::new(dir.path()).with_viewer(NameLog(shown.clone()));
    let settings = PlotSettings {
        mean: true,
        frame: 1,
        dpi: 40.0,
        ..small_settings()
    };

    plot_eiger_for_srw(&source, &mut ctx, "scan42", &settings).unwrap();
    assert_eq!(ctx.dpi(), 40.0);

    // Three profiled frames per orientation means event 1 was used.
    let shown = shown.borrow();
    let profiled = shown.iter().filter(|name| name.starts_with("scan42 #")).count();
    assert_eq!(profiled, 6);
    assert!(shown.iter().any(|name| name == "scan42 #2 frame 2"));

    // The displayed and saved frame is still the mean of event 0.
    let dat = load_dat(dir.path().join("scan42.dat")).unwrap();
    let expected = first.mean_axis(ndarray::Axis(0)).unwrap();
    for (a, b) in dat.iter().zip(expected.iter()) {
        approx::assert_relative_eq!(*a, *b, max_relative = 1e-15);
    }
}

#[test]
fn test_pipeline_rejects_crop_outside_frame() {
    let dir = tempfile::tempdir().unwrap();
    let (source, _) = source_with_two_events();
    let mut ctx = RenderContext::new(dir.path());
    // Default crop needs a full Eiger frame.
    let settings = PlotSettings {
        profile: small_settings().profile,
        ..Default::default()
    };
    let err = plot_eiger_for_srw(&source, &mut ctx, "scan42", &settings);
    assert!(err.is_err());
    assert!(!dir.path().join("scan42.dat").exists());
}
