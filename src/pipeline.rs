// src/pipeline.rs

use crate::config::PlotSettings;
use crate::data_analysis::frame_select::{frame_range, select_frame};
use crate::data_output::text_io::save_dat;
use crate::error::{Error, Result};
use crate::measurement::MeasurementSource;
use crate::plot_framework::RenderContext;
use crate::plot_functions::display_cropped::display_cropped_image;
use crate::plot_functions::display_image::display_image_in_actual_size;
use crate::plot_functions::plot_profile::plot_profile;
use crate::types::{ImageStack, Orientation, Uid};

pub fn dat_file_name(uid: &Uid) -> String {
    format!("{}.dat", uid.stem())
}

/// Fetch a measurement's detector frames and run every plot on them:
/// full-size and cropped displays of the selected frame, horizontal and
/// vertical profiles of event `settings.frame`, and a text dump of the
/// frame. The context's resolution is set from `settings.dpi` first.
///
/// Returns the events exactly as the source delivered them.
pub fn plot_eiger_for_srw(
    source: &dyn MeasurementSource,
    ctx: &mut RenderContext,
    uid: &str,
    settings: &PlotSettings,
) -> Result<Vec<ImageStack>> {
    ctx.set_dpi(settings.dpi)?;
    log::info!("Fields of {uid}: {:?}", source.fields(uid)?);

    let events = source.frames(uid, &settings.detector)?;
    let shapes: Vec<_> = events.iter().map(|e| e.dim()).collect();
    log::info!("{}: {} events, shapes {shapes:?}", settings.detector, events.len());

    let frame = select_frame(&events, settings.selection())?;
    // Profiles always follow `frame`, also when the display shows the mean.
    let event = events.get(settings.frame).ok_or(Error::FrameOutOfRange {
        index: settings.frame,
        available: events.len(),
    })?;
    match frame_range(&frame.view()) {
        Some((min, max)) => log::info!("min: {min}, max: {max}"),
        None => log::warn!("Selected frame has no finite samples."),
    }

    let label = Uid::single(uid);
    display_image_in_actual_size(ctx, &frame.view(), &label, &settings.display_options())?;
    display_cropped_image(ctx, &frame.view(), &label, &settings.crop_options())?;

    plot_profile(
        ctx,
        &event.view(),
        &label,
        Orientation::Horizontal,
        &settings.profile.horizontal,
    )?;
    plot_profile(
        ctx,
        &event.view(),
        &label,
        Orientation::Vertical,
        &settings.profile.vertical,
    )?;

    std::fs::create_dir_all(ctx.output_dir())?;
    save_dat(&frame.view(), ctx.output_path(&dat_file_name(&label)))?;

    Ok(events)
}


// src/pipeline.rs
