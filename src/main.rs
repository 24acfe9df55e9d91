use log::info;

use stereo_tune::backend::{CalibratedRectifier, HighGuiDisplay, OpenCvBlockMatcher, OpenCvSemiGlobalMatcher};
use stereo_tune::cli::Options;
use stereo_tune::display::{Headless, TuningDisplay};
use stereo_tune::error::Result;
use stereo_tune::source::{Rectifier, StereoPair};
use stereo_tune::utils;
use stereo_tune::{MatcherInvoker, TuningLoop};

fn run<D: TuningDisplay>(options: &Options, display: D) -> Result<()> {
    let pair = StereoPair::load(&options.left, &options.right, options.algorithm)?.scaled(options.scale)?;

    let invoker = MatcherInvoker::new(
        OpenCvBlockMatcher::new()?,
        OpenCvSemiGlobalMatcher::new()?,
        options.algorithm,
    );
    let (pair, invoker, reprojector) = match options.calibration() {
        Some((intrinsics, extrinsics)) => {
            let rectified = CalibratedRectifier::from_files(intrinsics, extrinsics, options.scale)?.rectify(pair)?;
            (
                rectified.pair,
                invoker.with_rois(rectified.roi1, rectified.roi2),
                Some(rectified.reprojector),
            )
        }
        None => (pair, invoker, None),
    };

    let mut tuning = TuningLoop::new(invoker, display, pair)
        .with_params(options.initial_params())
        .with_morphology(options.morphology);
    if let Some(path) = &options.disparity_output {
        tuning = tuning.with_disparity_output(path.clone());
    }
    if let (Some(path), Some(reprojector)) = (&options.point_cloud_output, reprojector) {
        tuning = tuning.with_point_cloud_output(path.clone(), reprojector);
    }
    tuning.run()
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        if let Err(e) = Options::write_help(&mut std::io::stdout()) {
            println!("{}", e);
            std::process::exit(-1);
        }
        return;
    }
    let options = match Options::parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            if !e.use_stderr() {
                // --help / --version
                if e.print().is_err() {
                    std::process::exit(-1);
                }
                return;
            }
            println!("{}", e);
            std::process::exit(-1);
        }
    };
    let result = options
        .validate()
        .and_then(|_| utils::init_log(&options.log_level))
        .and_then(|_| {
            info!(
                "[main] algorithm: {}, scale: {}, morphology: {:?}",
                options.algorithm, options.scale, options.morphology
            );
            if options.no_display {
                run(&options, Headless)
            } else {
                run(&options, HighGuiDisplay::new())
            }
        });
    if let Err(e) = result {
        println!("{}", e);
        std::process::exit(-1);
    }
}
