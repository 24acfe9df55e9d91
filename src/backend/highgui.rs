use std::io::Write;

use image::GrayImage;
use log::trace;
use opencv::highgui;

use super::convert::{gray_to_mat, image_to_mat};
use crate::core::{RawParameter, RawParameters};
use crate::display::TuningDisplay;
use crate::error::Result;
use crate::source::StereoPair;

/// 滑动条所在窗口
pub const PARAMS_WINDOW: &str = "disp";
pub const LEFT_WINDOW: &str = "left";
pub const RIGHT_WINDOW: &str = "right";
pub const DISPARITY_WINDOW: &str = "disparity";

/// OpenCV highgui 窗口与滑动条
///
/// 滑动条不绑定回调, 每次迭代开始时轮询位置
#[derive(Debug, Default)]
pub struct HighGuiDisplay {
    windows_created: bool,
}

impl HighGuiDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TuningDisplay for HighGuiDisplay {
    fn bind(&mut self, params: &RawParameters) -> Result<()> {
        highgui::named_window(PARAMS_WINDOW, highgui::WINDOW_NORMAL)?;
        for p in RawParameter::ALL.iter() {
            highgui::create_trackbar(p.label(), PARAMS_WINDOW, None, p.slider_max(), None)?;
            highgui::set_trackbar_pos(p.label(), PARAMS_WINDOW, params.get(*p).max(0).min(p.slider_max()))?;
        }
        Ok(())
    }
    fn poll(&mut self, params: &mut RawParameters) -> Result<()> {
        for p in RawParameter::ALL.iter() {
            let pos = highgui::get_trackbar_pos(p.label(), PARAMS_WINDOW)?;
            params.set(*p, pos);
        }
        trace!("[highgui] polled trackbars: {:?}", params);
        Ok(())
    }
    fn show(&mut self, pair: &StereoPair, disparity: &GrayImage) -> Result<()> {
        if !self.windows_created {
            highgui::named_window(LEFT_WINDOW, highgui::WINDOW_AUTOSIZE)?;
            highgui::named_window(RIGHT_WINDOW, highgui::WINDOW_AUTOSIZE)?;
            highgui::named_window(DISPARITY_WINDOW, highgui::WINDOW_NORMAL)?;
            self.windows_created = true;
        }
        highgui::imshow(LEFT_WINDOW, &image_to_mat(&pair.left)?)?;
        highgui::imshow(RIGHT_WINDOW, &image_to_mat(&pair.right)?)?;
        highgui::imshow(DISPARITY_WINDOW, &gray_to_mat(disparity)?)?;
        Ok(())
    }
    fn wait(&mut self) -> Result<()> {
        print!("press any key to continue...");
        std::io::stdout().flush()?;
        highgui::wait_key(0)?;
        println!();
        Ok(())
    }
}
