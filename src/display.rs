use image::GrayImage;

use crate::core::RawParameters;
use crate::error::Result;
use crate::source::StereoPair;

/// 显示/交互协作方: 窗口, 滑动条和按键等待
pub trait TuningDisplay {
    /// 按参数当前值创建滑动条
    fn bind(&mut self, params: &RawParameters) -> Result<()>;
    /// 读取滑动条位置并通过 setter 写入参数
    fn poll(&mut self, params: &mut RawParameters) -> Result<()>;
    /// 显示左右图和清理后的视差图
    fn show(&mut self, pair: &StereoPair, disparity: &GrayImage) -> Result<()>;
    /// 阻塞直到允许下一次迭代
    fn wait(&mut self) -> Result<()>;
}

/// --no-display: 不创建窗口, 不阻塞
#[derive(Copy, Clone, Debug, Default)]
pub struct Headless;

impl TuningDisplay for Headless {
    fn bind(&mut self, _params: &RawParameters) -> Result<()> {
        Ok(())
    }
    fn poll(&mut self, _params: &mut RawParameters) -> Result<()> {
        Ok(())
    }
    fn show(&mut self, _pair: &StereoPair, _disparity: &GrayImage) -> Result<()> {
        Ok(())
    }
    fn wait(&mut self) -> Result<()> {
        Ok(())
    }
}
