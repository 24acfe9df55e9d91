use image::GrayImage;
use ndarray::{parallel::prelude::*, prelude::*};
use ndarray_stats::QuantileExt;

use crate::error::{self, Error, Result};

/// 定点视差的小数位缩放, 匹配器输出的视差为真实视差 * 16
pub const DISP_SCALE: i32 = 16;

/// 匹配器输出的定点视差图(行优先, H x W)
#[derive(Clone, Debug, PartialEq)]
pub struct DisparityMap {
    data: Array2<i16>,
}

impl DisparityMap {
    pub fn new(data: Array2<i16>) -> Self {
        Self { data }
    }
    pub fn from_raw(width: u32, height: u32, raw: Vec<i16>) -> Result<Self> {
        let data = Array2::from_shape_vec((height as usize, width as usize), raw)
            .map_err(|e| Error::with_detail(1012, error::ERROR_1012, e))?;
        Ok(Self { data })
    }
    pub fn width(&self) -> u32 {
        self.data.ncols() as u32
    }
    pub fn height(&self) -> u32 {
        self.data.nrows() as u32
    }
    pub fn view(&self) -> ArrayView2<i16> {
        self.data.view()
    }
    /// 视差最小/最大定点值, 空图返回 None
    pub fn value_range(&self) -> Option<(i16, i16)> {
        match (self.data.min(), self.data.max()) {
            (Ok(min), Ok(max)) => Some((*min, *max)),
            _ => None,
        }
    }
    /// 转换为 8 位显示图, 每个像素 round(d * scale) 并截断到 [0, 255]
    pub fn to_display(&self, scale: f64) -> GrayImage {
        let (height, width) = self.data.dim();
        let mut ret = Array2::<u8>::zeros((height, width));
        par_azip!((
        r in &mut ret, d in &self.data){
            *r = (*d as f64 * scale).round().max(0f64).min(255f64) as u8;
        });
        GrayImage::from_raw(width as u32, height as u32, ret.into_raw_vec_and_offset().0)
            .unwrap_or_else(|| GrayImage::new(width as u32, height as u32))
    }
}
