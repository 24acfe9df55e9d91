use std::path::Path;

use image::{imageops::FilterType, DynamicImage};
use log::debug;
use ndarray::Array3;

use crate::core::{Algorithm, DisparityMap, Roi};
use crate::error::{self, Error, Result};

/// 立体像对
#[derive(Clone, Debug)]
pub struct StereoPair {
    pub left: DynamicImage,
    pub right: DynamicImage,
}

impl StereoPair {
    pub fn new(left: DynamicImage, right: DynamicImage) -> Result<Self> {
        if left.width() == 0 || left.height() == 0 || right.width() == 0 || right.height() == 0 {
            return Err(Error::new(1001, error::ERROR_1001));
        }
        if left.width() != right.width() || left.height() != right.height() {
            return Err(Error::new(1008, error::ERROR_1008));
        }
        Ok(Self { left, right })
    }
    /// 读取像对, 块匹配读灰度图, 其余按原通道读取
    pub fn load<P: AsRef<Path>>(left: P, right: P, algorithm: Algorithm) -> Result<Self> {
        let left = image::open(left.as_ref())
            .map_err(|e| Error::with_detail(1005, error::ERROR_1005, e))?;
        let right = image::open(right.as_ref())
            .map_err(|e| Error::with_detail(1006, error::ERROR_1006, e))?;
        let (left, right) = if algorithm.wants_grayscale() {
            (
                DynamicImage::ImageLuma8(left.into_luma8()),
                DynamicImage::ImageLuma8(right.into_luma8()),
            )
        } else {
            (left, right)
        };
        debug!(
            "[source] loaded stereo pair {}x{}, color: {:?}",
            left.width(),
            left.height(),
            left.color()
        );
        Self::new(left, right)
    }
    pub fn width(&self) -> u32 {
        self.left.width()
    }
    pub fn height(&self) -> u32 {
        self.left.height()
    }
    /// 等比例缩放, 缩小用区域插值, 放大用三次插值
    pub fn scaled(self, scale: f32) -> Result<Self> {
        if scale == 1f32 {
            return Ok(self);
        }
        let (width, height) = scaled_size(self.width(), self.height(), scale);
        if width == 0 || height == 0 {
            return Err(Error::new(1001, error::ERROR_1001));
        }
        let filter = if scale < 1f32 {
            FilterType::Triangle
        } else {
            FilterType::CatmullRom
        };
        debug!(
            "[source] scale {} -> {}x{}, filter: {:?}",
            scale, width, height, filter
        );
        Self::new(
            self.left.resize_exact(width, height, filter),
            self.right.resize_exact(width, height, filter),
        )
    }
}

/// 缩放后尺寸, 四舍五入
pub fn scaled_size(width: u32, height: u32, scale: f32) -> (u32, u32) {
    (
        (width as f64 * scale as f64).round() as u32,
        (height as f64 * scale as f64).round() as u32,
    )
}

/// 视差图重投影为三维点(H x W x 3)
pub trait Reprojector {
    fn reproject(&self, disparity: &DisparityMap) -> Result<Array3<f32>>;
}

/// 校正结果
pub struct Rectified {
    pub pair: StereoPair,
    pub roi1: Roi,
    pub roi2: Roi,
    pub reprojector: Box<dyn Reprojector>,
}

/// 依据标定参数对像对做校正
pub trait Rectifier {
    fn rectify(&self, pair: StereoPair) -> Result<Rectified>;
}
