use image::GrayImage;
use imageproc::morphology::{grayscale_dilate, grayscale_erode};

use crate::core::StructuringElement;

/// 腐蚀与膨胀的先后顺序
#[derive(clap::ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MorphologyOrder {
    /// 先腐蚀再膨胀(开运算)
    #[value(name = "erode-dilate")]
    ErodeThenDilate,
    /// 先膨胀再腐蚀(闭运算)
    #[value(name = "dilate-erode")]
    DilateThenErode,
}

impl Default for MorphologyOrder {
    fn default() -> Self {
        MorphologyOrder::ErodeThenDilate
    }
}

pub fn erode(image: &GrayImage, element: &StructuringElement) -> GrayImage {
    if element.is_identity() {
        return image.clone();
    }
    grayscale_erode(image, &element.mask())
}

pub fn dilate(image: &GrayImage, element: &StructuringElement) -> GrayImage {
    if element.is_identity() {
        return image.clone();
    }
    grayscale_dilate(image, &element.mask())
}

/// 对 8 位视差显示图做形态学清理
pub fn clean_up(
    image: &GrayImage,
    erosion: &StructuringElement,
    dilation: &StructuringElement,
    order: MorphologyOrder,
) -> GrayImage {
    match order {
        MorphologyOrder::ErodeThenDilate => dilate(&erode(image, erosion), dilation),
        MorphologyOrder::DilateThenErode => erode(&dilate(image, dilation), erosion),
    }
}
