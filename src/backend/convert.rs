//! image/ndarray 与 OpenCV Mat 之间的转换

use image::{DynamicImage, GrayImage};
use ndarray::Array3;
use opencv::{
    core::{self, Mat, Rect, Scalar, Vec3f},
    prelude::*,
};

use crate::core::{DisparityMap, Roi};
use crate::error::{self, Error, Result};

fn new_mat(rows: u32, cols: u32, typ: i32, bytes: &[u8]) -> Result<Mat> {
    let mut mat = Mat::new_rows_cols_with_default(rows as i32, cols as i32, typ, Scalar::all(0.))?;
    mat.data_bytes_mut()?.copy_from_slice(bytes);
    Ok(mat)
}

pub fn gray_to_mat(image: &GrayImage) -> Result<Mat> {
    new_mat(image.height(), image.width(), core::CV_8UC1, image.as_raw())
}

/// 灰度图转 CV_8UC1, 其余转 CV_8UC3 (BGR)
pub fn image_to_mat(image: &DynamicImage) -> Result<Mat> {
    match image {
        DynamicImage::ImageLuma8(gray) => gray_to_mat(gray),
        other => {
            let rgb = other.to_rgb8();
            let mut bgr = rgb.into_raw();
            for pixel in bgr.chunks_exact_mut(3) {
                pixel.swap(0, 2);
            }
            new_mat(image.height(), image.width(), core::CV_8UC3, &bgr)
        }
    }
}

/// CV_8UC1 / CV_8UC3 (BGR) 转回 image
pub fn mat_to_image(mat: &Mat) -> Result<DynamicImage> {
    let (rows, cols) = (mat.rows() as u32, mat.cols() as u32);
    let bytes = mat.data_bytes()?.to_vec();
    let typ = mat.typ();
    if typ == core::CV_8UC1 {
        GrayImage::from_raw(cols, rows, bytes)
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(|| Error::with_detail(1012, error::ERROR_1012, typ))
    } else if typ == core::CV_8UC3 {
        let mut rgb = bytes;
        for pixel in rgb.chunks_exact_mut(3) {
            pixel.swap(0, 2);
        }
        image::RgbImage::from_raw(cols, rows, rgb)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| Error::with_detail(1012, error::ERROR_1012, typ))
    } else {
        Err(Error::with_detail(1012, error::ERROR_1012, typ))
    }
}

/// CV_16S 视差
pub fn mat_to_disparity(mat: &Mat) -> Result<DisparityMap> {
    if mat.typ() != core::CV_16SC1 {
        return Err(Error::with_detail(1012, error::ERROR_1012, mat.typ()));
    }
    DisparityMap::from_raw(
        mat.cols() as u32,
        mat.rows() as u32,
        mat.data_typed::<i16>()?.to_vec(),
    )
}

pub fn disparity_to_mat(disparity: &DisparityMap) -> Result<Mat> {
    let mut mat = Mat::new_rows_cols_with_default(
        disparity.height() as i32,
        disparity.width() as i32,
        core::CV_16SC1,
        Scalar::all(0.),
    )?;
    let dst = mat.data_typed_mut::<i16>()?;
    for (d, s) in dst.iter_mut().zip(disparity.view().iter()) {
        *d = *s;
    }
    Ok(mat)
}

/// CV_32FC3 三维点
pub fn mat_to_points(mat: &Mat) -> Result<Array3<f32>> {
    let (rows, cols) = (mat.rows() as usize, mat.cols() as usize);
    let data = mat.data_typed::<Vec3f>()?;
    Ok(Array3::from_shape_fn((rows, cols, 3), |(y, x, c)| {
        data[y * cols + x][c]
    }))
}

pub fn roi_to_rect(roi: Roi) -> Rect {
    Rect::new(roi.x(), roi.y(), roi.width(), roi.height())
}

pub fn rect_to_roi(rect: Rect) -> Roi {
    Roi::new(rect.x, rect.y, rect.width, rect.height)
}
