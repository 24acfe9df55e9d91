use std::path::Path;

use log::{debug, info};
use ndarray::Array3;
use opencv::{
    calib3d,
    core::{self, FileStorage, Mat, Rect, Scalar, Size},
    imgproc,
    prelude::*,
};

use super::convert::{disparity_to_mat, image_to_mat, mat_to_image, mat_to_points, rect_to_roi};
use crate::core::{DisparityMap, DISP_SCALE};
use crate::error::{self, Error, Result};
use crate::source::{Rectified, Rectifier, Reprojector, StereoPair};

/// 双目标定参数
pub struct Calibration {
    /// 左右相机内参矩阵
    pub m1: Mat,
    pub m2: Mat,
    /// 左右相机畸变系数
    pub d1: Mat,
    pub d2: Mat,
    /// 右相机相对左相机的旋转
    pub r: Mat,
    /// 右相机相对左相机的平移
    pub t: Mat,
}

fn open_storage(path: &Path) -> Result<FileStorage> {
    let name = path.to_string_lossy();
    let fs = FileStorage::new(&name, core::FileStorage_READ, "")?;
    if !fs.is_opened()? {
        return Err(Error::with_detail(1007, error::ERROR_1007, name));
    }
    Ok(fs)
}

fn read_mat(fs: &FileStorage, key: &str) -> Result<Mat> {
    Ok(fs.get(key)?.mat()?)
}

impl Calibration {
    /// 读取内参(M1 D1 M2 D2)与外参(R T)文件, 内参矩阵按图像缩放系数缩放
    pub fn load(intrinsics: &Path, extrinsics: &Path, scale: f32) -> Result<Self> {
        let fs = open_storage(intrinsics)?;
        let mut m1 = Mat::default();
        let mut m2 = Mat::default();
        read_mat(&fs, "M1")?.convert_to(&mut m1, -1, scale as f64, 0.)?;
        read_mat(&fs, "M2")?.convert_to(&mut m2, -1, scale as f64, 0.)?;
        let d1 = read_mat(&fs, "D1")?;
        let d2 = read_mat(&fs, "D2")?;

        let fs = open_storage(extrinsics)?;
        let r = read_mat(&fs, "R")?;
        let t = read_mat(&fs, "T")?;
        debug!(
            "[calibration] loaded {:?} and {:?}, scale: {}",
            intrinsics, extrinsics, scale
        );
        Ok(Self { m1, m2, d1, d2, r, t })
    }
}

/// 基于标定文件的校正器
pub struct CalibratedRectifier {
    calibration: Calibration,
}

impl CalibratedRectifier {
    pub fn new(calibration: Calibration) -> Self {
        Self { calibration }
    }
    pub fn from_files(intrinsics: &Path, extrinsics: &Path, scale: f32) -> Result<Self> {
        Ok(Self::new(Calibration::load(intrinsics, extrinsics, scale)?))
    }
}

fn remap(image: &Mat, map1: &Mat, map2: &Mat) -> Result<Mat> {
    let mut dst = Mat::default();
    imgproc::remap(
        image,
        &mut dst,
        map1,
        map2,
        imgproc::INTER_LINEAR,
        core::BORDER_CONSTANT,
        Scalar::default(),
    )?;
    Ok(dst)
}

impl Rectifier for CalibratedRectifier {
    fn rectify(&self, pair: StereoPair) -> Result<Rectified> {
        let c = &self.calibration;
        let size = Size::new(pair.width() as i32, pair.height() as i32);
        let (mut r1, mut r2, mut p1, mut p2, mut q) =
            (Mat::default(), Mat::default(), Mat::default(), Mat::default(), Mat::default());
        let (mut roi1, mut roi2) = (Rect::default(), Rect::default());
        calib3d::stereo_rectify(
            &c.m1,
            &c.d1,
            &c.m2,
            &c.d2,
            size,
            &c.r,
            &c.t,
            &mut r1,
            &mut r2,
            &mut p1,
            &mut p2,
            &mut q,
            calib3d::CALIB_ZERO_DISPARITY,
            -1.,
            size,
            &mut roi1,
            &mut roi2,
        )?;

        let (mut map11, mut map12, mut map21, mut map22) =
            (Mat::default(), Mat::default(), Mat::default(), Mat::default());
        calib3d::init_undistort_rectify_map(&c.m1, &c.d1, &r1, &p1, size, core::CV_16SC2, &mut map11, &mut map12)?;
        calib3d::init_undistort_rectify_map(&c.m2, &c.d2, &r2, &p2, size, core::CV_16SC2, &mut map21, &mut map22)?;

        let left = remap(&image_to_mat(&pair.left)?, &map11, &map12)?;
        let right = remap(&image_to_mat(&pair.right)?, &map21, &map22)?;
        info!(
            "[rectify] rectified {}x{}, roi1: {:?}, roi2: {:?}",
            size.width, size.height, roi1, roi2
        );
        Ok(Rectified {
            pair: StereoPair::new(mat_to_image(&left)?, mat_to_image(&right)?)?,
            roi1: rect_to_roi(roi1),
            roi2: rect_to_roi(roi2),
            reprojector: Box::new(OpenCvReprojector { q }),
        })
    }
}

/// 使用校正得到的 Q 矩阵重投影
pub struct OpenCvReprojector {
    q: Mat,
}

impl Reprojector for OpenCvReprojector {
    fn reproject(&self, disparity: &DisparityMap) -> Result<Array3<f32>> {
        // 定点视差还原为像素单位
        let mut disp = Mat::default();
        disparity_to_mat(disparity)?.convert_to(&mut disp, core::CV_32F, 1. / DISP_SCALE as f64, 0.)?;
        let mut xyz = Mat::default();
        calib3d::reproject_image_to_3d(&disp, &mut xyz, &self.q, true, core::CV_32F)?;
        mat_to_points(&xyz)
    }
}

#[cfg(test)]
mod tests {
    use super::{Calibration, CalibratedRectifier};
    use crate::core::DisparityMap;
    use crate::error::Result;
    use crate::source::{Rectifier, StereoPair};
    use image::{DynamicImage, GrayImage, Luma};
    use ndarray::Array2;
    use opencv::core::{self, Mat, Scalar};
    use opencv::prelude::*;

    fn filled(rows: i32, cols: i32, values: &[(i32, i32, f64)]) -> Result<Mat> {
        let mut mat = Mat::new_rows_cols_with_default(rows, cols, core::CV_64F, Scalar::all(0.))?;
        for (r, c, v) in values.iter() {
            *mat.at_2d_mut::<f64>(*r, *c)? = *v;
        }
        Ok(mat)
    }

    /// 无畸变, 旋转为单位阵, 基线沿 x 轴
    fn ideal_calibration() -> Result<Calibration> {
        let camera = [(0, 0, 100.), (1, 1, 100.), (0, 2, 40.), (1, 2, 30.), (2, 2, 1.)];
        Ok(Calibration {
            m1: filled(3, 3, &camera)?,
            m2: filled(3, 3, &camera)?,
            d1: filled(1, 5, &[])?,
            d2: filled(1, 5, &[])?,
            r: filled(3, 3, &[(0, 0, 1.), (1, 1, 1.), (2, 2, 1.)])?,
            t: filled(3, 1, &[(0, 0, -1.)])?,
        })
    }

    #[test]
    fn test_rectify_and_reproject() -> Result<()> {
        let gray = GrayImage::from_fn(80, 60, |x, y| Luma([((x * 3 + y * 5) % 256) as u8]));
        let pair = StereoPair::new(DynamicImage::ImageLuma8(gray.clone()), DynamicImage::ImageLuma8(gray))?;
        let rectified = CalibratedRectifier::new(ideal_calibration()?).rectify(pair)?;
        assert_eq!((rectified.pair.width(), rectified.pair.height()), (80, 60));
        assert!(rectified.pair.left.as_luma8().is_some());

        // 视差 2 像素
        let disparity = DisparityMap::new(Array2::from_elem((60, 80), 32i16));
        let points = rectified.reprojector.reproject(&disparity)?;
        assert_eq!(points.dim(), (60, 80, 3));
        assert!(points.iter().all(|v| v.is_finite()));
        Ok(())
    }

    #[test]
    fn test_missing_calibration_file() {
        let dir = std::env::temp_dir().join(format!("stereo-tune-calib-{}", std::process::id()));
        let missing = dir.join("missing.yml");
        assert!(CalibratedRectifier::from_files(&missing, &missing, 1.0).is_err());
    }
}
