use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use ndarray::prelude::*;

use crate::error::Result;

/// 重投影时缺失视差被放到该深度
pub const MAX_Z: f64 = 1.0e4;

/// 深度等于(浮点误差内) 或超过 MAX_Z 的点视为无效
pub fn is_valid_depth(z: f32) -> bool {
    let z = z as f64;
    !((z - MAX_Z).abs() < f32::EPSILON as f64 || z.abs() > MAX_Z)
}

/// 写出点云, 每行一个 "x y z" 点, 返回写出的点数
///
/// ### 参数
/// * points: H x W x 3 的重投影坐标
pub fn write_xyz<W: Write>(writer: W, points: &ArrayView3<f32>) -> Result<usize> {
    let mut writer = BufWriter::new(writer);
    let mut written = 0usize;
    for row in points.outer_iter() {
        for p in row.outer_iter() {
            if !is_valid_depth(p[2]) {
                continue;
            }
            writeln!(writer, "{:.6} {:.6} {:.6}", p[0], p[1], p[2])?;
            written += 1;
        }
    }
    writer.flush()?;
    Ok(written)
}

pub fn save_xyz<P: AsRef<Path>>(path: P, points: &ArrayView3<f32>) -> Result<usize> {
    let sw = stopwatch::Stopwatch::start_new();
    let written = write_xyz(File::create(path.as_ref())?, points)?;
    debug!(
        "[point_cloud] stored {} points to {:?}. elapse time: {}ms",
        written,
        path.as_ref(),
        sw.elapsed_ms()
    );
    Ok(written)
}
