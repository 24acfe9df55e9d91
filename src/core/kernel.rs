use image::{GrayImage, Luma};
use imageproc::morphology::Mask;

/// 结构元素半径上限, 保证核尺寸 2r+1 不超过 255
pub const MAX_KERNEL_RADIUS: i32 = 127;

/// 形态学结构元素, 椭圆形, 尺寸 (2r+1) x (2r+1), 锚点 (r, r)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StructuringElement {
    radius: u8,
}

impl StructuringElement {
    /// 由原始半径构建, 负数按 0 处理, 超出上限截断
    pub fn from_radius(radius: i32) -> Self {
        Self {
            radius: radius.max(0).min(MAX_KERNEL_RADIUS) as u8,
        }
    }
    pub fn radius(&self) -> u8 {
        self.radius
    }
    /// 核边长
    pub fn size(&self) -> u32 {
        2 * self.radius as u32 + 1
    }
    pub fn anchor(&self) -> (u8, u8) {
        (self.radius, self.radius)
    }
    /// 半径为0时核只有锚点本身, 形态学操作不改变图像
    pub fn is_identity(&self) -> bool {
        self.radius == 0
    }
    /// 生成椭圆核图像, 非零像素属于结构元素
    ///
    /// 逐行计算半宽 dx = round(r * sqrt(r^2 - dy^2) / r)
    pub fn to_image(&self) -> GrayImage {
        let size = self.size();
        let r = self.radius as i32;
        let mut kernel = GrayImage::new(size, size);
        let inv_r2 = if r > 0 { 1f64 / (r * r) as f64 } else { 0f64 };
        for y in 0..size as i32 {
            let dy = y - r;
            if dy.abs() > r {
                continue;
            }
            let dx = (r as f64 * (((r * r - dy * dy) as f64) * inv_r2).sqrt()).round() as i32;
            let x1 = (r - dx).max(0);
            let x2 = (r + dx + 1).min(size as i32);
            for x in x1..x2 {
                kernel.put_pixel(x as u32, y as u32, Luma([255u8]));
            }
        }
        kernel
    }
    pub fn mask(&self) -> Mask {
        Mask::from_image(&self.to_image(), self.radius, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::StructuringElement;

    #[test]
    fn test_size_and_anchor() {
        let se = StructuringElement::from_radius(3);
        assert_eq!(se.size(), 7);
        assert_eq!(se.anchor(), (3, 3));
        assert_eq!(StructuringElement::from_radius(-4).radius(), 0);
        assert_eq!(StructuringElement::from_radius(1000).size(), 255);
    }

    #[test]
    fn test_radius_zero_is_single_pixel() {
        let kernel = StructuringElement::from_radius(0).to_image();
        assert_eq!(kernel.dimensions(), (1, 1));
        assert_eq!(kernel.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_ellipse_is_symmetric() {
        let se = StructuringElement::from_radius(4);
        let kernel = se.to_image();
        let n = se.size();
        for y in 0..n {
            for x in 0..n {
                let v = kernel.get_pixel(x, y)[0];
                assert_eq!(v, kernel.get_pixel(n - 1 - x, y)[0]);
                assert_eq!(v, kernel.get_pixel(x, n - 1 - y)[0]);
            }
        }
        // 中心行和中心列全部属于结构元素
        for i in 0..n {
            assert_eq!(kernel.get_pixel(i, 4)[0], 255);
            assert_eq!(kernel.get_pixel(4, i)[0], 255);
        }
        // 角点不属于椭圆
        assert_eq!(kernel.get_pixel(0, 0)[0], 0);
    }
}
