use getset::{CopyGetters, Getters, MutGetters, Setters};

/// 有效像素区域, 宽高为0表示整幅图像
#[derive(Getters, Setters, MutGetters, CopyGetters, Copy, Clone, Debug, PartialEq, Eq)]
pub struct Roi {
    #[getset(get_copy = "pub", set = "pub")]
    x: i32,
    #[getset(get_copy = "pub", set = "pub")]
    y: i32,
    #[getset(get_copy = "pub", set = "pub")]
    width: i32,
    #[getset(get_copy = "pub", set = "pub")]
    height: i32,
}
impl Roi {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
impl Default for Roi {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        }
    }
}
