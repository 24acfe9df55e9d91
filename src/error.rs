use std::fmt;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn new(code: i32, message: &str) -> Self {
        Self {
            code: code,
            message: message.to_string(),
        }
    }
    /// 附带具体原因(文件名/底层错误信息)的错误
    pub fn with_detail(code: i32, message: &str, detail: impl fmt::Display) -> Self {
        Self {
            code: code,
            message: format!("{} {}", message, detail),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::with_detail(1009, ERROR_1009, e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Self::with_detail(1009, ERROR_1009, e)
    }
}

#[cfg(feature = "opencv")]
impl From<opencv::Error> for Error {
    fn from(e: opencv::Error) -> Self {
        Self::with_detail(1010, ERROR_1010, e)
    }
}

impl std::error::Error for Error {}

pub type Result<T, E = Error> = ::std::result::Result<T, E>;

pub static ERROR_1001: &'static str = "Image width or height can not be less than 1";
pub static ERROR_1002: &'static str = "Command-line parameter error: either both intrinsic and extrinsic parameters must be specified, or none of them (when the stereo pair is already rectified)";
pub static ERROR_1003: &'static str = "Command-line parameter error: extrinsic and intrinsic parameters must be specified to compute the point cloud";
pub static ERROR_1004: &'static str = "Command-line parameter error: The scale factor (--scale=<...>) must be a positive floating-point number";
pub static ERROR_1005: &'static str = "Command-line parameter error: could not load the first input image file";
pub static ERROR_1006: &'static str = "Command-line parameter error: could not load the second input image file";
pub static ERROR_1007: &'static str = "Failed to open file";
pub static ERROR_1008: &'static str = "Left and right images must have the same size";
pub static ERROR_1009: &'static str = "I/O error:";
pub static ERROR_1010: &'static str = "Vision library error:";
pub static ERROR_1011: &'static str = "Failed to initialize logging:";
pub static ERROR_1012: &'static str = "Unsupported matrix layout:";
