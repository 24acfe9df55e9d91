use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};

use crate::error::{self, Error, Result};

/// 日志级别, 未识别的级别按 info 处理
pub fn level_filter(level: &str) -> LevelFilter {
    if level == "trace" {
        LevelFilter::Trace
    } else if level == "debug" {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

pub fn init_log(level: &str) -> Result<()> {
    let stdout: ConsoleAppender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{h({l})}] - {m}{n}",
        )))
        .build();
    let log_config = log4rs::config::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level_filter(level)))
        .map_err(|e| Error::with_detail(1011, error::ERROR_1011, e))?;
    log4rs::init_config(log_config).map_err(|e| Error::with_detail(1011, error::ERROR_1011, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::level_filter;
    use log::LevelFilter;

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter("trace"), LevelFilter::Trace);
        assert_eq!(level_filter("debug"), LevelFilter::Debug);
        assert_eq!(level_filter("info"), LevelFilter::Info);
        assert_eq!(level_filter("verbose"), LevelFilter::Info);
    }
}
