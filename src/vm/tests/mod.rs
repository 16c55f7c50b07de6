//! VM 模块测试
//!
//! 重写规则、燃料计量、卡住项的保存与并行批处理

mod engine;

use crate::block::Block;
use crate::reader::parse;
use crate::vm::{Outcome, Reducer, DEFAULT_QUOTA};

/// Read `text`, which must not mention any name.
pub(super) fn block(text: &str) -> Block {
    parse(text).unwrap()
}

/// Run `text` with the default quota.
pub(super) fn run(text: &str) -> Outcome {
    Reducer::new(block(text)).run(DEFAULT_QUOTA)
}

/// Rendered result of running `text` with the default quota.
pub(super) fn reduced(text: &str) -> String {
    run(text).block.to_string()
}
